//! Playbook loading and run configuration.
//!
//! A playbook describes one site-generation run: where content comes from,
//! which UI bundle to use, and where output goes. It is assembled from a TOML
//! file, process environment overrides, and invocation arguments, in that
//! order of increasing precedence.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Context as _;
use serde::Deserialize;

/// Configuration for one site-generation run.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Playbook {
    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub markdown: MarkdownSection,
}

/// Site-level settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,

    /// Public base URL of the site. When unset, URL-dependent output (the
    /// 404 page) is skipped.
    pub url: Option<String>,

    #[serde(default = "default_start_page")]
    pub start_page: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            url: None,
            start_page: default_start_page(),
        }
    }
}

/// Content sources to aggregate.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ContentConfig {
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

/// A single content source directory.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub dir: PathBuf,

    /// Component the source's documents belong to.
    #[serde(default = "default_component")]
    pub component: String,

    #[serde(default = "default_version")]
    pub version: String,
}

impl SourceConfig {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            component: default_component(),
            version: default_version(),
        }
    }
}

/// UI bundle settings.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UiConfig {
    /// Directory holding templates and static assets. When unset the
    /// compiled-in default bundle is used.
    pub bundle_dir: Option<PathBuf>,
}

/// Output settings.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Remove the output directory before publishing.
    #[serde(default)]
    pub clean: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            clean: false,
        }
    }
}

/// Document-processing settings as written in the playbook file.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownSection {
    #[serde(default)]
    pub attributes: HashMap<String, String>,

    #[serde(default = "default_highlight")]
    pub highlight: bool,
}

impl Default for MarkdownSection {
    fn default() -> Self {
        Self {
            attributes: HashMap::new(),
            highlight: default_highlight(),
        }
    }
}

fn default_title() -> String {
    "Documentation".to_string()
}
fn default_start_page() -> String {
    "index".to_string()
}
fn default_component() -> String {
    "ROOT".to_string()
}
fn default_version() -> String {
    "latest".to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("build/site")
}
fn default_highlight() -> bool {
    true
}

/// Invocation arguments for one run.
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Path to the playbook file. Optional; all settings have defaults.
    pub playbook: Option<PathBuf>,

    pub output_dir: Option<PathBuf>,
    pub site_url: Option<String>,
    pub site_title: Option<String>,

    /// Extra content source directories appended to the playbook's sources.
    pub sources: Vec<PathBuf>,
}

/// Build a playbook from invocation arguments and the process environment.
///
/// Precedence, lowest to highest: playbook file, `LECTERN_*` environment
/// entries, invocation arguments.
pub fn build_playbook(
    args: &GenerateArgs,
    env: &HashMap<String, String>,
) -> anyhow::Result<Playbook> {
    let mut playbook = match &args.playbook {
        Some(path) if path.exists() => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read playbook {}", path.display()))?;
            toml::from_str(&raw)
                .with_context(|| format!("failed to parse playbook {}", path.display()))?
        }
        Some(path) => anyhow::bail!("playbook not found: {}", path.display()),
        None => Playbook::default(),
    };

    if let Some(url) = env.get("LECTERN_SITE_URL") {
        playbook.site.url = Some(url.clone());
    }
    if let Some(title) = env.get("LECTERN_SITE_TITLE") {
        playbook.site.title = title.clone();
    }
    if let Some(dir) = env.get("LECTERN_OUTPUT_DIR") {
        playbook.output.dir = PathBuf::from(dir);
    }

    if let Some(url) = &args.site_url {
        playbook.site.url = Some(url.clone());
    }
    if let Some(title) = &args.site_title {
        playbook.site.title = title.clone();
    }
    if let Some(dir) = &args.output_dir {
        playbook.output.dir = dir.clone();
    }
    for dir in &args.sources {
        playbook.content.sources.push(SourceConfig::new(dir));
    }

    // An empty URL means "no public URL configured".
    if playbook.site.url.as_deref() == Some("") {
        playbook.site.url = None;
    }

    Ok(playbook)
}

/// Resolved document-processing configuration threaded through
/// classification and conversion.
#[derive(Debug, Clone, Default)]
pub struct MarkdownConfig {
    pub attributes: HashMap<String, String>,
    pub highlight: bool,
}

/// Resolve the document-processing configuration from a playbook.
///
/// Site-level values are exposed as intrinsic attributes so documents and
/// templates can reference them without re-reading the playbook.
pub fn resolve_markdown_config(playbook: &Playbook) -> MarkdownConfig {
    let mut attributes = playbook.markdown.attributes.clone();
    attributes.insert("site-title".to_string(), playbook.site.title.clone());
    if let Some(url) = &playbook.site.url {
        attributes.insert("site-url".to_string(), url.clone());
    }

    MarkdownConfig {
        attributes,
        highlight: playbook.markdown.highlight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_without_playbook_file() {
        let playbook = build_playbook(&GenerateArgs::default(), &HashMap::new()).unwrap();

        assert_eq!(playbook.site.title, "Documentation");
        assert_eq!(playbook.site.url, None);
        assert_eq!(playbook.output.dir, PathBuf::from("build/site"));
        assert!(playbook.content.sources.is_empty());
    }

    #[test]
    fn env_overrides_file_and_args_override_env() {
        let env = env(&[
            ("LECTERN_SITE_URL", "https://env.example.com"),
            ("LECTERN_SITE_TITLE", "Env Title"),
        ]);
        let args = GenerateArgs {
            site_title: Some("Arg Title".to_string()),
            ..Default::default()
        };

        let playbook = build_playbook(&args, &env).unwrap();

        assert_eq!(playbook.site.url.as_deref(), Some("https://env.example.com"));
        assert_eq!(playbook.site.title, "Arg Title");
    }

    #[test]
    fn empty_url_is_treated_as_unset() {
        let env = env(&[("LECTERN_SITE_URL", "")]);
        let playbook = build_playbook(&GenerateArgs::default(), &env).unwrap();
        assert_eq!(playbook.site.url, None);
    }

    #[test]
    fn missing_playbook_file_is_an_error() {
        let args = GenerateArgs {
            playbook: Some(PathBuf::from("does/not/exist.toml")),
            ..Default::default()
        };
        assert!(build_playbook(&args, &HashMap::new()).is_err());
    }

    #[test]
    fn extra_sources_are_appended() {
        let args = GenerateArgs {
            sources: vec![PathBuf::from("docs")],
            ..Default::default()
        };
        let playbook = build_playbook(&args, &HashMap::new()).unwrap();

        assert_eq!(playbook.content.sources.len(), 1);
        assert_eq!(playbook.content.sources[0].dir, PathBuf::from("docs"));
        assert_eq!(playbook.content.sources[0].component, "ROOT");
    }

    #[test]
    fn resolved_config_carries_site_attributes() {
        let mut playbook = Playbook::default();
        playbook.site.title = "Handbook".to_string();
        playbook.site.url = Some("https://docs.example.com".to_string());

        let config = resolve_markdown_config(&playbook);

        assert_eq!(config.attributes.get("site-title").unwrap(), "Handbook");
        assert_eq!(
            config.attributes.get("site-url").unwrap(),
            "https://docs.example.com"
        );
        assert!(config.highlight);
    }

    #[test]
    fn parses_playbook_toml() {
        let raw = r#"
[site]
title = "Handbook"
url = "https://docs.example.com"

[[content.sources]]
dir = "modules/guide"
component = "guide"

[output]
dir = "public"
clean = true
"#;
        let playbook: Playbook = toml::from_str(raw).unwrap();

        assert_eq!(playbook.site.title, "Handbook");
        assert_eq!(playbook.content.sources[0].component, "guide");
        assert_eq!(playbook.content.sources[0].version, "latest");
        assert!(playbook.output.clean);
    }
}
