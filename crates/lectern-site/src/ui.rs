//! UI bundle loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use async_trait::async_trait;
use walkdir::WalkDir;

use lectern_pipeline::catalog::{UiAsset, UiCatalog};
use lectern_pipeline::playbook::Playbook;
use lectern_pipeline::services::UiLoader;

/// Loads the UI theme from the playbook's bundle directory, or falls back to
/// the compiled-in default bundle.
pub struct LocalUiLoader;

#[async_trait]
impl UiLoader for LocalUiLoader {
    async fn load(&self, playbook: &Playbook) -> anyhow::Result<UiCatalog> {
        match &playbook.ui.bundle_dir {
            Some(dir) => load_bundle(dir),
            None => Ok(default_bundle()),
        }
    }
}

fn load_bundle(dir: &Path) -> anyhow::Result<UiCatalog> {
    if !dir.exists() {
        anyhow::bail!("ui bundle not found: {}", dir.display());
    }

    let mut catalog = UiCatalog::default();
    for entry in WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let relative = path.strip_prefix(dir).unwrap_or(path);

        if path.extension().and_then(|e| e.to_str()) == Some("html") {
            let name = relative.to_string_lossy().replace('\\', "/");
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read template {}", path.display()))?;
            catalog.templates.insert(name, source);
        } else {
            let contents = fs::read(path)
                .with_context(|| format!("failed to read ui asset {}", path.display()))?;
            catalog.static_files.push(UiAsset {
                relative_path: PathBuf::from(relative),
                contents,
            });
        }
    }

    if !catalog.templates.contains_key("page.html") {
        anyhow::bail!("ui bundle {} has no page.html template", dir.display());
    }

    tracing::info!(
        templates = catalog.templates.len(),
        assets = catalog.static_files.len(),
        "loaded ui bundle"
    );
    Ok(catalog)
}

fn default_bundle() -> UiCatalog {
    let mut catalog = UiCatalog::default();
    catalog
        .templates
        .insert("page.html".to_string(), PAGE_TEMPLATE.to_string());
    catalog.static_files.push(UiAsset {
        relative_path: PathBuf::from("site.css"),
        contents: DEFAULT_STYLES.as_bytes().to_vec(),
    });
    catalog
}

const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }} - {{ site_title }}</title>
  <link rel="stylesheet" href="{{ root_path }}_/site.css">
</head>
<body>
  <div class="layout">
    <nav class="sidebar">
      <div class="nav-header">
        <span class="nav-logo">{{ site_title }}</span>
      </div>
      {% if nav %}
      <ul class="nav-list">
      {% for item in nav %}
        <li class="nav-item">
          <a href="{{ item.url }}">{{ item.title }}</a>
          {% if item.children %}
          <ul class="nav-children">
            {% for child in item.children %}
            <li class="nav-item"><a href="{{ child.url }}">{{ child.title }}</a></li>
            {% endfor %}
          </ul>
          {% endif %}
        </li>
      {% endfor %}
      </ul>
      {% endif %}
    </nav>
    <main class="main">
      <h1 class="page-title">{{ title }}</h1>
      <article class="doc">
        {{ content | safe }}
      </article>
    </main>
  </div>
</body>
</html>"##;

const DEFAULT_STYLES: &str = r#"body {
  margin: 0;
  font-family: system-ui, sans-serif;
  color: #1c1e21;
}
.layout { display: flex; min-height: 100vh; }
.sidebar { width: 16rem; padding: 1rem; border-right: 1px solid #e3e3e3; }
.nav-logo { font-weight: 700; }
.nav-list, .nav-children { list-style: none; padding-left: 0.75rem; }
.main { flex: 1; padding: 1.5rem 2.5rem; max-width: 52rem; }
pre.highlight { background: #f6f8fa; padding: 0.75rem; overflow-x: auto; }
.hljs-keyword { color: #d73a49; font-weight: 600; }
.hljs-type { color: #6f42c1; }
.hljs-literal { color: #005cc5; }
.hljs-built_in { color: #e36209; }
.hljs-string { color: #032f62; }
.hljs-number { color: #005cc5; }
.hljs-comment { color: #6a737d; font-style: italic; }
.hljs-meta { color: #735c0f; }
.hljs-punctuation { color: #586069; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn default_bundle_has_page_template_and_styles() {
        let catalog = LocalUiLoader.load(&Playbook::default()).await.unwrap();

        assert!(catalog.templates.contains_key("page.html"));
        assert!(catalog
            .static_files
            .iter()
            .any(|a| a.relative_path == PathBuf::from("site.css")));
    }

    #[tokio::test]
    async fn loads_bundle_from_directory() {
        let temp = tempdir().unwrap();
        let bundle = temp.path().join("ui");
        fs::create_dir_all(bundle.join("css")).unwrap();
        fs::write(bundle.join("page.html"), "<html>{{ content | safe }}</html>").unwrap();
        fs::write(bundle.join("css/extra.css"), "body {}").unwrap();

        let mut playbook = Playbook::default();
        playbook.ui.bundle_dir = Some(bundle);

        let catalog = LocalUiLoader.load(&playbook).await.unwrap();

        assert!(catalog.templates.contains_key("page.html"));
        assert_eq!(catalog.static_files.len(), 1);
        assert_eq!(
            catalog.static_files[0].relative_path,
            PathBuf::from("css/extra.css")
        );
    }

    #[tokio::test]
    async fn bundle_without_page_template_is_an_error() {
        let temp = tempdir().unwrap();
        let bundle = temp.path().join("ui");
        fs::create_dir_all(&bundle).unwrap();
        fs::write(bundle.join("readme.txt"), "not a theme").unwrap();

        let mut playbook = Playbook::default();
        playbook.ui.bundle_dir = Some(bundle);

        assert!(LocalUiLoader.load(&playbook).await.is_err());
    }

    #[tokio::test]
    async fn missing_bundle_dir_is_an_error() {
        let mut playbook = Playbook::default();
        playbook.ui.bundle_dir = Some(PathBuf::from("no/such/bundle"));

        assert!(LocalUiLoader.load(&playbook).await.is_err());
    }
}
