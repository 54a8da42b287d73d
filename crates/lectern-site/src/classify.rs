//! Classification of aggregated documents.

use anyhow::Context as _;

use lectern_pipeline::catalog::{
    ClassifiedDocument, ContentCatalog, DocumentFamily, Frontmatter, RawDocument,
};
use lectern_pipeline::playbook::{MarkdownConfig, Playbook};
use lectern_pipeline::services::ContentClassifier;

/// Splits frontmatter, assigns a family, and builds the content catalog.
pub struct LocalClassifier;

impl ContentClassifier for LocalClassifier {
    fn classify(
        &self,
        _playbook: &Playbook,
        raw: Vec<RawDocument>,
        _config: &MarkdownConfig,
    ) -> anyhow::Result<ContentCatalog> {
        let mut documents = Vec::with_capacity(raw.len());

        for doc in raw {
            let (frontmatter_raw, body) = split_frontmatter(&doc.contents);
            let frontmatter: Frontmatter = match frontmatter_raw {
                Some(raw_frontmatter) => serde_yaml::from_str(raw_frontmatter).with_context(
                    || format!("invalid frontmatter in {}", doc.relative_path.display()),
                )?,
                None => Frontmatter::default(),
            };

            let stem = doc
                .relative_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("index")
                .to_string();
            let family = if stem == "nav" {
                DocumentFamily::Nav
            } else {
                DocumentFamily::Page
            };
            let contents = body.to_string();

            documents.push(ClassifiedDocument {
                component: doc.component.clone(),
                version: doc.version.clone(),
                family,
                stem,
                relative_path: doc.relative_path.clone(),
                contents,
                frontmatter,
            });
        }

        Ok(ContentCatalog::new(documents))
    }
}

/// Split leading `---` YAML frontmatter from a document body.
pub(crate) fn split_frontmatter(contents: &str) -> (Option<&str>, &str) {
    let Some(rest) = contents.strip_prefix("---\n") else {
        return (None, contents);
    };
    match rest.find("\n---") {
        Some(at) => {
            let frontmatter = &rest[..at];
            let body = &rest[at + 4..];
            (Some(frontmatter), body.strip_prefix('\n').unwrap_or(body))
        }
        None => (None, contents),
    }
}
