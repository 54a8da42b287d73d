//! Static redirect files produced from page aliases.

use lectern_pipeline::catalog::{ContentCatalog, SiteFile};
use lectern_pipeline::playbook::Playbook;
use lectern_pipeline::services::RedirectProducer;

use crate::paths::{output_path, public_url};

/// Turns each frontmatter alias into a meta-refresh stub pointing at the
/// page's current URL.
pub struct LocalRedirectProducer;

impl RedirectProducer for LocalRedirectProducer {
    fn produce(&self, _playbook: &Playbook, content: &ContentCatalog) -> Vec<SiteFile> {
        let mut files = Vec::new();

        for doc in content.pages() {
            if doc.frontmatter.aliases.is_empty() {
                continue;
            }
            let target = public_url(&output_path(&doc.component, &doc.stem));

            for alias in &doc.frontmatter.aliases {
                let mut out_path = alias.trim_start_matches('/').to_string();
                if !out_path.ends_with(".html") {
                    out_path.push_str(".html");
                }

                files.push(SiteFile {
                    url: Some(format!("/{out_path}")),
                    out_path,
                    title: None,
                    media_type: "text/html".to_string(),
                    contents: redirect_stub(&target),
                });
            }
        }

        files
    }
}

fn redirect_stub(target: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <meta charset=\"utf-8\">\n\
         <link rel=\"canonical\" href=\"{target}\">\n\
         <meta http-equiv=\"refresh\" content=\"0; url={target}\">\n\
         <p>This page has moved to <a href=\"{target}\">{target}</a>.</p>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_pipeline::catalog::{ClassifiedDocument, DocumentFamily, Frontmatter};
    use std::path::PathBuf;

    fn doc_with_aliases(component: &str, stem: &str, aliases: &[&str]) -> ClassifiedDocument {
        ClassifiedDocument {
            component: component.to_string(),
            version: "latest".to_string(),
            family: DocumentFamily::Page,
            stem: stem.to_string(),
            relative_path: PathBuf::from(format!("{stem}.md")),
            contents: String::new(),
            frontmatter: Frontmatter {
                aliases: aliases.iter().map(|a| a.to_string()).collect(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn produces_one_stub_per_alias() {
        let catalog = ContentCatalog::new(vec![doc_with_aliases(
            "guide",
            "install",
            &["setup", "/old/install.html"],
        )]);

        let files = LocalRedirectProducer.produce(&Playbook::default(), &catalog);

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].out_path, "setup.html");
        assert_eq!(files[1].out_path, "old/install.html");
        for file in &files {
            assert!(file
                .contents
                .contains("content=\"0; url=/guide/install.html\""));
        }
    }

    #[test]
    fn pages_without_aliases_produce_nothing() {
        let catalog = ContentCatalog::new(vec![doc_with_aliases("ROOT", "index", &[])]);
        assert!(LocalRedirectProducer
            .produce(&Playbook::default(), &catalog)
            .is_empty());
    }
}
