//! Content aggregation from local source directories.

use std::fs;

use anyhow::Context as _;
use async_trait::async_trait;
use walkdir::WalkDir;

use lectern_pipeline::catalog::RawDocument;
use lectern_pipeline::playbook::Playbook;
use lectern_pipeline::services::ContentAggregator;

/// Collects markdown documents from every configured source directory.
pub struct LocalAggregator;

#[async_trait]
impl ContentAggregator for LocalAggregator {
    async fn aggregate(&self, playbook: &Playbook) -> anyhow::Result<Vec<RawDocument>> {
        let mut documents = Vec::new();

        for source in &playbook.content.sources {
            if !source.dir.exists() {
                anyhow::bail!("content source not found: {}", source.dir.display());
            }

            for entry in WalkDir::new(&source.dir)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if !path.is_file() {
                    continue;
                }

                let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
                if ext != "md" && ext != "markdown" {
                    continue;
                }

                let contents = fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                let relative_path = path.strip_prefix(&source.dir).unwrap_or(path).to_path_buf();

                documents.push(RawDocument {
                    component: source.component.clone(),
                    version: source.version.clone(),
                    relative_path,
                    contents,
                });
            }
        }

        // Deterministic order regardless of directory iteration order.
        documents.sort_by(|a, b| {
            (a.component.as_str(), &a.relative_path).cmp(&(b.component.as_str(), &b.relative_path))
        });

        tracing::info!(
            documents = documents.len(),
            sources = playbook.content.sources.len(),
            "aggregated content"
        );
        Ok(documents)
    }
}
