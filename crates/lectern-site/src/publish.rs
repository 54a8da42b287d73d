//! Filesystem publishing.

use std::fs;

use anyhow::Context as _;
use async_trait::async_trait;

use lectern_pipeline::catalog::{ContentCatalog, PublishReport, SiteCatalog, UiCatalog};
use lectern_pipeline::playbook::Playbook;
use lectern_pipeline::services::SitePublisher;

/// Writes every site file to the output directory, together with the UI
/// bundle's static assets under the reserved `_/` prefix.
pub struct FsPublisher;

#[async_trait]
impl SitePublisher for FsPublisher {
    async fn publish(
        &self,
        playbook: &Playbook,
        _content: &ContentCatalog,
        ui: &UiCatalog,
        site: &SiteCatalog,
    ) -> anyhow::Result<PublishReport> {
        let out_dir = &playbook.output.dir;

        if playbook.output.clean && out_dir.exists() {
            fs::remove_dir_all(out_dir)
                .with_context(|| format!("failed to clean {}", out_dir.display()))?;
        }
        fs::create_dir_all(out_dir)
            .with_context(|| format!("failed to create {}", out_dir.display()))?;

        let mut written = Vec::new();

        for file in site.get_all() {
            let path = out_dir.join(&file.out_path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &file.contents)
                .with_context(|| format!("failed to write {}", path.display()))?;
            written.push(path);
        }

        for asset in &ui.static_files {
            let path = out_dir.join("_").join(&asset.relative_path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &asset.contents)
                .with_context(|| format!("failed to write {}", path.display()))?;
            written.push(path);
        }

        tracing::info!(
            files = written.len(),
            dir = %out_dir.display(),
            "published site"
        );
        Ok(PublishReport { written })
    }
}
