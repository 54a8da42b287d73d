//! Site search index generation.

use regex::Regex;

use lectern_pipeline::catalog::{ContentCatalog, Page, SearchEntry, SearchIndex, SiteFile};
use lectern_pipeline::playbook::Playbook;
use lectern_pipeline::services::SearchIndexer;

/// Extracts searchable text from composed pages and serializes the index to
/// `search-index.json`.
pub struct LocalSearchIndexer;

impl SearchIndexer for LocalSearchIndexer {
    fn build_index(
        &self,
        _playbook: &Playbook,
        pages: &[Page],
        _content: &ContentCatalog,
    ) -> SearchIndex {
        let tag = Regex::new(r"<[^>]*>").expect("tag pattern");

        let entries = pages
            .iter()
            .map(|page| {
                let html = page.contents.as_deref().unwrap_or_default();
                let stripped = tag.replace_all(html, " ");
                let text = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

                SearchEntry {
                    url: page.publish.url.clone(),
                    title: page.title.clone(),
                    text,
                }
            })
            .collect();

        SearchIndex { entries }
    }

    fn create_index_file(&self, index: SearchIndex) -> anyhow::Result<SiteFile> {
        Ok(SiteFile {
            out_path: "search-index.json".to_string(),
            url: Some("/search-index.json".to_string()),
            title: None,
            media_type: "application/json".to_string(),
            contents: serde_json::to_string(&index)?,
        })
    }
}
