//! Mapping composed pages to output files.

use lectern_pipeline::catalog::{Page, SiteFile};
use lectern_pipeline::playbook::Playbook;
use lectern_pipeline::services::SiteMapper;

/// Maps pages to site files, plus a sitemap when the site has a public URL.
pub struct LocalSiteMapper;

impl SiteMapper for LocalSiteMapper {
    fn map_site(&self, playbook: &Playbook, pages: &[Page]) -> Vec<SiteFile> {
        let mut files: Vec<SiteFile> = pages.iter().map(Page::to_site_file).collect();
        if let Some(url) = &playbook.site.url {
            files.push(sitemap(url, pages));
        }
        files
    }
}

fn sitemap(base_url: &str, pages: &[Page]) -> SiteFile {
    let base = base_url.trim_end_matches('/');
    let urls: Vec<String> = pages
        .iter()
        .map(|page| format!("  <url>\n    <loc>{base}{}</loc>\n  </url>", page.publish.url))
        .collect();

    SiteFile {
        out_path: "sitemap.xml".to_string(),
        url: Some("/sitemap.xml".to_string()),
        title: None,
        media_type: "application/xml".to_string(),
        contents: format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}\n</urlset>\n",
            urls.join("\n")
        ),
    }
}
