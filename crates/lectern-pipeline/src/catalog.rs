//! Catalogs and the page/file data model threaded through the pipeline.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::Deserialize;

/// A raw document collected from a content source, before classification.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub component: String,
    pub version: String,
    pub relative_path: PathBuf,
    pub contents: String,
}

/// Classification family of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFamily {
    /// Regular page content.
    Page,
    /// Navigation description consumed by the navigation builder.
    Nav,
}

/// Frontmatter recognized on content documents.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct Frontmatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub order: Option<u32>,

    /// Old URLs that should redirect to this page.
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// A classified document inside the content catalog.
#[derive(Debug, Clone)]
pub struct ClassifiedDocument {
    pub component: String,
    pub version: String,
    pub family: DocumentFamily,
    pub stem: String,
    pub relative_path: PathBuf,
    pub contents: String,
    pub frontmatter: Frontmatter,
}

/// Aggregate of classified source documents.
#[derive(Debug, Clone, Default)]
pub struct ContentCatalog {
    documents: Vec<ClassifiedDocument>,
}

impl ContentCatalog {
    pub fn new(documents: Vec<ClassifiedDocument>) -> Self {
        Self { documents }
    }

    pub fn documents(&self) -> &[ClassifiedDocument] {
        &self.documents
    }

    pub fn pages(&self) -> impl Iterator<Item = &ClassifiedDocument> {
        self.documents
            .iter()
            .filter(|d| d.family == DocumentFamily::Page)
    }

    pub fn nav_documents(&self) -> impl Iterator<Item = &ClassifiedDocument> {
        self.documents
            .iter()
            .filter(|d| d.family == DocumentFamily::Nav)
    }

    /// Distinct component names, sorted.
    pub fn components(&self) -> Vec<&str> {
        self.documents
            .iter()
            .map(|d| d.component.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// A static asset from the UI bundle.
#[derive(Debug, Clone)]
pub struct UiAsset {
    pub relative_path: PathBuf,
    pub contents: Vec<u8>,
}

/// Aggregate of theme templates and static assets.
#[derive(Debug, Clone, Default)]
pub struct UiCatalog {
    pub templates: std::collections::HashMap<String, String>,
    pub static_files: Vec<UiAsset>,
}

/// Source coordinates of a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSource {
    pub stem: String,
    /// Component the page originated from. Manually constructed pages (the
    /// 404 page) have no origin.
    pub origin: Option<String>,
}

/// Output coordinates of a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageOut {
    pub path: String,
}

/// Publication coordinates of a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PagePub {
    pub url: String,
    pub root_path: String,
}

/// A unit of HTML output. Composition populates `contents` in place.
#[derive(Debug, Clone)]
pub struct Page {
    pub title: String,
    pub media_type: String,
    pub src: PageSource,
    pub out: PageOut,
    pub publish: PagePub,
    pub contents: Option<String>,
}

impl Page {
    pub fn to_site_file(&self) -> SiteFile {
        SiteFile {
            out_path: self.out.path.clone(),
            url: Some(self.publish.url.clone()),
            title: Some(self.title.clone()),
            media_type: self.media_type.clone(),
            contents: self.contents.clone().unwrap_or_default(),
        }
    }
}

/// The manually constructed not-found page.
pub fn create_not_found_page() -> Page {
    Page {
        title: "Page Not Found".to_string(),
        media_type: "text/html".to_string(),
        src: PageSource {
            stem: "404".to_string(),
            origin: None,
        },
        out: PageOut {
            path: "404.html".to_string(),
        },
        publish: PagePub {
            url: "/404.html".to_string(),
            root_path: String::new(),
        },
        contents: None,
    }
}

/// A publishable output file.
#[derive(Debug, Clone)]
pub struct SiteFile {
    pub out_path: String,
    pub url: Option<String>,
    pub title: Option<String>,
    pub media_type: String,
    pub contents: String,
}

/// The final flat list of publishable files.
#[derive(Debug, Clone, Default)]
pub struct SiteCatalog {
    files: Vec<SiteFile>,
}

impl SiteCatalog {
    pub fn new(files: Vec<SiteFile>) -> Self {
        Self { files }
    }

    /// Every output file of the run.
    pub fn get_all(&self) -> &[SiteFile] {
        &self.files
    }
}

/// A navigation entry.
#[derive(Debug, Clone, serde::Serialize, PartialEq)]
pub struct NavItem {
    pub title: String,
    pub url: String,
    pub children: Vec<NavItem>,
}

/// Navigation menu for one component.
#[derive(Debug, Clone, serde::Serialize)]
pub struct NavMenu {
    pub component: String,
    pub items: Vec<NavItem>,
}

/// Navigation structure built from classified content.
#[derive(Debug, Clone, Default)]
pub struct NavigationCatalog {
    pub menus: Vec<NavMenu>,
}

impl NavigationCatalog {
    pub fn menu_for(&self, component: &str) -> Option<&NavMenu> {
        self.menus.iter().find(|m| m.component == component)
    }
}

/// One searchable document in the site index.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SearchEntry {
    pub url: String,
    pub title: String,
    pub text: String,
}

/// The site search index prior to serialization.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct SearchIndex {
    pub entries: Vec<SearchEntry>,
}

/// Result of the publishing step.
#[derive(Debug, Clone, Default)]
pub struct PublishReport {
    pub written: Vec<PathBuf>,
}
