//! Composable stage pipeline for documentation site generation.
//!
//! One site-generation run turns a playbook (run configuration), a set of
//! content sources, and a UI bundle into a flat collection of publishable
//! files. The run is an ordered sequence of named stages behind a common
//! [`Stage`] interface, so callers can insert, replace, or remove stages by
//! composition instead of patching the generator itself. Everything the
//! stages call out to, from aggregation and conversion through composition
//! and publishing, sits behind the trait seams in [`services`].

pub mod catalog;
pub mod generate;
pub mod playbook;
pub mod services;
pub mod stage;

pub use catalog::{
    create_not_found_page, ClassifiedDocument, ContentCatalog, DocumentFamily, Frontmatter,
    NavItem, NavMenu, NavigationCatalog, Page, PublishReport, RawDocument, SearchEntry,
    SearchIndex, SiteCatalog, SiteFile, UiAsset, UiCatalog,
};
pub use generate::{default_pipeline, generate_site};
pub use playbook::{build_playbook, resolve_markdown_config, GenerateArgs, MarkdownConfig, Playbook};
pub use services::ServiceSet;
pub use stage::{GenerateContext, Pipeline, PipelineError, Stage};
