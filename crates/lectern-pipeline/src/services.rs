//! Trait seams for the external services the pipeline sequences.
//!
//! Each trait mirrors one function of the original generation framework. The
//! pipeline owns only the sequencing; all real work happens behind these
//! seams, so stages can be driven by production implementations or test
//! doubles alike. Service failures are opaque to the pipeline and propagate
//! unchanged.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::catalog::{
    ContentCatalog, NavigationCatalog, Page, PublishReport, RawDocument, SearchIndex, SiteCatalog,
    SiteFile, UiCatalog,
};
use crate::playbook::{MarkdownConfig, Playbook};

/// Collects raw documents from the playbook's content sources.
#[async_trait]
pub trait ContentAggregator: Send + Sync {
    async fn aggregate(&self, playbook: &Playbook) -> anyhow::Result<Vec<RawDocument>>;
}

/// Classifies aggregated documents into a content catalog.
pub trait ContentClassifier: Send + Sync {
    fn classify(
        &self,
        playbook: &Playbook,
        raw: Vec<RawDocument>,
        config: &MarkdownConfig,
    ) -> anyhow::Result<ContentCatalog>;
}

/// Loads the UI theme bundle.
#[async_trait]
pub trait UiLoader: Send + Sync {
    async fn load(&self, playbook: &Playbook) -> anyhow::Result<UiCatalog>;
}

/// Converts classified content into page objects.
pub trait DocumentConverter: Send + Sync {
    fn convert(
        &self,
        content: &ContentCatalog,
        config: &MarkdownConfig,
    ) -> anyhow::Result<Vec<Page>>;
}

/// Builds the navigation structure from classified content.
pub trait NavigationBuilder: Send + Sync {
    fn build(
        &self,
        content: &ContentCatalog,
        config: &MarkdownConfig,
    ) -> anyhow::Result<NavigationCatalog>;
}

/// Renders a page in place using content and navigation context.
pub trait PageComposer: Send + Sync {
    fn compose(
        &self,
        page: &mut Page,
        content: &ContentCatalog,
        navigation: Option<&NavigationCatalog>,
    ) -> anyhow::Result<()>;
}

/// Produces a page composer bound to playbook, content, UI, and environment.
pub trait PageComposerFactory: Send + Sync {
    fn create(
        &self,
        playbook: &Playbook,
        content: &ContentCatalog,
        ui: &UiCatalog,
        env: &HashMap<String, String>,
    ) -> anyhow::Result<Box<dyn PageComposer>>;
}

/// Maps composed pages to output files.
pub trait SiteMapper: Send + Sync {
    fn map_site(&self, playbook: &Playbook, pages: &[Page]) -> Vec<SiteFile>;
}

/// Produces redirect files from page aliases.
pub trait RedirectProducer: Send + Sync {
    fn produce(&self, playbook: &Playbook, content: &ContentCatalog) -> Vec<SiteFile>;
}

/// Builds the site search index and serializes it to an output file.
pub trait SearchIndexer: Send + Sync {
    fn build_index(
        &self,
        playbook: &Playbook,
        pages: &[Page],
        content: &ContentCatalog,
    ) -> SearchIndex;

    fn create_index_file(&self, index: SearchIndex) -> anyhow::Result<SiteFile>;
}

/// Publishes the final file collection.
#[async_trait]
pub trait SitePublisher: Send + Sync {
    async fn publish(
        &self,
        playbook: &Playbook,
        content: &ContentCatalog,
        ui: &UiCatalog,
        site: &SiteCatalog,
    ) -> anyhow::Result<PublishReport>;
}

/// The full set of services one run is driven by.
#[derive(Clone)]
pub struct ServiceSet {
    pub aggregator: Arc<dyn ContentAggregator>,
    pub classifier: Arc<dyn ContentClassifier>,
    pub ui_loader: Arc<dyn UiLoader>,
    pub converter: Arc<dyn DocumentConverter>,
    pub navigation: Arc<dyn NavigationBuilder>,
    pub composer_factory: Arc<dyn PageComposerFactory>,
    pub mapper: Arc<dyn SiteMapper>,
    pub redirects: Arc<dyn RedirectProducer>,
    pub indexer: Arc<dyn SearchIndexer>,
    pub publisher: Arc<dyn SitePublisher>,
}
