//! Filesystem-backed implementations of the lectern pipeline services.
//!
//! These are the smallest useful stand-ins for the services one
//! site-generation run needs: markdown sources in, composed HTML out. Each
//! implementation is independently replaceable through the trait seams in
//! `lectern-pipeline`.

use std::sync::Arc;

use lectern_pipeline::services::ServiceSet;

pub mod aggregate;
pub mod classify;
pub mod compose;
pub mod convert;
pub mod map;
pub mod navigation;
mod paths;
pub mod publish;
pub mod redirect;
pub mod search;
pub mod ui;

pub use aggregate::LocalAggregator;
pub use classify::LocalClassifier;
pub use compose::LocalComposerFactory;
pub use convert::MarkdownConverter;
pub use map::LocalSiteMapper;
pub use navigation::LocalNavigationBuilder;
pub use publish::FsPublisher;
pub use redirect::LocalRedirectProducer;
pub use search::LocalSearchIndexer;
pub use ui::LocalUiLoader;

/// The full local service set.
pub struct LocalServices;

impl LocalServices {
    pub fn create() -> ServiceSet {
        ServiceSet {
            aggregator: Arc::new(LocalAggregator),
            classifier: Arc::new(LocalClassifier),
            ui_loader: Arc::new(LocalUiLoader),
            converter: Arc::new(MarkdownConverter::new()),
            navigation: Arc::new(LocalNavigationBuilder),
            composer_factory: Arc::new(LocalComposerFactory),
            mapper: Arc::new(LocalSiteMapper),
            redirects: Arc::new(LocalRedirectProducer),
            indexer: Arc::new(LocalSearchIndexer),
            publisher: Arc::new(FsPublisher),
        }
    }
}
