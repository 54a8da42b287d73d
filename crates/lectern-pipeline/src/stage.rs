//! The stage interface and the pipeline that runs stages in order.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::catalog::{
    ContentCatalog, NavigationCatalog, Page, PublishReport, SiteCatalog, SiteFile, UiCatalog,
};
use crate::playbook::{resolve_markdown_config, MarkdownConfig, Playbook};
use crate::services::ServiceSet;

/// Errors surfaced by the pipeline itself.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to build playbook")]
    Playbook(#[source] anyhow::Error),

    #[error("stage '{stage}' failed")]
    Stage {
        stage: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("no stage named '{0}' in the pipeline")]
    UnknownStage(String),
}

/// State shared by the stages of one run.
pub struct GenerateContext {
    pub playbook: Playbook,
    pub env: HashMap<String, String>,
    pub markdown_config: MarkdownConfig,
    pub services: ServiceSet,

    pub content: Option<ContentCatalog>,
    pub ui: Option<UiCatalog>,
    pub pages: Vec<Page>,
    pub navigation: Option<NavigationCatalog>,
    pub site_files: Vec<SiteFile>,
    pub site: Option<SiteCatalog>,
    pub report: Option<PublishReport>,
}

impl GenerateContext {
    pub fn new(playbook: Playbook, env: HashMap<String, String>, services: ServiceSet) -> Self {
        let markdown_config = resolve_markdown_config(&playbook);
        Self {
            playbook,
            env,
            markdown_config,
            services,
            content: None,
            ui: None,
            pages: Vec::new(),
            navigation: None,
            site_files: Vec::new(),
            site: None,
            report: None,
        }
    }
}

/// One named step of a site-generation run.
///
/// Stages run strictly in pipeline order; a stage may not begin before its
/// predecessor completes, and the first failure terminates the run.
#[async_trait]
pub trait Stage: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self, ctx: &mut GenerateContext) -> anyhow::Result<()>;
}

/// An ordered sequence of named stages.
///
/// Stages are addressed by name for composition, so a caller can splice
/// additional steps into the standard run (or drop standard ones) without
/// replacing the whole pipeline.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn push(&mut self, stage: Box<dyn Stage>) {
        self.stages.push(stage);
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    fn position(&self, name: &str) -> Result<usize, PipelineError> {
        self.stages
            .iter()
            .position(|s| s.name() == name)
            .ok_or_else(|| PipelineError::UnknownStage(name.to_string()))
    }

    pub fn insert_before(&mut self, name: &str, stage: Box<dyn Stage>) -> Result<(), PipelineError> {
        let at = self.position(name)?;
        self.stages.insert(at, stage);
        Ok(())
    }

    pub fn insert_after(&mut self, name: &str, stage: Box<dyn Stage>) -> Result<(), PipelineError> {
        let at = self.position(name)?;
        self.stages.insert(at + 1, stage);
        Ok(())
    }

    pub fn replace(&mut self, name: &str, stage: Box<dyn Stage>) -> Result<(), PipelineError> {
        let at = self.position(name)?;
        self.stages[at] = stage;
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Result<Box<dyn Stage>, PipelineError> {
        let at = self.position(name)?;
        Ok(self.stages.remove(at))
    }

    /// Run every stage in order. The first failure aborts the run.
    pub async fn run(&self, ctx: &mut GenerateContext) -> Result<(), PipelineError> {
        for stage in &self.stages {
            tracing::debug!(stage = stage.name(), "running stage");
            stage
                .run(ctx)
                .await
                .map_err(|source| PipelineError::Stage {
                    stage: stage.name(),
                    source,
                })?;
        }
        Ok(())
    }
}
