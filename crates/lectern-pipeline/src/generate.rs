//! The standard site-generation stages and the `generate_site` entry point.

use std::collections::HashMap;

use anyhow::Context as _;
use async_trait::async_trait;

use crate::catalog::{create_not_found_page, PublishReport, SiteCatalog};
use crate::playbook::{build_playbook, GenerateArgs};
use crate::services::ServiceSet;
use crate::stage::{GenerateContext, Pipeline, PipelineError, Stage};

/// Aggregates and classifies content while loading the UI theme.
///
/// The two loads run concurrently and are joined before composition may
/// proceed; either failure aborts the run.
pub struct LoadStage;

#[async_trait]
impl Stage for LoadStage {
    fn name(&self) -> &'static str {
        "load"
    }

    async fn run(&self, ctx: &mut GenerateContext) -> anyhow::Result<()> {
        let playbook = ctx.playbook.clone();
        let config = ctx.markdown_config.clone();
        let aggregator = ctx.services.aggregator.clone();
        let classifier = ctx.services.classifier.clone();
        let ui_loader = ctx.services.ui_loader.clone();

        let content_fut = async {
            let raw = aggregator.aggregate(&playbook).await?;
            classifier.classify(&playbook, raw, &config)
        };
        let ui_fut = ui_loader.load(&playbook);

        let (content, ui) = tokio::try_join!(content_fut, ui_fut)?;

        tracing::info!(
            documents = content.documents().len(),
            templates = ui.templates.len(),
            "loaded content and UI"
        );
        ctx.content = Some(content);
        ctx.ui = Some(ui);
        Ok(())
    }
}

/// Converts classified content into page objects.
pub struct ConvertStage;

#[async_trait]
impl Stage for ConvertStage {
    fn name(&self) -> &'static str {
        "convert"
    }

    async fn run(&self, ctx: &mut GenerateContext) -> anyhow::Result<()> {
        let content = ctx.content.as_ref().context("content catalog not loaded")?;
        ctx.pages = ctx.services.converter.convert(content, &ctx.markdown_config)?;
        tracing::info!(pages = ctx.pages.len(), "converted documents");
        Ok(())
    }
}

/// Builds the navigation structure from classified content.
pub struct NavigationStage;

#[async_trait]
impl Stage for NavigationStage {
    fn name(&self) -> &'static str {
        "navigation"
    }

    async fn run(&self, ctx: &mut GenerateContext) -> anyhow::Result<()> {
        let content = ctx.content.as_ref().context("content catalog not loaded")?;
        ctx.navigation = Some(ctx.services.navigation.build(content, &ctx.markdown_config)?);
        Ok(())
    }
}

/// Composes every page in place using content and navigation context.
pub struct ComposeStage;

#[async_trait]
impl Stage for ComposeStage {
    fn name(&self) -> &'static str {
        "compose"
    }

    async fn run(&self, ctx: &mut GenerateContext) -> anyhow::Result<()> {
        let content = ctx.content.as_ref().context("content catalog not loaded")?;
        let ui = ctx.ui.as_ref().context("ui catalog not loaded")?;
        let composer = ctx
            .services
            .composer_factory
            .create(&ctx.playbook, content, ui, &ctx.env)?;

        let navigation = ctx.navigation.as_ref();
        for page in &mut ctx.pages {
            composer.compose(page, content, navigation)?;
        }
        Ok(())
    }
}

/// Computes the flat site file list: mapped pages plus redirects.
pub struct MapStage;

#[async_trait]
impl Stage for MapStage {
    fn name(&self) -> &'static str {
        "map"
    }

    async fn run(&self, ctx: &mut GenerateContext) -> anyhow::Result<()> {
        let content = ctx.content.as_ref().context("content catalog not loaded")?;
        let mut files = ctx.services.mapper.map_site(&ctx.playbook, &ctx.pages);
        files.extend(ctx.services.redirects.produce(&ctx.playbook, content));
        ctx.site_files = files;
        Ok(())
    }
}

/// Builds the search index and appends its serialized file.
///
/// The index file is part of every run, whether or not a site URL is set.
pub struct IndexStage;

#[async_trait]
impl Stage for IndexStage {
    fn name(&self) -> &'static str {
        "index"
    }

    async fn run(&self, ctx: &mut GenerateContext) -> anyhow::Result<()> {
        let content = ctx.content.as_ref().context("content catalog not loaded")?;
        let index = ctx
            .services
            .indexer
            .build_index(&ctx.playbook, &ctx.pages, content);
        let file = ctx.services.indexer.create_index_file(index)?;
        ctx.site_files.push(file);
        Ok(())
    }
}

/// Composes and appends the 404 page when a public site URL is configured.
pub struct NotFoundStage;

#[async_trait]
impl Stage for NotFoundStage {
    fn name(&self) -> &'static str {
        "not-found"
    }

    async fn run(&self, ctx: &mut GenerateContext) -> anyhow::Result<()> {
        if ctx.playbook.site.url.is_none() {
            return Ok(());
        }

        let content = ctx.content.as_ref().context("content catalog not loaded")?;
        let ui = ctx.ui.as_ref().context("ui catalog not loaded")?;
        let composer = ctx
            .services
            .composer_factory
            .create(&ctx.playbook, content, ui, &ctx.env)?;

        let mut page = create_not_found_page();
        composer.compose(&mut page, content, None)?;
        ctx.site_files.push(page.to_site_file());
        Ok(())
    }
}

/// Wraps the file list in a site catalog and hands it to the publisher.
pub struct PublishStage;

#[async_trait]
impl Stage for PublishStage {
    fn name(&self) -> &'static str {
        "publish"
    }

    async fn run(&self, ctx: &mut GenerateContext) -> anyhow::Result<()> {
        let site = SiteCatalog::new(std::mem::take(&mut ctx.site_files));
        let content = ctx.content.as_ref().context("content catalog not loaded")?;
        let ui = ctx.ui.as_ref().context("ui catalog not loaded")?;

        let report = ctx
            .services
            .publisher
            .publish(&ctx.playbook, content, ui, &site)
            .await?;

        tracing::info!(files = report.written.len(), "published site");
        ctx.site = Some(site);
        ctx.report = Some(report);
        Ok(())
    }
}

/// The standard stage order of a site-generation run.
pub fn default_pipeline() -> Pipeline {
    let mut pipeline = Pipeline::new();
    pipeline.push(Box::new(LoadStage));
    pipeline.push(Box::new(ConvertStage));
    pipeline.push(Box::new(NavigationStage));
    pipeline.push(Box::new(ComposeStage));
    pipeline.push(Box::new(MapStage));
    pipeline.push(Box::new(IndexStage));
    pipeline.push(Box::new(NotFoundStage));
    pipeline.push(Box::new(PublishStage));
    pipeline
}

/// Run one full site-generation pass and return the publisher's report.
pub async fn generate_site(
    args: &GenerateArgs,
    env: &HashMap<String, String>,
    services: ServiceSet,
) -> Result<PublishReport, PipelineError> {
    let playbook = build_playbook(args, env).map_err(PipelineError::Playbook)?;
    let mut ctx = GenerateContext::new(playbook, env.clone(), services);

    default_pipeline().run(&mut ctx).await?;

    ctx.report.take().ok_or_else(|| PipelineError::Stage {
        stage: "publish",
        source: anyhow::anyhow!("publish stage produced no report"),
    })
}
