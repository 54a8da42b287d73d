//! Site generation command.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use lectern_pipeline::{generate_site, GenerateArgs};
use lectern_site::LocalServices;

/// Run the generate command.
pub async fn run(
    playbook: Option<PathBuf>,
    output: Option<PathBuf>,
    url: Option<String>,
    title: Option<String>,
    sources: Vec<PathBuf>,
) -> Result<()> {
    tracing::info!("Generating site...");
    let started = Instant::now();

    let args = GenerateArgs {
        playbook,
        output_dir: output,
        site_url: url,
        site_title: title,
        sources,
    };
    let env: HashMap<String, String> = std::env::vars().collect();

    let report = generate_site(&args, &env, LocalServices::create()).await?;

    tracing::info!(
        "Wrote {} files in {}ms",
        report.written.len(),
        started.elapsed().as_millis()
    );

    Ok(())
}
