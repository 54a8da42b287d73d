//! Lectern CLI - documentation site generator.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "lectern")]
#[command(about = "Documentation site generator")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the documentation site
    Generate {
        /// Path to the playbook file
        #[arg(short, long)]
        playbook: Option<PathBuf>,

        /// Output directory (defaults to playbook or "build/site")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Public base URL of the site
        #[arg(long)]
        url: Option<String>,

        /// Site title
        #[arg(long)]
        title: Option<String>,

        /// Content source directories appended to the playbook's sources
        sources: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Generate {
            playbook,
            output,
            url,
            title,
            sources,
        } => {
            commands::generate::run(playbook, output, url, title, sources).await?;
        }
    }

    Ok(())
}
