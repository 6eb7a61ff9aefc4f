//! CLI binary for eduranker.
//!
//! Stdout carries rendered results; all tracing output goes to stderr.

use clap::Parser;
use eduranker::{AppConfig, terminal};
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

/// EduRanker: ask a question, get ranked learning resources.
#[derive(Parser)]
#[command(name = "eduranker", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ranking backend URL, overriding the configuration file.
    #[arg(long)]
    base_url: Option<String>,

    /// Run a single search for this question and exit.
    question: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Users can override with RUST_LOG=debug to see everything.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("eduranker=info,eduranker_client=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.backend.base_url = base_url;
    }

    let session = eduranker_client::connect(&config.backend)?;
    tracing::info!(backend = %config.backend.base_url, "eduranker starting");

    let stdout = tokio::io::stdout();
    let outcome = match cli.question {
        Some(question) => terminal::run_once(&session, &question, stdout).await,
        None => terminal::run(&session, BufReader::new(tokio::io::stdin()), stdout).await,
    };

    session.shutdown().await;
    outcome?;
    Ok(())
}
