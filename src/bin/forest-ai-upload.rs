//! Forest AI upload client
//!
//! Uploads an image, CSV or GeoTIFF file and optionally waits for its analysis report.

use anyhow::Context;
use clap::Parser;
use forest_ai_core::client::{
    AnalysisClient, FormState, HttpUploadTransport, PollPolicy, SelectedFile, UploadForm,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "forest-ai-upload", version, about)]
struct Cli {
    /// File to upload
    file: PathBuf,

    /// Forest AI server URL
    #[arg(long, env = "FOREST_AI_SERVER", default_value = "http://localhost:3000")]
    server: String,

    /// Wait for the analysis report after uploading
    #[arg(long)]
    wait: bool,

    /// Seconds between report lookups
    #[arg(long, default_value_t = 10)]
    interval_secs: u64,

    /// Give up after this many lookups
    #[arg(long, default_value_t = 30)]
    max_attempts: u32,

    /// Write the report here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let http = reqwest::Client::new();

    let file = SelectedFile::from_path(&cli.file)
        .await
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;

    let mut form = UploadForm::new(HttpUploadTransport::new(http.clone(), &cli.server));
    let mut completions = form.subscribe();

    if form.select_file(file).await == FormState::Error {
        anyhow::bail!("{}", form.status().message);
    }

    let receipt = form.submit().await?;
    eprintln!("{}", form.status().message);
    eprintln!("Stored as {}", receipt.storage_key);

    if !cli.wait {
        eprintln!("Report will be available as {}", receipt.report_key);
        return Ok(());
    }

    let completed = completions
        .recv()
        .await
        .context("Upload completion was not announced")?;

    let policy = PollPolicy {
        interval: Duration::from_secs(cli.interval_secs),
        max_attempts: cli.max_attempts,
    };
    eprintln!("Waiting for report {}...", completed.report_key);

    let html = AnalysisClient::new(http, &cli.server)
        .wait_for_report(&completed.report_key, policy)
        .await?;

    match cli.output {
        Some(path) => {
            tokio::fs::write(&path, html)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Report written to {}", path.display());
        }
        None => println!("{}", html),
    }

    Ok(())
}
