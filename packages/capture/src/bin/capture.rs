// Capture CLI: reads a saved share page and prints the capture payload as JSON.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use capture::{capture_page, CaptureConfig};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "capture", about = "Capture an AI chat transcript from a saved share page")]
struct Cli {
    /// Share URL the page was saved from (drives provider detection)
    #[arg(long)]
    url: String,

    /// HTML file to read (stdin when omitted)
    #[arg(long)]
    html: Option<PathBuf>,

    /// Skip citation collection
    #[arg(long)]
    no_citations: bool,

    /// Pretty-print the JSON payload
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,capture=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let html = match &cli.html {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read HTML from stdin")?;
            buf
        }
    };

    let config = CaptureConfig::default().with_citations(!cli.no_citations);
    let payload = capture_page(&html, &cli.url, &config).context("Capture failed")?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&payload)?
    } else {
        serde_json::to_string(&payload)?
    };
    println!("{json}");

    Ok(())
}
