use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod content;
mod report;
mod tour;

#[derive(Parser, Debug)]
struct Args {
    /// Motion timings; missing file means built-in defaults.
    #[arg(long, default_value = "showcase.toml")]
    config: PathBuf,
    /// Build pages without the preload sequence.
    #[arg(long)]
    skip_preload: bool,
    /// Print one JSON object per snapshot.
    #[arg(long)]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let config = view_core::load_config(&args.config)?;
    tracing::info!(config = %args.config.display(), "starting showcase tour");

    tour::Tour::new(config, !args.skip_preload, args.json)?
        .run()
        .await
}
