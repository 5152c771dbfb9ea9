//! chunkup command-line entry point.

mod app;
mod cli;
mod config;

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let mut config = config::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    tracing::debug!(base_url = %config.base_url, chunk_size = config.chunk_size, "configuration loaded");

    let rt = tokio::runtime::Runtime::new()?;
    let location = rt.block_on(app::run(&cli.file, config))?;

    // The result location is the only thing written to stdout.
    println!("{location}");
    Ok(())
}
