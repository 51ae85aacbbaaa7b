//! Jiig CLI binary.

use anyhow::Result;
use jiig::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the jiig CLI.
///
/// Uses tokio's `current_thread` runtime; the only async work is reading the
/// record export.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Example: RUST_LOG=jiig=debug,jiig_jsonl=trace jiig metrics
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jiig=info,jiig_jsonl=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("Starting jiig CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Jiig CLI completed successfully");
    Ok(())
}
