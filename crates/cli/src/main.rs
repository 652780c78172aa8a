use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use opusmill_core::{
    load_config, validate_config, BatchRunner, Config, FfmpegCoverResolver, FfmpegEncoder,
    FfprobeProber,
};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Config file used when `OPUSMILL_CONFIG` is not set.
const DEFAULT_CONFIG_PATH: &str = "opusmill.toml";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let (source_root, output_root) = parse_dirs()?;

    // Load configuration
    let config = match std::env::var("OPUSMILL_CONFIG") {
        Ok(path) => {
            let path = PathBuf::from(path);
            info!("Loading configuration from {:?}", path);
            load_config(&path)
                .with_context(|| format!("Failed to load config from {:?}", path))?
        }
        Err(_) => {
            let path = PathBuf::from(DEFAULT_CONFIG_PATH);
            if path.exists() {
                info!("Loading configuration from {:?}", path);
                load_config(&path)
                    .with_context(|| format!("Failed to load config from {:?}", path))?
            } else {
                Config::default()
            }
        }
    };

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("opusmill {} starting", VERSION);
    info!(
        "Converting {} -> {}",
        source_root.display(),
        output_root.display()
    );

    let prober = Arc::new(FfprobeProber::new(config.prober.clone()));
    let encoder = Arc::new(FfmpegEncoder::new(config.encoder.clone()));
    let cover = Arc::new(FfmpegCoverResolver::new(config.cover.clone()));
    let runner = BatchRunner::new(config.pipeline.clone(), prober, encoder, cover);

    let summary = runner
        .run(&source_root, &output_root)
        .await
        .context("Batch conversion failed")?;

    info!(
        "All done: {} converted, {} skipped, {} failed",
        summary.converted, summary.skipped, summary.failed
    );

    Ok(())
}

/// The two resolved directory paths are the whole command line.
fn parse_dirs() -> Result<(PathBuf, PathBuf)> {
    let mut args = std::env::args_os().skip(1);
    match (args.next(), args.next(), args.next()) {
        (Some(source), Some(output), None) => {
            Ok((PathBuf::from(source), PathBuf::from(output)))
        }
        _ => bail!("usage: opusmill <source_dir> <output_dir>"),
    }
}
