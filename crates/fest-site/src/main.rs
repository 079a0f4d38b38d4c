//! fest-server binary.
//!
//! Reads `fest.toml` (or the path given with `--config`) overlaid with
//! `FEST_*` environment variables, connects the configured content store, and
//! serves the site over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use fest_site::{AppState, backend::Backend, config::ServerConfig};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Festival site server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, env = "FEST_CONFIG", default_value = "fest.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let config = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  let backend = Backend::connect(&config)
    .await
    .context("failed to connect content store")?;

  let state = AppState::new(Arc::new(backend), &config)
    .context("invalid routing configuration")?;
  let app = fest_site::router(state, config.static_dir.as_deref());

  let address = config.address();
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
