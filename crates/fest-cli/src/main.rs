//! `fest`: developer tool for the festival site.
//!
//! Runs the same routing and page assembly as the server, without HTTP, and
//! prints the result as JSON.
//!
//! # Usage
//!
//! ```
//! fest route /lineup
//! fest page ro lineup
//! fest page en artist --slug alpha
//! fest --config staging.toml page en home
//! ```

mod output;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use fest_site::{AppState, backend::Backend, config::ServerConfig, pages, routing::LocaleRouter};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "fest", about = "Inspect festival site routing and pages")]
struct Args {
  /// Path to the TOML configuration file.
  #[arg(short, long, env = "FEST_CONFIG", default_value = "fest.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Show what the locale router does with a request path.
  Route {
    path: String,
  },
  /// Assemble a page and print its view model.
  Page {
    locale: String,
    kind:   PageKind,
    /// Artist slug, for `artist` pages.
    #[arg(long)]
    slug:   Option<String>,
  },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PageKind {
  Home,
  Lineup,
  Artist,
  Info,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  // stdout carries the JSON; logs go to stderr.
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();
  let config = ServerConfig::load(&args.config)
    .with_context(|| format!("loading configuration from {}", args.config.display()))?;

  let value = match args.command {
    Command::Route { path } => {
      let router = LocaleRouter::new(config.routing.clone())
        .map_err(anyhow::Error::msg)
        .context("invalid routing configuration")?;
      output::route(&router, &path)
    }
    Command::Page { locale, kind, slug } => page(&config, &locale, kind, slug).await?,
  };

  println!("{}", serde_json::to_string_pretty(&value)?);
  Ok(())
}

async fn page(
  config: &ServerConfig,
  code: &str,
  kind: PageKind,
  slug: Option<String>,
) -> Result<serde_json::Value> {
  let backend = Backend::connect(config).await.context("connecting content store")?;
  let state = AppState::new(Arc::new(backend), config).context("building site state")?;

  let Some(locale) = state.router.parse_locale(code) else {
    bail!("unsupported locale {code:?}");
  };

  let value = match kind {
    PageKind::Home => {
      let path = format!("/{locale}");
      output::to_json(
        &pages::render(&state, locale, &path, pages::home::assemble(&state, locale)).await,
      )?
    }
    PageKind::Lineup => {
      let path = format!("/{locale}/lineup");
      output::to_json(
        &pages::render(&state, locale, &path, pages::lineup::assemble(&state, locale)).await,
      )?
    }
    PageKind::Info => {
      let path = format!("/{locale}/info");
      output::to_json(
        &pages::render(&state, locale, &path, pages::info::assemble(&state, locale)).await,
      )?
    }
    PageKind::Artist => {
      let slug = slug.context("artist pages need --slug")?;
      let Some((meta, view)) = pages::artist::assemble(&state, locale, &slug).await else {
        bail!("no artist with slug {slug:?} in {locale}");
      };
      output::to_json(&serde_json::json!({ "meta": meta, "page": view }))?
    }
  };
  Ok(value)
}
