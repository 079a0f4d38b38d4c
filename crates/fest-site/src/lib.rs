//! Festival site: locale routing, content resolution and page assembly.
//!
//! Exposes an axum [`Router`] that serves every page's view model as JSON,
//! backed by any [`ContentStore`]. Rendering the view models is left to the
//! caller.

pub mod backend;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod pages;
pub mod resolve;
pub mod routing;
pub mod view;

#[cfg(test)]
mod testing;

pub use error::{SiteError, StartupError};

use std::{path::Path as FsPath, sync::Arc};

use axum::{
  Json, Router,
  extract::{Path, State},
  http::Uri,
  middleware,
  routing::get,
};
use fest_core::{Locale, image::ImageUrlBuilder, store::ContentStore};
use serde_json::{Value, json};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
  config::ServerConfig,
  dictionary::DictionaryLoader,
  pages::{artist::ArtistDetailView, home::HomeView, info::InfoView, lineup::LineupView},
  resolve::Resolver,
  routing::{LocaleRouter, locale_redirect},
  view::PageResponse,
};

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub resolver:     Resolver<S>,
  pub dictionaries: Arc<DictionaryLoader>,
  pub images:       Arc<ImageUrlBuilder>,
  pub router:       Arc<LocaleRouter>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      resolver:     self.resolver.clone(),
      dictionaries: Arc::clone(&self.dictionaries),
      images:       Arc::clone(&self.images),
      router:       Arc::clone(&self.router),
    }
  }
}

impl<S: ContentStore> AppState<S> {
  pub fn new(store: Arc<S>, config: &ServerConfig) -> Result<Self, StartupError> {
    let router = LocaleRouter::new(config.routing.clone()).map_err(StartupError::Invalid)?;
    Ok(Self {
      resolver:     Resolver::new(store),
      dictionaries: Arc::new(DictionaryLoader::new(router.default_locale())),
      images:       Arc::new(ImageUrlBuilder::new(
        &config.sanity.project_id,
        &config.sanity.dataset,
      )),
      router:       Arc::new(router),
    })
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the site router. Files under `static_dir` are served below the
/// routing internal prefix.
pub fn router<S>(state: AppState<S>, static_dir: Option<&FsPath>) -> Router
where
  S: ContentStore + 'static,
{
  let locales = Arc::clone(&state.router);

  let mut app = Router::new()
    .route("/api/health",             get(health))
    .route("/{locale}",               get(home_page::<S>))
    .route("/{locale}/",              get(home_page::<S>))
    .route("/{locale}/lineup",        get(lineup_page::<S>))
    .route("/{locale}/lineup/{slug}", get(artist_page::<S>))
    .route("/{locale}/info",          get(info_page::<S>));
  if let Some(dir) = static_dir {
    app = app.nest_service(locales.internal_prefix(), ServeDir::new(dir));
  }

  app
    .fallback(not_found)
    .layer(middleware::from_fn_with_state(locales, locale_redirect))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Route handlers ──────────────────────────────────────────────────────────

type PageResult<T> = Result<Json<PageResponse<T>>, SiteError>;

fn supported_locale<S>(state: &AppState<S>, code: &str) -> Result<Locale, SiteError> {
  state
    .router
    .parse_locale(code)
    .ok_or_else(|| SiteError::NotFound(format!("no page at /{code}")))
}

async fn home_page<S: ContentStore>(
  State(state): State<AppState<S>>,
  Path(locale): Path<String>,
  uri: Uri,
) -> PageResult<HomeView> {
  let locale = supported_locale(&state, &locale)?;
  let page = pages::home::assemble(&state, locale);
  Ok(Json(pages::render(&state, locale, uri.path(), page).await))
}

async fn lineup_page<S: ContentStore>(
  State(state): State<AppState<S>>,
  Path(locale): Path<String>,
  uri: Uri,
) -> PageResult<LineupView> {
  let locale = supported_locale(&state, &locale)?;
  let page = pages::lineup::assemble(&state, locale);
  Ok(Json(pages::render(&state, locale, uri.path(), page).await))
}

async fn info_page<S: ContentStore>(
  State(state): State<AppState<S>>,
  Path(locale): Path<String>,
  uri: Uri,
) -> PageResult<InfoView> {
  let locale = supported_locale(&state, &locale)?;
  let page = pages::info::assemble(&state, locale);
  Ok(Json(pages::render(&state, locale, uri.path(), page).await))
}

async fn artist_page<S: ContentStore>(
  State(state): State<AppState<S>>,
  Path((locale, slug)): Path<(String, String)>,
  uri: Uri,
) -> PageResult<ArtistDetailView> {
  let locale = supported_locale(&state, &locale)?;
  let (layout, detail) = tokio::join!(
    pages::layout::assemble(&state, locale, uri.path()),
    pages::artist::assemble(&state, locale, &slug),
  );
  let (meta, page) =
    detail.ok_or_else(|| SiteError::NotFound(format!("no artist {slug:?}")))?;
  Ok(Json(PageResponse { layout, meta, page }))
}

/// `GET /api/health`
async fn health() -> Json<Value> { Json(json!({ "status": "ok" })) }

async fn not_found(uri: Uri) -> SiteError {
  SiteError::NotFound(format!("no page at {}", uri.path()))
}
