//! Error types and axum `IntoResponse` implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by a page handler.
///
/// Missing content is not an error: pages render their fallbacks instead.
#[derive(Debug, Error)]
pub enum SiteError {
  #[error("not found: {0}")]
  NotFound(String),
}

impl IntoResponse for SiteError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      SiteError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}

/// Failure while turning configuration into a running site.
#[derive(Debug, Error)]
pub enum StartupError {
  #[error("configuration error: {0}")]
  Config(#[from] config::ConfigError),

  #[error("content store client: {0}")]
  Sanity(#[from] fest_sanity::Error),

  #[error("dataset: {0}")]
  Dataset(#[from] fest_store_memory::Error),

  #[error("invalid configuration: {0}")]
  Invalid(String),
}
