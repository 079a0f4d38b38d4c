//! Error type for `fest-sanity`.

use thiserror::Error;

/// Failure to construct a [`SanityClient`](crate::SanityClient).
///
/// Query-time failures are reported as [`fest_core::QueryError`].
#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid configuration: {0}")]
  InvalidConfig(String),

  #[error("http client error: {0}")]
  Http(#[from] reqwest::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
