//! Error types for `fest-core`.

use thiserror::Error;

/// Failure of a single content-store round-trip.
#[derive(Debug, Error)]
pub enum QueryError {
  /// The store could not be reached or the response body could not be read.
  #[error("transport error: {0}")]
  Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// The store answered but refused the query.
  #[error("query rejected ({status}): {message}")]
  Rejected { status: u16, message: String },

  /// The store answered with something other than the expected envelope.
  #[error("undecodable response: {0}")]
  Decode(#[from] serde_json::Error),
}

impl QueryError {
  /// `true` when the failure points at the query itself rather than the
  /// network: a malformed query or an unexpected response shape.
  pub fn is_defect(&self) -> bool {
    match self {
      Self::Transport(_) => false,
      Self::Rejected { status, .. } => (400..500).contains(status),
      Self::Decode(_) => true,
    }
  }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageError {
  #[error("image has no asset reference")]
  MissingAsset,

  #[error("malformed asset reference: {0:?}")]
  MalformedReference(String),
}

pub type Result<T, E = QueryError> = std::result::Result<T, E>;
