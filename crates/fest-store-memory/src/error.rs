//! Error type for `fest-store-memory`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("line {line}: invalid json: {source}")]
  Json {
    line:   usize,
    #[source]
    source: serde_json::Error,
  },

  /// A dataset entry that is not a JSON object.
  #[error("line {line}: not a document")]
  NotADocument { line: usize },

  #[error("line {line}: document has no {field}")]
  MissingField { line: usize, field: &'static str },

  #[error("line {line}: duplicate document id {id:?}")]
  DuplicateId { line: usize, id: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
