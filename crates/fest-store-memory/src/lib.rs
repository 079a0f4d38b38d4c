//! In-process backend for the festival content store.
//!
//! Holds a dataset export in memory and evaluates the logical
//! [`Query`](fest_core::query::Query) model against it, so the site can run
//! without network access and tests can run against realistic documents.

mod eval;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::MemoryStore;
