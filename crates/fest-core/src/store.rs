//! The `ContentStore` trait.
//!
//! The trait is implemented by content backends (`fest-sanity` over HTTP,
//! `fest-store-memory` in process). Higher layers (`fest-site`, `fest-cli`)
//! depend on this abstraction, not on any concrete backend.

use std::future::Future;

use serde_json::Value;

use crate::{error::QueryError, query::Query};

/// Read-only access to the external document store.
///
/// One call is one round-trip: no retries, no caching. A query that matches
/// nothing resolves to `Ok(None)` for [`Slice::First`](crate::query::Slice)
/// and to an empty array otherwise.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ContentStore: Send + Sync {
  fn fetch<'a>(
    &'a self,
    query: &'a Query,
  ) -> impl Future<Output = Result<Option<Value>, QueryError>> + Send + 'a;
}
