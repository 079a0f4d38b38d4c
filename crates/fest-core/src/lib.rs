//! Core types and trait definitions for the festival site.
//!
//! This crate is deliberately free of HTTP and runtime dependencies. It holds
//! the closed [`Locale`] set, the raw document shapes returned by the content
//! store, the logical [`Query`](query::Query) model, and the
//! [`ContentStore`](store::ContentStore) abstraction every backend implements.

pub mod document;
pub mod error;
pub mod image;
pub mod locale;
pub mod queries;
pub mod query;
pub mod store;

pub use error::{ImageError, QueryError, Result};
pub use locale::Locale;
