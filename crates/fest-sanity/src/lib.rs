//! HTTP content store client for the Sanity query API.
//!
//! [`SanityClient`] renders each logical [`Query`](fest_core::query::Query) to
//! GROQ and executes it in a single round-trip. It is constructed once per
//! process and passed to whoever needs it; there is no global client.

mod client;

pub mod error;

pub use client::{SanityClient, SanityConfig};
pub use error::{Error, Result};
