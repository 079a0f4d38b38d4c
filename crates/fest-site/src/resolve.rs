//! Content resolvers: one per document kind.
//!
//! Resolvers are the error boundary between the content store and the pages.
//! Store failures and undecodable results are logged here and turned into the
//! empty result (`None` for singletons, `[]` for lists), so callers never see
//! an error.

use std::sync::Arc;

use fest_core::{
  Locale, QueryError,
  document::{Artist, Homepage, SiteSettings},
  queries,
  query::Query,
  store::ContentStore,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub struct Resolver<S> {
  store: Arc<S>,
}

impl<S> Clone for Resolver<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: ContentStore> Resolver<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// The global site settings, if any exist.
  pub async fn site_settings(&self) -> Option<SiteSettings> {
    self.fetch_one("siteSettings", &queries::site_settings()).await
  }

  /// The homepage for `locale`. Without a locale nothing is queried.
  pub async fn homepage(&self, locale: Option<Locale>) -> Option<Homepage> {
    let Some(locale) = locale else {
      tracing::warn!("homepage requested without a locale");
      return None;
    };
    self.fetch_one("homepage", &queries::homepage(locale)).await
  }

  /// Every artist for `locale`, ordered by position then name. Without a
  /// locale nothing is queried.
  pub async fn artists(&self, locale: Option<Locale>) -> Vec<Artist> {
    let Some(locale) = locale else {
      tracing::warn!("artist list requested without a locale");
      return Vec::new();
    };
    self.fetch_list("artist", &queries::artists(locale)).await
  }

  /// A single artist by slug.
  pub async fn artist(&self, locale: Option<Locale>, slug: &str) -> Option<Artist> {
    let Some(locale) = locale else {
      tracing::warn!(slug, "artist requested without a locale");
      return None;
    };
    if slug.is_empty() {
      return None;
    }
    self.fetch_one("artist", &queries::artist_by_slug(locale, slug)).await
  }

  async fn fetch(&self, kind: &'static str, query: &Query) -> Option<Value> {
    match self.store.fetch(query).await {
      Ok(value) => value,
      Err(err) => {
        log_query_error(kind, query, &err);
        None
      }
    }
  }

  async fn fetch_one<T: DeserializeOwned>(
    &self,
    kind: &'static str,
    query: &Query,
  ) -> Option<T> {
    let value = self.fetch(kind, query).await?;
    if !value.is_object() {
      tracing::error!(kind, got = %json_type(&value), "expected a document");
      return None;
    }
    match serde_json::from_value(value) {
      Ok(doc) => Some(doc),
      Err(err) => {
        tracing::error!(kind, error = %err, "undecodable document");
        None
      }
    }
  }

  async fn fetch_list<T: DeserializeOwned>(
    &self,
    kind: &'static str,
    query: &Query,
  ) -> Vec<T> {
    let items = match self.fetch(kind, query).await {
      None => return Vec::new(),
      Some(Value::Array(items)) => items,
      Some(other) => {
        tracing::error!(kind, got = %json_type(&other), "expected a list");
        return Vec::new();
      }
    };
    items
      .into_iter()
      .filter(Value::is_object)
      .filter_map(|item| match serde_json::from_value(item) {
        Ok(doc) => Some(doc),
        Err(err) => {
          tracing::warn!(kind, error = %err, "skipping undecodable document");
          None
        }
      })
      .collect()
  }
}

fn log_query_error(kind: &'static str, query: &Query, err: &QueryError) {
  if err.is_defect() {
    tracing::error!(kind, groq = %query.to_groq(), error = %err, "content query failed");
  } else {
    tracing::warn!(kind, error = %err, "content store unavailable");
  }
}

fn json_type(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "bool",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}
