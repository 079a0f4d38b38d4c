//! Test doubles and a small dataset shared by the unit and router tests.

use std::{
  future::Future,
  sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
  },
};

use fest_core::{QueryError, query::Query, store::ContentStore};
use fest_store_memory::MemoryStore;
use serde_json::{Value, json};

use crate::{AppState, config::ServerConfig};

/// A store that answers every query with one canned outcome.
pub struct StubStore {
  outcome: fn() -> Result<Option<Value>, QueryError>,
  answer:  Option<Value>,
  calls:   AtomicUsize,
}

impl StubStore {
  fn with(outcome: fn() -> Result<Option<Value>, QueryError>) -> Self {
    Self { outcome, answer: None, calls: AtomicUsize::new(0) }
  }

  /// Every query fails as if the network were down.
  pub fn transport() -> Self {
    Self::with(|| Err(connection_refused()))
  }

  /// Every query is refused as malformed.
  pub fn rejected() -> Self {
    Self::with(|| {
      Err(QueryError::Rejected { status: 400, message: "parse error".to_string() })
    })
  }

  /// Every query returns `value`.
  pub fn answering(value: Value) -> Self {
    Self { answer: Some(value), ..Self::with(|| Ok(None)) }
  }

  pub fn calls(&self) -> usize { self.calls.load(Ordering::Relaxed) }
}

impl ContentStore for StubStore {
  fn fetch<'a>(
    &'a self,
    _query: &'a Query,
  ) -> impl Future<Output = Result<Option<Value>, QueryError>> + Send + 'a {
    async move {
      self.calls.fetch_add(1, Ordering::Relaxed);
      match &self.answer {
        Some(value) => Ok(Some(value.clone())),
        None => (self.outcome)(),
      }
    }
  }
}

/// The fixture dataset, except that queries for the listed document types
/// fail as if the network were down.
pub struct PartialOutage {
  inner:   MemoryStore,
  failing: &'static [&'static str],
}

impl PartialOutage {
  pub fn of(failing: &'static [&'static str]) -> Self {
    Self { inner: fixture_store(), failing }
  }
}

impl ContentStore for PartialOutage {
  fn fetch<'a>(
    &'a self,
    query: &'a Query,
  ) -> impl Future<Output = Result<Option<Value>, QueryError>> + Send + 'a {
    async move {
      if self.failing.contains(&query.doc_type) {
        return Err(connection_refused());
      }
      self.inner.fetch(query).await
    }
  }
}

fn connection_refused() -> QueryError {
  QueryError::Transport(Box::new(std::io::Error::new(
    std::io::ErrorKind::ConnectionRefused,
    "connection refused",
  )))
}

fn image(id: &str) -> Value {
  json!({ "_type": "image", "asset": { "_type": "reference", "_ref": format!("image-{id}-600x600-jpg") } })
}

fn artist(id: &str, name: &str, language: &str, position: Option<i64>, day: &str) -> Value {
  json!({
    "_id": id,
    "_type": "artist",
    "language": language,
    "name": name,
    "slug": { "_type": "slug", "current": name.to_lowercase().replace(' ', "-") },
    "country": "RO",
    "position": position,
    "day": day,
    "bio": format!("{name} bio"),
    "image": image(id),
    "musicLinks": [
      { "_key": "l1", "platform": "spotify", "url": format!("https://open.spotify.com/{id}") },
      { "_key": "l2", "platform": "myspace", "url": "https://myspace.com/x" },
      { "_key": "l3", "platform": "bandcamp" },
    ],
  })
}

/// Site settings, an English homepage, and artists in both locales. There is
/// deliberately no Romanian homepage.
pub fn fixture_store() -> MemoryStore {
  MemoryStore::from_documents([
    json!({
      "_id": "siteSettings",
      "_type": "siteSettings",
      "title": "ShatterFest",
      "description": "Metalcore in Bucharest",
      "logo": { "asset": { "_ref": "image-logo-200x100-png" }, "alt": "Logo" },
      "ticketUrl": "https://tickets.example/shatterfest",
      "socialLinks": [
        { "platform": "facebook", "url": "https://facebook.com/fest" },
        { "platform": "instagram" },
      ],
      "ogImage": { "asset": { "_ref": "image-og-1200x630-jpg" } },
    }),
    json!({
      "_id": "homepage-en",
      "_type": "homepage",
      "language": "en",
      "heroImage": { "asset": { "_ref": "image-hero-1920x1080-jpg" }, "alt": "Crowd" },
      "primaryCTA": {
        "text": "BUY WEEKEND PASS",
        "url": "https://tickets.example/shatterfest",
        "isEnabled": true,
        "priceInfo": "€46 / 230 RON",
      },
      "introTitle": "Prepare for Impact!",
      "introText": [
        { "_type": "block", "_key": "b1", "style": "normal", "children": [{ "_type": "span", "text": "Two days of chaos." }] },
        { "_type": "block", "_key": "b2", "style": "normal", "children": [{ "_type": "span", "text": "   " }] },
      ],
      "quickInfoTitle": "At a glance",
      "quickInfoItems": [
        { "_key": "q1", "title": "Date", "description": "May 23-24", "iconType": "calendar" },
        { "_key": "q2", "title": "Where", "description": "", "iconType": "location" },
        { "_key": "q3", "title": "Bands", "description": "12+ Bands", "iconType": "users" },
      ],
      "lineupHighlightsTitle": "Featured",
      "featuredArtists": [
        { "_type": "reference", "_ref": "en-alpha" },
        { "_type": "reference", "_ref": "gone" },
      ],
      "pageTitle": "Home",
      "pageDescription": "ShatterFest 2025",
    }),
    artist("en-alpha", "Alpha", "en", Some(1), "friday"),
    artist("en-beta", "Beta", "en", None, "saturday"),
    artist("en-gamma", "Gamma", "en", Some(1), "saturday"),
    artist("en-delta", "Delta", "en", Some(3), "tbc"),
    artist("ro-alpha", "Alpha", "ro", Some(1), "tbc"),
  ])
  .expect("fixture documents are valid")
}

/// Site state over `store` with default routing.
pub fn state<S: ContentStore>(store: S) -> AppState<S> {
  let config = ServerConfig::from_toml(
    r#"
      [sanity]
      project_id = "abc123"
      dataset = "production"
    "#,
  )
  .expect("test config is valid");
  AppState::new(Arc::new(store), &config).expect("default routing is valid")
}
