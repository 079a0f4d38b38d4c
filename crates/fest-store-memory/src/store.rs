//! [`MemoryStore`]: the in-process implementation of [`ContentStore`].

use std::{
  collections::HashMap,
  future::Future,
  path::Path,
  sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
  },
};

use fest_core::{QueryError, query::Query, store::ContentStore};
use serde_json::Value;

use crate::{Error, Result, eval};

const DRAFT_PREFIX: &str = "drafts.";

// ─── Store ───────────────────────────────────────────────────────────────────

pub(crate) struct Documents {
  /// Published documents, in load order.
  pub(crate) all:   Vec<Value>,
  /// `_id` → index into `all`.
  pub(crate) by_id: HashMap<String, usize>,
}

impl Documents {
  pub(crate) fn get(&self, id: &str) -> Option<&Value> {
    self.by_id.get(id).map(|&i| &self.all[i])
  }
}

struct Inner {
  documents: Documents,
  fetches:   AtomicUsize,
}

/// A content store backed by a document set held in memory.
///
/// Draft documents (`_id` starting with `drafts.`) are accepted on load but
/// never returned, matching what the public query API serves.
///
/// Cloning is cheap; the document set is reference-counted.
#[derive(Clone)]
pub struct MemoryStore {
  inner: Arc<Inner>,
}

impl MemoryStore {
  /// Build a store from already-parsed documents.
  pub fn from_documents(docs: impl IntoIterator<Item = Value>) -> Result<Self> {
    let mut all = Vec::new();
    let mut by_id = HashMap::new();

    for (i, doc) in docs.into_iter().enumerate() {
      let line = i + 1;
      let obj = doc.as_object().ok_or(Error::NotADocument { line })?;
      let id = obj
        .get("_id")
        .and_then(Value::as_str)
        .ok_or(Error::MissingField { line, field: "_id" })?;
      if !obj.get("_type").is_some_and(Value::is_string) {
        return Err(Error::MissingField { line, field: "_type" });
      }
      if id.starts_with(DRAFT_PREFIX) {
        continue;
      }
      if by_id.insert(id.to_string(), all.len()).is_some() {
        return Err(Error::DuplicateId { line, id: id.to_string() });
      }
      all.push(doc);
    }

    Ok(Self {
      inner: Arc::new(Inner {
        documents: Documents { all, by_id },
        fetches:   AtomicUsize::new(0),
      }),
    })
  }

  /// Parse a dataset export: one JSON document per line, blank lines ignored.
  pub fn from_ndjson(text: &str) -> Result<Self> {
    let mut docs = Vec::new();
    for (i, raw) in text.lines().enumerate() {
      if raw.trim().is_empty() {
        continue;
      }
      let doc = serde_json::from_str(raw)
        .map_err(|source| Error::Json { line: i + 1, source })?;
      docs.push(doc);
    }
    Self::from_documents(docs)
  }

  /// Load a dataset export from `path`.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let text = tokio::fs::read_to_string(path).await?;
    let store = Self::from_ndjson(&text)?;
    tracing::debug!(documents = store.len(), "loaded dataset");
    Ok(store)
  }

  /// An empty store.
  pub fn empty() -> Self {
    Self {
      inner: Arc::new(Inner {
        documents: Documents { all: Vec::new(), by_id: HashMap::new() },
        fetches:   AtomicUsize::new(0),
      }),
    }
  }

  /// Number of published documents.
  pub fn len(&self) -> usize { self.inner.documents.all.len() }

  pub fn is_empty(&self) -> bool { self.len() == 0 }

  /// How many queries this store (and its clones) has answered.
  pub fn fetch_count(&self) -> usize {
    self.inner.fetches.load(Ordering::Relaxed)
  }
}

impl ContentStore for MemoryStore {
  fn fetch<'a>(
    &'a self,
    query: &'a Query,
  ) -> impl Future<Output = Result<Option<Value>, QueryError>> + Send + 'a {
    async move {
      self.inner.fetches.fetch_add(1, Ordering::Relaxed);
      Ok(eval::run(&self.inner.documents, query))
    }
  }
}
