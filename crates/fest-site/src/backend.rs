//! The content store chosen at startup.

use std::future::Future;

use fest_core::{QueryError, query::Query, store::ContentStore};
use fest_sanity::SanityClient;
use fest_store_memory::MemoryStore;
use serde_json::Value;

use crate::{
  config::{ContentSource, ServerConfig},
  error::StartupError,
};

pub enum Backend {
  Sanity(SanityClient),
  File(MemoryStore),
}

impl Backend {
  /// Build the client, or load the dataset, named by `config.content`.
  pub async fn connect(config: &ServerConfig) -> Result<Self, StartupError> {
    match config.content.source {
      ContentSource::Sanity => {
        let client = SanityClient::new(config.sanity.clone())?;
        tracing::info!(endpoint = %client.endpoint(), "using hosted content");
        Ok(Self::Sanity(client))
      }
      ContentSource::File => {
        let path = config.content.path.as_ref().ok_or_else(|| {
          StartupError::Invalid("content.path is not set".to_string())
        })?;
        let store = MemoryStore::open(path).await?;
        tracing::info!(path = %path.display(), documents = store.len(), "using local dataset");
        Ok(Self::File(store))
      }
    }
  }
}

impl ContentStore for Backend {
  fn fetch<'a>(
    &'a self,
    query: &'a Query,
  ) -> impl Future<Output = Result<Option<Value>, QueryError>> + Send + 'a {
    async move {
      match self {
        Backend::Sanity(client) => client.fetch(query).await,
        Backend::File(store) => store.fetch(query).await,
      }
    }
  }
}
