//! Async HTTP client wrapping the Sanity query API.

use std::{future::Future, time::Duration};

use fest_core::{QueryError, query::Query, store::ContentStore};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::{Error, Result};

fn default_api_version() -> String { "2024-01-01".to_string() }

/// Connection settings for one project/dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct SanityConfig {
  pub project_id:   String,
  pub dataset:      String,
  #[serde(default = "default_api_version")]
  pub api_version:  String,
  /// Query the edge cache instead of the live API. Ignored when a token is
  /// set, since authenticated requests always go to the live API.
  #[serde(default)]
  pub use_cdn:      bool,
  #[serde(default)]
  pub token:        Option<String>,
  /// No timeout unless set; the transport default applies.
  #[serde(default)]
  pub timeout_secs: Option<u64>,
}

/// Async HTTP client for the Sanity query API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct SanityClient {
  client: Client,
  config: SanityConfig,
}

impl SanityClient {
  pub fn new(config: SanityConfig) -> Result<Self> {
    validate_name("project_id", &config.project_id)?;
    validate_name("dataset", &config.dataset)?;
    if config.api_version.is_empty() {
      return Err(Error::InvalidConfig("api_version is empty".to_string()));
    }

    let mut builder = Client::builder();
    if let Some(secs) = config.timeout_secs {
      builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(Self { client: builder.build()?, config })
  }

  /// `https://{project}.{api|apicdn}.sanity.io/v{version}/data/query/{dataset}`
  pub fn endpoint(&self) -> String {
    let host = if self.config.use_cdn && self.config.token.is_none() {
      "apicdn"
    } else {
      "api"
    };
    format!(
      "https://{}.{host}.sanity.io/v{}/data/query/{}",
      self.config.project_id,
      self.config.api_version.trim_start_matches('v'),
      self.config.dataset,
    )
  }

  async fn execute(&self, query: &Query) -> Result<Option<Value>, QueryError> {
    let mut request = self
      .client
      .get(self.endpoint())
      .query(&query_pairs(query));
    if let Some(token) = &self.config.token {
      request = request.bearer_auth(token);
    }

    let resp = request
      .send()
      .await
      .map_err(|e| QueryError::Transport(Box::new(e)))?;
    let status = resp.status();
    let body = resp
      .bytes()
      .await
      .map_err(|e| QueryError::Transport(Box::new(e)))?;

    tracing::trace!(%status, doc_type = query.doc_type, "query answered");
    decode_response(status, &body)
  }
}

impl ContentStore for SanityClient {
  fn fetch<'a>(
    &'a self,
    query: &'a Query,
  ) -> impl Future<Output = Result<Option<Value>, QueryError>> + Send + 'a {
    self.execute(query)
  }
}

// ─── Wire format ─────────────────────────────────────────────────────────────

/// `query=<groq>`, `perspective=published`, and `$name=<json>` per parameter.
fn query_pairs(query: &Query) -> Vec<(String, String)> {
  let mut pairs = vec![
    ("query".to_string(), query.to_groq()),
    ("perspective".to_string(), "published".to_string()),
  ];
  pairs.extend(
    query
      .params
      .iter()
      .map(|(name, value)| (format!("${name}"), value.to_string())),
  );
  pairs
}

#[derive(Deserialize)]
struct Envelope {
  #[serde(default)]
  result: Value,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
  error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
  #[serde(default)]
  description: Option<String>,
  #[serde(rename = "type", default)]
  kind:        Option<String>,
}

fn decode_response(
  status: StatusCode,
  body: &[u8],
) -> Result<Option<Value>, QueryError> {
  if !status.is_success() {
    let message = serde_json::from_slice::<ErrorEnvelope>(body)
      .ok()
      .and_then(|e| e.error.description.or(e.error.kind))
      .unwrap_or_else(|| String::from_utf8_lossy(body).into_owned());
    return Err(QueryError::Rejected { status: status.as_u16(), message });
  }

  let envelope: Envelope = serde_json::from_slice(body)?;
  Ok(match envelope.result {
    Value::Null => None,
    value => Some(value),
  })
}

fn validate_name(field: &str, value: &str) -> Result<()> {
  let ok = !value.is_empty()
    && value
      .bytes()
      .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
  if ok {
    Ok(())
  } else {
    Err(Error::InvalidConfig(format!("{field} {value:?} is not a valid name")))
  }
}

#[cfg(test)]
mod tests {
  use fest_core::{Locale, queries};
  use serde_json::json;

  use super::*;

  fn config() -> SanityConfig {
    SanityConfig {
      project_id:   "abc123".to_string(),
      dataset:      "production".to_string(),
      api_version:  default_api_version(),
      use_cdn:      true,
      token:        None,
      timeout_secs: None,
    }
  }

  #[test]
  fn endpoint_uses_cdn_host_when_anonymous() {
    let client = SanityClient::new(config()).unwrap();
    assert_eq!(
      client.endpoint(),
      "https://abc123.apicdn.sanity.io/v2024-01-01/data/query/production"
    );
  }

  #[test]
  fn token_forces_live_api() {
    let client = SanityClient::new(SanityConfig {
      token: Some("secret".to_string()),
      api_version: "v2025-02-19".to_string(),
      ..config()
    })
    .unwrap();
    assert_eq!(
      client.endpoint(),
      "https://abc123.api.sanity.io/v2025-02-19/data/query/production"
    );
  }

  #[test]
  fn rejects_unsafe_names() {
    let bad = SanityConfig { project_id: "abc/../x".to_string(), ..config() };
    assert!(matches!(SanityClient::new(bad), Err(Error::InvalidConfig(_))));
    let empty = SanityConfig { dataset: String::new(), ..config() };
    assert!(matches!(SanityClient::new(empty), Err(Error::InvalidConfig(_))));
  }

  #[test]
  fn params_are_json_encoded() {
    let pairs = query_pairs(&queries::artist_by_slug(Locale::Ro, "alpha"));
    assert!(pairs.contains(&("$locale".to_string(), "\"ro\"".to_string())));
    assert!(pairs.contains(&("$slug".to_string(), "\"alpha\"".to_string())));
    assert_eq!(pairs[0].0, "query");
  }

  #[test]
  fn null_result_is_none() {
    let body = br#"{"ms":3,"query":"*[0]","result":null}"#;
    assert_eq!(decode_response(StatusCode::OK, body).unwrap(), None);
  }

  #[test]
  fn result_is_unwrapped() {
    let body = br#"{"ms":3,"result":[{"name":"A"}]}"#;
    assert_eq!(
      decode_response(StatusCode::OK, body).unwrap(),
      Some(json!([{ "name": "A" }]))
    );
  }

  #[test]
  fn error_envelope_becomes_rejected_defect() {
    let body = br#"{"error":{"description":"unexpected token","type":"queryParseError"}}"#;
    let err = decode_response(StatusCode::BAD_REQUEST, body).unwrap_err();
    assert!(err.is_defect());
    match err {
      QueryError::Rejected { status, message } => {
        assert_eq!(status, 400);
        assert_eq!(message, "unexpected token");
      }
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn server_errors_are_not_defects() {
    let err =
      decode_response(StatusCode::BAD_GATEWAY, b"upstream down").unwrap_err();
    assert!(!err.is_defect());
    assert!(err.to_string().contains("upstream down"));
  }

  #[test]
  fn garbage_body_is_decode_error() {
    let err = decode_response(StatusCode::OK, b"<html>").unwrap_err();
    assert!(matches!(err, QueryError::Decode(_)));
  }
}
