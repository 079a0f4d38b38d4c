//! Server configuration.
//!
//! Layered with the `config` crate: an optional TOML file, then `FEST_*`
//! environment variables (`__` separates nested keys, e.g.
//! `FEST_SANITY__PROJECT_ID`).

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use fest_sanity::SanityConfig;
use serde::Deserialize;

use crate::{error::StartupError, routing::RoutingConfig};

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 3000 }

/// Where page content comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
  /// The hosted query API.
  #[default]
  Sanity,
  /// A local NDJSON dataset export.
  File,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentConfig {
  #[serde(default)]
  pub source: ContentSource,
  /// Dataset export; required for `source = "file"`.
  #[serde(default)]
  pub path:   Option<PathBuf>,
}

/// Runtime server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  /// Served under the routing internal prefix when set.
  #[serde(default)]
  pub static_dir: Option<PathBuf>,
  #[serde(default)]
  pub content:    ContentConfig,
  /// Also names the project and dataset that image URLs point at, whatever
  /// the content source.
  pub sanity:     SanityConfig,
  #[serde(default)]
  pub routing:    RoutingConfig,
}

impl ServerConfig {
  /// Read `path` (if it exists) overlaid with the environment.
  pub fn load(path: &Path) -> Result<Self, StartupError> {
    let settings = Config::builder()
      .add_source(File::from(path).required(false))
      .add_source(env_source())
      .build()?;
    Self::finish(settings)
  }

  /// Parse a TOML document, without the environment overlay.
  pub fn from_toml(text: &str) -> Result<Self, StartupError> {
    let settings = Config::builder()
      .add_source(File::from_str(text, FileFormat::Toml))
      .build()?;
    Self::finish(settings)
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  fn finish(settings: Config) -> Result<Self, StartupError> {
    let config: Self = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
  }

  fn validate(&self) -> Result<(), StartupError> {
    if self.content.source == ContentSource::File && self.content.path.is_none() {
      return Err(StartupError::Invalid(
        "content.path is required when content.source = \"file\"".to_string(),
      ));
    }
    Ok(())
  }
}

fn env_source() -> Environment {
  Environment::with_prefix("FEST")
    .prefix_separator("_")
    .separator("__")
    .try_parsing(true)
    .list_separator(",")
    .with_list_parse_key("routing.locales")
    .with_list_parse_key("routing.excluded_prefixes")
}

#[cfg(test)]
mod tests {
  use fest_core::Locale;

  use super::*;

  #[test]
  fn minimal_file_uses_defaults() {
    let config = ServerConfig::from_toml(
      r#"
        [sanity]
        project_id = "abc123"
        dataset = "production"
      "#,
    )
    .unwrap();
    assert_eq!(config.address(), "127.0.0.1:3000");
    assert_eq!(config.content.source, ContentSource::Sanity);
    assert_eq!(config.sanity.api_version, "2024-01-01");
    assert_eq!(config.routing.default_locale, Locale::En);
    assert_eq!(config.routing.internal_prefix, "/_static");
    assert!(config.static_dir.is_none());
  }

  #[test]
  fn full_file_round_trips() {
    let config = ServerConfig::from_toml(
      r#"
        host = "0.0.0.0"
        port = 8080
        static_dir = "public"

        [content]
        source = "file"
        path = "dataset.ndjson"

        [sanity]
        project_id = "abc123"
        dataset = "staging"
        use_cdn = true
        timeout_secs = 5

        [routing]
        locales = ["ro"]
        default_locale = "ro"
        excluded_prefixes = ["/api"]
        public_scheme = "https"
      "#,
    )
    .unwrap();
    assert_eq!(config.port, 8080);
    assert_eq!(config.content.path.as_deref(), Some(Path::new("dataset.ndjson")));
    assert_eq!(config.sanity.timeout_secs, Some(5));
    assert_eq!(config.routing.locales, [Locale::Ro]);
    assert_eq!(config.routing.public_scheme, "https");
  }

  #[test]
  fn file_source_needs_a_path() {
    let err = ServerConfig::from_toml(
      r#"
        [content]
        source = "file"

        [sanity]
        project_id = "abc123"
        dataset = "production"
      "#,
    )
    .unwrap_err();
    assert!(matches!(err, StartupError::Invalid(_)));
  }

  #[test]
  fn sanity_table_is_required() {
    assert!(matches!(
      ServerConfig::from_toml("port = 1"),
      Err(StartupError::Config(_))
    ));
  }
}
