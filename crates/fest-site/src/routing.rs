//! Locale routing.
//!
//! Every request path is classified as pass-through or as a permanent redirect
//! to a locale-prefixed path. Paths that belong to static assets or to
//! non-page surfaces are never redirected.

use std::sync::Arc;

use axum::{
  extract::{Request, State},
  http::{HeaderMap, header},
  middleware::Next,
  response::{IntoResponse, Redirect, Response},
};
use fest_core::Locale;
use serde::Deserialize;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Locale routing rules, deserialised from the `[routing]` config table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
  pub locales:           Vec<Locale>,
  pub default_locale:    Locale,
  /// Prefix under which the site serves its own static files.
  pub internal_prefix:   String,
  pub excluded_prefixes: Vec<String>,
  /// Scheme used in redirect URLs when the request carries no
  /// `X-Forwarded-Proto`.
  pub public_scheme:     String,
}

impl Default for RoutingConfig {
  fn default() -> Self {
    Self {
      locales:           Locale::all(),
      default_locale:    Locale::DEFAULT,
      internal_prefix:   "/_static".to_string(),
      excluded_prefixes: vec![
        "/api".to_string(),
        "/studio".to_string(),
        "/favicon.ico".to_string(),
      ],
      public_scheme:     "http".to_string(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
  PassThrough,
  /// Redirect to this path (no scheme or host).
  Redirect(String),
}

#[derive(Debug, Clone)]
pub struct LocaleRouter {
  config: RoutingConfig,
}

impl LocaleRouter {
  /// Fails when the locale set is empty or lacks the default locale, or when
  /// a prefix would exclude every path from redirection.
  pub fn new(config: RoutingConfig) -> Result<Self, String> {
    if config.locales.is_empty() {
      return Err("routing.locales is empty".to_string());
    }
    if !config.locales.contains(&config.default_locale) {
      return Err(format!(
        "routing.default_locale {} is not in routing.locales",
        config.default_locale
      ));
    }
    let prefix = &config.internal_prefix;
    if !prefix.starts_with('/') || prefix.trim_matches('/').is_empty() {
      return Err("routing.internal_prefix must be a non-root path".to_string());
    }
    let covers_all = config
      .excluded_prefixes
      .iter()
      .find(|p| p.trim_matches('/').is_empty());
    if let Some(prefix) = covers_all {
      return Err(format!("routing.excluded_prefixes entry {prefix:?} matches every path"));
    }
    if !is_web_scheme(&config.public_scheme) {
      return Err(format!(
        "routing.public_scheme {:?} is not http or https",
        config.public_scheme
      ));
    }
    Ok(Self { config })
  }

  pub fn default_locale(&self) -> Locale { self.config.default_locale }

  pub fn locales(&self) -> &[Locale] { &self.config.locales }

  pub fn public_scheme(&self) -> &str { &self.config.public_scheme }

  pub fn internal_prefix(&self) -> &str { &self.config.internal_prefix }

  /// Parse a path segment as one of the supported locales.
  pub fn parse_locale(&self, code: &str) -> Option<Locale> {
    Locale::from_code(Some(code)).filter(|l| self.config.locales.contains(l))
  }

  /// The supported locale `path` is prefixed with, if any.
  pub fn locale_of(&self, path: &str) -> Option<Locale> {
    Locale::from_path_prefix(path, &self.config.locales)
  }

  /// Static assets, internal files, and non-page surfaces.
  pub fn is_excluded(&self, path: &str) -> bool {
    if path.starts_with(&self.config.internal_prefix) {
      return true;
    }
    let last_segment = path.rsplit('/').next().unwrap_or_default();
    if last_segment.contains('.') {
      return true;
    }
    self
      .config
      .excluded_prefixes
      .iter()
      .any(|prefix| path.starts_with(prefix.as_str()))
  }

  pub fn resolve(&self, path: &str) -> RouteDecision {
    if self.is_excluded(path) || self.locale_of(path).is_some() {
      return RouteDecision::PassThrough;
    }
    RouteDecision::Redirect(self.with_locale(path, self.config.default_locale))
  }

  /// The same page in `locale`: swaps the locale segment when present,
  /// prefixes it otherwise.
  pub fn localized_path(&self, path: &str, locale: Locale) -> String {
    match self.locale_of(path) {
      Some(current) => {
        let rest = &path[1 + current.as_str().len()..];
        format!("/{locale}{rest}")
      }
      None => self.with_locale(path, locale),
    }
  }

  fn with_locale(&self, path: &str, locale: Locale) -> String {
    match path {
      "" | "/" => format!("/{locale}"),
      p if p.starts_with('/') => format!("/{locale}{p}"),
      p => format!("/{locale}/{p}"),
    }
  }
}

// ─── Middleware ───────────────────────────────────────────────────────────────

/// Redirect unprefixed page requests with `308 Permanent Redirect`.
pub async fn locale_redirect(
  State(router): State<Arc<LocaleRouter>>,
  req: Request,
  next: Next,
) -> Response {
  let path = req.uri().path();
  match router.resolve(path) {
    RouteDecision::PassThrough => next.run(req).await,
    RouteDecision::Redirect(target) => {
      let location = absolute_location(
        req.headers(),
        router.public_scheme(),
        &target,
        req.uri().query(),
      );
      tracing::debug!(from = path, to = %location, "locale redirect");
      Redirect::permanent(&location).into_response()
    }
  }
}

/// Fully-qualify `path` with the request's scheme and host. Without a `Host`
/// header the location stays relative.
fn absolute_location(
  headers: &HeaderMap,
  default_scheme: &str,
  path: &str,
  query: Option<&str>,
) -> String {
  let query = query.map(|q| format!("?{q}")).unwrap_or_default();
  let host = headers.get(header::HOST).and_then(|v| v.to_str().ok());
  let Some(host) = host else {
    return format!("{path}{query}");
  };
  let scheme = headers
    .get("x-forwarded-proto")
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.split(',').next())
    .map(str::trim)
    .filter(|s| is_web_scheme(s))
    .unwrap_or(default_scheme);
  format!("{scheme}://{host}{path}{query}")
}

fn is_web_scheme(scheme: &str) -> bool { matches!(scheme, "http" | "https") }
