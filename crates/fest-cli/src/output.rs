//! JSON shapes printed by the CLI.

use fest_site::routing::{LocaleRouter, RouteDecision};
use serde::Serialize;
use serde_json::{Value, json};

pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<Value> {
  serde_json::to_value(value)
}

/// `{"path", "decision", "location"?, "locale"?}`
pub fn route(router: &LocaleRouter, path: &str) -> Value {
  match router.resolve(path) {
    RouteDecision::PassThrough => json!({
      "path": path,
      "decision": "pass_through",
      "excluded": router.is_excluded(path),
      "locale": router.locale_of(path),
    }),
    RouteDecision::Redirect(location) => json!({
      "path": path,
      "decision": "redirect",
      "status": 308,
      "location": location,
    }),
  }
}
