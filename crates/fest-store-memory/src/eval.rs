//! Evaluation of the logical query model over an in-memory document set.

use std::cmp::Ordering;

use fest_core::query::{Field, OrderKey, Query, Slice};
use serde_json::{Map, Value};

use crate::store::Documents;

pub(crate) fn run(docs: &Documents, query: &Query) -> Option<Value> {
  let mut matches: Vec<&Value> =
    docs.all.iter().filter(|doc| matches(doc, query)).collect();

  // `sort_by` is stable, so documents tied on every key keep load order.
  matches.sort_by(|a, b| compare_docs(a, b, &query.order));

  match query.slice {
    Slice::First => matches
      .first()
      .map(|doc| project(doc, &query.projection, docs)),
    Slice::All => Some(Value::Array(
      matches
        .iter()
        .map(|doc| project(doc, &query.projection, docs))
        .collect(),
    )),
  }
}

// ─── Filtering ───────────────────────────────────────────────────────────────

fn lookup<'v>(doc: &'v Value, path: &str) -> Option<&'v Value> {
  path.split('.').try_fold(doc, |value, segment| value.get(segment))
}

fn matches(doc: &Value, query: &Query) -> bool {
  if doc.get("_type").and_then(Value::as_str) != Some(query.doc_type) {
    return false;
  }
  query.filters.iter().all(|filter| {
    match (lookup(doc, filter.field), query.params.get(filter.param)) {
      (Some(field), Some(param)) => field == param,
      _ => false,
    }
  })
}

// ─── Ordering ────────────────────────────────────────────────────────────────

fn sort_value<'v>(doc: &'v Value, key: &'v OrderKey) -> Option<&'v Value> {
  lookup(doc, key.field)
    .filter(|v| !v.is_null())
    .or(key.fallback.as_ref())
}

fn compare_docs(a: &Value, b: &Value, keys: &[OrderKey]) -> Ordering {
  keys
    .iter()
    .map(|key| compare_values(sort_value(a, key), sort_value(b, key)))
    .find(|ord| ord.is_ne())
    .unwrap_or(Ordering::Equal)
}

/// Absent values sort after present ones; values of different JSON types
/// sort by type (numbers, strings, booleans, everything else).
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
  match (a, b) {
    (None, None) => Ordering::Equal,
    (None, Some(_)) => Ordering::Greater,
    (Some(_), None) => Ordering::Less,
    (Some(a), Some(b)) => match (a, b) {
      (Value::Number(x), Value::Number(y)) => {
        let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
        x.partial_cmp(&y).unwrap_or(Ordering::Equal)
      }
      (Value::String(x), Value::String(y)) => x.cmp(y),
      (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
      _ => type_rank(a).cmp(&type_rank(b)),
    },
  }
}

fn type_rank(value: &Value) -> u8 {
  match value {
    Value::Number(_) => 0,
    Value::String(_) => 1,
    Value::Bool(_) => 2,
    _ => 3,
  }
}

// ─── Projection ──────────────────────────────────────────────────────────────

fn project(doc: &Value, projection: &[Field], docs: &Documents) -> Value {
  if projection.is_empty() {
    return doc.clone();
  }

  let mut out = Map::new();
  for field in projection {
    match field {
      Field::Plain(name) => {
        if let Some(value) = doc.get(*name) {
          out.insert((*name).to_string(), value.clone());
        }
      }
      Field::Expand { name, fields } => {
        if let Some(value) = doc.get(*name) {
          out.insert((*name).to_string(), expand(value, fields, docs));
        }
      }
    }
  }
  Value::Object(out)
}

/// Replace each `{"_ref": id}` with the referenced document; dangling
/// references become `null`.
fn expand(value: &Value, fields: &[&'static str], docs: &Documents) -> Value {
  let Value::Array(items) = value else {
    return Value::Null;
  };
  let projection: Vec<Field> = fields.iter().copied().map(Field::Plain).collect();
  Value::Array(
    items
      .iter()
      .map(|item| {
        item
          .get("_ref")
          .and_then(Value::as_str)
          .and_then(|id| docs.get(id))
          .map_or(Value::Null, |target| project(target, &projection, docs))
      })
      .collect(),
  )
}
