//! The logical query model.
//!
//! A [`Query`] captures what the site asks of the content store: a document
//! type, equality filters bound to named parameters, an ordering, a slice, and
//! a projection that may expand reference arrays. HTTP backends render it to
//! GROQ with [`Query::to_groq`]; in-process backends evaluate it directly.

use std::{collections::BTreeMap, fmt::Write as _};

use serde_json::Value;

// ─── Building blocks ─────────────────────────────────────────────────────────

/// `field == $param`, where `field` may be a dotted path (`slug.current`).
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
  pub field: &'static str,
  pub param: &'static str,
}

/// One ascending sort key. With a `fallback`, documents lacking the field
/// sort as if they held the fallback value.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderKey {
  pub field:    &'static str,
  pub fallback: Option<Value>,
}

impl OrderKey {
  pub fn asc(field: &'static str) -> Self { Self { field, fallback: None } }

  pub fn coalesce(field: &'static str, fallback: impl Into<Value>) -> Self {
    Self { field, fallback: Some(fallback.into()) }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Slice {
  /// Every match, as an array.
  #[default]
  All,
  /// The first match, or nothing.
  First,
}

/// One entry of a projection.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
  /// Copy the field as stored.
  Plain(&'static str),
  /// The field is an array of references; replace each with the referenced
  /// document, projected to `fields`.
  Expand {
    name:   &'static str,
    fields: &'static [&'static str],
  },
}

// ─── Query ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
  pub doc_type:   &'static str,
  pub filters:    Vec<Filter>,
  pub order:      Vec<OrderKey>,
  pub slice:      Slice,
  /// Empty means "the whole document".
  pub projection: Vec<Field>,
  pub params:     BTreeMap<String, Value>,
}

impl Query {
  pub fn of_type(doc_type: &'static str) -> Self {
    Self {
      doc_type,
      filters: Vec::new(),
      order: Vec::new(),
      slice: Slice::All,
      projection: Vec::new(),
      params: BTreeMap::new(),
    }
  }

  /// Add `field == $param` and bind `param` to `value`.
  pub fn where_eq(
    mut self,
    field: &'static str,
    param: &'static str,
    value: impl Into<Value>,
  ) -> Self {
    self.filters.push(Filter { field, param });
    self.params.insert(param.to_string(), value.into());
    self
  }

  pub fn order_by(mut self, key: OrderKey) -> Self {
    self.order.push(key);
    self
  }

  pub fn first(mut self) -> Self {
    self.slice = Slice::First;
    self
  }

  pub fn project(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
    self.projection.extend(fields);
    self
  }

  /// Render the query in GROQ, with parameters referenced as `$name`.
  pub fn to_groq(&self) -> String {
    let mut out = format!("*[_type == {}", quote(self.doc_type));
    for filter in &self.filters {
      let _ = write!(out, " && {} == ${}", filter.field, filter.param);
    }
    out.push(']');

    if !self.order.is_empty() {
      let keys: Vec<String> = self
        .order
        .iter()
        .map(|key| match &key.fallback {
          Some(fallback) => format!("coalesce({}, {fallback}) asc", key.field),
          None => format!("{} asc", key.field),
        })
        .collect();
      let _ = write!(out, " | order({})", keys.join(", "));
    }

    if self.slice == Slice::First {
      out.push_str(if self.order.is_empty() { "[0]" } else { " [0]" });
    }

    if !self.projection.is_empty() {
      let fields: Vec<String> =
        self.projection.iter().map(render_field).collect();
      let _ = write!(out, " {{{}}}", fields.join(", "));
    }
    out
  }
}

fn render_field(field: &Field) -> String {
  match field {
    Field::Plain(name) => (*name).to_string(),
    Field::Expand { name, fields } => {
      format!("{name}[]->{{{}}}", fields.join(", "))
    }
  }
}

fn quote(s: &str) -> String { Value::String(s.to_string()).to_string() }
