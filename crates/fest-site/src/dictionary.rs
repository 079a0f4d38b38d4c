//! Static per-locale translation tables.
//!
//! Tables are compiled into the binary and parsed on first use. Every later
//! call for the same locale returns the same [`Arc`]. A locale without a
//! registered table, or whose table fails to parse, gets the default locale's
//! table instead.

use std::{collections::HashMap, sync::Arc};

use fest_core::Locale;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

// ─── Table shape ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteText {
  pub default_title:       String,
  pub default_description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderText {
  pub home:    String,
  pub lineup:  String,
  pub info:    String,
  pub tickets: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HomePageText {
  pub hero_alt:          String,
  pub see_full_lineup:   String,
  pub unavailable_title: String,
  pub unavailable:       String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineupPageText {
  pub title:                String,
  pub description:          String,
  pub friday:               String,
  pub saturday:             String,
  pub coming_soon_friday:   String,
  pub coming_soon_saturday: String,
  pub coming_soon_full:     String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArtistText {
  pub no_image:       String,
  pub links:          String,
  pub back_to_lineup: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfoLink {
  pub label: String,
  pub url:   String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfoSection {
  pub heading:    String,
  pub paragraphs: Vec<String>,
  pub items:      Vec<String>,
  pub links:      Vec<InfoLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InfoPageText {
  pub title:       String,
  pub description: String,
  pub sections:    Vec<InfoSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FooterText {
  pub rights: String,
}

/// One locale's translation table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dictionary {
  pub site:        SiteText,
  pub header:      HeaderText,
  pub home_page:   HomePageText,
  pub lineup_page: LineupPageText,
  pub artist:      ArtistText,
  pub info_page:   InfoPageText,
  pub footer:      FooterText,
}

// ─── Loader ──────────────────────────────────────────────────────────────────

/// The tables shipped with the site.
pub const BUILTIN_TABLES: &[(Locale, &str)] = &[
  (Locale::En, include_str!("../dictionaries/en.json")),
  (Locale::Ro, include_str!("../dictionaries/ro.json")),
];

struct Table {
  raw:  &'static str,
  /// `None` once parsing has failed.
  cell: OnceCell<Option<Arc<Dictionary>>>,
}

pub struct DictionaryLoader {
  default: Locale,
  tables:  HashMap<Locale, Table>,
  empty:   Arc<Dictionary>,
}

impl DictionaryLoader {
  /// A loader over the built-in tables.
  pub fn new(default: Locale) -> Self { Self::with_tables(default, BUILTIN_TABLES) }

  pub fn with_tables(default: Locale, tables: &[(Locale, &'static str)]) -> Self {
    Self {
      default,
      tables: tables
        .iter()
        .map(|&(locale, raw)| (locale, Table { raw, cell: OnceCell::new() }))
        .collect(),
      empty: Arc::new(Dictionary::default()),
    }
  }

  /// The table for `locale`, falling back to the default locale's table.
  pub async fn load(&self, locale: Locale) -> Arc<Dictionary> {
    if let Some(dict) = self.materialize(locale).await {
      return dict;
    }
    if locale != self.default {
      tracing::debug!(%locale, fallback = %self.default, "no dictionary, using default");
      if let Some(dict) = self.materialize(self.default).await {
        return dict;
      }
    }
    self.empty.clone()
  }

  /// Like [`load`](Self::load) for an untyped code; unknown or empty codes
  /// get the default table.
  pub async fn load_code(&self, code: &str) -> Arc<Dictionary> {
    let locale = Locale::from_code(Some(code)).unwrap_or(self.default);
    self.load(locale).await
  }

  async fn materialize(&self, locale: Locale) -> Option<Arc<Dictionary>> {
    let table = self.tables.get(&locale)?;
    table
      .cell
      .get_or_init(|| async move {
        match serde_json::from_str::<Dictionary>(table.raw) {
          Ok(dict) => Some(Arc::new(dict)),
          Err(err) => {
            tracing::error!(%locale, error = %err, "failed to parse dictionary");
            None
          }
        }
      })
      .await
      .clone()
  }
}
