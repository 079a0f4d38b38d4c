//! Practical information. Entirely dictionary-driven.

use fest_core::Locale;
use serde::Serialize;

use crate::{
  AppState,
  dictionary::{Dictionary, InfoSection},
  view::PageMeta,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoView {
  pub title:    String,
  pub sections: Vec<InfoSection>,
}

pub async fn assemble<S>(state: &AppState<S>, locale: Locale) -> (PageMeta, InfoView) {
  let dict = state.dictionaries.load(locale).await;
  build(&dict)
}

pub fn build(dict: &Dictionary) -> (PageMeta, InfoView) {
  let text = &dict.info_page;
  let meta = PageMeta {
    title:       Some(text.title.clone()),
    description: Some(text.description.clone()),
  };
  // Sections without a heading have nowhere to be linked from.
  let sections = text
    .sections
    .iter()
    .filter(|s| !s.heading.trim().is_empty())
    .cloned()
    .collect();
  (meta, InfoView { title: text.title.clone(), sections })
}
