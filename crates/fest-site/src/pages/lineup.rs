//! The lineup, split into one column per festival day.

use fest_core::{
  Locale,
  document::{Artist, Day},
  image::ImageUrlBuilder,
  store::ContentStore,
};
use serde::Serialize;

use crate::{
  AppState,
  dictionary::Dictionary,
  view::{ArtistCard, PageMeta},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayColumn {
  pub day:         Day,
  pub heading:     String,
  pub artists:     Vec<ArtistCard>,
  /// Set when the column is empty.
  pub coming_soon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineupView {
  pub title:       String,
  pub friday:      DayColumn,
  pub saturday:    DayColumn,
  /// Set only when both days are empty.
  pub coming_soon: Option<String>,
  /// Artists without a scheduled day; listed nowhere.
  pub unscheduled: usize,
}

pub async fn assemble<S: ContentStore>(
  state: &AppState<S>,
  locale: Locale,
) -> (PageMeta, LineupView) {
  let (artists, dict) = tokio::join!(
    state.resolver.artists(Some(locale)),
    state.dictionaries.load(locale),
  );
  build(&artists, &dict, &state.images, locale)
}

pub fn build(
  artists: &[Artist],
  dict: &Dictionary,
  images: &ImageUrlBuilder,
  locale: Locale,
) -> (PageMeta, LineupView) {
  let text = &dict.lineup_page;
  let (friday, saturday, unscheduled) = partition_by_day(artists);

  let column = |day: Day, heading: &str, coming_soon: &str, bucket: Vec<&Artist>| {
    let artists: Vec<ArtistCard> = bucket
      .into_iter()
      .filter_map(|a| ArtistCard::build(images, locale, a))
      .collect();
    DayColumn {
      day,
      heading: heading.to_string(),
      coming_soon: artists.is_empty().then(|| coming_soon.to_string()),
      artists,
    }
  };
  let friday = column(Day::Friday, &text.friday, &text.coming_soon_friday, friday);
  let saturday = column(Day::Saturday, &text.saturday, &text.coming_soon_saturday, saturday);

  let coming_soon = (friday.artists.is_empty() && saturday.artists.is_empty())
    .then(|| text.coming_soon_full.clone());

  let meta = PageMeta {
    title:       Some(text.title.clone()),
    description: Some(text.description.clone()),
  };
  let view = LineupView { title: text.title.clone(), friday, saturday, coming_soon, unscheduled };
  (meta, view)
}

/// Split into friday and saturday buckets, keeping the input order within
/// each. Returns the number of artists in neither.
pub fn partition_by_day(artists: &[Artist]) -> (Vec<&Artist>, Vec<&Artist>, usize) {
  let mut friday = Vec::new();
  let mut saturday = Vec::new();
  let mut unscheduled = 0;
  for artist in artists {
    match artist.day {
      Some(Day::Friday) => friday.push(artist),
      Some(Day::Saturday) => saturday.push(artist),
      None => unscheduled += 1,
    }
  }
  (friday, saturday, unscheduled)
}
