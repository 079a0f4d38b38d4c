//! The queries the site issues, one per document kind.

use crate::{
  Locale,
  document::UNPOSITIONED,
  query::{Field, OrderKey, Query},
};

const ARTIST_FIELDS: &[&str] = &[
  "_id",
  "name",
  "slug",
  "country",
  "position",
  "day",
  "bio",
  "musicLinks",
  "image",
  "language",
];

const FEATURED_ARTIST_FIELDS: &[&str] =
  &["_id", "name", "slug", "country", "image"];

fn plain(fields: &[&'static str]) -> Vec<Field> {
  fields.iter().copied().map(Field::Plain).collect()
}

/// The global site settings singleton.
pub fn site_settings() -> Query {
  Query::of_type("siteSettings").first().project(plain(&[
    "_id",
    "title",
    "description",
    "logo",
    "ticketUrl",
    "socialLinks",
    "ogImage",
  ]))
}

/// The homepage written for `locale`, with featured artists expanded.
pub fn homepage(locale: Locale) -> Query {
  Query::of_type("homepage")
    .where_eq("language", "locale", locale.as_str())
    .first()
    .project(plain(&[
      "_id",
      "language",
      "heroImage",
      "mobileHeroImage",
      "primaryCTA",
      "introTitle",
      "introText",
      "quickInfoTitle",
      "quickInfoItems",
      "lineupHighlightsTitle",
    ]))
    .project([Field::Expand {
      name:   "featuredArtists",
      fields: FEATURED_ARTIST_FIELDS,
    }])
    .project(plain(&["pageTitle", "pageDescription"]))
}

/// Every artist for `locale`, most prominent first.
pub fn artists(locale: Locale) -> Query {
  Query::of_type("artist")
    .where_eq("language", "locale", locale.as_str())
    .order_by(OrderKey::coalesce("position", UNPOSITIONED))
    .order_by(OrderKey::asc("name"))
    .project(plain(ARTIST_FIELDS))
}

/// A single artist by URL slug.
pub fn artist_by_slug(locale: Locale, slug: &str) -> Query {
  Query::of_type("artist")
    .where_eq("language", "locale", locale.as_str())
    .where_eq("slug.current", "slug", slug)
    .first()
    .project(plain(ARTIST_FIELDS))
}

#[cfg(test)]
mod tests {
  use serde_json::Value;

  use super::*;
  use crate::query::Slice;

  #[test]
  fn artists_query_orders_by_position_then_name() {
    let groq = artists(Locale::Ro).to_groq();
    assert!(groq.starts_with(
      r#"*[_type == "artist" && language == $locale] | order(coalesce(position, 1000) asc, name asc)"#
    ));
  }

  #[test]
  fn homepage_query_binds_locale_and_expands_artists() {
    let q = homepage(Locale::Ro);
    assert_eq!(q.slice, Slice::First);
    assert_eq!(q.params.get("locale"), Some(&Value::from("ro")));
    assert!(q.to_groq().contains("featuredArtists[]->{_id, name, slug, country, image}"));
  }

  #[test]
  fn artist_by_slug_binds_both_params() {
    let q = artist_by_slug(Locale::En, "alpha");
    assert_eq!(q.params.len(), 2);
    assert_eq!(q.params.get("slug"), Some(&Value::from("alpha")));
  }

  #[test]
  fn site_settings_is_not_localized() {
    assert!(site_settings().params.is_empty());
  }
}
