//! Raw document shapes as returned by the content store.
//!
//! Every field is optional and decoded leniently: a field holding the wrong
//! JSON type decodes as absent rather than failing the whole document, and
//! list elements that do not decode are dropped. Deciding which of these
//! fields are good enough to render is the page assemblers' job.

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;
use strum::Display;

use crate::Locale;

/// Lineup position assumed for artists without one.
pub const UNPOSITIONED: i64 = 1000;

// ─── Lenient decoding ────────────────────────────────────────────────────────

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: DeserializeOwned,
{
  let value = Value::deserialize(deserializer)?;
  Ok(serde_json::from_value(value).ok())
}

/// Any non-blank string is an icon; anything else is no icon at all.
fn lenient_icon<'de, D>(deserializer: D) -> Result<Option<IconType>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(match Value::deserialize(deserializer)? {
    Value::String(name) if !name.trim().is_empty() => {
      serde_json::from_value(Value::String(name)).ok()
    }
    _ => None,
  })
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
  D: Deserializer<'de>,
  T: DeserializeOwned,
{
  let items = match Value::deserialize(deserializer)? {
    Value::Array(items) => items,
    _ => return Ok(Vec::new()),
  };
  Ok(
    items
      .into_iter()
      .filter_map(|item| serde_json::from_value(item).ok())
      .collect(),
  )
}

// ─── Enumerations ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SocialPlatform {
  Facebook,
  Instagram,
  YouTube,
  TikTok,
  Twitter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MusicPlatform {
  Spotify,
  YouTube,
  Facebook,
  Instagram,
  Bandcamp,
  Website,
  Other,
}

/// Icon shown next to a quick-info item. Editors can store names outside
/// this list; those decode as `Other` and render a generic icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IconType {
  Calendar,
  Location,
  Ticket,
  Music,
  Info,
  #[serde(other)]
  Other,
}

/// Festival day an artist plays on. Any other stored value (`"tbc"`, empty)
/// decodes as no day at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Day {
  Friday,
  Saturday,
}

// ─── Shared sub-objects ──────────────────────────────────────────────────────

/// Pointer to an uploaded asset (`{"_ref": "image-…"}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetRef {
  #[serde(rename = "_ref", default, deserialize_with = "lenient")]
  pub reference: Option<String>,
}

/// An image field with its alternative text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
  #[serde(default, deserialize_with = "lenient")]
  pub asset: Option<AssetRef>,
  #[serde(default, deserialize_with = "lenient")]
  pub alt:   Option<String>,
}

impl Image {
  pub fn asset_ref(&self) -> Option<&str> {
    self.asset.as_ref()?.reference.as_deref()
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slug {
  #[serde(default, deserialize_with = "lenient")]
  pub current: Option<String>,
}

/// A `{platform, url}` pair, used for both social and music links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "P: DeserializeOwned"))]
pub struct Link<P> {
  #[serde(default = "Option::default", deserialize_with = "lenient")]
  pub platform: Option<P>,
  #[serde(default, deserialize_with = "lenient")]
  pub url:      Option<String>,
}

// ─── Site settings ───────────────────────────────────────────────────────────

/// The global singleton (`_type == "siteSettings"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
  #[serde(rename = "_id", default, deserialize_with = "lenient")]
  pub id:           Option<String>,
  #[serde(default, deserialize_with = "lenient")]
  pub title:        Option<String>,
  #[serde(default, deserialize_with = "lenient")]
  pub description:  Option<String>,
  #[serde(default, deserialize_with = "lenient")]
  pub logo:         Option<Image>,
  #[serde(default, deserialize_with = "lenient")]
  pub ticket_url:   Option<String>,
  #[serde(default, deserialize_with = "lenient_list")]
  pub social_links: Vec<Link<SocialPlatform>>,
  #[serde(default, deserialize_with = "lenient")]
  pub og_image:     Option<Image>,
}

// ─── Homepage ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToAction {
  #[serde(default, deserialize_with = "lenient")]
  pub text:       Option<String>,
  #[serde(default, deserialize_with = "lenient")]
  pub url:        Option<String>,
  #[serde(default, deserialize_with = "lenient")]
  pub is_enabled: Option<bool>,
  #[serde(default, deserialize_with = "lenient")]
  pub price_info: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickInfoItem {
  #[serde(rename = "_key", default, deserialize_with = "lenient")]
  pub key:         Option<String>,
  #[serde(default, deserialize_with = "lenient")]
  pub title:       Option<String>,
  #[serde(default, deserialize_with = "lenient")]
  pub description: Option<String>,
  #[serde(default, deserialize_with = "lenient_icon")]
  pub icon_type:   Option<IconType>,
}

/// One span of portable text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Span {
  #[serde(default, deserialize_with = "lenient")]
  pub text:  Option<String>,
  #[serde(default, deserialize_with = "lenient_list")]
  pub marks: Vec<String>,
}

/// One block (paragraph, heading) of portable text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
  #[serde(rename = "_key", default, deserialize_with = "lenient")]
  pub key:      Option<String>,
  #[serde(default, deserialize_with = "lenient")]
  pub style:    Option<String>,
  #[serde(default, deserialize_with = "lenient_list")]
  pub children: Vec<Span>,
}

impl Block {
  /// Concatenated text of every span, marks dropped.
  pub fn plain_text(&self) -> String {
    self
      .children
      .iter()
      .filter_map(|span| span.text.as_deref())
      .collect()
  }
}

/// A per-locale homepage (`_type == "homepage"`), with `featuredArtists`
/// already expanded from references.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Homepage {
  #[serde(rename = "_id", default, deserialize_with = "lenient")]
  pub id:                      Option<String>,
  #[serde(default, deserialize_with = "lenient")]
  pub language:                Option<Locale>,
  #[serde(default, deserialize_with = "lenient")]
  pub hero_image:              Option<Image>,
  #[serde(default, deserialize_with = "lenient")]
  pub mobile_hero_image:       Option<Image>,
  #[serde(rename = "primaryCTA", default, deserialize_with = "lenient")]
  pub primary_cta:             Option<CallToAction>,
  #[serde(default, deserialize_with = "lenient")]
  pub intro_title:             Option<String>,
  #[serde(default, deserialize_with = "lenient_list")]
  pub intro_text:              Vec<Block>,
  #[serde(default, deserialize_with = "lenient")]
  pub quick_info_title:        Option<String>,
  #[serde(default, deserialize_with = "lenient_list")]
  pub quick_info_items:        Vec<QuickInfoItem>,
  #[serde(default, deserialize_with = "lenient")]
  pub lineup_highlights_title: Option<String>,
  /// Dangling references expand to `null` and are dropped here.
  #[serde(default, deserialize_with = "lenient_list")]
  pub featured_artists:        Vec<Artist>,
  #[serde(default, deserialize_with = "lenient")]
  pub page_title:              Option<String>,
  #[serde(default, deserialize_with = "lenient")]
  pub page_description:        Option<String>,
}

// ─── Artist ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
  #[serde(rename = "_id", default, deserialize_with = "lenient")]
  pub id:          Option<String>,
  #[serde(default, deserialize_with = "lenient")]
  pub name:        Option<String>,
  #[serde(default, deserialize_with = "lenient")]
  pub slug:        Option<Slug>,
  #[serde(default, deserialize_with = "lenient")]
  pub country:     Option<String>,
  #[serde(default, deserialize_with = "lenient")]
  pub position:    Option<i64>,
  #[serde(default, deserialize_with = "lenient")]
  pub day:         Option<Day>,
  #[serde(default, deserialize_with = "lenient")]
  pub bio:         Option<String>,
  #[serde(default, deserialize_with = "lenient_list")]
  pub music_links: Vec<Link<MusicPlatform>>,
  #[serde(default, deserialize_with = "lenient")]
  pub image:       Option<Image>,
  #[serde(default, deserialize_with = "lenient")]
  pub language:    Option<Locale>,
}

impl Artist {
  /// Position used for ordering; lower is more prominent.
  pub fn lineup_position(&self) -> i64 { self.position.unwrap_or(UNPOSITIONED) }

  pub fn slug(&self) -> Option<&str> { self.slug.as_ref()?.current.as_deref() }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn wrong_field_types_decode_as_absent() {
    let cta: CallToAction = serde_json::from_value(json!({
      "text": "Tickets",
      "url": 42,
      "isEnabled": "yes",
    }))
    .unwrap();
    assert_eq!(cta.text.as_deref(), Some("Tickets"));
    assert_eq!(cta.url, None);
    assert_eq!(cta.is_enabled, None);
  }

  #[test]
  fn unknown_day_decodes_as_unset() {
    let artist: Artist =
      serde_json::from_value(json!({ "name": "X", "day": "tbc" })).unwrap();
    assert_eq!(artist.day, None);
    assert_eq!(artist.lineup_position(), UNPOSITIONED);
  }

  #[test]
  fn unlisted_icon_names_decode_as_other() {
    let items: Vec<QuickInfoItem> = serde_json::from_value(json!([
      { "iconType": "users" },
      { "iconType": "ticket" },
      { "iconType": "  " },
      { "iconType": 3 },
    ]))
    .unwrap();
    let icons: Vec<_> = items.iter().map(|i| i.icon_type).collect();
    assert_eq!(icons, [Some(IconType::Other), Some(IconType::Ticket), None, None]);
  }

  #[test]
  fn null_featured_artists_are_dropped() {
    let home: Homepage = serde_json::from_value(json!({
      "language": "ro",
      "featuredArtists": [null, { "_id": "a1", "name": "Alpha" }, 7],
    }))
    .unwrap();
    assert_eq!(home.language, Some(Locale::Ro));
    assert_eq!(home.featured_artists.len(), 1);
    assert_eq!(home.featured_artists[0].name.as_deref(), Some("Alpha"));
  }

  #[test]
  fn links_keep_url_when_platform_is_unknown() {
    let settings: SiteSettings = serde_json::from_value(json!({
      "socialLinks": [
        { "platform": "myspace", "url": "https://myspace.com/x" },
        { "platform": "tiktok", "url": "https://tiktok.com/@x" },
      ],
    }))
    .unwrap();
    assert_eq!(settings.social_links.len(), 2);
    assert_eq!(settings.social_links[0].platform, None);
    assert_eq!(settings.social_links[1].platform, Some(SocialPlatform::TikTok));
  }

  #[test]
  fn block_plain_text_joins_spans() {
    let block: Block = serde_json::from_value(json!({
      "_type": "block",
      "style": "normal",
      "children": [
        { "_type": "span", "text": "Two days of ", "marks": [] },
        { "_type": "span", "text": "metalcore", "marks": ["strong"] },
      ],
    }))
    .unwrap();
    assert_eq!(block.plain_text(), "Two days of metalcore");
  }

  #[test]
  fn slug_accessor_reads_current() {
    let artist: Artist = serde_json::from_value(json!({
      "slug": { "_type": "slug", "current": "alpha" },
    }))
    .unwrap();
    assert_eq!(artist.slug(), Some("alpha"));
  }
}
