//! A single artist's detail page.

use fest_core::{
  Locale,
  document::{Artist, Day, MusicPlatform},
  image::ImageUrlBuilder,
  store::ContentStore,
};
use serde::Serialize;

use crate::{
  AppState,
  dictionary::Dictionary,
  view::{ImageView, LinkView, MusicLinkView, PageMeta, non_empty},
};

/// Edge length of the square detail image.
pub const IMAGE_SIZE: u32 = 600;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistDetailView {
  pub name:          String,
  pub country:       Option<String>,
  pub day:           Option<Day>,
  pub image:         Option<ImageView>,
  /// Shown in place of the image when there is none.
  pub no_image:      String,
  pub bio:           Option<String>,
  pub links_heading: String,
  pub links:         Vec<MusicLinkView>,
  pub back:          LinkView,
}

/// `None` when no artist has this slug in `locale`.
pub async fn assemble<S: ContentStore>(
  state: &AppState<S>,
  locale: Locale,
  slug: &str,
) -> Option<(PageMeta, ArtistDetailView)> {
  let (artist, dict) = tokio::join!(
    state.resolver.artist(Some(locale), slug),
    state.dictionaries.load(locale),
  );
  build(artist.as_ref()?, &dict, &state.images, locale)
}

/// `None` for an artist without a name.
pub fn build(
  artist: &Artist,
  dict: &Dictionary,
  images: &ImageUrlBuilder,
  locale: Locale,
) -> Option<(PageMeta, ArtistDetailView)> {
  let name = non_empty(artist.name.as_deref())?;
  let bio = non_empty(artist.bio.as_deref());
  let image = artist
    .image
    .as_ref()
    .and_then(|img| ImageView::build(images, img, &name, Some((IMAGE_SIZE, IMAGE_SIZE))));

  let links = artist
    .music_links
    .iter()
    .filter_map(|link| {
      Some(MusicLinkView {
        platform: link.platform.unwrap_or(MusicPlatform::Other),
        url:      non_empty(link.url.as_deref())?,
      })
    })
    .collect();

  let meta = PageMeta { title: Some(name.clone()), description: bio.clone() };
  let view = ArtistDetailView {
    country: non_empty(artist.country.as_deref()),
    day: artist.day,
    image,
    no_image: dict.artist.no_image.clone(),
    bio,
    links_heading: dict.artist.links.clone(),
    links,
    back: LinkView {
      label: dict.artist.back_to_lineup.clone(),
      href:  format!("/{locale}/lineup"),
    },
    name,
  };
  Some((meta, view))
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn detail_uses_square_image_and_keeps_unknown_links() {
    let artist: Artist = serde_json::from_value(json!({
      "name": "Alpha",
      "bio": "Loud.",
      "image": { "asset": { "_ref": "image-a-1200x800-jpg" } },
      "musicLinks": [
        { "platform": "spotify", "url": "https://spotify" },
        { "platform": "myspace", "url": "https://myspace" },
        { "platform": "bandcamp" },
      ],
    }))
    .unwrap();
    let (meta, view) =
      build(&artist, &Dictionary::default(), &ImageUrlBuilder::new("p", "d"), Locale::Ro)
        .unwrap();
    assert_eq!(meta.title.as_deref(), Some("Alpha"));
    assert_eq!(meta.description.as_deref(), Some("Loud."));
    assert!(view.image.unwrap().url.ends_with("&w=600&h=600&fit=crop"));
    assert_eq!(view.links.len(), 2);
    assert_eq!(view.links[1].platform, MusicPlatform::Other);
    assert_eq!(view.back.href, "/ro/lineup");
  }

  #[test]
  fn nameless_artist_has_no_page() {
    let artist = Artist { bio: Some("x".to_string()), ..Artist::default() };
    assert!(
      build(&artist, &Dictionary::default(), &ImageUrlBuilder::new("p", "d"), Locale::En)
        .is_none()
    );
  }
}
