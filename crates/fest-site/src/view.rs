//! Render-ready view models shared by every page.
//!
//! Everything here has already been validated: a field that is present is
//! safe to render as-is.

use fest_core::{
  Locale,
  document::{Artist, Day, Image, MusicPlatform, SocialPlatform},
  image::ImageUrlBuilder,
};
use serde::Serialize;

use crate::pages::layout::LayoutView;

// ─── Envelope ─────────────────────────────────────────────────────────────────

/// Per-page `<title>` and `<meta name="description">`. `None` lets the layout
/// defaults apply.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageMeta {
  pub title:       Option<String>,
  pub description: Option<String>,
}

/// What every page handler returns.
#[derive(Debug, Clone, Serialize)]
pub struct PageResponse<T> {
  pub layout: LayoutView,
  pub meta:   PageMeta,
  pub page:   T,
}

// ─── Building blocks ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageView {
  pub url: String,
  pub alt: String,
}

impl ImageView {
  /// `None` when the image has no usable asset. Empty alt text falls back to
  /// `fallback_alt`.
  pub fn build(
    images: &ImageUrlBuilder,
    image: &Image,
    fallback_alt: &str,
    size: Option<(u32, u32)>,
  ) -> Option<Self> {
    let url = match size {
      Some((w, h)) => images.sized(image, w, h),
      None => images.url(image),
    };
    let url = match url {
      Ok(url) => url,
      Err(err) => {
        tracing::debug!(error = %err, "image skipped");
        return None;
      }
    };
    let alt = non_empty(image.alt.as_deref()).unwrap_or_else(|| fallback_alt.to_string());
    Some(Self { url, alt })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkView {
  pub label: String,
  pub href:  String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialLinkView {
  pub platform: SocialPlatform,
  pub url:      String,
}

/// A music link; an unrecognised platform renders as a generic link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MusicLinkView {
  pub platform: MusicPlatform,
  pub url:      String,
}

/// An artist as shown in grids and highlight strips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistCard {
  pub id:      Option<String>,
  pub name:    String,
  pub slug:    Option<String>,
  /// Detail page, when the artist has a slug.
  pub href:    Option<String>,
  pub country: Option<String>,
  pub image:   Option<ImageView>,
  pub day:     Option<Day>,
}

impl ArtistCard {
  /// `None` for artists without a name; nothing can be shown for those.
  pub fn build(images: &ImageUrlBuilder, locale: Locale, artist: &Artist) -> Option<Self> {
    let name = non_empty(artist.name.as_deref())?;
    let slug = non_empty(artist.slug());
    let image = artist
      .image
      .as_ref()
      .and_then(|img| ImageView::build(images, img, &name, None));
    Some(Self {
      id: artist.id.clone(),
      href: slug.as_ref().map(|s| format!("/{locale}/lineup/{s}")),
      slug,
      country: non_empty(artist.country.as_deref()),
      image,
      day: artist.day,
      name,
    })
  }
}

/// Trimmed, or `None` when blank.
pub fn non_empty(value: Option<&str>) -> Option<String> {
  value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
  use fest_core::document::{AssetRef, Slug};

  use super::*;

  fn images() -> ImageUrlBuilder { ImageUrlBuilder::new("p", "d") }

  fn image(reference: &str, alt: Option<&str>) -> Image {
    Image {
      asset: Some(AssetRef { reference: Some(reference.to_string()) }),
      alt:   alt.map(str::to_string),
    }
  }

  #[test]
  fn image_alt_falls_back() {
    let view = ImageView::build(&images(), &image("image-a-1x1-png", Some("  ")), "Alt", None)
      .unwrap();
    assert_eq!(view.alt, "Alt");
    assert_eq!(view.url, "https://cdn.sanity.io/images/p/d/a-1x1.png?auto=format");
  }

  #[test]
  fn malformed_image_is_absent() {
    assert!(ImageView::build(&images(), &image("file-x", None), "", None).is_none());
    assert!(ImageView::build(&images(), &Image::default(), "", None).is_none());
  }

  #[test]
  fn card_links_to_detail_page() {
    let artist = Artist {
      name: Some("Alpha".to_string()),
      slug: Some(Slug { current: Some("alpha".to_string()) }),
      image: Some(image("image-a-600x600-jpg", None)),
      ..Artist::default()
    };
    let card = ArtistCard::build(&images(), Locale::Ro, &artist).unwrap();
    assert_eq!(card.href.as_deref(), Some("/ro/lineup/alpha"));
    assert_eq!(card.image.unwrap().alt, "Alpha");
  }

  #[test]
  fn nameless_artist_has_no_card() {
    let artist = Artist { name: Some(" ".to_string()), ..Artist::default() };
    assert!(ArtistCard::build(&images(), Locale::En, &artist).is_none());
  }
}
