//! The per-locale homepage.

use fest_core::{
  Locale,
  document::{CallToAction, Homepage, IconType, QuickInfoItem},
  image::ImageUrlBuilder,
  store::ContentStore,
};
use serde::Serialize;

use crate::{
  AppState,
  dictionary::Dictionary,
  view::{ArtistCard, ImageView, LinkView, PageMeta, non_empty},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CtaView {
  pub text:       String,
  pub url:        String,
  pub price_info: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroSection {
  pub image:        Option<ImageView>,
  /// Falls back to the desktop image.
  pub mobile_image: Option<ImageView>,
  pub cta:          Option<CtaView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AboutSection {
  pub title:      String,
  pub paragraphs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighlightsSection {
  pub title:   String,
  pub artists: Vec<ArtistCard>,
  pub see_all: LinkView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickInfoView {
  pub key:         Option<String>,
  pub title:       String,
  pub description: String,
  pub icon:        IconType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickInfoSection {
  pub title: String,
  pub items: Vec<QuickInfoView>,
}

/// Sections that passed validation; absent sections are not rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HomeSections {
  pub hero:              Option<HeroSection>,
  pub about:             Option<AboutSection>,
  pub lineup_highlights: Option<HighlightsSection>,
  pub quick_info:        Option<QuickInfoSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HomeView {
  Ready(HomeSections),
  /// No homepage exists for this locale (or it could not be fetched).
  Unavailable { title: String, message: String },
}

pub async fn assemble<S: ContentStore>(
  state: &AppState<S>,
  locale: Locale,
) -> (PageMeta, HomeView) {
  let (homepage, dict) = tokio::join!(
    state.resolver.homepage(Some(locale)),
    state.dictionaries.load(locale),
  );
  build(homepage.as_ref(), &dict, &state.images, locale)
}

pub fn build(
  homepage: Option<&Homepage>,
  dict: &Dictionary,
  images: &ImageUrlBuilder,
  locale: Locale,
) -> (PageMeta, HomeView) {
  let Some(home) = homepage else {
    tracing::info!(%locale, "no homepage, rendering fallback");
    let view = HomeView::Unavailable {
      title:   dict.home_page.unavailable_title.clone(),
      message: dict.home_page.unavailable.clone(),
    };
    return (PageMeta::default(), view);
  };

  let meta = PageMeta {
    title:       non_empty(home.page_title.as_deref()),
    description: non_empty(home.page_description.as_deref()),
  };
  let sections = HomeSections {
    hero:              hero(home, dict, images),
    about:             about(home),
    lineup_highlights: highlights(home, dict, images, locale),
    quick_info:        quick_info(home),
  };
  (meta, HomeView::Ready(sections))
}

// ─── Section validation ───────────────────────────────────────────────────────

fn hero(home: &Homepage, dict: &Dictionary, images: &ImageUrlBuilder) -> Option<HeroSection> {
  let alt = &dict.home_page.hero_alt;
  let image = home
    .hero_image
    .as_ref()
    .and_then(|img| ImageView::build(images, img, alt, None));
  let mobile_image = home
    .mobile_hero_image
    .as_ref()
    .and_then(|img| ImageView::build(images, img, alt, None))
    .or_else(|| image.clone());
  let cta = home.primary_cta.as_ref().and_then(cta);

  if image.is_none() && cta.is_none() {
    return None;
  }
  Some(HeroSection { image, mobile_image, cta })
}

/// Shown only when it has both text and a target and is explicitly enabled.
fn cta(cta: &CallToAction) -> Option<CtaView> {
  if cta.is_enabled != Some(true) {
    return None;
  }
  Some(CtaView {
    text:       non_empty(cta.text.as_deref())?,
    url:        non_empty(cta.url.as_deref())?,
    price_info: non_empty(cta.price_info.as_deref()),
  })
}

fn about(home: &Homepage) -> Option<AboutSection> {
  let title = non_empty(home.intro_title.as_deref())?;
  let paragraphs: Vec<String> = home
    .intro_text
    .iter()
    .filter_map(|block| non_empty(Some(block.plain_text().as_str())))
    .collect();
  if paragraphs.is_empty() {
    return None;
  }
  Some(AboutSection { title, paragraphs })
}

fn highlights(
  home: &Homepage,
  dict: &Dictionary,
  images: &ImageUrlBuilder,
  locale: Locale,
) -> Option<HighlightsSection> {
  let title = non_empty(home.lineup_highlights_title.as_deref())?;
  let artists: Vec<ArtistCard> = home
    .featured_artists
    .iter()
    .filter_map(|artist| ArtistCard::build(images, locale, artist))
    .collect();
  if artists.is_empty() {
    return None;
  }
  Some(HighlightsSection {
    title,
    artists,
    see_all: LinkView {
      label: dict.home_page.see_full_lineup.clone(),
      href:  format!("/{locale}/lineup"),
    },
  })
}

fn quick_info(home: &Homepage) -> Option<QuickInfoSection> {
  let title = non_empty(home.quick_info_title.as_deref())?;
  let items: Vec<QuickInfoView> = home.quick_info_items.iter().filter_map(quick_info_item).collect();
  if items.is_empty() {
    return None;
  }
  Some(QuickInfoSection { title, items })
}

fn quick_info_item(item: &QuickInfoItem) -> Option<QuickInfoView> {
  Some(QuickInfoView {
    key:         item.key.clone(),
    title:       non_empty(item.title.as_deref())?,
    description: non_empty(item.description.as_deref())?,
    icon:        item.icon_type?,
  })
}
