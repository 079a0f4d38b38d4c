//! The frame around every page: document metadata, header, footer.

use chrono::{Datelike, Utc};
use fest_core::{
  Locale,
  document::SiteSettings,
  image::ImageUrlBuilder,
  store::ContentStore,
};
use serde::Serialize;

use crate::{
  AppState,
  dictionary::Dictionary,
  routing::LocaleRouter,
  view::{ImageView, LinkView, SocialLinkView, non_empty},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenGraph {
  pub title:       Option<String>,
  pub description: Option<String>,
  pub image:       Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavLink {
  pub label:  String,
  pub href:   String,
  pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageLink {
  pub locale:  Locale,
  pub href:    String,
  pub current: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutView {
  /// `<html lang>`.
  pub lang:           Locale,
  pub site_title:     String,
  /// Page titles render as this with `%s` replaced.
  pub title_template: String,
  pub description:    String,
  pub logo:           Option<ImageView>,
  pub tickets:        Option<LinkView>,
  pub social_links:   Vec<SocialLinkView>,
  pub open_graph:     Option<OpenGraph>,
  pub nav:            Vec<NavLink>,
  pub languages:      Vec<LanguageLink>,
  pub copyright:      String,
}

pub async fn assemble<S: ContentStore>(
  state: &AppState<S>,
  locale: Locale,
  path: &str,
) -> LayoutView {
  let (settings, dict) = tokio::join!(
    state.resolver.site_settings(),
    state.dictionaries.load(locale),
  );
  build(
    settings.as_ref(),
    &dict,
    &state.images,
    &state.router,
    locale,
    path,
    Utc::now().year(),
  )
}

pub fn build(
  settings: Option<&SiteSettings>,
  dict: &Dictionary,
  images: &ImageUrlBuilder,
  router: &LocaleRouter,
  locale: Locale,
  path: &str,
  year: i32,
) -> LayoutView {
  let title = settings.and_then(|s| non_empty(s.title.as_deref()));
  let description = settings.and_then(|s| non_empty(s.description.as_deref()));
  let og_image = settings
    .and_then(|s| s.og_image.as_ref())
    .and_then(|img| images.url(img).ok());

  let open_graph = (title.is_some() || description.is_some() || og_image.is_some())
    .then(|| OpenGraph {
      title:       title.clone(),
      description: description.clone(),
      image:       og_image,
    });

  let site_title = title.unwrap_or_else(|| dict.site.default_title.clone());

  let logo = settings
    .and_then(|s| s.logo.as_ref())
    .and_then(|img| ImageView::build(images, img, &site_title, None));

  let tickets = settings
    .and_then(|s| non_empty(s.ticket_url.as_deref()))
    .map(|href| LinkView { label: dict.header.tickets.clone(), href });

  let social_links = settings
    .map(|s| s.social_links.as_slice())
    .unwrap_or_default()
    .iter()
    .filter_map(|link| {
      Some(SocialLinkView {
        platform: link.platform?,
        url:      non_empty(link.url.as_deref())?,
      })
    })
    .collect();

  let home = format!("/{locale}");
  let nav = [
    (&dict.header.home, home.clone()),
    (&dict.header.lineup, format!("/{locale}/lineup")),
    (&dict.header.info, format!("/{locale}/info")),
  ]
  .into_iter()
  .map(|(label, href)| NavLink {
    label:  label.clone(),
    active: is_active(path, &href, href == home),
    href,
  })
  .collect();

  let languages = router
    .locales()
    .iter()
    .map(|&other| LanguageLink {
      locale:  other,
      href:    router.localized_path(path, other),
      current: other == locale,
    })
    .collect();

  LayoutView {
    lang: locale,
    title_template: format!("{site_title} | %s"),
    description: description.unwrap_or_else(|| dict.site.default_description.clone()),
    copyright: format!("© {year} {site_title}. {}", dict.footer.rights),
    site_title,
    logo,
    tickets,
    social_links,
    open_graph,
    nav,
    languages,
  }
}

/// The home link is only active on the home page itself; section links stay
/// active on their sub-pages.
fn is_active(path: &str, href: &str, exact: bool) -> bool {
  let path = path.strip_suffix('/').filter(|p| !p.is_empty()).unwrap_or(path);
  if exact {
    path == href
  } else {
    path == href || path.strip_prefix(href).is_some_and(|rest| rest.starts_with('/'))
  }
}

#[cfg(test)]
mod tests {
  use fest_core::document::{AssetRef, Image, Link, SocialPlatform};

  use super::*;
  use crate::routing::RoutingConfig;

  fn router() -> LocaleRouter { LocaleRouter::new(RoutingConfig::default()).unwrap() }

  fn dict() -> Dictionary {
    let mut dict = Dictionary::default();
    dict.site.default_title = "Fallback Fest".to_string();
    dict.site.default_description = "Fallback description".to_string();
    dict.header.home = "Home".to_string();
    dict.header.lineup = "Lineup".to_string();
    dict.header.info = "Info".to_string();
    dict.header.tickets = "Tickets".to_string();
    dict.footer.rights = "All rights reserved.".to_string();
    dict
  }

  fn images() -> ImageUrlBuilder { ImageUrlBuilder::new("p", "d") }

  #[test]
  fn missing_settings_use_dictionary_defaults() {
    let view = build(None, &dict(), &images(), &router(), Locale::En, "/en", 2025);
    assert_eq!(view.site_title, "Fallback Fest");
    assert_eq!(view.title_template, "Fallback Fest | %s");
    assert_eq!(view.description, "Fallback description");
    assert_eq!(view.open_graph, None);
    assert_eq!(view.tickets, None);
    assert_eq!(view.copyright, "© 2025 Fallback Fest. All rights reserved.");
  }

  #[test]
  fn settings_fill_metadata_and_links() {
    let settings = SiteSettings {
      title: Some("ShatterFest".to_string()),
      ticket_url: Some("https://tickets.example".to_string()),
      og_image: Some(Image {
        asset: Some(AssetRef { reference: Some("image-og-1200x630-jpg".to_string()) }),
        alt:   None,
      }),
      social_links: vec![
        Link { platform: Some(SocialPlatform::Instagram), url: Some("https://ig".to_string()) },
        Link { platform: None, url: Some("https://myspace".to_string()) },
        Link { platform: Some(SocialPlatform::Facebook), url: None },
      ],
      ..SiteSettings::default()
    };
    let view = build(Some(&settings), &dict(), &images(), &router(), Locale::Ro, "/ro", 2025);
    assert_eq!(view.title_template, "ShatterFest | %s");
    assert_eq!(view.social_links.len(), 1);
    assert_eq!(view.tickets.unwrap().label, "Tickets");
    let og = view.open_graph.unwrap();
    assert_eq!(og.description, None);
    assert_eq!(
      og.image.as_deref(),
      Some("https://cdn.sanity.io/images/p/d/og-1200x630.jpg?auto=format")
    );
  }

  #[test]
  fn nav_and_language_links_follow_path() {
    let view = build(None, &dict(), &images(), &router(), Locale::En, "/en/lineup/alpha", 2025);
    let active: Vec<_> = view.nav.iter().filter(|l| l.active).map(|l| l.href.as_str()).collect();
    assert_eq!(active, ["/en/lineup"]);
    let hrefs: Vec<_> = view.languages.iter().map(|l| l.href.as_str()).collect();
    assert_eq!(hrefs, ["/en/lineup/alpha", "/ro/lineup/alpha"]);
    assert!(view.languages[0].current);
  }

  #[test]
  fn home_link_is_active_only_on_home() {
    assert!(is_active("/en/", "/en", true));
    assert!(!is_active("/en/info", "/en", true));
    assert!(!is_active("/en/lineups", "/en/lineup", false));
  }
}
