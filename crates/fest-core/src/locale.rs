//! The closed set of languages the site is published in.
//!
//! A locale is parsed once, at the routing boundary, and threaded through the
//! rest of the request as a typed value.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator as _};

/// A supported content language.
///
/// Parsing is case-sensitive: `"en"` is a locale, `"EN"` is not.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Locale {
  #[default]
  En,
  Ro,
}

impl Locale {
  /// The locale used when a request carries none.
  pub const DEFAULT: Locale = Locale::En;

  /// Every locale, in declaration order.
  pub fn all() -> Vec<Locale> { Self::iter().collect() }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::En => "en",
      Self::Ro => "ro",
    }
  }

  /// Parse an optional, possibly empty locale code. Empty and unknown codes
  /// are both `None`.
  pub fn from_code(code: Option<&str>) -> Option<Locale> {
    code.filter(|c| !c.is_empty()).and_then(|c| c.parse().ok())
  }

  /// Return the locale whose prefix `path` carries, among `supported`.
  ///
  /// A path carries a locale when it is exactly `/{locale}` or starts with
  /// `/{locale}/`.
  pub fn from_path_prefix(path: &str, supported: &[Locale]) -> Option<Locale> {
    let rest = path.strip_prefix('/')?;
    let segment = rest.split('/').next()?;
    supported.iter().copied().find(|l| l.as_str() == segment)
  }
}
