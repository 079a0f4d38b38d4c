//! Page assemblers.
//!
//! Each assembler fetches what its page needs concurrently, validates it in a
//! single pass, and returns a view model. Assemblers never fail: missing or
//! broken content drops the affected section or yields a fallback view.
//!
//! | Page | Route | Sources |
//! |------|-------|---------|
//! | layout | every page | site settings, dictionary |
//! | home | `/{locale}` | homepage, dictionary |
//! | lineup | `/{locale}/lineup` | artists, dictionary |
//! | artist | `/{locale}/lineup/{slug}` | artist, dictionary |
//! | info | `/{locale}/info` | dictionary |

pub mod artist;
pub mod home;
pub mod info;
pub mod layout;
pub mod lineup;

use fest_core::{Locale, store::ContentStore};
use serde::Serialize;

use crate::{
  AppState,
  view::{PageMeta, PageResponse},
};

/// Assemble the layout alongside a page body and wrap both in the response
/// envelope. `path` is the request path, used for active-link and language
/// switcher state.
pub async fn render<S, T, F>(
  state: &AppState<S>,
  locale: Locale,
  path: &str,
  page: F,
) -> PageResponse<T>
where
  S: ContentStore,
  T: Serialize,
  F: Future<Output = (PageMeta, T)>,
{
  let (layout, (meta, page)) = tokio::join!(layout::assemble(state, locale, path), page);
  PageResponse { layout, meta, page }
}
