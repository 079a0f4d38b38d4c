//! CDN URL construction for stored image references.

use crate::{document::Image, error::ImageError};

const CDN_BASE: &str = "https://cdn.sanity.io/images";

/// Builds CDN URLs for images in one project/dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlBuilder {
  project_id: String,
  dataset:    String,
}

impl ImageUrlBuilder {
  pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
    Self { project_id: project_id.into(), dataset: dataset.into() }
  }

  /// Full-size URL, format negotiated by the CDN.
  ///
  /// Fails when the image carries no asset pointer; callers treat that as
  /// "no image".
  pub fn url(&self, image: &Image) -> Result<String, ImageError> {
    let file = asset_file_name(image)?;
    Ok(format!(
      "{CDN_BASE}/{}/{}/{file}?auto=format",
      self.project_id, self.dataset
    ))
  }

  /// URL cropped to exactly `width` × `height`.
  pub fn sized(
    &self,
    image: &Image,
    width: u32,
    height: u32,
  ) -> Result<String, ImageError> {
    let base = self.url(image)?;
    Ok(format!("{base}&w={width}&h={height}&fit=crop"))
  }
}

/// `image-<id>-<W>x<H>-<ext>` → `<id>-<W>x<H>.<ext>`
fn asset_file_name(image: &Image) -> Result<String, ImageError> {
  let reference = image.asset_ref().ok_or(ImageError::MissingAsset)?;
  let malformed = || ImageError::MalformedReference(reference.to_string());

  let rest = reference.strip_prefix("image-").ok_or_else(malformed)?;
  let (rest, ext) = rest.rsplit_once('-').ok_or_else(malformed)?;
  let (id, dims) = rest.rsplit_once('-').ok_or_else(malformed)?;

  let valid_dims = dims
    .split_once('x')
    .is_some_and(|(w, h)| is_number(w) && is_number(h));
  if id.is_empty() || ext.is_empty() || !valid_dims {
    return Err(malformed());
  }
  Ok(format!("{id}-{dims}.{ext}"))
}

fn is_number(s: &str) -> bool {
  !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::document::AssetRef;

  fn image(reference: Option<&str>) -> Image {
    Image {
      asset: Some(AssetRef { reference: reference.map(str::to_string) }),
      alt:   None,
    }
  }

  fn builder() -> ImageUrlBuilder { ImageUrlBuilder::new("abc123", "production") }

  #[test]
  fn builds_cdn_url_from_reference() {
    let url = builder()
      .url(&image(Some("image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg")))
      .unwrap();
    assert_eq!(
      url,
      "https://cdn.sanity.io/images/abc123/production/Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000.jpg?auto=format"
    );
  }

  #[test]
  fn sized_url_appends_crop_parameters() {
    let url = builder()
      .sized(&image(Some("image-abc-300x300-png")), 300, 300)
      .unwrap();
    assert!(url.ends_with("abc-300x300.png?auto=format&w=300&h=300&fit=crop"));
  }

  #[test]
  fn missing_asset_is_reported_as_absence() {
    assert_eq!(builder().url(&image(None)), Err(ImageError::MissingAsset));
    assert_eq!(builder().url(&Image::default()), Err(ImageError::MissingAsset));
  }

  #[test]
  fn malformed_references_are_rejected() {
    for bad in ["file-abc-pdf", "image-abc-png", "image-abc-wxh-png", "image--10x10-png"] {
      assert!(
        matches!(builder().url(&image(Some(bad))), Err(ImageError::MalformedReference(_))),
        "accepted {bad}"
      );
    }
  }
}
