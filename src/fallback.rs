//! One-shot substitution of the original upload when an optimized candidate fails to load.

use tracing::{debug, warn};

use crate::models::ResponsiveImage;

/// Tracks whether a rendered image has already fallen back to its origin.
#[derive(Debug, Clone)]
pub struct ImageFallback {
  origin: String,
  used: bool,
}

impl ImageFallback {
  /// Start tracking fallbacks for a selected image.
  pub fn new(image: &ResponsiveImage) -> Self {
    Self {
      origin: image.fallback.clone(),
      used: false,
    }
  }

  /// Report that `failed_url` could not be loaded.
  ///
  /// Returns the origin URL to load instead the first time this is called with a URL other
  /// than the origin itself. Later failures return `None`: the origin is broken too and
  /// the image is left unrendered.
  pub fn on_load_error(&mut self, failed_url: &str) -> Option<&str> {
    if self.used || self.origin.is_empty() || self.origin == failed_url {
      debug!(failed_url, "image failed to load and no fallback remains");
      return None;
    }

    warn!(failed_url, origin = %self.origin, "image failed to load, falling back to origin");
    self.used = true;
    Some(&self.origin)
  }

  /// Whether the fallback has been consumed.
  pub fn is_exhausted(&self) -> bool {
    self.used
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::ImageVariant;

  fn image(src: &str, fallback: &str) -> ResponsiveImage {
    ResponsiveImage {
      src: src.into(),
      srcset: None,
      variant: ImageVariant::Medium,
      fallback: fallback.into(),
    }
  }

  #[test]
  fn substitutes_origin_only_once() {
    let selected = image("https://a.com/x-medium.webp", "https://a.com/x.png");
    let mut fallback = ImageFallback::new(&selected);

    assert_eq!(
      fallback.on_load_error("https://a.com/x-medium.webp"),
      Some("https://a.com/x.png")
    );
    assert!(fallback.is_exhausted());
    assert_eq!(fallback.on_load_error("https://a.com/x.png"), None);
  }

  #[test]
  fn no_substitution_when_origin_failed() {
    let selected = image("https://a.com/x.pdf", "https://a.com/x.pdf");
    let mut fallback = ImageFallback::new(&selected);

    assert_eq!(fallback.on_load_error("https://a.com/x.pdf"), None);
    assert!(!fallback.is_exhausted());
  }

  #[test]
  fn no_substitution_without_origin() {
    let mut fallback = ImageFallback::new(&image("/uploads/x.webp", ""));
    assert_eq!(fallback.on_load_error("/uploads/x.webp"), None);
  }
}
