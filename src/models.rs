//! Value objects produced while resolving image references.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Named member of an [`OptimizedUrlSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageVariant {
  /// The resolved, non-resized asset.
  Origin,
  /// Full-size webp conversion.
  Webp,
  /// Medium webp rendition.
  Medium,
  /// Thumbnail webp rendition.
  Thumbnail,
  /// Low quality webp rendition.
  Low,
}

impl ImageVariant {
  /// Nominal width advertised for the variant in a `srcset`, if it takes part in one.
  pub fn nominal_width(self) -> Option<u32> {
    match self {
      Self::Thumbnail => Some(300),
      Self::Medium => Some(800),
      Self::Low => Some(1200),
      Self::Webp => Some(1920),
      Self::Origin => None,
    }
  }
}

impl fmt::Display for ImageVariant {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Self::Origin => "origin",
      Self::Webp => "webp",
      Self::Medium => "medium",
      Self::Thumbnail => "thumbnail",
      Self::Low => "low",
    };
    f.write_str(name)
  }
}

/// Candidate URLs for one asset.
///
/// Every derived field is a guess computed from the origin's file name; none of them is
/// known to exist on the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizedUrlSet {
  /// Resolved URL of the original upload. Empty only when the reference was empty.
  pub origin: String,
  /// Full-size webp candidate.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub webp: Option<String>,
  /// Medium webp candidate.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub medium: Option<String>,
  /// Thumbnail webp candidate.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub thumbnail: Option<String>,
  /// Low quality webp candidate.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub low: Option<String>,
}

impl OptimizedUrlSet {
  /// A set carrying only the origin, with no derived candidates.
  pub fn origin_only(origin: impl Into<String>) -> Self {
    Self {
      origin: origin.into(),
      ..Self::default()
    }
  }

  /// A set whose derived candidates all point back at the origin.
  pub fn uniform(origin: impl Into<String>) -> Self {
    let origin = origin.into();
    Self {
      webp: Some(origin.clone()),
      medium: Some(origin.clone()),
      thumbnail: Some(origin.clone()),
      low: Some(origin.clone()),
      origin,
    }
  }

  /// Whether the set was built from an empty reference.
  pub fn is_empty(&self) -> bool {
    self.origin.is_empty()
  }

  /// Look up a candidate, treating empty strings as absent.
  pub fn get(&self, variant: ImageVariant) -> Option<&str> {
    let value = match variant {
      ImageVariant::Origin => Some(self.origin.as_str()),
      ImageVariant::Webp => self.webp.as_deref(),
      ImageVariant::Medium => self.medium.as_deref(),
      ImageVariant::Thumbnail => self.thumbnail.as_deref(),
      ImageVariant::Low => self.low.as_deref(),
    };
    value.filter(|url| !url.is_empty())
  }

  pub(crate) fn slot_mut(&mut self, variant: ImageVariant) -> Option<&mut Option<String>> {
    match variant {
      ImageVariant::Origin => None,
      ImageVariant::Webp => Some(&mut self.webp),
      ImageVariant::Medium => Some(&mut self.medium),
      ImageVariant::Thumbnail => Some(&mut self.thumbnail),
      ImageVariant::Low => Some(&mut self.low),
    }
  }
}

/// Image chosen for a display width, ready to be written into `src`/`srcset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponsiveImage {
  /// Primary URL for the `src` attribute.
  pub src: String,
  /// Width-described candidate list, when any sized candidate exists.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub srcset: Option<String>,
  /// Which candidate supplied `src`.
  pub variant: ImageVariant,
  /// URL to substitute once if `src` fails to load.
  pub fallback: String,
}

impl ResponsiveImage {
  /// Render `src` as a CSS `url(...)` value for background-image declarations.
  pub fn css_background(&self) -> String {
    let escaped = self.src.replace('\\', "\\\\").replace('"', "\\\"");
    format!("url(\"{escaped}\")")
  }
}

/// Resolution result for one reference in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedImage {
  /// Reference exactly as supplied by the content API.
  pub reference: String,
  /// Repaired absolute URL.
  pub url: String,
  /// Candidate set derived from `url`.
  pub variants: OptimizedUrlSet,
}
