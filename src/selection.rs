//! Breakpoint-driven choice of which image candidate to request.

use tracing::warn;

use crate::image_paths::is_renderable_url;
use crate::models::{ImageVariant, OptimizedUrlSet, ResponsiveImage};

/// Display-width threshold together with the candidates it prefers, best first.
#[derive(Debug, Clone, Copy)]
pub struct BreakpointTier {
  /// Inclusive upper bound in CSS pixels.
  pub max_width: u32,
  /// Candidates to try in order.
  pub preference: &'static [ImageVariant],
}

/// Tiers checked in order; the first whose `max_width` covers the request wins.
pub const BREAKPOINT_TIERS: [BreakpointTier; 3] = [
  BreakpointTier {
    max_width: 300,
    preference: &[
      ImageVariant::Thumbnail,
      ImageVariant::Medium,
      ImageVariant::Low,
      ImageVariant::Webp,
      ImageVariant::Origin,
    ],
  },
  BreakpointTier {
    max_width: 800,
    preference: &[
      ImageVariant::Medium,
      ImageVariant::Low,
      ImageVariant::Webp,
      ImageVariant::Origin,
    ],
  },
  BreakpointTier {
    max_width: 1200,
    preference: &[ImageVariant::Low, ImageVariant::Webp, ImageVariant::Origin],
  },
];

/// Preference used for wide displays and when no width is requested.
pub const FULL_WIDTH_PREFERENCE: &[ImageVariant] = &[ImageVariant::Webp, ImageVariant::Origin];

/// Order in which sized candidates are listed in a `srcset`.
const SRCSET_ORDER: [ImageVariant; 4] = [
  ImageVariant::Thumbnail,
  ImageVariant::Medium,
  ImageVariant::Low,
  ImageVariant::Webp,
];

/// Preference chain applying to a requested display width.
pub fn preference_for_width(width: Option<u32>) -> &'static [ImageVariant] {
  let Some(width) = width else {
    return FULL_WIDTH_PREFERENCE;
  };

  BREAKPOINT_TIERS
    .iter()
    .find(|tier| width <= tier.max_width)
    .map(|tier| tier.preference)
    .unwrap_or(FULL_WIDTH_PREFERENCE)
}

/// Build a `srcset` from whichever sized candidates are present and renderable.
pub fn build_srcset(set: &OptimizedUrlSet) -> Option<String> {
  let entries: Vec<String> = SRCSET_ORDER
    .iter()
    .filter_map(|variant| {
      let url = set.get(*variant).filter(|url| is_renderable_url(url))?;
      let width = variant.nominal_width()?;
      Some(format!("{url} {width}w"))
    })
    .collect();

  (!entries.is_empty()).then(|| entries.join(", "))
}

/// Pick the candidate to render for `width`.
///
/// Returns `None` when the best available URL cannot be rendered (empty, or neither
/// absolute nor root-relative); a warning is logged so the operator can trace the
/// offending reference.
pub fn select_responsive_image(
  set: &OptimizedUrlSet,
  width: Option<u32>,
) -> Option<ResponsiveImage> {
  let chosen = preference_for_width(width)
    .iter()
    .find_map(|variant| set.get(*variant).map(|url| (*variant, url)));

  let Some((variant, src)) = chosen else {
    warn!(origin = %set.origin, "no image candidate available, skipping render");
    return None;
  };

  if !is_renderable_url(src) {
    warn!(src, %variant, "rejecting image URL that is neither absolute nor root-relative");
    return None;
  }

  Some(ResponsiveImage {
    src: src.to_string(),
    srcset: build_srcset(set),
    variant,
    fallback: set.origin.clone(),
  })
}
