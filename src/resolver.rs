//! Entry point tying together path repair, variant derivation and responsive selection.

use tracing::warn;

use crate::config::ResolverConfig;
use crate::image_paths::{
  AssetExistence, AssumeExists, DerivationOptions, fix_image_path, get_optimized_image_urls,
  retain_existing,
};
use crate::models::{OptimizedUrlSet, ResolvedImage, ResponsiveImage};
use crate::origin::BackendOrigin;
use crate::selection::select_responsive_image;

/// Resolves image references against one backend origin.
///
/// The resolver is immutable and cheap to share; every call recomputes from its input.
#[derive(Debug, Clone)]
pub struct ImageResolver<E = AssumeExists> {
  origin: BackendOrigin,
  options: DerivationOptions,
  checker: E,
}

impl ImageResolver<AssumeExists> {
  /// Create a resolver that trusts every derived candidate.
  pub fn new(origin: BackendOrigin) -> Self {
    Self {
      origin,
      options: DerivationOptions::default(),
      checker: AssumeExists,
    }
  }

  /// Create a resolver from loaded configuration.
  pub fn from_config(config: &ResolverConfig) -> Self {
    Self::new(config.backend_origin()).with_options(config.derivation_options())
  }
}

impl<E: AssetExistence> ImageResolver<E> {
  /// Replace the derivation switches.
  pub fn with_options(mut self, options: DerivationOptions) -> Self {
    self.options = options;
    self
  }

  /// Swap in a checker consulted for every derived candidate.
  pub fn with_existence_checker<C: AssetExistence>(self, checker: C) -> ImageResolver<C> {
    ImageResolver {
      origin: self.origin,
      options: self.options,
      checker,
    }
  }

  /// Backend origin references are resolved against.
  pub fn origin(&self) -> &BackendOrigin {
    &self.origin
  }

  /// Repair a reference into an absolute URL. Empty references stay empty.
  pub fn fix_image_path(&self, reference: &str) -> String {
    fix_image_path(&self.origin, reference)
  }

  /// Derive candidate URLs for a reference, dropping those the checker rejects.
  pub fn optimized_urls(&self, reference: &str) -> OptimizedUrlSet {
    let set = get_optimized_image_urls(&self.origin, reference, self.options);
    retain_existing(set, &self.checker)
  }

  /// Resolve a reference and pick the candidate for `width`.
  ///
  /// `None` means nothing renderable is available and the caller should not emit an image.
  pub fn responsive(&self, reference: &str, width: Option<u32>) -> Option<ResponsiveImage> {
    let set = self.optimized_urls(reference);
    if set.is_empty() {
      warn!("empty image reference, nothing to render");
      return None;
    }
    select_responsive_image(&set, width)
  }

  /// Resolve a batch of references, preserving their order.
  pub fn resolve_all<I, S>(&self, references: I) -> Vec<ResolvedImage>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    references
      .into_iter()
      .map(|reference| {
        let reference = reference.as_ref();
        let variants = self.optimized_urls(reference);
        ResolvedImage {
          reference: reference.to_string(),
          url: variants.origin.clone(),
          variants,
        }
      })
      .collect()
  }
}
