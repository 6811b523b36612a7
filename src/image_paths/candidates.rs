use tracing::warn;

use super::filters::raster_extension;
use super::repair::fix_image_path;
use crate::models::OptimizedUrlSet;
use crate::origin::BackendOrigin;

const WEBP_EXTENSION: &str = ".webp";
const MEDIUM_SUFFIX: &str = "-medium.webp";
const THUMBNAIL_SUFFIX: &str = "-thumbnail.webp";
const LOW_SUFFIX: &str = "-low.webp";

/// Switches that alter how candidates are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DerivationOptions {
    /// Also derive a `-low.webp` candidate for references that are already webp.
    ///
    /// Off by default: already-webp references historically carry no `low` candidate, so
    /// the `<=1200` breakpoint serves the full webp for them. Turning this on changes
    /// which URL those breakpoints request.
    pub webp_low_variant: bool,
}

/// Derive candidate URLs for alternate sizes and formats of an image reference.
///
/// The reference is first repaired with [`fix_image_path`]; candidates are then guessed by
/// rewriting the file extension. Nothing checks that the guessed files exist, so callers
/// are expected to fall back to `origin` when a candidate fails to load.
pub fn get_optimized_image_urls(
    origin: &BackendOrigin,
    reference: &str,
    options: DerivationOptions,
) -> OptimizedUrlSet {
    if reference.is_empty() {
        return OptimizedUrlSet::origin_only("");
    }

    let resolved = fix_image_path(origin, reference);
    let builder = VariantBuilder::new(&resolved, options);

    let derived = if resolved.ends_with(WEBP_EXTENSION) {
        builder.derive_from_webp()
    } else if raster_extension().is_match(&resolved) {
        builder.derive_from_raster()
    } else {
        return OptimizedUrlSet::uniform(resolved);
    };

    derived.unwrap_or_else(|| {
        warn!(url = %resolved, "could not derive image variants, using origin for all");
        OptimizedUrlSet::uniform(resolved.clone())
    })
}

struct VariantBuilder<'a> {
    origin: &'a str,
    options: DerivationOptions,
}

impl<'a> VariantBuilder<'a> {
    fn new(origin: &'a str, options: DerivationOptions) -> Self {
        Self { origin, options }
    }

    fn derive_from_webp(&self) -> Option<OptimizedUrlSet> {
        let origin = self.origin;
        let (medium, thumbnail, low) = if origin.contains(MEDIUM_SUFFIX) {
            (
                origin.to_string(),
                self.swap_suffix(MEDIUM_SUFFIX, THUMBNAIL_SUFFIX)?,
                self.swap_suffix(MEDIUM_SUFFIX, LOW_SUFFIX)?,
            )
        } else if origin.contains(THUMBNAIL_SUFFIX) {
            (
                self.swap_suffix(THUMBNAIL_SUFFIX, MEDIUM_SUFFIX)?,
                origin.to_string(),
                self.swap_suffix(THUMBNAIL_SUFFIX, LOW_SUFFIX)?,
            )
        } else {
            let stem = origin.strip_suffix(WEBP_EXTENSION)?;
            (
                format!("{stem}{MEDIUM_SUFFIX}"),
                format!("{stem}{THUMBNAIL_SUFFIX}"),
                format!("{stem}{LOW_SUFFIX}"),
            )
        };

        Some(OptimizedUrlSet {
            origin: origin.to_string(),
            webp: Some(origin.to_string()),
            medium: Some(medium),
            thumbnail: Some(thumbnail),
            low: self.options.webp_low_variant.then_some(low),
        })
    }

    fn derive_from_raster(&self) -> Option<OptimizedUrlSet> {
        Some(OptimizedUrlSet {
            origin: self.origin.to_string(),
            webp: Some(self.replace_extension(WEBP_EXTENSION)?),
            medium: Some(self.replace_extension(MEDIUM_SUFFIX)?),
            thumbnail: Some(self.replace_extension(THUMBNAIL_SUFFIX)?),
            low: Some(self.replace_extension(LOW_SUFFIX)?),
        })
    }

    fn swap_suffix(&self, from: &str, to: &str) -> Option<String> {
        let swapped = self.origin.replacen(from, to, 1);
        (swapped != self.origin).then_some(swapped)
    }

    fn replace_extension(&self, replacement: &str) -> Option<String> {
        let replaced = raster_extension()
            .replace(self.origin, regex::NoExpand(replacement))
            .into_owned();
        (replaced != self.origin).then_some(replaced)
    }
}
