use tracing::debug;

use crate::models::{ImageVariant, OptimizedUrlSet};

const DERIVED_VARIANTS: [ImageVariant; 4] = [
    ImageVariant::Webp,
    ImageVariant::Medium,
    ImageVariant::Thumbnail,
    ImageVariant::Low,
];

/// Decides whether a derived candidate URL refers to an asset that actually exists.
pub trait AssetExistence {
    /// Returns `true` when `url` is known (or assumed) to be served by the backend.
    fn exists(&self, url: &str) -> bool;
}

/// Trusts every derived candidate without checking.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeExists;

impl AssetExistence for AssumeExists {
    fn exists(&self, _url: &str) -> bool {
        true
    }
}

impl<F> AssetExistence for F
where
    F: Fn(&str) -> bool,
{
    fn exists(&self, url: &str) -> bool {
        self(url)
    }
}

/// Drop derived candidates the checker reports missing. `origin` is always kept.
pub fn retain_existing<E: AssetExistence + ?Sized>(
    mut set: OptimizedUrlSet,
    checker: &E,
) -> OptimizedUrlSet {
    for variant in DERIVED_VARIANTS {
        if let Some(slot) = set.slot_mut(variant) {
            let missing = slot.as_deref().is_some_and(|url| !checker.exists(url));
            if missing {
                debug!(%variant, "dropping candidate reported missing");
                *slot = None;
            }
        }
    }
    set
}
