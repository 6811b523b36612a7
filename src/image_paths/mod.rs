//! Helpers for repairing image references and guessing their optimized variants.
//!
//! The responsibilities are split into focused submodules so that slash normalisation,
//! path repair, variant derivation and the existence hook can be tested independently.
//! Everything here is a pure function over strings; the backend origin is passed in
//! explicitly rather than read from global state.

mod candidates;
mod existence;
mod filters;
mod normalize;
mod repair;

pub use candidates::{DerivationOptions, get_optimized_image_urls};
pub use existence::{AssetExistence, AssumeExists, retain_existing};
pub use filters::{is_absolute_reference, is_renderable_url};
pub use normalize::normalize_url;
pub use repair::fix_image_path;
