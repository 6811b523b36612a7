#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod config;
pub mod fallback;
pub mod image_paths;
pub mod logging;
pub mod models;
pub mod origin;
pub mod resolver;
pub mod selection;

pub use config::{ConfigError, ResolverConfig};
pub use fallback::ImageFallback;
pub use image_paths::{AssetExistence, AssumeExists, DerivationOptions};
pub use models::{ImageVariant, OptimizedUrlSet, ResolvedImage, ResponsiveImage};
pub use origin::BackendOrigin;
pub use resolver::ImageResolver;
pub use selection::select_responsive_image;
