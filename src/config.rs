//! Resolver configuration loaded from an optional JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::image_paths::DerivationOptions;
use crate::origin::BackendOrigin;

/// File name searched for by [`ResolverConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "media_resolver.config.json";

/// API URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3007/api";

/// Settings describing where assets live and how candidates are derived.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
  /// Content API URL. A trailing `/api` is stripped to obtain the asset host.
  pub api_url: String,
  /// Derive `-low.webp` candidates for references that are already webp.
  pub webp_low_variant: bool,
}

impl Default for ResolverConfig {
  fn default() -> Self {
    Self {
      api_url: DEFAULT_API_URL.into(),
      webp_low_variant: false,
    }
  }
}

/// Errors that can occur while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// Failed to read the configuration file from disk.
  #[error("failed to read {}: {source}", .path.display())]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    #[source]
    source: std::io::Error,
  },
  /// Failed to parse the JSON configuration.
  #[error("failed to parse {}: {source}", .path.display())]
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    #[source]
    source: serde_json::Error,
  },
}

impl ResolverConfig {
  /// Look for [`DEFAULT_CONFIG_FILE`] in `dir`.
  ///
  /// A missing or unreadable file falls back to defaults so the resolver can always be built;
  /// parse failures are logged.
  pub fn discover(dir: &Path) -> Self {
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    match Self::load_from_path(&candidate) {
      Ok(config) => config,
      Err(err) => {
        warn!(error = %err, "ignoring invalid resolver configuration");
        Self::default()
      }
    }
  }

  /// Read configuration from a specific JSON file, returning defaults when it does not exist.
  pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let contents = match fs::read_to_string(path) {
      Ok(contents) => contents,
      Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
        debug!(path = %path.display(), "no resolver configuration found, using defaults");
        return Ok(Self::default());
      }
      Err(err) => {
        return Err(ConfigError::Io {
          path: path.to_path_buf(),
          source: err,
        });
      }
    };

    serde_json::from_str(&contents).map_err(|err| ConfigError::Parse {
      path: path.to_path_buf(),
      source: err,
    })
  }

  /// Replace the API URL, e.g. from a command line flag or environment variable.
  pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
    if let Some(api_url) = api_url.filter(|value| !value.trim().is_empty()) {
      self.api_url = api_url;
    }
    self
  }

  /// Asset host derived from the configured API URL.
  pub fn backend_origin(&self) -> BackendOrigin {
    BackendOrigin::new(&self.api_url)
  }

  /// Derivation switches carried by this configuration.
  pub fn derivation_options(&self) -> DerivationOptions {
    DerivationOptions {
      webp_low_variant: self.webp_low_variant,
    }
  }
}
