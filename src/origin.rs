//! Injected description of the asset host every image reference resolves against.

use std::fmt;

/// Suffix stripped from configured API URLs to obtain the asset host.
const API_SUFFIX: &str = "/api";

/// Base URL of the content backend, stored without a trailing slash.
///
/// Content APIs are usually configured by their API root (`https://host/api`) while uploaded
/// assets live beside it (`https://host/uploads/...`), so construction strips a trailing `/api`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendOrigin {
  base: String,
}

impl BackendOrigin {
  /// Build an origin from a configured API or asset URL.
  pub fn new(api_url: impl AsRef<str>) -> Self {
    let trimmed = api_url.as_ref().trim().trim_end_matches('/');
    let base = trimmed
      .strip_suffix(API_SUFFIX)
      .unwrap_or(trimmed)
      .trim_end_matches('/');

    Self {
      base: base.to_string(),
    }
  }

  /// The origin without a trailing slash.
  pub fn as_str(&self) -> &str {
    &self.base
  }

  /// Join a path onto the origin, inserting exactly one separating slash.
  pub fn join(&self, path: &str) -> String {
    format!("{}/{}", self.base, path.trim_start_matches('/'))
  }

  /// Join a path underneath the origin's `uploads` folder.
  pub fn join_uploads(&self, path: &str) -> String {
    format!("{}/uploads/{}", self.base, path.trim_start_matches('/'))
  }
}

impl fmt::Display for BackendOrigin {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.base)
  }
}

impl From<&str> for BackendOrigin {
  fn from(value: &str) -> Self {
    Self::new(value)
  }
}

#[cfg(test)]
mod tests {
  use super::BackendOrigin;

  #[test]
  fn strips_api_suffix_and_trailing_slashes() {
    assert_eq!(
      BackendOrigin::new("http://localhost:3007/api").as_str(),
      "http://localhost:3007"
    );
    assert_eq!(
      BackendOrigin::new("https://cdn.example.com/api/").as_str(),
      "https://cdn.example.com"
    );
    assert_eq!(
      BackendOrigin::new(" https://cdn.example.com// ").as_str(),
      "https://cdn.example.com"
    );
  }

  #[test]
  fn keeps_paths_that_merely_contain_api() {
    assert_eq!(
      BackendOrigin::new("https://example.com/apiv2").as_str(),
      "https://example.com/apiv2"
    );
  }

  #[test]
  fn joins_with_single_separator() {
    let origin = BackendOrigin::new("https://cdn.example.com/");
    assert_eq!(origin.join("/a.png"), "https://cdn.example.com/a.png");
    assert_eq!(
      origin.join_uploads("images/a.png"),
      "https://cdn.example.com/uploads/images/a.png"
    );
  }
}
