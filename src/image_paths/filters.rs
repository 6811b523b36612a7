use std::sync::OnceLock;

use regex::Regex;

/// Two or more slashes that do not directly follow a scheme colon.
pub(crate) fn repeated_slashes() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"([^:]/)/+").expect("invalid repeated slash regex"))
}

/// A port number glued to the first path segment, e.g. `http://host:3007images/x`.
pub(crate) fn port_without_separator() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^(https?://[^/:?#]+:\d+)([^/\d?#])").expect("invalid port regex")
    })
}

/// An absolute `http(s)://host` prefix embedded anywhere in a path, with or without a
/// trailing slash.
pub(crate) fn embedded_host_prefix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)https?://[^/]+/?").expect("invalid host prefix regex")
    })
}

/// Raster extensions that the upload pipeline converts into webp variants.
pub(crate) fn raster_extension() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)\.(jpe?g|png)$").expect("invalid raster regex"))
}

/// Whether a reference is already an absolute `http…` URL.
pub fn is_absolute_reference(value: &str) -> bool {
    value.starts_with("http")
}

/// Whether a resolved URL can be handed to a media element as-is.
///
/// Only absolute `http…` URLs and root-relative paths qualify; anything else would be
/// resolved against the current page and almost certainly 404.
pub fn is_renderable_url(value: &str) -> bool {
    is_absolute_reference(value) || value.starts_with('/')
}
