use super::filters::repeated_slashes;

/// Collapse accidental runs of slashes, leaving the `scheme://` separator alone.
///
/// Naive concatenation of a base URL and a path that both carry a slash produces values
/// like `http://host//uploads//a.png`; every run that does not directly follow a `:` is
/// reduced to a single slash. A run at the very start of the value has nothing in front of
/// it and is kept as-is.
pub fn normalize_url(value: &str) -> String {
    repeated_slashes().replace_all(value, "$1").into_owned()
}
