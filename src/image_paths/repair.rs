use tracing::debug;
use url::Url;

use super::filters::{embedded_host_prefix, is_absolute_reference, port_without_separator};
use super::normalize::normalize_url;
use crate::origin::BackendOrigin;

const UPLOADS_PREFIX: &str = "/uploads/";
const IMAGES_PREFIX: &str = "/images/";
const AUTOMATION_SEGMENT: &str = "automation";

/// Turn an image reference from the content API into an absolute URL.
///
/// The content backend hands out references in several shapes (`/uploads/...`,
/// `/images/...`, bare relative paths and absolute URLs that were sometimes concatenated
/// incorrectly upstream). Each shape is repaired by the first matching heuristic below and
/// the function never fails: unrecognised input ends up under `<origin>/uploads/`. An empty
/// reference yields an empty string so callers can skip rendering.
pub fn fix_image_path(origin: &BackendOrigin, reference: &str) -> String {
    if reference.is_empty() {
        return String::new();
    }

    if reference.starts_with(UPLOADS_PREFIX) {
        debug!(reference, "resolving upload path against backend origin");
        return normalize_url(&origin.join(reference));
    }

    if !is_absolute_reference(reference) && has_automation_segment(reference) {
        debug!(reference, "resolving automation asset path");
        let path = reference.trim_start_matches('/');
        let resolved = if path.starts_with("uploads/") {
            origin.join(path)
        } else {
            origin.join_uploads(path)
        };
        return normalize_url(&resolved);
    }

    if reference.starts_with(IMAGES_PREFIX) {
        debug!(reference, "resolving images path under uploads");
        return normalize_url(&origin.join_uploads(reference));
    }

    if is_absolute_reference(reference) {
        if let Some(resolved) = repair_absolute(origin, reference) {
            return resolved;
        }
    }

    debug!(reference, "treating reference as a bare relative upload path");
    let trimmed = reference.trim_start_matches('/');
    let relative = embedded_host_prefix().replace_all(trimmed, "");
    normalize_url(&origin.join_uploads(&relative))
}

fn has_automation_segment(reference: &str) -> bool {
    reference
        .split('/')
        .any(|segment| segment == AUTOMATION_SEGMENT)
}

/// Repair an absolute URL, returning `None` when nothing usable could be salvaged.
fn repair_absolute(origin: &BackendOrigin, reference: &str) -> Option<String> {
    let separated = port_without_separator().replace(reference, "$1/$2");
    let normalized = normalize_url(&separated);

    match Url::parse(&normalized) {
        Ok(mut parsed) => {
            let path = parsed.path().to_string();
            if path.starts_with(IMAGES_PREFIX) {
                debug!(reference, "injecting uploads segment into absolute URL");
                parsed.set_path(&format!("/uploads{path}"));
            }
            Some(parsed.to_string())
        }
        Err(err) => {
            debug!(reference, error = %err, "salvaging path from unparseable URL");
            salvage_unparseable(origin, &normalized)
        }
    }
}

/// Rebuild everything after the host of a broken URL underneath the uploads folder.
///
/// Without a `://` separator the scheme was glued onto the path (`httpimages/a.png`), so only
/// the scheme is dropped and the rest is kept as the path.
fn salvage_unparseable(origin: &BackendOrigin, value: &str) -> Option<String> {
    let remainder = match value.split_once("://") {
        Some((_, after_scheme)) => after_scheme.split_once('/')?.1,
        None => value
            .strip_prefix("https")
            .or_else(|| value.strip_prefix("http"))
            .unwrap_or(value)
            .trim_start_matches(':'),
    };

    let remainder = remainder.trim_start_matches('/');
    let remainder = remainder.strip_prefix("uploads/").unwrap_or(remainder);
    if remainder.is_empty() {
        return None;
    }

    Some(normalize_url(&origin.join_uploads(remainder)))
}

#[cfg(test)]
mod tests {
    use super::fix_image_path;
    use crate::origin::BackendOrigin;

    fn origin() -> BackendOrigin {
        BackendOrigin::new("https://cdn.example.com")
    }

    #[test]
    fn returns_empty_for_empty_reference() {
        assert_eq!(fix_image_path(&origin(), ""), "");
    }

    #[test]
    fn prefixes_upload_paths_with_origin() {
        for base in ["https://cdn.example.com", "https://cdn.example.com/"] {
            let origin = BackendOrigin::new(base);
            assert_eq!(
                fix_image_path(&origin, "/uploads/images/a.png"),
                "https://cdn.example.com/uploads/images/a.png"
            );
        }
    }

    #[test]
    fn collapses_slashes_inside_upload_paths() {
        assert_eq!(
            fix_image_path(&origin(), "/uploads//images///a.png"),
            "https://cdn.example.com/uploads/images/a.png"
        );
    }

    #[test]
    fn places_automation_assets_under_uploads() {
        assert_eq!(
            fix_image_path(&origin(), "/images/automation/line-1.jpg"),
            "https://cdn.example.com/uploads/images/automation/line-1.jpg"
        );
        assert_eq!(
            fix_image_path(&origin(), "automation/line-1.jpg"),
            "https://cdn.example.com/uploads/automation/line-1.jpg"
        );
        assert_eq!(
            fix_image_path(&origin(), "uploads/automation/line-1.jpg"),
            "https://cdn.example.com/uploads/automation/line-1.jpg"
        );
    }

    #[test]
    fn automation_needs_a_whole_segment() {
        assert_eq!(
            fix_image_path(&origin(), "images/automation-line.jpg"),
            "https://cdn.example.com/uploads/images/automation-line.jpg"
        );
    }

    #[test]
    fn moves_images_paths_under_uploads() {
        assert_eq!(
            fix_image_path(&origin(), "/images/product/a.png"),
            "https://cdn.example.com/uploads/images/product/a.png"
        );
    }

    #[test]
    fn repairs_port_glued_to_path() {
        assert_eq!(
            fix_image_path(&origin(), "http://api.example.com:3007images/x.jpg"),
            "http://api.example.com:3007/uploads/images/x.jpg"
        );
    }

    #[test]
    fn injects_uploads_into_absolute_images_urls() {
        assert_eq!(
            fix_image_path(&origin(), "https://x.com//images/a.png"),
            "https://x.com/uploads/images/a.png"
        );
    }

    #[test]
    fn well_formed_absolute_urls_are_stable() {
        let url = "https://x.com/uploads/images/a.png";
        let once = fix_image_path(&origin(), url);
        let twice = fix_image_path(&origin(), &once);
        assert_eq!(once, url);
        assert_eq!(twice, url);
    }

    #[test]
    fn keeps_foreign_absolute_urls() {
        assert_eq!(
            fix_image_path(&origin(), "https://images.example.org/photos/a.jpg?w=200"),
            "https://images.example.org/photos/a.jpg?w=200"
        );
    }

    #[test]
    fn salvages_unparseable_absolute_urls() {
        assert_eq!(
            fix_image_path(&origin(), "http://bad host/images/a.png"),
            "https://cdn.example.com/uploads/images/a.png"
        );
        assert_eq!(
            fix_image_path(&origin(), "httpimages/product/a.png"),
            "https://cdn.example.com/uploads/images/product/a.png"
        );
    }

    #[test]
    fn salvages_host_only_urls_without_keeping_the_host() {
        assert_eq!(
            fix_image_path(&origin(), "http://bad host"),
            "https://cdn.example.com/uploads/"
        );
    }

    #[test]
    fn returns_canonical_form_of_absolute_urls() {
        assert_eq!(
            fix_image_path(&origin(), "https:images/a.png"),
            "https://images/a.png"
        );
        assert_eq!(
            fix_image_path(&origin(), "https://x.com/my photo.png"),
            "https://x.com/my%20photo.png"
        );
    }

    #[test]
    fn does_not_double_uploads_when_salvaging() {
        assert_eq!(
            fix_image_path(&origin(), "http://host:99999/uploads/images/a.png"),
            "https://cdn.example.com/uploads/images/a.png"
        );
    }

    #[test]
    fn falls_back_to_relative_upload_path() {
        assert_eq!(
            fix_image_path(&origin(), "images/product/a.png"),
            "https://cdn.example.com/uploads/images/product/a.png"
        );
        assert_eq!(
            fix_image_path(&origin(), "//news/banner.jpg"),
            "https://cdn.example.com/uploads/news/banner.jpg"
        );
    }

    #[test]
    fn strips_embedded_hosts_from_relative_paths() {
        assert_eq!(
            fix_image_path(&origin(), "/prefix/http://old.example.com/images/a.png"),
            "https://cdn.example.com/uploads/prefix/images/a.png"
        );
    }
}
