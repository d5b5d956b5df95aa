use crate::models::AssetKind;

const STYLESHEET_SUFFIXES: &[&str] = &[".css"];

const SCRIPT_SUFFIXES: &[&str] = &[".js"];

const IMAGE_SUFFIXES: &[&str] = &[
    ".webp", ".jpg", ".jpeg", ".jpe", ".jfif", ".jif", ".png", ".gif", ".tiff", ".tif", ".svg",
    ".avif",
];

/// Determine the category of an asset from its path suffix.
///
/// Matching is case-sensitive and never inspects file content. The suffix sets are
/// disjoint, so the order of the checks does not matter.
pub fn classify_asset_path(path: &str) -> AssetKind {
    let has_suffix = |suffixes: &[&str]| suffixes.iter().any(|suffix| path.ends_with(suffix));

    if has_suffix(STYLESHEET_SUFFIXES) {
        AssetKind::Stylesheet
    } else if has_suffix(SCRIPT_SUFFIXES) {
        AssetKind::Script
    } else if has_suffix(IMAGE_SUFFIXES) {
        AssetKind::Image
    } else {
        AssetKind::Other
    }
}
