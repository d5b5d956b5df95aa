use std::path::Path;

/// Normalise a discovered or declared path into its registry source key.
///
/// Backslashes from Windows walks are turned into forward slashes and every leading
/// separator is stripped, so `"/css\\site.css"` and `"css/site.css"` share one key.
pub fn normalize_source_path(path: &str) -> String {
    path.replace('\\', "/").trim_start_matches('/').to_string()
}

/// Strip a single leading separator from a lookup path.
pub fn trim_lookup_path(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Produce the source key of `path` relative to the scan `root`.
///
/// Returns `None` when `path` does not live beneath `root`.
pub fn relative_source_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    Some(normalize_source_path(&relative.to_string_lossy()))
}

/// Prepend the configured public prefix to a source or output path.
///
/// A separator is inserted only when neither side already provides one.
pub fn join_public_path(prefix: &str, path: &str) -> String {
    if prefix.is_empty() || prefix.ends_with('/') || path.starts_with('/') {
        format!("{prefix}{path}")
    } else {
        format!("{prefix}/{path}")
    }
}

/// Append the `?v=` cache-busting token when a hash is present.
pub fn versioned_path(public_path: &str, hash: &str) -> String {
    if hash.is_empty() {
        public_path.to_string()
    } else {
        format!("{public_path}?v={hash}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn strips_leading_separators_and_backslashes() {
        assert_eq!(normalize_source_path("//css\\site.css"), "css/site.css");
        assert_eq!(normalize_source_path("js/app.js"), "js/app.js");
    }

    #[test]
    fn lookup_trims_only_one_separator() {
        assert_eq!(trim_lookup_path("/style.css"), "style.css");
        assert_eq!(trim_lookup_path("//style.css"), "/style.css");
        assert_eq!(trim_lookup_path("style.css"), "style.css");
    }

    #[test]
    fn relative_paths_use_forward_slashes() {
        let root = PathBuf::from("assets");
        let file = root.join("img").join("logo.png");
        assert_eq!(
            relative_source_path(&root, &file).as_deref(),
            Some("img/logo.png")
        );
        assert_eq!(relative_source_path(&root, Path::new("other/x.css")), None);
    }

    #[test]
    fn joins_prefix_without_doubling_separators() {
        assert_eq!(join_public_path("/", "style.css"), "/style.css");
        assert_eq!(join_public_path("/static/", "app.js"), "/static/app.js");
        assert_eq!(join_public_path("/static", "app.js"), "/static/app.js");
        assert_eq!(join_public_path("", "app.js"), "app.js");
    }

    #[test]
    fn appends_version_only_for_non_empty_hash() {
        assert_eq!(versioned_path("/style.css", "123"), "/style.css?v=123");
        assert_eq!(versioned_path("/style.css", ""), "/style.css");
    }
}
