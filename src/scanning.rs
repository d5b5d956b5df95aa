//! Directory scanning: hash every file beneath a root and register it.

use std::path::Path;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::asset_paths::{hash_file, relative_source_path};
use crate::error::{AssetError, Result};
use crate::models::Asset;
use crate::registry::Registry;

/// Settings applied to every asset discovered by a scan.
#[derive(Debug, Clone, Copy)]
pub struct ScanOptions<'a> {
    /// Prefix prepended to each source path to form its public path.
    pub public_path_prefix: &'a str,
    /// Number of hex characters kept from each content hash; zero disables hashing.
    pub hash_length: usize,
    /// Replace assets whose source path is already registered.
    pub overwrite: bool,
}

/// Walk `root` recursively and register every regular file in `registry`.
///
/// Source paths are relative to `root` with forward slashes. Entries are visited in
/// file-name order, so the first of two colliding paths wins unless `overwrite` is set.
/// The walk stops at the first filesystem error; assets registered before it are kept.
/// Returns the number of assets that were stored.
pub fn scan_directory(registry: &mut Registry, root: &Path, options: ScanOptions<'_>) -> Result<usize> {
    let mut stored = 0;

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| AssetError::Walk {
            root: root.to_path_buf(),
            source,
        })?;

        let file_type = entry.file_type();
        if file_type.is_symlink() && !entry.path().is_file() {
            warn!(path = %entry.path().display(), "skipped symlink that does not resolve to a file");
            continue;
        }
        if !file_type.is_file() && !file_type.is_symlink() {
            continue;
        }

        let path = entry.path();
        let source_path = match relative_source_path(root, path) {
            Some(relative) if !relative.is_empty() => relative,
            _ => entry.file_name().to_string_lossy().into_owned(),
        };

        let hash = hash_file(path, options.hash_length)?;
        let asset = Asset::scanned(options.public_path_prefix, source_path, hash);
        if registry.add(asset, options.overwrite) {
            stored += 1;
        } else {
            debug!(path = %path.display(), "skipped already registered asset");
        }
    }

    info!(root = %root.display(), stored, "scanned asset directory");
    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn options(overwrite: bool) -> ScanOptions<'static> {
        ScanOptions {
            public_path_prefix: "/",
            hash_length: 10,
            overwrite,
        }
    }

    fn fixture() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("css")).unwrap();
        fs::create_dir_all(root.join("js/vendor")).unwrap();
        fs::write(root.join("css/site.css"), "body {}").unwrap();
        fs::write(root.join("js/app.js"), "console.log(1)").unwrap();
        fs::write(root.join("js/vendor/lib.js"), "export {}").unwrap();
        fs::write(root.join("robots.txt"), "User-agent: *").unwrap();
        dir
    }

    #[test]
    fn registers_every_regular_file() {
        let dir = fixture();
        let mut registry = Registry::new();

        let stored = scan_directory(&mut registry, dir.path(), options(false)).unwrap();

        assert_eq!(stored, 4);
        let sources: Vec<_> = registry.assets().iter().map(Asset::source_path).collect();
        assert_eq!(sources, ["css/site.css", "js/app.js", "js/vendor/lib.js", "robots.txt"]);
    }

    #[test]
    fn source_and_public_paths_resolve_to_same_asset() {
        let dir = fixture();
        let mut registry = Registry::new();
        scan_directory(&mut registry, dir.path(), options(false)).unwrap();

        let asset = registry.asset("js/app.js").unwrap().clone();
        assert_eq!(asset.hash().len(), 10);
        assert_eq!(asset.public_path(), format!("/js/app.js?v={}", asset.hash()));
        assert_eq!(registry.get("js/app.js"), asset.public_path());
        assert_eq!(registry.get(asset.public_path()), asset.public_path());
        assert_eq!(registry.get("/js/app.js"), asset.public_path());
    }

    #[test]
    fn rescanning_unchanged_directory_is_idempotent() {
        let dir = fixture();
        let mut once = Registry::new();
        scan_directory(&mut once, dir.path(), options(false)).unwrap();

        let mut twice = Registry::new();
        scan_directory(&mut twice, dir.path(), options(false)).unwrap();
        let stored = scan_directory(&mut twice, dir.path(), options(false)).unwrap();

        assert_eq!(stored, 0);
        assert_eq!(once.assets(), twice.assets());
    }

    #[test]
    fn first_scan_wins_unless_renewing() {
        let dir = fixture();
        let mut registry = Registry::new();
        scan_directory(&mut registry, dir.path(), options(false)).unwrap();
        let before = registry.get("css/site.css");

        fs::write(dir.path().join("css/site.css"), "body { margin: 0 }").unwrap();
        scan_directory(&mut registry, dir.path(), options(false)).unwrap();
        assert_eq!(registry.get("css/site.css"), before);

        scan_directory(&mut registry, dir.path(), options(true)).unwrap();
        assert_ne!(registry.get("css/site.css"), before);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn zero_hash_length_disables_version_token() {
        let dir = fixture();
        let mut registry = Registry::new();
        let options = ScanOptions {
            public_path_prefix: "/static/",
            hash_length: 0,
            overwrite: false,
        };
        scan_directory(&mut registry, dir.path(), options).unwrap();

        assert_eq!(registry.get("css/site.css"), "/static/css/site.css");
    }

    #[cfg(unix)]
    #[test]
    fn skips_symlinks_that_do_not_resolve_to_files() {
        let dir = fixture();
        let root = dir.path();
        std::os::unix::fs::symlink(root.join("gone.css"), root.join("broken.css")).unwrap();
        std::os::unix::fs::symlink(root.join("css"), root.join("linked-dir")).unwrap();
        std::os::unix::fs::symlink(root.join("robots.txt"), root.join("robots-link.txt")).unwrap();

        let mut registry = Registry::new();
        let stored = scan_directory(&mut registry, root, options(false)).unwrap();

        assert_eq!(stored, 5);
        assert!(registry.asset("broken.css").is_none());
        assert!(registry.asset("linked-dir").is_none());
        assert_eq!(
            registry.asset("robots-link.txt").map(Asset::hash),
            registry.asset("robots.txt").map(Asset::hash)
        );
    }

    #[test]
    fn missing_root_is_reported() {
        let dir = tempdir().unwrap();
        let mut registry = Registry::new();

        let err = scan_directory(&mut registry, &dir.path().join("missing"), options(false))
            .unwrap_err();

        assert!(matches!(err, AssetError::Walk { .. }));
        assert!(registry.is_empty());
    }
}
