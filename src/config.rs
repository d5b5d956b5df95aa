//! Mapper configuration loaded from `asset-mapper.json`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::asset_paths::DIGEST_HEX_LEN;
use crate::error::{AssetError, Result};
use crate::manifest::{ManifestConfig, ManifestOptions};
use crate::scanning::ScanOptions;

/// File name searched for by [`AssetMapperConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "asset-mapper.json";

const DEFAULT_PUBLIC_PATH_PREFIX: &str = "/";

const DEFAULT_HASH_LENGTH: usize = 10;

/// Options controlling how assets are discovered and exposed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssetMapperConfig {
    /// Prefix prepended to every computed public path.
    pub public_path_prefix: String,
    /// Hex characters kept from content hashes; zero disables hashing of scanned files.
    pub hash_length: usize,
    /// Directories scanned, in order, when building a mapper from this configuration.
    pub scan_dirs: Vec<PathBuf>,
    /// Manifests loaded, in order, after the scans.
    pub manifests: Vec<ManifestConfig>,
    /// Resolve webpack assets to `prefix + output` instead of the bare prefix.
    pub webpack_append_output: bool,
}

impl Default for AssetMapperConfig {
    fn default() -> Self {
        Self {
            public_path_prefix: DEFAULT_PUBLIC_PATH_PREFIX.into(),
            hash_length: DEFAULT_HASH_LENGTH,
            scan_dirs: Vec::new(),
            manifests: Vec::new(),
            webpack_append_output: false,
        }
    }
}

impl AssetMapperConfig {
    /// Load configuration from `dir`, falling back to defaults.
    ///
    /// A missing file is silent; a file that cannot be read or parsed is logged and
    /// ignored so startup can continue with defaults.
    pub fn discover(dir: &Path) -> Self {
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if !candidate.is_file() {
            return Self::default();
        }

        Self::from_path(&candidate).unwrap_or_else(|err| {
            warn!(path = %candidate.display(), error = %err, "ignoring asset mapper config");
            Self::default()
        })
    }

    /// Read configuration from a specific JSON file.
    ///
    /// Relative `scanDirs` and manifest paths are resolved against the file's directory.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|err| AssetError::io(path, err))?;
        let mut config: Self =
            serde_json::from_str(&content).map_err(|err| AssetError::decode(path, err))?;

        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        Ok(config)
    }

    /// Effective hash length, clamped to the digest length.
    pub fn effective_hash_length(&self) -> usize {
        self.hash_length.min(DIGEST_HEX_LEN)
    }

    /// Scan settings derived from this configuration.
    pub fn scan_options(&self, overwrite: bool) -> ScanOptions<'_> {
        ScanOptions {
            public_path_prefix: &self.public_path_prefix,
            hash_length: self.effective_hash_length(),
            overwrite,
        }
    }

    /// Manifest settings derived from this configuration.
    pub fn manifest_options(&self) -> ManifestOptions<'_> {
        ManifestOptions {
            public_path_prefix: &self.public_path_prefix,
            webpack_append_output: self.webpack_append_output,
        }
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        for dir in &mut self.scan_dirs {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
        for manifest in &mut self.manifests {
            if manifest.path.is_relative() {
                manifest.path = base.join(&manifest.path);
            }
        }
    }
}
