//! Loading build-tool manifests into the registry.
//!
//! Two dialects are supported: Vite manifests, which declare entries and their
//! stylesheets, and flat webpack manifests mapping original to output filenames.
//! Manifest loads overwrite existing registrations since the manifest is authoritative.

mod vite;
mod webpack;

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{AssetError, Result};
use crate::registry::Registry;

pub use vite::{ViteManifestRecord, load_vite_manifest};
pub use webpack::load_webpack_manifest;

/// Build tool that produced a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum ManifestKind {
    /// Vite `manifest.json` with entry and stylesheet metadata.
    Vite,
    /// Flat webpack manifest mapping original to output filenames.
    Webpack,
}

impl ManifestKind {
    /// Load the manifest at `path` into `registry` using this dialect.
    ///
    /// Returns the number of assets registered.
    pub fn load(
        self,
        path: &Path,
        registry: &mut Registry,
        options: ManifestOptions<'_>,
    ) -> Result<usize> {
        match self {
            Self::Vite => load_vite_manifest(path, registry, options),
            Self::Webpack => load_webpack_manifest(path, registry, options),
        }
    }

    /// Tag used in configuration files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vite => "vite",
            Self::Webpack => "webpack",
        }
    }
}

impl FromStr for ManifestKind {
    type Err = AssetError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "vite" => Ok(Self::Vite),
            "webpack" => Ok(Self::Webpack),
            other => Err(AssetError::UnknownManifestType(other.to_string())),
        }
    }
}

impl TryFrom<String> for ManifestKind {
    type Error = AssetError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Location and dialect of a manifest to load.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ManifestConfig {
    /// Manifest file path.
    pub path: PathBuf,
    /// Build tool that generated the manifest.
    #[serde(rename = "type")]
    pub kind: ManifestKind,
}

/// Settings applied while turning manifest records into assets.
#[derive(Debug, Clone, Copy)]
pub struct ManifestOptions<'a> {
    /// Prefix prepended to declared output filenames.
    pub public_path_prefix: &'a str,
    /// Append webpack output filenames to the prefix instead of using the bare prefix.
    pub webpack_append_output: bool,
}

/// Lazily decode the top-level JSON documents in the file at `path`.
///
/// Manifests are usually a single object, but concatenated documents are accepted.
/// Documents are yielded one at a time, so callers can register each before a later
/// malformed document stops the load.
fn decode_documents<'a, T: DeserializeOwned + 'a>(
    path: &'a Path,
) -> Result<impl Iterator<Item = Result<T>> + 'a> {
    let file = File::open(path).map_err(|err| AssetError::io(path, err))?;
    Ok(serde_json::Deserializer::from_reader(BufReader::new(file))
        .into_iter::<T>()
        .map(move |document| document.map_err(|err| AssetError::decode(path, err))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parses_manifest_kinds() {
        assert_eq!("vite".parse::<ManifestKind>().unwrap(), ManifestKind::Vite);
        assert_eq!("webpack".parse::<ManifestKind>().unwrap(), ManifestKind::Webpack);

        let err = "rollup".parse::<ManifestKind>().unwrap_err();
        assert!(matches!(err, AssetError::UnknownManifestType(kind) if kind == "rollup"));
    }

    #[test]
    fn deserializes_manifest_config() {
        let config: ManifestConfig =
            serde_json::from_str(r#"{ "path": "public/manifest.json", "type": "webpack" }"#)
                .unwrap();
        assert_eq!(config.kind, ManifestKind::Webpack);
        assert_eq!(config.path, PathBuf::from("public/manifest.json"));

        let bad = serde_json::from_str::<ManifestConfig>(r#"{ "path": "m.json", "type": "x" }"#);
        assert!(bad.is_err());
    }

    #[test]
    fn decodes_concatenated_documents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        fs::write(&path, "{\"a\": \"1\"}\n{\"b\": \"2\"}\n").unwrap();

        let documents: Vec<IndexMap<String, String>> =
            decode_documents(&path).unwrap().collect::<Result<_>>().unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[1]["b"], "2");
    }

    #[test]
    fn reports_missing_and_malformed_files() {
        let dir = tempdir().unwrap();
        let missing_path = dir.path().join("nope.json");
        let missing = decode_documents::<IndexMap<String, String>>(&missing_path);
        assert!(matches!(missing, Err(AssetError::Io { .. })));

        let path = dir.path().join("broken.json");
        fs::write(&path, "{\"a\": \"1\"}\n{\"b\": ").unwrap();
        let mut documents = decode_documents::<IndexMap<String, String>>(&path).unwrap();
        assert!(matches!(documents.next(), Some(Ok(_))));
        assert!(matches!(documents.next(), Some(Err(AssetError::Decode { .. }))));
    }
}
