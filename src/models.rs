//! Data structures held by the asset registry.

use serde::Serialize;

use crate::asset_paths::{classify_asset_path, join_public_path, versioned_path};

/// Category of an asset, derived from its path suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
  /// `.css` files.
  Stylesheet,
  /// `.js` files.
  Script,
  /// Raster and vector images.
  Image,
  /// Anything else.
  Other,
}

impl AssetKind {
  /// Classify a path by suffix, see [`classify_asset_path`].
  pub fn classify(path: &str) -> Self {
    classify_asset_path(path)
  }
}

/// Resolved identity of one static file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
  source_path: String,
  public_path: String,
  hash: String,
}

impl Asset {
  /// Build an asset discovered by scanning, appending `?v=hash` when a hash is present.
  pub fn scanned(prefix: &str, source_path: impl Into<String>, hash: impl Into<String>) -> Self {
    let source_path = source_path.into();
    let hash = hash.into();
    let public_path = versioned_path(&join_public_path(prefix, &source_path), &hash);
    Self {
      source_path,
      public_path,
      hash,
    }
  }

  /// Build an asset declared by a manifest; the public path is used as-is.
  pub fn declared(source_path: impl Into<String>, public_path: impl Into<String>) -> Self {
    Self {
      source_path: source_path.into(),
      public_path: public_path.into(),
      hash: String::new(),
    }
  }

  /// Normalised logical path the asset was discovered or declared under.
  pub fn source_path(&self) -> &str {
    &self.source_path
  }

  /// Path exposed to templates and browsers.
  pub fn public_path(&self) -> &str {
    &self.public_path
  }

  /// Truncated content hash, empty when no version token applies.
  pub fn hash(&self) -> &str {
    &self.hash
  }

  /// Public path without the `?v=` version token.
  pub fn unversioned_public_path(&self) -> &str {
    if self.hash.is_empty() {
      return &self.public_path;
    }
    self
      .public_path
      .strip_suffix(self.hash.as_str())
      .and_then(|rest| rest.strip_suffix("?v="))
      .unwrap_or(&self.public_path)
  }

  /// Category of the asset, classified from its source path.
  pub fn kind(&self) -> AssetKind {
    AssetKind::classify(&self.source_path)
  }
}

/// Named grouping of stylesheet and script public paths.
///
/// Both lists keep insertion order and allow duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Entry {
  stylesheets: Vec<String>,
  scripts: Vec<String>,
}

impl Entry {
  /// Append a stylesheet public path.
  pub fn add_stylesheet(&mut self, public_path: impl Into<String>) {
    self.stylesheets.push(public_path.into());
  }

  /// Append a script public path.
  pub fn add_script(&mut self, public_path: impl Into<String>) {
    self.scripts.push(public_path.into());
  }

  /// Stylesheet public paths in insertion order.
  pub fn stylesheets(&self) -> &[String] {
    &self.stylesheets
  }

  /// Script public paths in insertion order.
  pub fn scripts(&self) -> &[String] {
    &self.scripts
  }
}
