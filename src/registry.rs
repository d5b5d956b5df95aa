//! Storage for discovered assets and entry groupings.
//!
//! Assets live in an arena in insertion order. Two indexes point into the arena: one
//! keyed by normalised source path and one keyed by public path, so both keys always
//! resolve to the same [`Asset`].

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::debug;

use crate::asset_paths::{normalize_source_path, trim_lookup_path};
use crate::models::{Asset, AssetKind, Entry};

/// Mapping from source and public paths to assets, plus named entries.
#[derive(Debug, Default, Clone)]
pub struct Registry {
  assets: Vec<Asset>,
  by_source: HashMap<String, usize>,
  by_public: HashMap<String, usize>,
  entries: IndexMap<String, Entry>,
}

impl Registry {
  /// Create an empty registry.
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert `asset` under its source path and public path keys.
  ///
  /// When the source path is already registered the call is a no-op unless `overwrite`
  /// is set, in which case the stored asset is replaced in place. Returns whether the
  /// asset was stored.
  pub fn add(&mut self, asset: Asset, overwrite: bool) -> bool {
    let source_key = normalize_source_path(asset.source_path());

    let index = match self.by_source.get(&source_key) {
      Some(_) if !overwrite => {
        debug!(source = %source_key, "asset already registered, keeping first");
        return false;
      }
      Some(&index) => {
        let previous = &self.assets[index];
        let stale: Vec<String> = public_keys(previous).map(str::to_string).collect();
        for key in stale {
          if self.by_public.get(&key) == Some(&index) {
            self.by_public.remove(&key);
          }
        }
        self.assets[index] = asset;
        index
      }
      None => {
        self.assets.push(asset);
        self.assets.len() - 1
      }
    };

    let stored = &self.assets[index];
    debug!(source = %source_key, public = %stored.public_path(), "registered asset");
    let keys: Vec<String> = public_keys(stored).map(str::to_string).collect();
    for key in keys {
      self.by_public.insert(key, index);
    }
    self.by_source.insert(source_key, index);
    true
  }

  /// Look up an asset by source path or public path.
  pub fn asset(&self, path: &str) -> Option<&Asset> {
    let index = self
      .by_public
      .get(path)
      .or_else(|| self.by_source.get(trim_lookup_path(path)))
      .or_else(|| self.by_source.get(path))?;
    self.assets.get(*index)
  }

  /// Resolve `path` to its public path, or return it unchanged when unknown.
  ///
  /// Unknown paths are not an error: templates fall back to the literal reference.
  pub fn get(&self, path: &str) -> String {
    self
      .asset(path)
      .map(|asset| asset.public_path().to_string())
      .unwrap_or_else(|| path.to_string())
  }

  /// Fetch the entry called `name`, creating an empty one on first use.
  pub fn create_entry(&mut self, name: &str) -> &mut Entry {
    self.entries.entry(name.to_string()).or_default()
  }

  /// Entry called `name`, if any manifest declared it.
  pub fn entry(&self, name: &str) -> Option<&Entry> {
    self.entries.get(name)
  }

  /// Names of all entries in creation order.
  pub fn entry_names(&self) -> impl Iterator<Item = &str> {
    self.entries.keys().map(String::as_str)
  }

  /// Stylesheet public paths of an entry, empty when the entry is unknown.
  pub fn entry_stylesheets(&self, name: &str) -> &[String] {
    self.entry(name).map(Entry::stylesheets).unwrap_or_default()
  }

  /// Script public paths of an entry, empty when the entry is unknown.
  pub fn entry_scripts(&self, name: &str) -> &[String] {
    self.entry(name).map(Entry::scripts).unwrap_or_default()
  }

  /// All assets in registration order.
  pub fn assets(&self) -> &[Asset] {
    &self.assets
  }

  /// Assets whose source path classifies as `kind`.
  pub fn assets_of(&self, kind: AssetKind) -> impl Iterator<Item = &Asset> {
    self.assets.iter().filter(move |asset| asset.kind() == kind)
  }

  /// Number of distinct assets.
  pub fn len(&self) -> usize {
    self.assets.len()
  }

  /// Returns `true` when no asset has been registered.
  pub fn is_empty(&self) -> bool {
    self.assets.is_empty()
  }
}

fn public_keys(asset: &Asset) -> impl Iterator<Item = &str> {
  let full = asset.public_path();
  let unversioned = asset.unversioned_public_path();
  std::iter::once(full).chain((unversioned != full).then_some(unversioned))
}
