//! High-level facade bound by templating layers.
//!
//! [`AssetMapper`] owns the [`Registry`] and the configuration it was populated with.
//! Population happens once at startup through scans and manifest loads; afterwards the
//! lookup and tag helpers only read. Hosts that reload while serving must wrap the
//! mapper in their own lock or swap a freshly built instance.

use std::path::Path;

use tracing::info;

use crate::config::AssetMapperConfig;
use crate::error::Result;
use crate::manifest::ManifestConfig;
use crate::models::AssetKind;
use crate::registry::Registry;
use crate::scanning::scan_directory;
use crate::tags::{Attributes, render_link_tag, render_script_tag};

/// Asset registry plus the resolution and tag rendering helpers exposed to templates.
#[derive(Debug, Clone, Default)]
pub struct AssetMapper {
  config: AssetMapperConfig,
  registry: Registry,
}

impl AssetMapper {
  /// Create an empty mapper with default configuration.
  pub fn new() -> Self {
    Self::default()
  }

  /// Create an empty mapper without running the configured scans or manifest loads.
  pub fn with_config(config: AssetMapperConfig) -> Self {
    Self {
      config,
      registry: Registry::new(),
    }
  }

  /// Create a mapper and populate it from the configured directories and manifests.
  ///
  /// Scans run first, then manifests, each in configuration order. The first failure
  /// is returned.
  pub fn from_config(config: AssetMapperConfig) -> Result<Self> {
    let mut mapper = Self::with_config(config);

    let scan_dirs = mapper.config.scan_dirs.clone();
    for dir in &scan_dirs {
      mapper.scan_dir(dir)?;
    }

    let manifests = mapper.config.manifests.clone();
    for manifest in &manifests {
      mapper.use_manifest(manifest)?;
    }

    info!(assets = mapper.registry.len(), "asset mapper ready");
    Ok(mapper)
  }

  /// Configuration the mapper uses for new registrations.
  pub fn config(&self) -> &AssetMapperConfig {
    &self.config
  }

  /// Read access to the underlying registry.
  pub fn registry(&self) -> &Registry {
    &self.registry
  }

  /// Write access to the underlying registry, for registering assets by hand.
  pub fn registry_mut(&mut self) -> &mut Registry {
    &mut self.registry
  }

  /// Scan `dir`, keeping assets that are already registered.
  pub fn scan_dir(&mut self, dir: &Path) -> Result<usize> {
    scan_directory(&mut self.registry, dir, self.config.scan_options(false))
  }

  /// Scan `dir`, replacing assets that are already registered.
  pub fn rescan(&mut self, dir: &Path) -> Result<usize> {
    scan_directory(&mut self.registry, dir, self.config.scan_options(true))
  }

  /// Load a manifest in the dialect named by `manifest`.
  pub fn use_manifest(&mut self, manifest: &ManifestConfig) -> Result<usize> {
    manifest
      .kind
      .load(&manifest.path, &mut self.registry, self.config.manifest_options())
  }

  /// Versioned public path of `path`, or `path` itself when it is not registered.
  pub fn get(&self, path: &str) -> String {
    self.registry.get(path)
  }

  /// Like [`AssetMapper::get`], but only resolves assets classified as `kind`.
  pub fn link_of(&self, kind: AssetKind, path: &str) -> String {
    match self.registry.asset(path) {
      Some(asset) if asset.kind() == kind => asset.public_path().to_string(),
      _ => path.to_string(),
    }
  }

  /// Render a `<script>` tag for `path` with extra `key, value` attribute pairs.
  ///
  /// `async` and `defer` render as bare attributes.
  pub fn script_tag<S: AsRef<str>>(&self, path: &str, attrs: &[S]) -> Result<String> {
    render_script_tag(&self.get(path), attrs)
  }

  /// Render a stylesheet `<link>` tag for `path` with extra `key, value` attribute pairs.
  ///
  /// A caller supplied `rel` replaces the default `stylesheet`.
  pub fn link_tag<S: AsRef<str>>(&self, path: &str, attrs: &[S]) -> Result<String> {
    render_link_tag(&self.get(path), attrs)
  }

  /// Stylesheet public paths of entry `name`.
  pub fn entry_css(&self, name: &str) -> &[String] {
    self.registry.entry_stylesheets(name)
  }

  /// Script public paths of entry `name`.
  pub fn entry_js(&self, name: &str) -> &[String] {
    self.registry.entry_scripts(name)
  }

  /// Render one `<link>` tag per stylesheet of entry `name`, in entry order.
  pub fn css_link_tags_from_entry<S: AsRef<str>>(
    &self,
    name: &str,
    attrs: &[S],
  ) -> Result<Vec<String>> {
    Attributes::from_pairs(attrs)?;
    self
      .entry_css(name)
      .iter()
      .map(|href| render_link_tag(href, attrs))
      .collect()
  }

  /// Render one `<script>` tag per script of entry `name`, in entry order.
  pub fn js_script_tags_from_entry<S: AsRef<str>>(
    &self,
    name: &str,
    attrs: &[S],
  ) -> Result<Vec<String>> {
    Attributes::from_pairs(attrs)?;
    self
      .entry_js(name)
      .iter()
      .map(|src| render_script_tag(src, attrs))
      .collect()
  }
}
