//! Vite `manifest.json` loader.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, info};

use crate::asset_paths::{join_public_path, normalize_source_path};
use crate::error::Result;
use crate::manifest::{ManifestOptions, decode_documents};
use crate::models::Asset;
use crate::registry::Registry;

/// One chunk record of a Vite manifest, keyed by its source module path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViteManifestRecord {
    /// Output filename relative to the build directory.
    pub file: String,
    /// Source module path.
    #[serde(default)]
    pub src: String,
    /// Logical chunk name, used as the entry name.
    #[serde(default)]
    pub name: String,
    /// Whether the chunk is an entry point.
    #[serde(default)]
    pub is_entry: bool,
    /// Stylesheets emitted for the chunk.
    #[serde(default)]
    pub css: Vec<String>,
    /// Statically imported chunks.
    #[serde(default)]
    pub imports: Vec<String>,
    /// Whether the chunk is loaded through a dynamic import.
    #[serde(default)]
    pub is_dynamic_entry: bool,
}

/// Register every chunk of a Vite manifest and collect entry groupings.
///
/// Entry chunks contribute their own output as a script and their `css` outputs as
/// stylesheets, regardless of file suffix. An entry without a `name` is grouped under
/// the empty name. Documents are registered as they are decoded, so a malformed
/// document keeps everything registered before it.
pub fn load_vite_manifest(
    path: &Path,
    registry: &mut Registry,
    options: ManifestOptions<'_>,
) -> Result<usize> {
    let prefix = options.public_path_prefix;
    let mut registered = 0;

    for document in decode_documents::<IndexMap<String, ViteManifestRecord>>(path)? {
        for (key, record) in document? {
            let source_path = normalize_source_path(&key);
            let asset = Asset::declared(source_path, join_public_path(prefix, &record.file));
            let public_path = asset.public_path().to_string();
            registry.add(asset, true);
            registered += 1;

            if !record.is_entry {
                continue;
            }

            let name = record.name.as_str();
            debug!(entry = name, script = %public_path, css = record.css.len(), "vite entry");

            let entry = registry.create_entry(name);
            entry.add_script(public_path);
            for css in &record.css {
                entry.add_stylesheet(join_public_path(prefix, css));
            }
        }
    }

    info!(manifest = %path.display(), registered, "loaded vite manifest");
    Ok(registered)
}
