//! Flat webpack manifest loader.

use std::path::Path;

use indexmap::IndexMap;
use tracing::info;

use crate::asset_paths::{join_public_path, normalize_source_path};
use crate::error::Result;
use crate::manifest::{ManifestOptions, decode_documents};
use crate::models::Asset;
use crate::registry::Registry;

/// Register every `original -> output` pair of a flat webpack manifest.
///
/// By default each asset resolves to the bare public prefix and the output filename is
/// not appended; existing templates rely on that. Set
/// [`ManifestOptions::webpack_append_output`] to resolve to `prefix + output` instead.
/// No entries are produced. Documents are registered as they are decoded.
pub fn load_webpack_manifest(
    path: &Path,
    registry: &mut Registry,
    options: ManifestOptions<'_>,
) -> Result<usize> {
    let prefix = options.public_path_prefix;
    let mut registered = 0;

    for document in decode_documents::<IndexMap<String, String>>(path)? {
        for (original, output) in document? {
            let public_path = if options.webpack_append_output {
                join_public_path(prefix, &output)
            } else {
                prefix.to_string()
            };
            registry.add(
                Asset::declared(normalize_source_path(&original), public_path),
                true,
            );
            registered += 1;
        }
    }

    info!(manifest = %path.display(), registered, "loaded webpack manifest");
    Ok(registered)
}
