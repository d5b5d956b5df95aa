//! Error type shared by scanning, manifest loading and tag rendering.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T, E = AssetError> = std::result::Result<T, E>;

/// Errors produced while populating the registry or rendering tags.
#[derive(Debug, Error)]
pub enum AssetError {
  /// A file or directory could not be opened or read.
  #[error("failed to read `{}`", .path.display())]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    #[source]
    source: std::io::Error,
  },
  /// The directory walker could not stat or read an entry.
  #[error("failed to walk `{}`", .root.display())]
  Walk {
    /// Root directory of the scan.
    root: PathBuf,
    /// Source walk error.
    #[source]
    source: walkdir::Error,
  },
  /// A manifest or configuration file did not match its schema.
  #[error("failed to decode `{}`", .path.display())]
  Decode {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    #[source]
    source: serde_json::Error,
  },
  /// Tag attributes must be passed as key/value pairs.
  #[error("attributes must be an even number of strings, got {count}")]
  MalformedAttributes {
    /// Number of strings that were passed.
    count: usize,
  },
  /// The manifest dialect tag is not one of the supported kinds.
  #[error("unknown manifest type `{0}`, expected `vite` or `webpack`")]
  UnknownManifestType(String),
}

impl AssetError {
  pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io {
      path: path.into(),
      source,
    }
  }

  pub(crate) fn decode(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
    Self::Decode {
      path: path.into(),
      source,
    }
  }
}
