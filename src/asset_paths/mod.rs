//! Path, classification and hashing helpers shared by the scanner and the manifest loaders.
//!
//! Each concern lives in its own submodule so the suffix tables, the digest truncation and
//! the public path construction can be tested on their own.

mod hash;
mod kind;
mod normalize;

pub use hash::{DIGEST_HEX_LEN, hash_bytes, hash_file, hash_reader};
pub use kind::classify_asset_path;
pub use normalize::{
    join_public_path, normalize_source_path, relative_source_path, trim_lookup_path,
    versioned_path,
};
