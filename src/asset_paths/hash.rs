use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{AssetError, Result};

/// Number of hex characters in a full SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Hash the full content of `reader` and keep the first `len` hex characters.
///
/// A `len` of zero skips hashing entirely and returns an empty string without
/// consuming the reader. Lengths above [`DIGEST_HEX_LEN`] return the whole digest.
pub fn hash_reader<R: Read>(mut reader: R, len: usize) -> io::Result<String> {
    if len == 0 {
        return Ok(String::new());
    }

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];
    loop {
        match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => hasher.update(&buffer[..n]),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }

    let mut digest = format!("{:x}", hasher.finalize());
    digest.truncate(len.min(DIGEST_HEX_LEN));
    Ok(digest)
}

/// Hash an in-memory buffer, see [`hash_reader`].
pub fn hash_bytes(content: &[u8], len: usize) -> String {
    // Reading from a slice never fails.
    hash_reader(content, len).unwrap_or_default()
}

/// Hash the file at `path`, see [`hash_reader`].
///
/// The file is not opened when `len` is zero.
pub fn hash_file(path: &Path, len: usize) -> Result<String> {
    if len == 0 {
        return Ok(String::new());
    }

    let file = File::open(path).map_err(|err| AssetError::io(path, err))?;
    hash_reader(BufReader::new(file), len).map_err(|err| AssetError::io(path, err))
}
