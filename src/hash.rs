//! Streaming content fingerprints
//!
//! A fingerprint is the hex-encoded blake3 digest of the full file content,
//! computed in bounded blocks so large files are never loaded whole.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::error::IndexError;

/// Read block size for hashing (1 MiB)
const HASH_BLOCK_SIZE: usize = 1024 * 1024;

/// Compute the content fingerprint of a file.
///
/// Returns `Ok(None)` if the file vanished before or during the read (a
/// benign race with external deletion, recoverable by the caller). Any
/// other I/O failure is an error.
pub fn fingerprint(path: &Path) -> Result<Option<String>, IndexError> {
	let mut file = match fs::File::open(path) {
		Ok(f) => f,
		Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
		Err(e) => return Err(e.into()),
	};

	let mut hasher = blake3::Hasher::new();
	let mut buf = vec![0u8; HASH_BLOCK_SIZE];
	loop {
		match file.read(&mut buf) {
			Ok(0) => break,
			Ok(n) => {
				hasher.update(&buf[..n]);
			}
			Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
			Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
			Err(e) => return Err(e.into()),
		}
	}

	Ok(Some(hex::encode(hasher.finalize().as_bytes())))
}


// vim: ts=4
