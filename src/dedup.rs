//! Duplicate removal inside the unorganized subtree
//!
//! A candidate is an indexed file whose path contains the unorganized
//! token and whose content also exists at some path without the token.
//! The token match is a plain substring test, anywhere in the path, not a
//! path-segment match; this coarse semantic is kept for compatibility.

use std::collections::HashSet;
use std::fs;

use crate::error::IndexError;
use crate::logging::*;
use crate::store::IndexStore;

/// Deduplicator configuration
#[derive(Debug, Clone)]
pub struct DedupOptions {
	/// Path substring marking the unorganized subtree
	pub token: String,

	/// Only list candidates, touch nothing
	pub dry_run: bool,

	/// Print per-file actions to stdout
	pub verbose: bool,
}

/// Result of a dedup run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DedupOutcome {
	/// Duplicate files inside the unorganized subtree, sorted
	pub candidates: Vec<String>,

	/// Files physically deleted (and dropped from the index)
	pub deleted: u64,
}

/// Select duplicate files under the unorganized token and delete them.
///
/// Each physical deletion strictly precedes the matching index deletion;
/// if unlinking fails the record stays, the failure is logged and the
/// batch continues.
pub fn dedup(store: &IndexStore, opts: &DedupOptions) -> Result<DedupOutcome, IndexError> {
	let mut outside: HashSet<String> = HashSet::new();
	let mut inside: Vec<(String, String)> = Vec::new();

	for (path, fingerprint) in store.scan()? {
		if path.contains(&opts.token) {
			inside.push((path, fingerprint));
		} else {
			outside.insert(fingerprint);
		}
	}

	let mut candidates: Vec<String> = inside
		.into_iter()
		.filter(|(_, fingerprint)| outside.contains(fingerprint))
		.map(|(path, _)| path)
		.collect();
	candidates.sort();

	if opts.dry_run {
		return Ok(DedupOutcome { candidates, deleted: 0 });
	}

	let mut deleted = 0;
	for path in &candidates {
		match fs::remove_file(path) {
			Ok(()) => {
				store.remove(path)?;
				deleted += 1;
				if opts.verbose {
					println!("deleted {}", path);
				}
			}
			Err(err) => {
				// Record stays: the index must never claim a deletion
				// that did not happen
				error!("failed to delete {}: {}", path, err);
			}
		}
	}

	Ok(DedupOutcome { candidates, deleted })
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::store::FileRecord;
	use tempfile::TempDir;

	fn record(fp: &str) -> FileRecord {
		FileRecord {
			fingerprint: fp.to_string(),
			size: 1,
			mtime_ns: 1,
			extension: ".epub".to_string(),
		}
	}

	// Dry-run candidate selection is pure index work, so the paths do
	// not need to exist on disk here.
	#[test]
	fn test_candidates_need_a_copy_outside_the_token() {
		let tmp = TempDir::new().unwrap();
		let store = IndexStore::open(&tmp.path().join("test.redb")).unwrap();

		store.upsert("/lib/Unorganized/x.epub", &record("aa11")).unwrap();
		store.upsert("/lib/Fiction/x.epub", &record("aa11")).unwrap();
		store.upsert("/lib/Unorganized/y.epub", &record("bb22")).unwrap();

		let opts = DedupOptions {
			token: "Unorganized".to_string(),
			dry_run: true,
			verbose: false,
		};
		let outcome = dedup(&store, &opts).unwrap();

		assert_eq!(outcome.candidates, vec!["/lib/Unorganized/x.epub".to_string()]);
		assert_eq!(outcome.deleted, 0);
	}

	#[test]
	fn test_token_matches_as_plain_substring() {
		let tmp = TempDir::new().unwrap();
		let store = IndexStore::open(&tmp.path().join("test.redb")).unwrap();

		// Token inside a file name, not a directory segment
		store.upsert("/lib/stuff/Unorganized-pile.epub", &record("aa11")).unwrap();
		store.upsert("/lib/Fiction/x.epub", &record("aa11")).unwrap();

		let opts = DedupOptions {
			token: "Unorganized".to_string(),
			dry_run: true,
			verbose: false,
		};
		let outcome = dedup(&store, &opts).unwrap();

		assert_eq!(outcome.candidates, vec!["/lib/stuff/Unorganized-pile.epub".to_string()]);
	}

	#[test]
	fn test_no_candidates_without_outside_copy() {
		let tmp = TempDir::new().unwrap();
		let store = IndexStore::open(&tmp.path().join("test.redb")).unwrap();

		store.upsert("/lib/Unorganized/x.epub", &record("aa11")).unwrap();
		store.upsert("/lib/Unorganized/also-x.epub", &record("aa11")).unwrap();

		let opts = DedupOptions {
			token: "Unorganized".to_string(),
			dry_run: true,
			verbose: false,
		};
		let outcome = dedup(&store, &opts).unwrap();

		assert!(outcome.candidates.is_empty());
	}
}

// vim: ts=4
