//! Incremental index synchronization
//!
//! Reconciles an on-disk tree against the stored index in two passes.
//! Pass 1 walks the tree and refreshes records, re-hashing only files
//! whose size or mtime changed. Pass 2 classifies every record whose path
//! was not observed: a stale record whose content still exists at another
//! indexed path is a move and is dropped; one without an alternate is
//! genuinely missing and is only dropped when the caller asked for it.
//! The moved check strictly precedes the missing check per record.

use std::collections::HashSet;
use std::io;
use std::time::UNIX_EPOCH;
use std::{fs, path};

use crate::error::IndexError;
use crate::hash;
use crate::logging::*;
use crate::store::{FileRecord, IndexStore};

/// Synchronizer configuration
#[derive(Debug, Clone)]
pub struct SyncOptions {
	/// Root directory to scan
	pub root: path::PathBuf,

	/// Normalized extensions to include (lowercase, leading dot)
	pub extensions: Vec<String>,

	/// Remove missing entries that were not moved
	pub prune_missing: bool,

	/// Print per-file actions to stdout
	pub verbose: bool,
}

/// Counters and the unresolved-missing list from a sync run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncOutcome {
	/// Files freshly hashed and upserted
	pub hashed: u64,

	/// Files skipped via the size+mtime fast path
	pub cached: u64,

	/// Stale records dropped because the content lives on elsewhere
	pub moved_removed: u64,

	/// Stale records dropped because the caller opted into pruning
	pub missing_removed: u64,

	/// Missing files with no duplicate content anywhere, retained
	pub missing: Vec<String>,
}

fn mtime_ns(md: &fs::Metadata) -> u64 {
	md.modified()
		.ok()
		.and_then(|t| t.duration_since(UNIX_EPOCH).ok())
		.map(|d| d.as_nanos() as u64)
		.unwrap_or(0)
}

fn extension_of(path: &path::Path) -> Option<String> {
	path.extension().map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
}

/// Walk the tree under `opts.root` and reconcile the index against it.
pub fn sync(store: &IndexStore, opts: &SyncOptions) -> Result<SyncOutcome, IndexError> {
	let root = fs::canonicalize(&opts.root)?;
	let include: HashSet<&str> = opts.extensions.iter().map(|e| e.as_str()).collect();

	let mut outcome = SyncOutcome::default();
	let mut seen: HashSet<String> = HashSet::new();

	// Pass 1: forward scan
	let walker = ignore::WalkBuilder::new(&root)
		.standard_filters(false)
		.follow_links(false)
		.build();
	for entry in walker {
		let entry = match entry {
			Ok(entry) => entry,
			Err(err) => {
				warn!("walk: {}", err);
				continue;
			}
		};
		if !entry.file_type().map_or(false, |t| t.is_file()) {
			continue;
		}
		let file = entry.path();

		let ext = match extension_of(file) {
			Some(ext) => {
				if !include.contains(ext.as_str()) {
					continue;
				}
				ext
			}
			None => continue,
		};

		// Vanished between listing and stat: unobservable this run
		let md = match fs::metadata(file) {
			Ok(md) => md,
			Err(e) if e.kind() == io::ErrorKind::NotFound => {
				debug!("vanished before stat: {}", file.display());
				continue;
			}
			Err(e) => return Err(e.into()),
		};
		let size = md.len();
		let mtime = mtime_ns(&md);

		let key = file.to_string_lossy().into_owned();
		seen.insert(key.clone());

		if store.lookup_unchanged(&key, size, mtime)?.is_some() {
			outcome.cached += 1;
			if opts.verbose {
				println!("cached  {}", key);
			}
			continue;
		}

		match hash::fingerprint(file)? {
			Some(fingerprint) => {
				let record = FileRecord { fingerprint, size, mtime_ns: mtime, extension: ext };
				store.upsert(&key, &record)?;
				outcome.hashed += 1;
				if opts.verbose {
					println!("hashed  {}", key);
				}
			}
			None => {
				// Vanished mid-read, same race tolerance as above
				debug!("vanished during hashing: {}", key);
				if opts.verbose {
					println!("skipped {}", key);
				}
			}
		}
	}

	// Pass 2: reconcile stale records
	for (path, fingerprint) in store.scan()? {
		if seen.contains(&path) {
			continue;
		}
		// Still on disk, just outside the include set or skipped: keep
		if path::Path::new(&path).exists() {
			continue;
		}

		let moved = store
			.paths_with_fingerprint(&fingerprint, &path)?
			.iter()
			.any(|other| path::Path::new(other).exists());

		if moved {
			store.remove(&path)?;
			outcome.moved_removed += 1;
			if opts.verbose {
				println!("removed {} (moved)", path);
			}
		} else if opts.prune_missing {
			store.remove(&path)?;
			outcome.missing_removed += 1;
			if opts.verbose {
				println!("removed {} (missing)", path);
			}
		} else {
			outcome.missing.push(path);
		}
	}

	Ok(outcome)
}


// vim: ts=4
