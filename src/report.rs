//! Read-only summary aggregation over the index

use std::collections::BTreeMap;
use std::path;

use crate::error::IndexError;
use crate::store::IndexStore;

/// Per-subfolder file counts, grouped under the common root of all
/// indexed paths
#[derive(Debug, Clone, PartialEq)]
pub struct LibrarySummary {
	/// (top-level component, file count), sorted by component
	pub groups: Vec<(String, u64)>,

	/// Total indexed files
	pub total: u64,
}

/// Component-wise longest common prefix of a set of paths
fn common_root(paths: &[path::PathBuf]) -> path::PathBuf {
	let mut iter = paths.iter();
	let first = match iter.next() {
		Some(p) => p,
		None => return path::PathBuf::new(),
	};
	let mut root: Vec<path::Component> = first.components().collect();
	for p in iter {
		let shared = root
			.iter()
			.zip(p.components())
			.take_while(|(a, b)| **a == *b)
			.count();
		root.truncate(shared);
	}
	root.iter().collect()
}

/// Group indexed paths by their first component relative to the common
/// root. Returns `None` for an empty index.
pub fn summary(store: &IndexStore) -> Result<Option<LibrarySummary>, IndexError> {
	let paths: Vec<path::PathBuf> =
		store.scan()?.into_iter().map(|(path, _)| path::PathBuf::from(path)).collect();
	if paths.is_empty() {
		return Ok(None);
	}

	let root = common_root(&paths);

	let mut counts: BTreeMap<String, u64> = BTreeMap::new();
	for p in &paths {
		let rel = p.strip_prefix(&root).unwrap_or(p);
		let first = rel
			.components()
			.next()
			.map(|c| c.as_os_str().to_string_lossy().into_owned())
			.unwrap_or_else(|| ".".to_string());
		*counts.entry(first).or_insert(0) += 1;
	}

	let total = paths.len() as u64;
	Ok(Some(LibrarySummary { groups: counts.into_iter().collect(), total }))
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

	#[test]
	fn test_common_root() {
		let paths = vec![
			path::PathBuf::from("/lib/Fiction/a.epub"),
			path::PathBuf::from("/lib/Science/b.pdf"),
			path::PathBuf::from("/lib/Fiction/sub/c.epub"),
		];
		assert_eq!(common_root(&paths), path::PathBuf::from("/lib"));
	}

	#[test]
	fn test_common_root_single_path_is_the_path() {
		let paths = vec![path::PathBuf::from("/lib/Fiction/a.epub")];
		assert_eq!(common_root(&paths), path::PathBuf::from("/lib/Fiction/a.epub"));
	}

	#[test]
	fn test_empty_index_has_no_summary() {
		let tmp = TempDir::new().unwrap();
		let store = IndexStore::open(&tmp.path().join("test.redb")).unwrap();

		assert_eq!(summary(&store).unwrap(), None);
	}

	#[test]
	fn test_groups_by_top_level_component() {
		let tmp = TempDir::new().unwrap();
		let store = IndexStore::open(&tmp.path().join("test.redb")).unwrap();

		store.upsert("/lib/Fiction/a.epub", &record("a1")).unwrap();
		store.upsert("/lib/Fiction/sub/b.epub", &record("b2")).unwrap();
		store.upsert("/lib/Science/c.pdf", &record("c3")).unwrap();
		store.upsert("/lib/d.mobi", &record("d4")).unwrap();

		let s = summary(&store).unwrap().unwrap();
		assert_eq!(s.total, 4);
		assert_eq!(
			s.groups,
			vec![
				("Fiction".to_string(), 2),
				("Science".to_string(), 1),
				("d.mobi".to_string(), 1),
			]
		);
	}

	#[test]
	fn test_single_file_groups_as_dot() {
		let tmp = TempDir::new().unwrap();
		let store = IndexStore::open(&tmp.path().join("test.redb")).unwrap();

		store.upsert("/lib/Fiction/a.epub", &record("a1")).unwrap();

		let s = summary(&store).unwrap().unwrap();
		assert_eq!(s.groups, vec![(".".to_string(), 1)]);
		assert_eq!(s.total, 1);
	}
}

// vim: ts=4
