//! Persistent content-hash index
//!
//! Stores one record per indexed file, keyed by absolute path, plus a
//! secondary index keyed by (fingerprint, path) for content-identity
//! lookups. Both tables are mutated inside the same write transaction so
//! they can never diverge; redb's durability guarantees that a crash
//! mid-write never corrupts previously committed records.

use redb::{ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use serde::{Deserialize, Serialize};
use std::path;

use crate::error::IndexError;

/// Index entry for a single file; the path is the table key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
	/// Hex-encoded content hash
	#[serde(rename = "fp")]
	pub fingerprint: String,
	/// Byte length at the time of the last hash
	#[serde(rename = "sz")]
	pub size: u64,
	/// Modification time at the time of the last hash, in nanoseconds
	/// since the Unix epoch. Change-detection heuristic only.
	#[serde(rename = "mt")]
	pub mtime_ns: u64,
	/// Lowercase extension including the leading dot
	#[serde(rename = "ext")]
	pub extension: String,
}

/// Table definition for file records
/// Key: absolute file path (String)
/// Value: serialized FileRecord (bytes)
const FILES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("files");

/// Secondary index over content hashes
/// Key: (fingerprint, path), value unused
const HASHES_TABLE: TableDefinition<(&str, &str), ()> = TableDefinition::new("hashes");

fn decode(bytes: &[u8]) -> Result<FileRecord, IndexError> {
	Ok(json5::from_str(std::str::from_utf8(bytes)?)?)
}

/// Content-hash index backed by a redb database
pub struct IndexStore {
	db: redb::Database,
}

impl IndexStore {
	/// Open or create an index database
	pub fn open(db_path: &path::Path) -> Result<Self, IndexError> {
		let db = redb::Database::create(db_path)?;
		// Ensure both tables exist
		{
			let write_txn = db.begin_write()?;
			let _ = write_txn.open_table(FILES_TABLE)?;
			let _ = write_txn.open_table(HASHES_TABLE)?;
			write_txn.commit()?;
		}
		Ok(IndexStore { db })
	}

	/// Return the cached fingerprint only if size and mtime match exactly.
	///
	/// This is the "no rehash needed" fast path; the size+mtime pair is
	/// trusted as a proxy for unchanged content and is not re-verified.
	pub fn lookup_unchanged(
		&self,
		path: &str,
		size: u64,
		mtime_ns: u64,
	) -> Result<Option<String>, IndexError> {
		let read_txn = self.db.begin_read()?;
		let table = read_txn.open_table(FILES_TABLE)?;

		match table.get(path)? {
			Some(entry) => {
				let record = decode(&entry.value().to_vec())?;
				if record.size == size && record.mtime_ns == mtime_ns {
					Ok(Some(record.fingerprint))
				} else {
					Ok(None)
				}
			}
			None => Ok(None),
		}
	}

	/// Get the full record for a path
	pub fn get(&self, path: &str) -> Result<Option<FileRecord>, IndexError> {
		let read_txn = self.db.begin_read()?;
		let table = read_txn.open_table(FILES_TABLE)?;

		match table.get(path)? {
			Some(entry) => Ok(Some(decode(&entry.value().to_vec())?)),
			None => Ok(None),
		}
	}

	/// Insert or fully replace the record keyed by path, keeping the
	/// secondary index in step within the same transaction.
	pub fn upsert(&self, path: &str, record: &FileRecord) -> Result<(), IndexError> {
		let bytes = json5::to_string(record)?.into_bytes();

		let write_txn = self.db.begin_write()?;
		{
			let mut files = write_txn.open_table(FILES_TABLE)?;
			let mut hashes = write_txn.open_table(HASHES_TABLE)?;

			let old_fingerprint = match files.get(path)? {
				Some(entry) => Some(decode(&entry.value().to_vec())?.fingerprint),
				None => None,
			};

			files.insert(path, bytes.as_slice())?;

			if let Some(old) = old_fingerprint {
				if old != record.fingerprint {
					hashes.remove((old.as_str(), path))?;
				}
			}
			hashes.insert((record.fingerprint.as_str(), path), ())?;
		}
		write_txn.commit()?;

		Ok(())
	}

	/// Delete the record for a path. Returns whether a record existed.
	pub fn remove(&self, path: &str) -> Result<bool, IndexError> {
		let write_txn = self.db.begin_write()?;
		let existed;
		{
			let mut files = write_txn.open_table(FILES_TABLE)?;
			let mut hashes = write_txn.open_table(HASHES_TABLE)?;

			let old_fingerprint = match files.remove(path)? {
				Some(entry) => Some(decode(&entry.value().to_vec())?.fingerprint),
				None => None,
			};
			existed = old_fingerprint.is_some();

			if let Some(old) = old_fingerprint {
				hashes.remove((old.as_str(), path))?;
			}
		}
		write_txn.commit()?;

		Ok(existed)
	}

	/// Full scan over (path, fingerprint) pairs
	pub fn scan(&self) -> Result<Vec<(String, String)>, IndexError> {
		let read_txn = self.db.begin_read()?;
		let table = read_txn.open_table(FILES_TABLE)?;

		let mut result = Vec::new();
		for row in table.iter()? {
			let (key, value) = row?;
			let record = decode(&value.value().to_vec())?;
			result.push((key.value().to_string(), record.fingerprint));
		}
		Ok(result)
	}

	/// Other paths sharing a fingerprint, via the secondary index
	pub fn paths_with_fingerprint(
		&self,
		fingerprint: &str,
		excluding: &str,
	) -> Result<Vec<String>, IndexError> {
		let read_txn = self.db.begin_read()?;
		let table = read_txn.open_table(HASHES_TABLE)?;

		let mut result = Vec::new();
		for row in table.range((fingerprint, "")..)? {
			let (key, _) = row?;
			let (fp, path) = key.value();
			if fp != fingerprint {
				break;
			}
			if path != excluding {
				result.push(path.to_string());
			}
		}
		Ok(result)
	}

	/// Number of indexed files
	pub fn len(&self) -> Result<u64, IndexError> {
		let read_txn = self.db.begin_read()?;
		let table = read_txn.open_table(FILES_TABLE)?;
		Ok(table.len()?)
	}
}


// vim: ts=4
