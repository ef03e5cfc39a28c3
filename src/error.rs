//! Error types for index operations

use std::error::Error;
use std::fmt;
use std::io;
use std::str;

/// Main error type for index, sync and dedup operations
#[derive(Debug)]
pub enum IndexError {
	/// The index database cannot be opened, read or written
	Storage { message: String },

	/// A stored record cannot be encoded or decoded
	Encoding { message: String },

	/// I/O error outside the index database
	Io(io::Error),

	/// Generic error message
	Other { message: String },
}

impl fmt::Display for IndexError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			IndexError::Storage { message } => {
				write!(f, "Index storage error: {}", message)
			}
			IndexError::Encoding { message } => {
				write!(f, "Record encoding error: {}", message)
			}
			IndexError::Io(e) => write!(f, "I/O error: {}", e),
			IndexError::Other { message } => write!(f, "{}", message),
		}
	}
}

impl Error for IndexError {}

impl From<io::Error> for IndexError {
	fn from(e: io::Error) -> Self {
		IndexError::Io(e)
	}
}

impl From<String> for IndexError {
	fn from(e: String) -> Self {
		IndexError::Other { message: e }
	}
}

impl From<json5::Error> for IndexError {
	fn from(e: json5::Error) -> Self {
		IndexError::Encoding { message: e.to_string() }
	}
}

impl From<str::Utf8Error> for IndexError {
	fn from(e: str::Utf8Error) -> Self {
		IndexError::Encoding { message: e.to_string() }
	}
}

impl From<redb::DatabaseError> for IndexError {
	fn from(e: redb::DatabaseError) -> Self {
		IndexError::Storage { message: e.to_string() }
	}
}

impl From<redb::TransactionError> for IndexError {
	fn from(e: redb::TransactionError) -> Self {
		IndexError::Storage { message: e.to_string() }
	}
}

impl From<redb::TableError> for IndexError {
	fn from(e: redb::TableError) -> Self {
		IndexError::Storage { message: e.to_string() }
	}
}

impl From<redb::StorageError> for IndexError {
	fn from(e: redb::StorageError) -> Self {
		IndexError::Storage { message: e.to_string() }
	}
}

impl From<redb::CommitError> for IndexError {
	fn from(e: redb::CommitError) -> Self {
		IndexError::Storage { message: e.to_string() }
	}
}

// vim: ts=4
