//! # ebookr - Ebook Library Content Index
//!
//! ebookr keeps a persistent content-hash index of an ebook library and
//! uses it to detect moved files, flag missing ones, and delete duplicate
//! copies from the unorganized subtree. Unchanged files are never
//! re-hashed: a size+mtime match against the index short-circuits the
//! hash, so re-scanning a large library is cheap.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ebookr::{config, IndexStore, SyncOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = IndexStore::open("index.redb".as_ref())?;
//!     let outcome = ebookr::sync::sync(&store, &SyncOptions {
//!         root: "/home/me/Books".into(),
//!         extensions: config::parse_extensions(config::DEFAULT_EXTENSIONS),
//!         prune_missing: false,
//!         verbose: false,
//!     })?;
//!     println!("hashed {} files", outcome.hashed);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dedup;
pub mod error;
pub mod hash;
pub mod logging;
pub mod report;
pub mod store;
pub mod sync;

// Re-export commonly used types and functions
pub use dedup::{DedupOptions, DedupOutcome};
pub use error::IndexError;
pub use report::LibrarySummary;
pub use store::{FileRecord, IndexStore};
pub use sync::{SyncOptions, SyncOutcome};

// vim: ts=4
