//! Storage layer for bucketstore
//!
//! This crate implements the persistence side of the engine:
//! - Repository: the storage-facing bucket and key operations
//! - SqliteRepository: catalog table, one table per bucket, secondary
//!   indexes, value codec and criteria compiler on top of `SQLite`
//! - MemoryRepository: non-durable implementation with the same behavior
//! - Bucket: handle pairing a resolved bucket with its repository
//! - StoreConfig: `bucketstore.toml` settings

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bucket;
pub mod config;
pub mod memory;
pub mod repository;
pub mod sqlite;

pub use bucket::Bucket;
pub use config::{ConfigError, JournalMode, StoreConfig, CONFIG_FILE_NAME};
pub use memory::MemoryRepository;
pub use repository::{BucketInfo, PutOutcome, Repository};
pub use sqlite::search::SearchQuery;
pub use sqlite::SqliteRepository;
