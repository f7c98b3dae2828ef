//! Bucketstore - schema-typed buckets of key-addressed objects
//!
//! A bucket carries a user-declared schema (named, typed fields) and holds
//! objects addressed by key. Each bucket is backed by its own `SQLite`
//! table, with secondary indexes on the fields declared `indexed`.
//!
//! # Quick Start
//!
//! ```ignore
//! use bucketstore::{BucketService, Criteria, FieldDefinition, Object, StoreConfig};
//!
//! let service = BucketService::open(StoreConfig::file("data.db"))?;
//! service.create_bucket("users", &[
//!     FieldDefinition::new("age", "number").required().indexed(),
//!     FieldDefinition::new("active", "bool"),
//! ])?;
//!
//! service.put_value("users", "u1", &Object::new().with("age", 30.0).with("active", true))?;
//! let keys = service.find_keys("users", &Criteria::new().with("age", "30"))?;
//! ```
//!
//! # Architecture
//!
//! Transports drive the [`Executor`] with serializable [`Command`]s, or call
//! the [`BucketService`] directly. The service validates every input before
//! the [`Repository`] is touched.

// Re-export the public API from bucketstore-executor
pub use bucketstore_executor::*;

pub use bucketstore_core::{
    Criteria, DataType, Error, ErrorKind, ErrorResponse, Field, FieldDefinition, Object, Result,
    Schema, Value,
};
pub use bucketstore_storage::{
    Bucket, BucketInfo, JournalMode, MemoryRepository, PutOutcome, Repository,
    SqliteRepository, StoreConfig, CONFIG_FILE_NAME,
};
