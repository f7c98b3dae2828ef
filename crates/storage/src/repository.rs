//! Repository trait: the storage-facing API of the engine
//!
//! The repository owns the catalog and every bucket's data. Callers see
//! buckets only through [`BucketInfo`] projections and the
//! [`Bucket`](crate::Bucket) handle.
//!
//! ## Contract
//!
//! - Domain violations surface as their own error kinds
//!   (`BucketAlreadyExists`, `BucketNotFound`); storage failures surface as
//!   `Unexpected`.
//! - Key-scoped operations resolve the bucket first; a missing bucket is
//!   reported as `BucketNotFound`.
//! - [`Repository::drop_bucket`] of an absent bucket succeeds without
//!   effect.
//! - [`Repository::get_value`] reports a missing key as `Ok(None)` and
//!   [`Repository::delete_value`] as `Ok(false)`; choosing the user-facing
//!   error is the service's job.

use bucketstore_core::{CriteriaSet, Object, Result, Schema};
use serde::{Deserialize, Serialize};

/// Read-only projection of a catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketInfo {
    /// Bucket name as stored in the catalog
    pub name: String,
    /// Declared schema
    pub schema: Schema,
}

/// Result of an upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PutOutcome {
    /// The key did not exist before the write
    Created,
    /// An existing value was fully replaced
    Replaced,
}

/// Storage-facing bucket and key operations
///
/// Implementations are shared across worker threads.
pub trait Repository: Send + Sync {
    /// Names of every bucket in the catalog, in no particular order
    fn bucket_names(&self) -> Result<Vec<String>>;

    /// Register a bucket and create its storage, atomically
    ///
    /// Fails with `BucketAlreadyExists` when the name is taken.
    fn create_bucket(&self, name: &str, schema: &Schema) -> Result<BucketInfo>;

    /// Look up a bucket, `None` when absent
    fn get_bucket(&self, name: &str) -> Result<Option<BucketInfo>>;

    /// Remove a bucket and all its keys, atomically
    ///
    /// Dropping a bucket that is already gone is a no-op, so the loser of a
    /// drop/drop race still succeeds. The service reports `BucketNotFound`
    /// for a bucket that was absent before the call.
    fn drop_bucket(&self, name: &str) -> Result<()>;

    /// Read the object stored under `key`; null fields are omitted
    fn get_value(&self, bucket: &str, key: &str) -> Result<Option<Object>>;

    /// Store `obj` under `key`, fully replacing any previous value
    fn put_value(&self, bucket: &str, key: &str, obj: &Object) -> Result<PutOutcome>;

    /// Delete `key`; `false` when it was not present
    fn delete_value(&self, bucket: &str, key: &str) -> Result<bool>;

    /// Keys whose objects satisfy `criteria`, in ascending key order
    fn find_keys(&self, bucket: &str, criteria: &CriteriaSet) -> Result<Vec<String>>;
}
