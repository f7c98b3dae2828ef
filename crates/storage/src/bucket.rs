//! Bucket handle
//!
//! A `Bucket` is what the service hands out after resolving a bucket name:
//! the stored name and schema plus a reference back to the repository. It
//! holds no data of its own; every call goes to the repository, which
//! re-resolves the bucket so a concurrent drop is observed.

use crate::repository::{BucketInfo, PutOutcome, Repository};
use bucketstore_core::{CriteriaSet, Object, Result, Schema};
use std::fmt;
use std::sync::Arc;

/// Handle on one bucket
#[derive(Clone)]
pub struct Bucket {
    info: BucketInfo,
    repo: Arc<dyn Repository>,
}

impl Bucket {
    /// Wrap a catalog projection
    pub fn new(info: BucketInfo, repo: Arc<dyn Repository>) -> Self {
        Self { info, repo }
    }

    /// Bucket name as stored in the catalog
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Declared schema
    pub fn schema(&self) -> &Schema {
        &self.info.schema
    }

    /// Catalog projection
    pub fn info(&self) -> &BucketInfo {
        &self.info
    }

    /// Read the object under `key`
    pub fn read(&self, key: &str) -> Result<Option<Object>> {
        self.repo.get_value(&self.info.name, key)
    }

    /// Store `obj` under `key`
    pub fn store(&self, key: &str, obj: &Object) -> Result<PutOutcome> {
        self.repo.put_value(&self.info.name, key, obj)
    }

    /// Delete `key`
    pub fn delete(&self, key: &str) -> Result<bool> {
        self.repo.delete_value(&self.info.name, key)
    }

    /// Keys matching `criteria`
    pub fn keys(&self, criteria: &CriteriaSet) -> Result<Vec<String>> {
        self.repo.find_keys(&self.info.name, criteria)
    }
}

impl fmt::Debug for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bucket")
            .field("name", &self.info.name)
            .field("schema", &self.info.schema)
            .finish()
    }
}
