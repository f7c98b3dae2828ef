//! Non-durable repository
//!
//! Same observable behavior as the `SQLite` store (case-insensitive bucket
//! names, null fields omitted on read, keys returned in ascending order)
//! with everything held in process memory. Used for fast service tests.

use crate::repository::{BucketInfo, PutOutcome, Repository};
use bucketstore_core::{validate, CriteriaSet, Error, Object, Result, Schema};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

#[derive(Debug)]
struct MemoryBucket {
    info: BucketInfo,
    rows: BTreeMap<String, Object>,
}

/// In-memory [`Repository`]
#[derive(Debug, Default)]
pub struct MemoryRepository {
    buckets: RwLock<HashMap<String, MemoryBucket>>,
}

fn fold(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// Copy of `obj` without null members
fn strip_nulls(obj: &Object) -> Object {
    obj.iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

impl MemoryRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    fn with_bucket<T>(&self, bucket: &str, f: impl FnOnce(&MemoryBucket) -> Result<T>) -> Result<T> {
        let buckets = self.buckets.read();
        let entry = buckets
            .get(&fold(bucket))
            .ok_or_else(|| Error::BucketNotFound(bucket.to_string()))?;
        f(entry)
    }

    fn with_bucket_mut<T>(
        &self,
        bucket: &str,
        f: impl FnOnce(&mut MemoryBucket) -> Result<T>,
    ) -> Result<T> {
        let mut buckets = self.buckets.write();
        let entry = buckets
            .get_mut(&fold(bucket))
            .ok_or_else(|| Error::BucketNotFound(bucket.to_string()))?;
        f(entry)
    }
}

impl Repository for MemoryRepository {
    fn bucket_names(&self) -> Result<Vec<String>> {
        Ok(self
            .buckets
            .read()
            .values()
            .map(|b| b.info.name.clone())
            .collect())
    }

    fn create_bucket(&self, name: &str, schema: &Schema) -> Result<BucketInfo> {
        let mut buckets = self.buckets.write();
        let folded = fold(name);
        if buckets.contains_key(&folded) {
            return Err(Error::BucketAlreadyExists(name.to_string()));
        }
        let info = BucketInfo {
            name: name.to_string(),
            schema: schema.clone(),
        };
        buckets.insert(
            folded,
            MemoryBucket {
                info: info.clone(),
                rows: BTreeMap::new(),
            },
        );
        info!(target: "bucketstore::catalog", bucket = name, fields = schema.len(), "Bucket created");
        Ok(info)
    }

    fn get_bucket(&self, name: &str) -> Result<Option<BucketInfo>> {
        Ok(self
            .buckets
            .read()
            .get(&fold(name))
            .map(|b| b.info.clone()))
    }

    fn drop_bucket(&self, name: &str) -> Result<()> {
        match self.buckets.write().remove(&fold(name)) {
            Some(dropped) => {
                info!(target: "bucketstore::catalog", bucket = %dropped.info.name, "Bucket dropped")
            }
            None => debug!(target: "bucketstore::catalog", bucket = name, "Bucket already absent"),
        }
        Ok(())
    }

    fn get_value(&self, bucket: &str, key: &str) -> Result<Option<Object>> {
        self.with_bucket(bucket, |b| Ok(b.rows.get(key).cloned()))
    }

    fn put_value(&self, bucket: &str, key: &str, obj: &Object) -> Result<PutOutcome> {
        let outcome = self.with_bucket_mut(bucket, |b| {
            validate::object(obj, &b.info.schema)?;
            Ok(match b.rows.insert(key.to_string(), strip_nulls(obj)) {
                Some(_) => PutOutcome::Replaced,
                None => PutOutcome::Created,
            })
        })?;
        debug!(target: "bucketstore::store", bucket, key, ?outcome, "Value stored");
        Ok(outcome)
    }

    fn delete_value(&self, bucket: &str, key: &str) -> Result<bool> {
        let removed = self.with_bucket_mut(bucket, |b| Ok(b.rows.remove(key).is_some()))?;
        debug!(target: "bucketstore::store", bucket, key, removed, "Value deleted");
        Ok(removed)
    }

    fn find_keys(&self, bucket: &str, criteria: &CriteriaSet) -> Result<Vec<String>> {
        self.with_bucket(bucket, |b| {
            criteria.check(&b.info.schema)?;
            // BTreeMap iteration is already in ascending key order
            Ok(b.rows
                .iter()
                .filter(|(_, obj)| criteria.matches(obj))
                .map(|(key, _)| key.clone())
                .collect())
        })
    }
}
