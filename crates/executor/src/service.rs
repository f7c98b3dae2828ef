//! Bucket service: validation in front of the repository
//!
//! Every input is checked against its grammar (and, for objects and
//! criteria, against the bucket's schema) before the repository sees it, so
//! a rejected request never has side effects. Missing buckets and keys each
//! surface as their own error kind.

use std::sync::Arc;

use bucketstore_core::{validate, Criteria, Error, FieldDefinition, Object, Result};
use bucketstore_storage::{
    Bucket, MemoryRepository, PutOutcome, Repository, SqliteRepository, StoreConfig,
};
use tracing::debug;

/// Entry point for bucket and key operations
///
/// `Send + Sync`; share it behind an `Arc` across worker threads.
#[derive(Clone)]
pub struct BucketService {
    repo: Arc<dyn Repository>,
}

impl BucketService {
    /// Wrap an existing repository
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    /// Open a `SQLite`-backed service
    pub fn open(config: StoreConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(SqliteRepository::open(config)?)))
    }

    /// Service over a non-durable in-memory repository
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryRepository::new()))
    }

    /// Underlying repository
    pub fn repository(&self) -> &Arc<dyn Repository> {
        &self.repo
    }

    /// Names of every bucket, in no particular order
    pub fn bucket_names(&self) -> Result<Vec<String>> {
        self.repo.bucket_names()
    }

    /// Create a bucket from unvalidated field definitions
    ///
    /// # Errors
    ///
    /// `InvalidBucketName`, `SchemaMissing`, `InvalidFieldName` or
    /// `InvalidFieldType` before storage is touched; `BucketAlreadyExists`
    /// when the name is taken.
    pub fn create_bucket(&self, name: &str, definitions: &[FieldDefinition]) -> Result<Bucket> {
        validate::bucket_name(name)?;
        let schema = validate::schema(definitions)?;
        let info = self.repo.create_bucket(name, &schema)?;
        Ok(Bucket::new(info, Arc::clone(&self.repo)))
    }

    /// Resolve a bucket
    pub fn get_bucket(&self, name: &str) -> Result<Bucket> {
        validate::bucket_name(name)?;
        self.resolve(name)
    }

    /// Drop a bucket and all its keys
    ///
    /// # Errors
    ///
    /// `BucketNotFound` when the bucket does not exist. A concurrent drop
    /// that removes it after the lookup is not an error.
    pub fn drop_bucket(&self, name: &str) -> Result<()> {
        validate::bucket_name(name)?;
        let resolved = self.resolve(name)?;
        self.repo.drop_bucket(resolved.name())
    }

    /// Read the object under `key`
    ///
    /// # Errors
    ///
    /// `KeyNotFound` when the bucket exists but the key does not.
    pub fn get_value(&self, bucket: &str, key: &str) -> Result<Object> {
        validate::bucket_name(bucket)?;
        validate::key(key)?;
        self.resolve(bucket)?
            .read(key)?
            .ok_or_else(|| Error::key_not_found(key, bucket))
    }

    /// Store `obj` under `key`, replacing any previous value
    pub fn put_value(&self, bucket: &str, key: &str, obj: &Object) -> Result<PutOutcome> {
        validate::bucket_name(bucket)?;
        validate::key(key)?;
        let resolved = self.resolve(bucket)?;
        if let Err(err) = validate::object(obj, resolved.schema()) {
            debug!(target: "bucketstore::service", bucket, key, error = %err, "Object rejected");
            return Err(err);
        }
        resolved.store(key, obj)
    }

    /// Store a JSON request body under `key`
    ///
    /// # Errors
    ///
    /// `BadRequestPayload` when the body is not a JSON object, then the same
    /// errors as [`BucketService::put_value`].
    pub fn put_json(&self, bucket: &str, key: &str, body: serde_json::Value) -> Result<PutOutcome> {
        validate::bucket_name(bucket)?;
        validate::key(key)?;
        let obj = Object::from_json(body)?;
        self.put_value(bucket, key, &obj)
    }

    /// Delete `key`
    ///
    /// # Errors
    ///
    /// `KeyNotFound` when the key is absent.
    pub fn delete_value(&self, bucket: &str, key: &str) -> Result<()> {
        validate::bucket_name(bucket)?;
        validate::key(key)?;
        if self.resolve(bucket)?.delete(key)? {
            Ok(())
        } else {
            Err(Error::key_not_found(key, bucket))
        }
    }

    /// Keys whose objects match `criteria`, in ascending order
    ///
    /// # Errors
    ///
    /// `UnknownField` for a criteria field the schema does not declare;
    /// `InvalidField` for a value that does not parse as its field's type.
    pub fn find_keys(&self, bucket: &str, criteria: &Criteria) -> Result<Vec<String>> {
        validate::bucket_name(bucket)?;
        let resolved = self.resolve(bucket)?;
        validate::criteria(criteria, resolved.schema())?;
        let normalized = criteria.normalize(resolved.schema())?;
        resolved.keys(&normalized)
    }

    fn resolve(&self, name: &str) -> Result<Bucket> {
        match self.repo.get_bucket(name)? {
            Some(info) => Ok(Bucket::new(info, Arc::clone(&self.repo))),
            None => Err(Error::BucketNotFound(name.to_string())),
        }
    }
}

impl std::fmt::Debug for BucketService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BucketService").finish_non_exhaustive()
    }
}
