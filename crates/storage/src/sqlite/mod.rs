//! SQLite-backed repository
//!
//! # Layout
//!
//! - `bucket_catalog`: one row per bucket (name, schema as JSON)
//! - one table per bucket: a `"key"` primary key plus one column per field
//! - one index per indexed field
//!
//! # Connections
//!
//! All writes go through a single writer connection; every mutation runs in
//! an `IMMEDIATE` transaction so check-then-act sequences (bucket exists?
//! key exists?) cannot interleave with another writer. File-backed stores
//! also open a small pool of read-only connections handed out round-robin.
//! In-memory stores are private to one connection, so reads share the
//! writer.

mod catalog;
pub mod codec;
pub mod search;
pub mod tables;
mod transaction;

use crate::config::StoreConfig;
use crate::repository::{BucketInfo, PutOutcome, Repository};
use bucketstore_core::{CriteriaSet, Error, Object, Result, Schema};
use parking_lot::{Mutex, MutexGuard};
use rusqlite::{Connection, OpenFlags, Transaction};
use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::{debug, info};

/// Durable [`Repository`] on top of `SQLite`
pub struct SqliteRepository {
    writer: Mutex<Connection>,
    readers: Vec<Mutex<Connection>>,
    next_reader: AtomicUsize,
    config: StoreConfig,
}

impl SqliteRepository {
    /// Open (or create) a store
    ///
    /// Applies connection pragmas, creates the catalog table if needed and
    /// opens the reader pool.
    pub fn open(config: StoreConfig) -> Result<Self> {
        config.validate()?;

        let writer = match &config.path {
            Some(path) => Connection::open(path).map_err(Error::unexpected)?,
            None => Connection::open_in_memory().map_err(Error::unexpected)?,
        };
        configure(&writer, &config)?;
        if !config.is_in_memory() {
            writer
                .execute_batch(&format!(
                    "PRAGMA journal_mode = {};",
                    config.journal_mode.pragma_value()
                ))
                .map_err(Error::unexpected)?;
        }
        catalog::bootstrap(&writer)?;

        let mut readers = Vec::with_capacity(config.effective_read_pool_size());
        if let Some(path) = &config.path {
            for _ in 0..config.effective_read_pool_size() {
                readers.push(Mutex::new(open_reader(path, &config)?));
            }
        }

        info!(
            target: "bucketstore::store",
            path = ?config.path,
            readers = readers.len(),
            journal_mode = config.journal_mode.pragma_value(),
            "Store opened"
        );

        Ok(Self {
            writer: Mutex::new(writer),
            readers,
            next_reader: AtomicUsize::new(0),
            config,
        })
    }

    /// Open a private in-memory store
    pub fn in_memory() -> Result<Self> {
        Self::open(StoreConfig::in_memory())
    }

    /// Configuration the store was opened with
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn reader(&self) -> MutexGuard<'_, Connection> {
        if self.readers.is_empty() {
            return self.writer.lock();
        }
        let idx = self.next_reader.fetch_add(1, Ordering::Relaxed) % self.readers.len();
        self.readers[idx].lock()
    }

    fn read<T, F>(&self, op: &'static str, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let mut conn = self.reader();
        transaction::read(&mut conn, op, f)
    }

    fn write<T, F>(&self, op: &'static str, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let mut conn = self.writer.lock();
        transaction::write(&mut conn, op, f)
    }
}

fn configure(conn: &Connection, config: &StoreConfig) -> Result<()> {
    conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))
        .map_err(Error::unexpected)
}

fn open_reader(path: &Path, config: &StoreConfig) -> Result<Connection> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(Error::unexpected)?;
    configure(&conn, config)?;
    Ok(conn)
}

/// Resolve a bucket inside the current transaction
fn resolve(tx: &Transaction<'_>, bucket: &str) -> Result<BucketInfo> {
    catalog::lookup(tx, bucket)?.ok_or_else(|| Error::BucketNotFound(bucket.to_string()))
}

impl Repository for SqliteRepository {
    fn bucket_names(&self) -> Result<Vec<String>> {
        self.read("bucket_names", catalog::names)
    }

    fn create_bucket(&self, name: &str, schema: &Schema) -> Result<BucketInfo> {
        let info = self.write("create_bucket", |tx| {
            if catalog::lookup(tx, name)?.is_some() {
                return Err(Error::BucketAlreadyExists(name.to_string()));
            }
            tables::create(tx, name, schema)?;
            catalog::insert(tx, name, schema)?;
            Ok(BucketInfo {
                name: name.to_string(),
                schema: schema.clone(),
            })
        })?;

        info!(
            target: "bucketstore::catalog",
            bucket = name,
            fields = schema.len(),
            indexes = schema.indexed_fields().count(),
            "Bucket created"
        );
        Ok(info)
    }

    fn get_bucket(&self, name: &str) -> Result<Option<BucketInfo>> {
        self.read("get_bucket", |tx| catalog::lookup(tx, name))
    }

    fn drop_bucket(&self, name: &str) -> Result<()> {
        let dropped = self.write("drop_bucket", |tx| {
            let Some(info) = catalog::lookup(tx, name)? else {
                return Ok(None);
            };
            tables::drop(tx, &info.name)?;
            catalog::remove(tx, &info.name)?;
            Ok(Some(info.name))
        })?;

        match dropped {
            Some(bucket) => {
                info!(target: "bucketstore::catalog", %bucket, "Bucket dropped")
            }
            None => debug!(target: "bucketstore::catalog", bucket = name, "Bucket already absent"),
        }
        Ok(())
    }

    fn get_value(&self, bucket: &str, key: &str) -> Result<Option<Object>> {
        self.read("get_value", |tx| {
            let info = resolve(tx, bucket)?;
            codec::read(tx, &info.name, &info.schema, key)
        })
    }

    fn put_value(&self, bucket: &str, key: &str, obj: &Object) -> Result<PutOutcome> {
        let outcome = self.write("put_value", |tx| {
            let info = resolve(tx, bucket)?;
            let columns = codec::encode(&info.schema, obj)?;
            if codec::exists(tx, &info.name, key)? {
                codec::update(tx, &info.name, &info.schema, key, columns)?;
                Ok(PutOutcome::Replaced)
            } else {
                codec::insert(tx, &info.name, &info.schema, key, columns)?;
                Ok(PutOutcome::Created)
            }
        })?;

        debug!(target: "bucketstore::store", bucket, key, ?outcome, "Value stored");
        Ok(outcome)
    }

    fn delete_value(&self, bucket: &str, key: &str) -> Result<bool> {
        let removed = self.write("delete_value", |tx| {
            let info = resolve(tx, bucket)?;
            codec::delete(tx, &info.name, key)
        })?;

        debug!(target: "bucketstore::store", bucket, key, removed, "Value deleted");
        Ok(removed)
    }

    fn find_keys(&self, bucket: &str, criteria: &CriteriaSet) -> Result<Vec<String>> {
        self.read("find_keys", |tx| {
            let info = resolve(tx, bucket)?;
            // Criteria were normalized against a schema read earlier
            criteria.check(&info.schema)?;
            let Some(query) = search::compile(&info.name, criteria)? else {
                return Ok(Vec::new());
            };
            debug!(
                target: "bucketstore::search",
                bucket = %info.name,
                sql = %query.sql,
                params = query.params.len(),
                "Compiled search"
            );
            search::run(tx, &query)
        })
    }
}

impl fmt::Debug for SqliteRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteRepository")
            .field("path", &self.config.path)
            .field("readers", &self.readers.len())
            .finish()
    }
}
