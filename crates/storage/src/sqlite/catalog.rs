//! Bucket catalog
//!
//! One row per bucket, holding its name and its schema serialized as JSON.
//! Names compare case-insensitively, matching how `SQLite` resolves the
//! table names behind them.

use super::tables::quote_ident;
use crate::repository::BucketInfo;
use bucketstore_core::limits::CATALOG_TABLE;
use bucketstore_core::{Error, Result, Schema};
use rusqlite::{params, Connection, OptionalExtension, Transaction};

/// Create the catalog table if it does not exist yet
pub(crate) fn bootstrap(conn: &Connection) -> Result<()> {
    let sql = format!(
        "CREATE TABLE IF NOT EXISTS {} (\
             bucket_name TEXT PRIMARY KEY NOT NULL COLLATE NOCASE, \
             schema TEXT NOT NULL\
         )",
        quote_ident(CATALOG_TABLE)
    );
    conn.execute_batch(&sql).map_err(Error::unexpected)
}

/// Look up a bucket by name
pub(crate) fn lookup(tx: &Transaction<'_>, name: &str) -> Result<Option<BucketInfo>> {
    let sql = format!(
        "SELECT bucket_name, schema FROM {} WHERE bucket_name = ?1",
        quote_ident(CATALOG_TABLE)
    );
    let row = tx
        .query_row(&sql, params![name], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .optional()
        .map_err(Error::unexpected)?;

    match row {
        Some((name, schema)) => Ok(Some(BucketInfo {
            name,
            schema: Schema::from_json_str(&schema)?,
        })),
        None => Ok(None),
    }
}

/// Register a bucket
pub(crate) fn insert(tx: &Transaction<'_>, name: &str, schema: &Schema) -> Result<()> {
    let sql = format!(
        "INSERT INTO {} (bucket_name, schema) VALUES (?1, ?2)",
        quote_ident(CATALOG_TABLE)
    );
    tx.execute(&sql, params![name, schema.to_json_string()?])
        .map_err(Error::unexpected)?;
    Ok(())
}

/// Unregister a bucket; returns `false` when there was no entry
pub(crate) fn remove(tx: &Transaction<'_>, name: &str) -> Result<bool> {
    let sql = format!(
        "DELETE FROM {} WHERE bucket_name = ?1",
        quote_ident(CATALOG_TABLE)
    );
    let removed = tx.execute(&sql, params![name]).map_err(Error::unexpected)?;
    Ok(removed > 0)
}

/// Every registered bucket name
pub(crate) fn names(tx: &Transaction<'_>) -> Result<Vec<String>> {
    let sql = format!("SELECT bucket_name FROM {}", quote_ident(CATALOG_TABLE));
    let mut stmt = tx.prepare(&sql).map_err(Error::unexpected)?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(Error::unexpected)?;
    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::unexpected)
}
