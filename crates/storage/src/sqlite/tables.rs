//! Table manager: physical storage for each bucket
//!
//! Every bucket gets one table named after it:
//!
//! ```text
//! CREATE TABLE "users" (
//!     "key" VARCHAR(50) PRIMARY KEY NOT NULL,
//!     "age" REAL NOT NULL,
//!     "active" BOOLEAN
//! )
//! CREATE INDEX "ix:users:age" ON "users" ("age")
//! ```
//!
//! DDL text is generated by pure functions so it can be checked without a
//! database; [`create`] and [`drop`] apply it inside the caller's
//! transaction, next to the catalog mutation.
//!
//! Identifiers are double-quoted. Bucket and field names are validated
//! against their grammars before they reach this module, and index names
//! use `:` as a separator, which neither grammar admits, so they cannot
//! collide across buckets.

use bucketstore_core::limits::{KEY_COLUMN, MAX_KEY_LENGTH};
use bucketstore_core::{DataType, Error, Result, Schema};
use rusqlite::Transaction;

/// Quote an identifier for interpolation into SQL
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Column type declared for a field type
pub fn column_type(data_type: DataType) -> &'static str {
    match data_type {
        DataType::String => "TEXT",
        DataType::Number => "REAL",
        DataType::Bool => "BOOLEAN",
    }
}

/// `CREATE TABLE` statement for a bucket
pub fn create_table_sql(bucket: &str, schema: &Schema) -> String {
    let mut sql = format!(
        "CREATE TABLE {} ({} VARCHAR({}) PRIMARY KEY NOT NULL",
        quote_ident(bucket),
        quote_ident(KEY_COLUMN),
        MAX_KEY_LENGTH
    );
    for field in schema {
        sql.push_str(", ");
        sql.push_str(&quote_ident(&field.name));
        sql.push(' ');
        sql.push_str(column_type(field.data_type));
        if field.required {
            sql.push_str(" NOT NULL");
        }
    }
    sql.push(')');
    sql
}

/// Name of the secondary index on `bucket.field`
pub fn index_name(bucket: &str, field: &str) -> String {
    format!("ix:{}:{}", bucket, field)
}

/// `CREATE INDEX` statement for `bucket.field`
pub fn create_index_sql(bucket: &str, field: &str) -> String {
    format!(
        "CREATE INDEX {} ON {} ({})",
        quote_ident(&index_name(bucket, field)),
        quote_ident(bucket),
        quote_ident(field)
    )
}

/// `DROP TABLE` statement for a bucket (indexes go with it)
pub fn drop_table_sql(bucket: &str) -> String {
    format!("DROP TABLE {}", quote_ident(bucket))
}

/// Every DDL statement needed to create a bucket, in execution order
pub fn create_statements(bucket: &str, schema: &Schema) -> Vec<String> {
    std::iter::once(create_table_sql(bucket, schema))
        .chain(
            schema
                .indexed_fields()
                .map(|field| create_index_sql(bucket, &field.name)),
        )
        .collect()
}

/// Create the table and indexes for a bucket
pub(crate) fn create(tx: &Transaction<'_>, bucket: &str, schema: &Schema) -> Result<()> {
    for statement in create_statements(bucket, schema) {
        tx.execute(&statement, []).map_err(Error::unexpected)?;
    }
    Ok(())
}

/// Drop a bucket's table
pub(crate) fn drop(tx: &Transaction<'_>, bucket: &str) -> Result<()> {
    tx.execute(&drop_table_sql(bucket), [])
        .map_err(Error::unexpected)?;
    Ok(())
}
