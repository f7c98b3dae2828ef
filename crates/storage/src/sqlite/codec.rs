//! Value codec: objects to and from bucket table rows
//!
//! Column order always follows the schema. On the way in, absent and null
//! members become SQL `NULL`, numbers are bound as `REAL`, booleans as
//! `0`/`1` and strings as `TEXT`. On the way out, `NULL` columns are left
//! out of the object.
//!
//! Keyed statements bind the key as `?1` and the schema columns from `?2`
//! in schema order.

use super::tables::quote_ident;
use bucketstore_core::limits::KEY_COLUMN;
use bucketstore_core::{DataType, Error, Object, Result, Schema, Value};
use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, OptionalExtension, Row, Transaction};

/// Encode `obj` as one SQL value per schema field, in schema order
///
/// # Errors
///
/// - `UnknownField` for a member the schema does not declare
/// - `InvalidField` for a type mismatch or a non-finite number
/// - `MissingField` for an absent or null required field
pub fn encode(schema: &Schema, obj: &Object) -> Result<Vec<SqlValue>> {
    if let Some((name, _)) = obj.iter().find(|(name, _)| schema.field(name).is_none()) {
        return Err(Error::UnknownField(name.clone()));
    }

    schema
        .iter()
        .map(|field| {
            let value = obj.get(&field.name).unwrap_or(&Value::Null);
            match (field.data_type, value) {
                (_, Value::Null) if field.required => Err(Error::MissingField(field.name.clone())),
                (_, Value::Null) => Ok(SqlValue::Null),
                (DataType::String, Value::String(s)) => Ok(SqlValue::Text(s.clone())),
                (DataType::Number, Value::Number(n)) if n.is_finite() => Ok(SqlValue::Real(*n)),
                (DataType::Bool, Value::Bool(b)) => Ok(SqlValue::Integer(i64::from(*b))),
                _ => Err(Error::InvalidField(field.name.clone())),
            }
        })
        .collect()
}

/// Decode a row selected with [`select_sql`] back into an object
pub fn decode(schema: &Schema, row: &Row<'_>) -> rusqlite::Result<Object> {
    let mut obj = Object::new();
    for (idx, field) in schema.iter().enumerate() {
        let value = match field.data_type {
            DataType::String => row.get::<_, Option<String>>(idx)?.map(Value::String),
            DataType::Number => row.get::<_, Option<f64>>(idx)?.map(Value::Number),
            DataType::Bool => row.get::<_, Option<bool>>(idx)?.map(Value::Bool),
        };
        if let Some(value) = value {
            obj.insert(field.name.clone(), value);
        }
    }
    Ok(obj)
}

fn column_list(schema: &Schema) -> String {
    schema
        .iter()
        .map(|field| quote_ident(&field.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `SELECT` of every schema column for one key
pub fn select_sql(bucket: &str, schema: &Schema) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = ?1",
        column_list(schema),
        quote_ident(bucket),
        quote_ident(KEY_COLUMN)
    )
}

/// `INSERT` of a key and every schema column
pub fn insert_sql(bucket: &str, schema: &Schema) -> String {
    let placeholders = (1..=schema.len() + 1)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}, {}) VALUES ({})",
        quote_ident(bucket),
        quote_ident(KEY_COLUMN),
        column_list(schema),
        placeholders
    )
}

/// `UPDATE` of every schema column for one key
///
/// Every column is assigned, so fields absent from the new object are
/// reset to `NULL`.
pub fn update_sql(bucket: &str, schema: &Schema) -> String {
    let assignments = schema
        .iter()
        .enumerate()
        .map(|(idx, field)| format!("{} = ?{}", quote_ident(&field.name), idx + 2))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {} SET {} WHERE {} = ?1",
        quote_ident(bucket),
        assignments,
        quote_ident(KEY_COLUMN)
    )
}

/// `DELETE` of one key
pub fn delete_sql(bucket: &str) -> String {
    format!(
        "DELETE FROM {} WHERE {} = ?1",
        quote_ident(bucket),
        quote_ident(KEY_COLUMN)
    )
}

/// Existence probe for one key
pub fn exists_sql(bucket: &str) -> String {
    format!(
        "SELECT 1 FROM {} WHERE {} = ?1",
        quote_ident(bucket),
        quote_ident(KEY_COLUMN)
    )
}

fn keyed(key: &str, columns: Vec<SqlValue>) -> impl Iterator<Item = SqlValue> {
    std::iter::once(SqlValue::Text(key.to_string())).chain(columns)
}

/// Read the object stored under `key`
pub(crate) fn read(
    tx: &Transaction<'_>,
    bucket: &str,
    schema: &Schema,
    key: &str,
) -> Result<Option<Object>> {
    tx.query_row(&select_sql(bucket, schema), [key], |row| decode(schema, row))
        .optional()
        .map_err(Error::unexpected)
}

/// True when `key` has a row
pub(crate) fn exists(tx: &Transaction<'_>, bucket: &str, key: &str) -> Result<bool> {
    tx.query_row(&exists_sql(bucket), [key], |_| Ok(()))
        .optional()
        .map(|row| row.is_some())
        .map_err(Error::unexpected)
}

/// Insert a new row for `key`
pub(crate) fn insert(
    tx: &Transaction<'_>,
    bucket: &str,
    schema: &Schema,
    key: &str,
    columns: Vec<SqlValue>,
) -> Result<()> {
    tx.execute(&insert_sql(bucket, schema), params_from_iter(keyed(key, columns)))
        .map_err(Error::unexpected)?;
    Ok(())
}

/// Overwrite every column of the row for `key`
pub(crate) fn update(
    tx: &Transaction<'_>,
    bucket: &str,
    schema: &Schema,
    key: &str,
    columns: Vec<SqlValue>,
) -> Result<()> {
    tx.execute(&update_sql(bucket, schema), params_from_iter(keyed(key, columns)))
        .map_err(Error::unexpected)?;
    Ok(())
}

/// Delete the row for `key`; `false` when there was none
pub(crate) fn delete(tx: &Transaction<'_>, bucket: &str, key: &str) -> Result<bool> {
    let removed = tx
        .execute(&delete_sql(bucket), [key])
        .map_err(Error::unexpected)?;
    Ok(removed > 0)
}
