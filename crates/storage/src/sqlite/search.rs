//! Criteria compiler
//!
//! Turns a normalized [`CriteriaSet`] into one parameterized `SELECT`:
//!
//! ```text
//! SELECT "key" FROM "users"
//! WHERE "age" IN (SELECT value FROM json_each(?1))
//!   AND "active" IN (SELECT value FROM json_each(?2))
//! ORDER BY "key"
//! ```
//!
//! Each field's allowed values are de-duplicated and bound as a single JSON
//! array, so the parameter count is one per field no matter how many values
//! a request lists. `json_each` yields booleans as `0`/`1`, numbers as
//! `REAL` and strings as `TEXT`, matching what the codec stores.
//!
//! Identifiers come from the schema and are quoted; values are only ever
//! bound as parameters. A `NULL` column fails every `IN` test, so objects
//! missing a criteria field never match.

use super::tables::quote_ident;
use bucketstore_core::limits::KEY_COLUMN;
use bucketstore_core::{CriteriaSet, Error, Result, Value};
use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Transaction};
use std::collections::HashSet;

/// Compiled search: SQL text plus positional parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// Statement text with `?N` placeholders
    pub sql: String,
    /// Values for the placeholders, in order
    pub params: Vec<SqlValue>,
}

/// Render `values` as a JSON array, dropping repeats
fn json_array(values: &[Value]) -> Result<String> {
    let mut seen = HashSet::with_capacity(values.len());
    let mut items = Vec::with_capacity(values.len());
    for value in values {
        let item = serde_json::to_string(value).map_err(Error::unexpected)?;
        if seen.insert(item.clone()) {
            items.push(item);
        }
    }
    Ok(format!("[{}]", items.join(",")))
}

/// Compile `criteria` against `bucket`
///
/// Returns `Ok(None)` when the criteria cannot match anything, so the caller
/// can skip the query altogether.
pub fn compile(bucket: &str, criteria: &CriteriaSet) -> Result<Option<SearchQuery>> {
    if criteria.is_unsatisfiable() {
        return Ok(None);
    }

    let mut sql = format!(
        "SELECT {key} FROM {} ",
        quote_ident(bucket),
        key = quote_ident(KEY_COLUMN)
    );
    let mut params = Vec::with_capacity(criteria.terms().len());
    let mut clauses = Vec::with_capacity(criteria.terms().len());
    for term in criteria.terms() {
        params.push(SqlValue::Text(json_array(&term.values)?));
        clauses.push(format!(
            "{} IN (SELECT value FROM json_each(?{}))",
            quote_ident(&term.field),
            params.len()
        ));
    }

    if !clauses.is_empty() {
        sql.push_str("WHERE ");
        sql.push_str(&clauses.join(" AND "));
        sql.push(' ');
    }
    sql.push_str("ORDER BY ");
    sql.push_str(&quote_ident(KEY_COLUMN));

    Ok(Some(SearchQuery { sql, params }))
}

/// Run a compiled search, returning matching keys in ascending order
pub(crate) fn run(tx: &Transaction<'_>, query: &SearchQuery) -> Result<Vec<String>> {
    let mut stmt = tx.prepare(&query.sql).map_err(Error::unexpected)?;
    let rows = stmt
        .query_map(params_from_iter(query.params.iter()), |row| {
            row.get::<_, String>(0)
        })
        .map_err(Error::unexpected)?;
    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::unexpected)
}
