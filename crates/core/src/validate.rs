//! Input validation
//!
//! All checks here run before any storage access, so a rejected request has
//! no side effects.
//!
//! ## Grammars
//!
//! | Input | Length | First | Body | Last |
//! |-------|--------|-------|------|------|
//! | bucket name | 1..=30 | letter | letter, digit, `_` | letter, digit |
//! | field name | 1..=30 | letter | letter, digit, `_` | letter, digit |
//! | key | 1..=50 | letter, digit | letter, digit, `_`, `-` | letter, digit |
//!
//! Only ASCII letters and digits qualify.

use crate::criteria::Criteria;
use crate::error::{Error, Result};
use crate::limits::{
    CATALOG_TABLE, KEY_COLUMN, MAX_BUCKET_NAME_LENGTH, MAX_FIELD_NAME_LENGTH, MAX_KEY_LENGTH,
    RESERVED_TABLE_PREFIX,
};
use crate::types::{DataType, Field, FieldDefinition, Schema};
use crate::value::Object;
use std::collections::HashSet;

fn is_name_body(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_key_body(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn matches_grammar(
    value: &str,
    max_len: usize,
    first: fn(char) -> bool,
    body: fn(char) -> bool,
) -> bool {
    let len = value.chars().count();
    if len == 0 || len > max_len {
        return false;
    }
    let mut chars = value.chars();
    let Some(head) = chars.next() else {
        return false;
    };
    if !first(head) {
        return false;
    }
    match chars.next_back() {
        None => true,
        Some(tail) => tail.is_ascii_alphanumeric() && chars.all(body),
    }
}

/// Validate a bucket name
///
/// Besides the grammar, names owned by the physical store or the catalog
/// are refused.
pub fn bucket_name(name: &str) -> Result<()> {
    let lower = name.to_ascii_lowercase();
    if !matches_grammar(name, MAX_BUCKET_NAME_LENGTH, |c| c.is_ascii_alphabetic(), is_name_body)
        || lower == CATALOG_TABLE
        || lower.starts_with(RESERVED_TABLE_PREFIX)
    {
        return Err(Error::InvalidBucketName(name.to_string()));
    }
    Ok(())
}

/// Validate a field name
pub fn field_name(name: &str) -> Result<()> {
    if !matches_grammar(name, MAX_FIELD_NAME_LENGTH, |c| c.is_ascii_alphabetic(), is_name_body)
        || name.eq_ignore_ascii_case(KEY_COLUMN)
    {
        return Err(Error::InvalidFieldName(name.to_string()));
    }
    Ok(())
}

/// Validate a key
pub fn key(key: &str) -> Result<()> {
    if !matches_grammar(key, MAX_KEY_LENGTH, |c| c.is_ascii_alphanumeric(), is_key_body) {
        return Err(Error::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Validate field definitions and build the schema
///
/// # Errors
///
/// - `SchemaMissing` for an empty list
/// - `InvalidFieldName` for a bad, reserved or duplicated name
///   (duplicates are detected case-insensitively)
/// - `InvalidFieldType` for an unknown type
pub fn schema(definitions: &[FieldDefinition]) -> Result<Schema> {
    if definitions.is_empty() {
        return Err(Error::SchemaMissing);
    }

    let mut seen = HashSet::with_capacity(definitions.len());
    let mut fields = Vec::with_capacity(definitions.len());
    for def in definitions {
        field_name(&def.name)?;
        let data_type: DataType = def.data_type.parse()?;
        if !seen.insert(def.name.to_ascii_lowercase()) {
            return Err(Error::InvalidFieldName(def.name.clone()));
        }
        fields.push(Field {
            name: def.name.clone(),
            data_type,
            required: def.required,
            indexed: def.indexed,
        });
    }
    Ok(Schema::new(fields))
}

/// Validate an object about to be written
///
/// An explicit `null` member counts as absent.
///
/// # Errors
///
/// - `UnknownField` for a member the schema does not declare
/// - `InvalidField` for a member whose value has the wrong type
/// - `MissingField` for an absent or null required field
pub fn object(obj: &Object, schema: &Schema) -> Result<()> {
    for (name, value) in obj {
        let field = schema
            .field(name)
            .ok_or_else(|| Error::UnknownField(name.clone()))?;
        if !field.data_type.accepts(value) {
            return Err(Error::InvalidField(name.clone()));
        }
    }

    if let Some(missing) = schema
        .iter()
        .find(|f| f.required && obj.get_present(&f.name).is_none())
    {
        return Err(Error::MissingField(missing.name.clone()));
    }
    Ok(())
}

/// Check that every criteria field is declared by the schema
pub fn criteria(criteria: &Criteria, schema: &Schema) -> Result<()> {
    match criteria.fields().find(|name| schema.field(name).is_none()) {
        Some(unknown) => Err(Error::UnknownField(unknown.to_string())),
        None => Ok(()),
    }
}
