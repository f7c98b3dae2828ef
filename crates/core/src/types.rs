//! Schema types for bucketstore
//!
//! This module defines:
//! - DataType: the three storable field types
//! - Field: a validated, immutable field declaration
//! - FieldDefinition: the unvalidated wire form of a field declaration
//! - Schema: the ordered field list owned by a bucket
//!
//! ## Wire Format
//!
//! Fields serialize with the member names `field`, `type`, `not-null` and
//! `indexed`. The same encoding is what the catalog persists, so a schema
//! read back from storage is byte-for-byte the schema that was declared.

use crate::error::{Error, Result};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storable field type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// UTF-8 text
    String,
    /// 64-bit float
    Number,
    /// Boolean
    Bool,
}

impl DataType {
    /// Canonical lowercase name (`string`, `number`, `bool`)
    pub fn as_str(self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Number => "number",
            DataType::Bool => "bool",
        }
    }

    /// Check that a runtime value has this type
    ///
    /// `Null` is accepted by every type; whether a null is allowed is a
    /// nullability question answered by [`Field::required`]. Numbers must be
    /// finite.
    pub fn accepts(self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (DataType::String, Value::String(_)) => true,
            (DataType::Number, Value::Number(n)) => n.is_finite(),
            (DataType::Bool, Value::Bool(_)) => true,
            _ => false,
        }
    }

    /// Parse a raw textual value (e.g. a query-string criterion) into a typed value
    ///
    /// Returns `None` when the text is not a valid literal for this type.
    pub fn parse(self, raw: &str) -> Option<Value> {
        match self {
            DataType::String => Some(Value::String(raw.to_string())),
            DataType::Number => raw.parse::<f64>().ok().map(Value::Number),
            DataType::Bool => parse_bool(raw).map(Value::Bool),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "string" => Ok(DataType::String),
            "number" => Ok(DataType::Number),
            "bool" => Ok(DataType::Bool),
            other => Err(Error::InvalidFieldType(other.to_string())),
        }
    }
}

/// A validated field declaration
///
/// Immutable once the owning bucket is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    /// Field name (also the physical column name)
    #[serde(rename = "field")]
    pub name: String,
    /// Declared type
    #[serde(rename = "type")]
    pub data_type: DataType,
    /// Whether every write must supply the field
    #[serde(rename = "not-null", default)]
    pub required: bool,
    /// Whether a secondary index is built for the field
    #[serde(default)]
    pub indexed: bool,
}

impl Field {
    /// Create an optional, unindexed field
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            required: false,
            indexed: false,
        }
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the field as indexed
    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }
}

/// Unvalidated field declaration as received from a client
///
/// The type is free text so that an unknown type surfaces as
/// `InvalidFieldType` instead of a payload decoding failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Requested field name
    #[serde(rename = "field", default)]
    pub name: String,
    /// Requested type name
    #[serde(rename = "type", default)]
    pub data_type: String,
    /// Whether every write must supply the field
    #[serde(rename = "not-null", default)]
    pub required: bool,
    /// Whether a secondary index is built for the field
    #[serde(default)]
    pub indexed: bool,
}

impl FieldDefinition {
    /// Create an optional, unindexed definition
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            required: false,
            indexed: false,
        }
    }

    /// Mark the definition as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the definition as indexed
    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }
}

impl From<&Field> for FieldDefinition {
    fn from(field: &Field) -> Self {
        Self {
            name: field.name.clone(),
            data_type: field.data_type.as_str().to_string(),
            required: field.required,
            indexed: field.indexed,
        }
    }
}

/// Ordered list of fields owned by a bucket
///
/// A `Schema` obtained from [`crate::validate::schema`] is non-empty and has
/// unique field names. [`Schema::new`] performs no checks and exists for
/// storage layers rebuilding a schema they persisted themselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// Wrap an ordered field list without validation
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a field by exact name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Iterate fields in declaration order
    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the schema declares no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields flagged for a secondary index
    pub fn indexed_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.indexed)
    }

    /// Serialize to the persisted catalog encoding (JSON array of fields)
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Error::unexpected)
    }

    /// Parse the persisted catalog encoding
    pub fn from_json_str(data: &str) -> Result<Self> {
        serde_json::from_str(data).map_err(Error::unexpected)
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
