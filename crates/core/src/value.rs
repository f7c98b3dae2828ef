//! Value types for bucketstore
//!
//! This module defines:
//! - Value: tagged union of the storable scalar types plus `Null`
//! - Object: a field-name → value mapping as read or written by clients
//!
//! JSON is the wire representation. Conversion from JSON is strict: only
//! strings, numbers, booleans and `null` are storable; arrays and nested
//! objects are rejected with the offending member name.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Storable scalar value
///
/// Serializes untagged, so `Value::Number(30.0)` is the JSON number `30.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent value
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit floating point
    Number(f64),
    /// UTF-8 string
    String(String),
}

impl Value {
    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Convert a JSON member into a value; `name` is reported on rejection
    fn from_json_member(name: &str, json: serde_json::Value) -> Result<Self> {
        match json {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(Value::Number)
                .ok_or_else(|| Error::InvalidField(name.to_string())),
            serde_json::Value::String(s) => Ok(Value::String(s)),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                Err(Error::InvalidField(name.to_string()))
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Field-name → value mapping
///
/// Iteration order is by field name, which keeps validation diagnostics
/// deterministic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Object {
    fields: BTreeMap<String, Value>,
}

impl Object {
    /// Create an empty object
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a member, returning the previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    /// Get a member
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Get a member, treating an explicit `Null` as absent
    pub fn get_present(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).filter(|v| !v.is_null())
    }

    /// Iterate members in name order
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.fields.iter()
    }

    /// Number of members (including explicit nulls)
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the object has no members
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parse a JSON request body into an object
    ///
    /// # Errors
    ///
    /// - `BadRequestPayload` if the body is not a JSON object
    /// - `InvalidField` if a member is an array or nested object
    pub fn from_json(json: serde_json::Value) -> Result<Self> {
        let map = match json {
            serde_json::Value::Object(map) => map,
            other => {
                return Err(Error::BadRequestPayload(format!(
                    "expected a JSON object, got {}",
                    json_type_name(&other)
                )))
            }
        };

        let mut obj = Object::new();
        for (name, member) in map {
            let value = Value::from_json_member(&name, member)?;
            obj.fields.insert(name, value);
        }
        Ok(obj)
    }

    /// Parse raw request bytes into an object
    pub fn from_json_slice(body: &[u8]) -> Result<Self> {
        let json: serde_json::Value = serde_json::from_slice(body)
            .map_err(|e| Error::BadRequestPayload(e.to_string()))?;
        Self::from_json(json)
    }

    /// Render as a JSON object
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .fields
            .iter()
            .map(|(name, value)| {
                let json = match value {
                    Value::Null => serde_json::Value::Null,
                    Value::Bool(b) => serde_json::Value::Bool(*b),
                    Value::Number(n) => serde_json::Number::from_f64(*n)
                        .map(serde_json::Value::Number)
                        .unwrap_or(serde_json::Value::Null),
                    Value::String(s) => serde_json::Value::String(s.clone()),
                };
                (name.clone(), json)
            })
            .collect();
        serde_json::Value::Object(map)
    }
}

fn json_type_name(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut obj = Object::new();
        for (k, v) in iter {
            obj.insert(k, v);
        }
        obj
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl IntoIterator for Object {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
