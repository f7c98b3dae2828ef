//! Command enum defining all bucketstore operations.
//!
//! Commands are the "instruction set" of the service. Every operation a
//! client can request is represented as a variant of this enum.
//!
//! Commands are:
//! - **Self-contained**: All parameters needed for execution are in the variant
//! - **Serializable**: Can be converted to/from JSON for any transport
//! - **Unvalidated**: Names, keys and payloads are checked on execution

use std::collections::BTreeMap;

use bucketstore_core::FieldDefinition;
use serde::{Deserialize, Serialize};

/// A command is a self-contained, serializable operation.
///
/// # Command Categories
///
/// | Category | Count | Description |
/// |----------|-------|-------------|
/// | Bucket | 4 | Bucket lifecycle and listing |
/// | Value | 4 | Key reads, writes, deletes and search |
///
/// # Example
///
/// ```ignore
/// use bucketstore_executor::Command;
///
/// let cmd = Command::ValuePut {
///     bucket: "users".into(),
///     key: "u1".into(),
///     value: serde_json::json!({"age": 30}),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    // ==================== Bucket (4) ====================
    /// List every bucket name.
    /// Returns: `Output::BucketNames`
    BucketList,

    /// Create a bucket.
    /// Returns: `Output::Bucket`
    BucketCreate {
        /// Bucket name
        name: String,
        /// Field definitions
        #[serde(default)]
        schema: Vec<FieldDefinition>,
    },

    /// Describe a bucket.
    /// Returns: `Output::Bucket`
    BucketGet {
        /// Bucket name
        bucket: String,
    },

    /// Drop a bucket and every key in it.
    /// Returns: `Output::Unit`
    BucketDrop {
        /// Bucket name
        bucket: String,
    },

    // ==================== Value (4) ====================
    /// Read the object stored under a key.
    /// Returns: `Output::Object`
    ValueGet {
        /// Bucket name
        bucket: String,
        /// Key
        key: String,
    },

    /// Store a JSON object under a key, replacing any previous value.
    /// Returns: `Output::Stored`
    ValuePut {
        /// Bucket name
        bucket: String,
        /// Key
        key: String,
        /// Object body
        value: serde_json::Value,
    },

    /// Delete a key.
    /// Returns: `Output::Unit`
    ValueDelete {
        /// Bucket name
        bucket: String,
        /// Key
        key: String,
    },

    /// Find keys by field values.
    /// Returns: `Output::Keys`
    KeysFind {
        /// Bucket name
        bucket: String,
        /// Field → allowed textual values; empty matches every key
        #[serde(default)]
        criteria: BTreeMap<String, Vec<String>>,
    },
}

impl Command {
    /// Variant name, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::BucketList => "BucketList",
            Command::BucketCreate { .. } => "BucketCreate",
            Command::BucketGet { .. } => "BucketGet",
            Command::BucketDrop { .. } => "BucketDrop",
            Command::ValueGet { .. } => "ValueGet",
            Command::ValuePut { .. } => "ValuePut",
            Command::ValueDelete { .. } => "ValueDelete",
            Command::KeysFind { .. } => "KeysFind",
        }
    }

    /// True for commands that create a resource
    pub fn creates(&self) -> bool {
        matches!(self, Command::BucketCreate { .. })
    }
}
