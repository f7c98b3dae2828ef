//! Output enum for command execution results.
//!
//! Every command produces exactly one output variant, documented on the
//! command itself.

use bucketstore_storage::PutOutcome;
use serde::{Deserialize, Serialize};

use crate::types::BucketRepresentation;

/// Successful command execution results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    /// No return value (drop, delete)
    Unit,

    /// Bucket names, in no particular order
    BucketNames(Vec<String>),

    /// One bucket with its schema
    Bucket(BucketRepresentation),

    /// A stored object rendered as JSON; null fields are omitted
    Object(serde_json::Value),

    /// Whether a put created or replaced the key
    Stored(PutOutcome),

    /// Matching keys in ascending order
    Keys(Vec<String>),
}
