//! Request and response shapes exchanged with clients.
//!
//! All types are serializable; member names follow the wire format.

use bucketstore_core::{Field, FieldDefinition};
use bucketstore_storage::{Bucket, BucketInfo};
use serde::{Deserialize, Serialize};

/// Body of a create-bucket request
///
/// ```json
/// {"name": "users", "schema": [{"field": "age", "type": "number", "not-null": true}]}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBucketRequest {
    /// Bucket name
    pub name: String,
    /// Field definitions, not yet validated
    #[serde(default)]
    pub schema: Vec<FieldDefinition>,
}

/// A bucket as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketRepresentation {
    /// Bucket name as stored
    pub name: String,
    /// Validated fields, in declaration order
    pub schema: Vec<Field>,
}

impl From<&BucketInfo> for BucketRepresentation {
    fn from(info: &BucketInfo) -> Self {
        Self {
            name: info.name.clone(),
            schema: info.schema.fields().to_vec(),
        }
    }
}

impl From<&Bucket> for BucketRepresentation {
    fn from(bucket: &Bucket) -> Self {
        Self::from(bucket.info())
    }
}
