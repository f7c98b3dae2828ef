//! Name and size limits shared by validation and storage

/// Maximum bucket name length (characters)
pub const MAX_BUCKET_NAME_LENGTH: usize = 30;

/// Maximum field name length (characters)
pub const MAX_FIELD_NAME_LENGTH: usize = 30;

/// Maximum key length (characters); also the width of the key column
pub const MAX_KEY_LENGTH: usize = 50;

/// Name of the catalog table; unavailable as a bucket name
pub const CATALOG_TABLE: &str = "bucket_catalog";

/// Name of the primary-key column of every bucket table; unavailable as a field name
pub const KEY_COLUMN: &str = "key";

/// Table-name prefix owned by the physical store
pub const RESERVED_TABLE_PREFIX: &str = "sqlite_";
