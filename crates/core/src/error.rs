//! Error types for bucketstore
//!
//! This module defines every error kind the engine can report.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Each variant carries the offending name or value. The transport layer only
//! needs [`Error::kind`] (stable code + status) and [`Error::description`];
//! storage causes stay behind [`Error::Unexpected`] and are reachable through
//! [`std::error::Error::source`] only.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Boxed cause carried by [`Error::Unexpected`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for bucketstore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the bucket store
#[derive(Debug, Error)]
pub enum Error {
    // ==================== Bucket ====================
    /// A bucket with this name is already in the catalog
    #[error("Bucket {0} already exists")]
    BucketAlreadyExists(String),

    /// No catalog entry for this bucket name
    #[error("Bucket {0} not found")]
    BucketNotFound(String),

    // ==================== Key ====================
    /// Key is not present in the bucket
    #[error("Key {key} not found on bucket {bucket}")]
    KeyNotFound {
        /// Requested key
        key: String,
        /// Bucket that was searched
        bucket: String,
    },

    /// Key violates the key grammar
    #[error("Invalid key {0}")]
    InvalidKey(String),

    // ==================== Object / Criteria ====================
    /// Required field absent from a written object
    #[error("Missing field: {0}")]
    MissingField(String),

    /// Field value does not match the declared type
    #[error("Invalid value on field {0}")]
    InvalidField(String),

    /// Field name not declared by the schema
    #[error("Unknown field: {0}")]
    UnknownField(String),

    // ==================== Request ====================
    /// Request body could not be interpreted
    #[error("Bad request: Invalid body")]
    BadRequestPayload(String),

    // ==================== Schema ====================
    /// Bucket name violates the name grammar or is reserved
    #[error("Invalid bucket name {0}")]
    InvalidBucketName(String),

    /// Schema has no fields
    #[error("Schema must contain at least one field")]
    SchemaMissing,

    /// Field name violates the name grammar, is duplicated or reserved
    #[error("Invalid field name {0}")]
    InvalidFieldName(String),

    /// Declared field type is not one of string, number, bool
    #[error("Invalid field type {0}")]
    InvalidFieldType(String),

    // ==================== Generic ====================
    /// Any unclassified failure of the physical store
    #[error("Unexpected error")]
    Unexpected(#[source] BoxError),
}

impl Error {
    /// Wrap an underlying failure as [`Error::Unexpected`]
    pub fn unexpected<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Error::Unexpected(err.into())
    }

    /// Build a [`Error::KeyNotFound`] for `key` in `bucket`
    pub fn key_not_found(key: impl Into<String>, bucket: impl Into<String>) -> Self {
        Error::KeyNotFound {
            key: key.into(),
            bucket: bucket.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::BucketAlreadyExists(_) => ErrorKind::BucketAlreadyExists,
            Error::BucketNotFound(_) => ErrorKind::BucketNotFound,
            Error::KeyNotFound { .. } => ErrorKind::KeyNotFound,
            Error::InvalidKey(_) => ErrorKind::InvalidKey,
            Error::MissingField(_) => ErrorKind::MissingField,
            Error::InvalidField(_) => ErrorKind::InvalidField,
            Error::UnknownField(_) => ErrorKind::UnknownField,
            Error::BadRequestPayload(_) => ErrorKind::BadRequestPayload,
            Error::InvalidBucketName(_) => ErrorKind::InvalidBucketName,
            Error::SchemaMissing => ErrorKind::SchemaMissing,
            Error::InvalidFieldName(_) => ErrorKind::InvalidFieldName,
            Error::InvalidFieldType(_) => ErrorKind::InvalidFieldType,
            Error::Unexpected(_) => ErrorKind::UnexpectedError,
        }
    }

    /// Human-readable description, safe to show to clients
    pub fn description(&self) -> String {
        self.to_string()
    }
}

/// Error classification with stable transport codes
///
/// | Kind | Code | Status |
/// |------|------|--------|
/// | BucketAlreadyExists | 1 | 409 |
/// | BucketNotFound | 2 | 404 |
/// | KeyNotFound | 3 | 404 |
/// | InvalidKey | 4 | 400 |
/// | MissingField | 5 | 422 |
/// | InvalidField | 6 | 422 |
/// | UnknownField | 7 | 422 |
/// | BadRequestPayload | 8 | 400 |
/// | InvalidBucketName | 9 | 400 |
/// | SchemaMissing | 10 | 400 |
/// | InvalidFieldName | 11 | 400 |
/// | InvalidFieldType | 12 | 400 |
/// | UnexpectedError | 13 | 500 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Conflict: name taken
    BucketAlreadyExists = 1,
    /// Not found: bucket
    BucketNotFound = 2,
    /// Not found: key
    KeyNotFound = 3,
    /// Bad request: key grammar
    InvalidKey = 4,
    /// Unprocessable: required field absent
    MissingField = 5,
    /// Unprocessable: wrong value type
    InvalidField = 6,
    /// Unprocessable: undeclared field
    UnknownField = 7,
    /// Bad request: body
    BadRequestPayload = 8,
    /// Bad request: bucket name
    InvalidBucketName = 9,
    /// Bad request: empty schema
    SchemaMissing = 10,
    /// Bad request: field name
    InvalidFieldName = 11,
    /// Bad request: field type
    InvalidFieldType = 12,
    /// Internal: storage failure
    UnexpectedError = 13,
}

impl ErrorKind {
    /// Stable integer code reported to clients
    pub fn code(self) -> u16 {
        self as u16
    }

    /// HTTP status the transport should answer with
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::BucketAlreadyExists => 409,
            ErrorKind::BucketNotFound | ErrorKind::KeyNotFound => 404,
            ErrorKind::MissingField | ErrorKind::InvalidField | ErrorKind::UnknownField => 422,
            ErrorKind::InvalidKey
            | ErrorKind::BadRequestPayload
            | ErrorKind::InvalidBucketName
            | ErrorKind::SchemaMissing
            | ErrorKind::InvalidFieldName
            | ErrorKind::InvalidFieldType => 400,
            ErrorKind::UnexpectedError => 500,
        }
    }
}

/// Error payload rendered by the transport: `{status, error-code, description}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// HTTP status
    pub status: u16,
    /// Stable error code
    #[serde(rename = "error-code")]
    pub error_code: u16,
    /// Human-readable description
    pub description: String,
}

impl From<&Error> for ErrorResponse {
    fn from(err: &Error) -> Self {
        let kind = err.kind();
        ErrorResponse {
            status: kind.status_code(),
            error_code: kind.code(),
            description: err.description(),
        }
    }
}
