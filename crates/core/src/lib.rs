//! Core types for bucketstore
//!
//! This crate defines the foundational types used throughout the system:
//! - DataType / Field / Schema: bucket shape declarations
//! - Value / Object: the tagged-union value model and key-addressed objects
//! - Criteria / CriteriaSet: search filters, raw and normalized
//! - Error / ErrorKind: error kinds with stable transport codes
//! - validate: name, key, schema, object and criteria checks

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod criteria;
pub mod error;
pub mod limits;
pub mod types;
pub mod validate;
pub mod value;

pub use criteria::{Criteria, CriteriaSet, Term};
pub use error::{BoxError, Error, ErrorKind, ErrorResponse, Result};
pub use types::{DataType, Field, FieldDefinition, Schema};
pub use value::{Object, Value};
