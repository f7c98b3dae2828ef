//! # Bucketstore Executor
//!
//! The public API for bucketstore: schema-typed buckets of key-addressed
//! objects.
//!
//! It provides:
//! - [`BucketService`] - validated bucket and key operations
//! - [`Command`]/[`Output`] - serializable command interface (for transports)
//! - [`Executor`] - dispatches commands and renders [`Response`]s
//!
//! ## Quick Start
//!
//! ```text
//! use bucketstore_executor::BucketService;
//! use bucketstore_core::{Criteria, FieldDefinition, Object};
//!
//! let service = BucketService::open(StoreConfig::file("data.db"))?;
//! service.create_bucket("users", &[FieldDefinition::new("age", "number").required()])?;
//! service.put_value("users", "u1", &Object::new().with("age", 30.0))?;
//! let keys = service.find_keys("users", &Criteria::new().with("age", "30"))?;
//! ```

#![warn(missing_docs)]

mod command;
mod executor;
mod handlers;
mod output;
mod response;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use command::Command;
pub use executor::Executor;
pub use output::Output;
pub use response::Response;
pub use service::BucketService;
pub use types::{BucketRepresentation, CreateBucketRequest};
