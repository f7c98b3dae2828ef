//! Bucket Service Tests
//!
//! End-to-end tests through the public `bucketstore` API:
//! - Bucket lifecycle against a file-backed store
//! - Object round trips and full replacement
//! - Search semantics
//! - Command execution and response rendering
//! - Persistence across reopen

mod common;

mod commands;
mod lifecycle;
mod persistence;
mod scenario;
mod search;
