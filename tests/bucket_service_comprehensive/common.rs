//! Shared helpers for the bucket service suite.

#![allow(dead_code)]

use std::sync::Once;

use bucketstore::{BucketService, FieldDefinition, StoreConfig};
use tempfile::TempDir;

static INIT_TRACING: Once = Once::new();

/// Install a test-writer subscriber once per process.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// File-backed service in a fresh temporary directory.
pub struct TestStore {
    pub service: BucketService,
    pub dir: TempDir,
}

impl TestStore {
    pub fn new() -> Self {
        init_tracing();
        let dir = TempDir::new().unwrap();
        let service = BucketService::open(StoreConfig::file(dir.path().join("bucketstore.db")))
            .unwrap();
        Self { service, dir }
    }

    /// Open a second service over the same database file.
    pub fn reopen(&self) -> BucketService {
        BucketService::open(StoreConfig::file(self.dir.path().join("bucketstore.db"))).unwrap()
    }
}

/// `users` schema used across the suite.
pub fn users_fields() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition::new("age", "number").required().indexed(),
        FieldDefinition::new("active", "bool").indexed(),
        FieldDefinition::new("name", "string"),
    ]
}
