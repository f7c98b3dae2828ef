//! File-backed repository tests
//!
//! These tests verify that:
//! 1. Buckets and values survive closing and reopening the store
//! 2. The physical layout (catalog row, table, indexes) matches the schema
//! 3. Reads through the reader pool observe committed writes
//! 4. A failed bucket creation leaves neither catalog entry nor table

use bucketstore_core::{Criteria, DataType, Error, Field, Object, Schema, Value};
use bucketstore_storage::{PutOutcome, Repository, SqliteRepository, StoreConfig};
use rusqlite::Connection;
use tempfile::tempdir;

fn users_schema() -> Schema {
    Schema::new(vec![
        Field::new("age", DataType::Number).required().indexed(),
        Field::new("active", DataType::Bool).indexed(),
        Field::new("name", DataType::String),
    ])
}

#[test]
fn test_data_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.db");

    {
        let repo = SqliteRepository::open(StoreConfig::file(&path)).unwrap();
        repo.create_bucket("users", &users_schema()).unwrap();
        let obj = Object::new().with("age", 30.0).with("name", "ann");
        repo.put_value("users", "u1", &obj).unwrap();
    }

    let repo = SqliteRepository::open(StoreConfig::file(&path)).unwrap();
    let info = repo.get_bucket("users").unwrap().unwrap();
    assert_eq!(info.schema, users_schema());

    let back = repo.get_value("users", "u1").unwrap().unwrap();
    assert_eq!(back.get("age"), Some(&Value::Number(30.0)));
    assert_eq!(back.get("name"), Some(&Value::from("ann")));
    assert_eq!(back.get("active"), None);
}

#[test]
fn test_physical_layout() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.db");
    let repo = SqliteRepository::open(StoreConfig::file(&path)).unwrap();
    repo.create_bucket("users", &users_schema()).unwrap();

    let conn = Connection::open(&path).unwrap();
    let catalog_rows: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM bucket_catalog WHERE bucket_name = 'users'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(catalog_rows, 1);

    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'index' AND name LIKE 'ix:%' ORDER BY name")
        .unwrap();
    let indexes: Vec<String> = stmt
        .query_map([], |r| r.get(0))
        .unwrap()
        .map(|r| r.unwrap())
        .collect();
    assert_eq!(indexes, vec!["ix:users:active", "ix:users:age"]);

    let columns: i64 = conn
        .query_row("SELECT COUNT(*) FROM pragma_table_info('users')", [], |r| {
            r.get(0)
        })
        .unwrap();
    assert_eq!(columns, 4);
}

#[test]
fn test_drop_removes_table_and_indexes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.db");
    let repo = SqliteRepository::open(StoreConfig::file(&path)).unwrap();
    repo.create_bucket("users", &users_schema()).unwrap();
    repo.drop_bucket("users").unwrap();

    let conn = Connection::open(&path).unwrap();
    let leftovers: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE tbl_name = 'users'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(leftovers, 0);
}

#[test]
fn test_reader_pool_sees_committed_writes() {
    let dir = tempdir().unwrap();
    let config = StoreConfig::file(dir.path().join("store.db")).with_read_pool_size(2);
    let repo = SqliteRepository::open(config).unwrap();
    repo.create_bucket("users", &users_schema()).unwrap();

    for i in 0..6 {
        let key = format!("u{i}");
        let obj = Object::new().with("age", f64::from(i)).with("active", i % 2 == 0);
        assert_eq!(
            repo.put_value("users", &key, &obj).unwrap(),
            PutOutcome::Created
        );
        // Alternating readers must all see the write
        assert_eq!(repo.get_value("users", &key).unwrap(), Some(obj.clone()));
        assert_eq!(repo.get_value("users", &key).unwrap(), Some(obj));
    }

    let criteria = Criteria::new()
        .with("active", "true")
        .normalize(&users_schema())
        .unwrap();
    assert_eq!(
        repo.find_keys("users", &criteria).unwrap(),
        vec!["u0", "u2", "u4"]
    );
}

#[test]
fn test_failed_create_leaves_nothing_behind() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.db");
    let repo = SqliteRepository::open(StoreConfig::file(&path)).unwrap();

    // A table that exists outside the catalog makes the DDL fail mid-transaction
    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch("CREATE TABLE \"orders\" (x INTEGER)").unwrap();
    }

    let err = repo.create_bucket("orders", &users_schema()).unwrap_err();
    assert!(matches!(err, Error::Unexpected(_)));
    assert!(repo.get_bucket("orders").unwrap().is_none());
    assert!(repo.bucket_names().unwrap().is_empty());
}

#[test]
fn test_delete_journal_mode() {
    let dir = tempdir().unwrap();
    let config = StoreConfig::from_toml_str(&format!(
        "path = {:?}\njournal_mode = \"delete\"\nread_pool_size = 1\n",
        dir.path().join("store.db")
    ))
    .unwrap();
    let repo = SqliteRepository::open(config).unwrap();
    repo.create_bucket("users", &users_schema()).unwrap();
    repo.put_value("users", "u1", &Object::new().with("age", 1.0))
        .unwrap();
    assert!(repo.delete_value("users", "u1").unwrap());
    assert!(!repo.delete_value("users", "u1").unwrap());
}
