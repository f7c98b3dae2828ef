//! Bucket and key lifecycle.

use bucketstore::{Error, FieldDefinition, Object, Value};

use crate::common::{users_fields, TestStore};

#[test]
fn create_then_get_returns_same_schema() {
    let store = TestStore::new();
    let created = store.service.create_bucket("users", &users_fields()).unwrap();
    let fetched = store.service.get_bucket("users").unwrap();
    assert_eq!(created.schema(), fetched.schema());

    let names: Vec<_> = fetched.schema().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["age", "active", "name"]);
}

#[test]
fn names_are_case_insensitive_but_keep_spelling() {
    let store = TestStore::new();
    store.service.create_bucket("Users", &users_fields()).unwrap();
    assert!(matches!(
        store.service.create_bucket("USERS", &users_fields()),
        Err(Error::BucketAlreadyExists(_))
    ));
    assert_eq!(store.service.get_bucket("users").unwrap().name(), "Users");
    assert_eq!(store.service.bucket_names().unwrap(), vec!["Users"]);
}

#[test]
fn reserved_names_rejected() {
    let store = TestStore::new();
    for name in ["bucket_catalog", "sqlite_master", "SQLITE_x"] {
        assert!(matches!(
            store.service.create_bucket(name, &users_fields()),
            Err(Error::InvalidBucketName(_))
        ));
    }
    assert!(matches!(
        store
            .service
            .create_bucket("users", &[FieldDefinition::new("key", "string")]),
        Err(Error::InvalidFieldName(_))
    ));
    assert!(matches!(
        store.service.create_bucket(
            "users",
            &[
                FieldDefinition::new("age", "number"),
                FieldDefinition::new("AGE", "number"),
            ]
        ),
        Err(Error::InvalidFieldName(_))
    ));
}

#[test]
fn writes_fully_replace() {
    let store = TestStore::new();
    store.service.create_bucket("users", &users_fields()).unwrap();

    let first = Object::new()
        .with("age", 40.0)
        .with("active", true)
        .with("name", "ann");
    store.service.put_value("users", "u1", &first).unwrap();

    let second = Object::new().with("age", 41.0);
    store.service.put_value("users", "u1", &second).unwrap();

    let back = store.service.get_value("users", "u1").unwrap();
    assert_eq!(back.get("age"), Some(&Value::Number(41.0)));
    assert_eq!(back.get("active"), None);
    assert_eq!(back.get("name"), None);
}

#[test]
fn delete_then_get_is_key_not_found() {
    let store = TestStore::new();
    store.service.create_bucket("users", &users_fields()).unwrap();
    store
        .service
        .put_value("users", "u1", &Object::new().with("age", 1.0))
        .unwrap();
    store.service.delete_value("users", "u1").unwrap();

    let err = store.service.get_value("users", "u1").unwrap_err();
    assert_eq!(err.kind().code(), 3);
    assert!(matches!(
        store.service.delete_value("users", "u1"),
        Err(Error::KeyNotFound { .. })
    ));
}

#[test]
fn drop_removes_bucket_and_keys() {
    let store = TestStore::new();
    store.service.create_bucket("users", &users_fields()).unwrap();
    store
        .service
        .put_value("users", "u1", &Object::new().with("age", 1.0))
        .unwrap();

    store.service.drop_bucket("users").unwrap();
    assert!(matches!(
        store.service.get_bucket("users"),
        Err(Error::BucketNotFound(_))
    ));
    assert!(matches!(
        store.service.get_value("users", "u1"),
        Err(Error::BucketNotFound(_))
    ));
}
