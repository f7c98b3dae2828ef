//! The reference walkthrough: create, write, reject, read, search.

use bucketstore::{Criteria, Error, FieldDefinition, Object, PutOutcome};

use crate::common::TestStore;

#[test]
fn users_walkthrough() {
    let store = TestStore::new();
    let service = &store.service;

    service
        .create_bucket(
            "users",
            &[
                FieldDefinition::new("age", "number").required(),
                FieldDefinition::new("active", "bool"),
            ],
        )
        .unwrap();

    let u1 = Object::new().with("age", 30.0).with("active", true);
    assert_eq!(
        service.put_value("users", "u1", &u1).unwrap(),
        PutOutcome::Created
    );

    let err = service
        .put_value("users", "u2", &Object::new().with("active", false))
        .unwrap_err();
    assert!(matches!(err, Error::MissingField(ref f) if f == "age"));

    assert_eq!(service.get_value("users", "u1").unwrap(), u1);
    assert_eq!(
        service
            .find_keys("users", &Criteria::new().with("age", "30"))
            .unwrap(),
        vec!["u1"]
    );
}

#[test]
fn invalid_bucket_name_creates_nothing() {
    let store = TestStore::new();
    let err = store
        .service
        .create_bucket("1bad", &[FieldDefinition::new("age", "number")])
        .unwrap_err();
    assert!(matches!(err, Error::InvalidBucketName(_)));
    assert!(store.service.bucket_names().unwrap().is_empty());
}
