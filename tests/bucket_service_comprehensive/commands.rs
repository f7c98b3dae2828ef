//! Command execution through the public executor.

use bucketstore::{Command, Executor, FieldDefinition, Output, StoreConfig};
use serde_json::json;

use crate::common::{init_tracing, TestStore};

#[test]
fn commands_from_json() {
    init_tracing();
    let store = TestStore::new();
    let executor = Executor::new(store.service.clone());

    let script = json!([
        {"BucketCreate": {"name": "users", "schema": [
            {"field": "age", "type": "number", "not-null": true}
        ]}},
        {"ValuePut": {"bucket": "users", "key": "u1", "value": {"age": 30}}},
        {"KeysFind": {"bucket": "users", "criteria": {"age": ["30"]}}}
    ]);
    let commands: Vec<Command> = serde_json::from_value(script).unwrap();
    let results = executor.execute_many(commands);

    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(
        results[2].as_ref().unwrap(),
        &Output::Keys(vec!["u1".into()])
    );
}

#[test]
fn responses_carry_status_and_error_code() {
    let dir = tempfile::tempdir().unwrap();
    let executor = Executor::open(StoreConfig::file(dir.path().join("db.sqlite"))).unwrap();

    let created = executor.respond(Command::BucketCreate {
        name: "users".into(),
        schema: vec![FieldDefinition::new("age", "number")],
    });
    assert_eq!(created.status, 201);

    let bad_type = executor.respond(Command::BucketCreate {
        name: "things".into(),
        schema: vec![FieldDefinition::new("when", "date")],
    });
    assert_eq!(bad_type.status, 400);
    assert_eq!(bad_type.body.unwrap()["error-code"], json!(12));

    let missing = executor.respond(Command::BucketGet {
        bucket: "nope".into(),
    });
    assert_eq!(missing.status, 404);
    assert_eq!(
        missing.body.unwrap()["description"],
        json!("Bucket nope not found")
    );
}
