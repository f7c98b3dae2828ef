//! Search semantics: OR within a field, AND across fields.

use bucketstore::{Criteria, Error, Object};

use crate::common::{users_fields, TestStore};

fn seeded() -> TestStore {
    let store = TestStore::new();
    store.service.create_bucket("users", &users_fields()).unwrap();
    let rows = [
        ("u1", 30.0, true, "ann"),
        ("u2", 31.0, false, "bob"),
        ("u3", 30.0, false, "cid"),
        ("u4", 45.5, true, "dee"),
    ];
    for (key, age, active, name) in rows {
        let obj = Object::new()
            .with("age", age)
            .with("active", active)
            .with("name", name);
        store.service.put_value("users", key, &obj).unwrap();
    }
    store
}

#[test]
fn empty_criteria_returns_every_key() {
    let store = seeded();
    assert_eq!(
        store.service.find_keys("users", &Criteria::new()).unwrap(),
        vec!["u1", "u2", "u3", "u4"]
    );
}

#[test]
fn values_of_one_field_are_ored() {
    let store = seeded();
    let criteria = Criteria::from_pairs([("age", "31"), ("age", "45.5")]);
    assert_eq!(
        store.service.find_keys("users", &criteria).unwrap(),
        vec!["u2", "u4"]
    );
}

#[test]
fn fields_are_anded() {
    let store = seeded();
    let criteria = Criteria::new().with("age", "30").with("active", "f");
    assert_eq!(
        store.service.find_keys("users", &criteria).unwrap(),
        vec!["u3"]
    );
}

#[test]
fn unindexed_string_field_is_searchable() {
    let store = seeded();
    let criteria = Criteria::new().with("name", "dee").with("name", "ann");
    assert_eq!(
        store.service.find_keys("users", &criteria).unwrap(),
        vec!["u1", "u4"]
    );
}

#[test]
fn hostile_values_are_data() {
    let store = seeded();
    let criteria = Criteria::new().with("name", "ann' OR '1'='1");
    assert!(store.service.find_keys("users", &criteria).unwrap().is_empty());
}

#[test]
fn criteria_errors() {
    let store = seeded();
    assert!(matches!(
        store
            .service
            .find_keys("users", &Criteria::new().with("height", "1")),
        Err(Error::UnknownField(_))
    ));
    assert!(matches!(
        store
            .service
            .find_keys("users", &Criteria::new().with("active", "yes")),
        Err(Error::InvalidField(_))
    ));
}
