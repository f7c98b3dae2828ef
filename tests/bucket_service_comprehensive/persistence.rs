//! Durability across reopen.

use bucketstore::{Criteria, Object, StoreConfig};

use crate::common::{users_fields, TestStore};

#[test]
fn buckets_and_values_survive_reopen() {
    let store = TestStore::new();
    store.service.create_bucket("users", &users_fields()).unwrap();
    store
        .service
        .put_value("users", "u1", &Object::new().with("age", 30.0).with("name", "ann"))
        .unwrap();
    store.service.create_bucket("orders", &users_fields()).unwrap();
    store.service.drop_bucket("orders").unwrap();

    let reopened = store.reopen();
    assert_eq!(reopened.bucket_names().unwrap(), vec!["users"]);
    assert_eq!(
        reopened.get_value("users", "u1").unwrap(),
        Object::new().with("age", 30.0).with("name", "ann")
    );
    assert_eq!(
        reopened
            .find_keys("users", &Criteria::new().with("age", "30"))
            .unwrap(),
        vec!["u1"]
    );
}

#[test]
fn config_file_drives_open() {
    let store = TestStore::new();
    let config_path = store.dir.path().join(bucketstore::CONFIG_FILE_NAME);
    std::fs::write(
        &config_path,
        "path = \"from_config.db\"\nread_pool_size = 1\njournal_mode = \"delete\"\n",
    )
    .unwrap();

    let config = StoreConfig::from_file(&config_path).unwrap();
    assert_eq!(config.path, Some(store.dir.path().join("from_config.db")));

    let service = bucketstore::BucketService::open(config).unwrap();
    service.create_bucket("users", &users_fields()).unwrap();
    assert!(store.dir.path().join("from_config.db").exists());
}
