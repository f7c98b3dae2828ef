//! Value command handlers.

use std::collections::BTreeMap;

use bucketstore_core::{Criteria, Result};

use crate::{BucketService, Output};

/// Handle ValueGet command.
pub fn value_get(service: &BucketService, bucket: String, key: String) -> Result<Output> {
    let obj = service.get_value(&bucket, &key)?;
    Ok(Output::Object(obj.to_json()))
}

/// Handle ValuePut command.
pub fn value_put(
    service: &BucketService,
    bucket: String,
    key: String,
    value: serde_json::Value,
) -> Result<Output> {
    let outcome = service.put_json(&bucket, &key, value)?;
    Ok(Output::Stored(outcome))
}

/// Handle ValueDelete command.
pub fn value_delete(service: &BucketService, bucket: String, key: String) -> Result<Output> {
    service.delete_value(&bucket, &key)?;
    Ok(Output::Unit)
}

/// Handle KeysFind command.
pub fn keys_find(
    service: &BucketService,
    bucket: String,
    criteria: BTreeMap<String, Vec<String>>,
) -> Result<Output> {
    let mut raw = Criteria::new();
    for (field, values) in criteria {
        raw.set(field, values);
    }
    Ok(Output::Keys(service.find_keys(&bucket, &raw)?))
}
