//! Bucket command handlers.

use bucketstore_core::{FieldDefinition, Result};

use crate::types::BucketRepresentation;
use crate::{BucketService, Output};

/// Handle BucketList command.
pub fn bucket_list(service: &BucketService) -> Result<Output> {
    Ok(Output::BucketNames(service.bucket_names()?))
}

/// Handle BucketCreate command.
pub fn bucket_create(
    service: &BucketService,
    name: String,
    schema: Vec<FieldDefinition>,
) -> Result<Output> {
    let bucket = service.create_bucket(&name, &schema)?;
    Ok(Output::Bucket(BucketRepresentation::from(&bucket)))
}

/// Handle BucketGet command.
pub fn bucket_get(service: &BucketService, bucket: String) -> Result<Output> {
    let bucket = service.get_bucket(&bucket)?;
    Ok(Output::Bucket(BucketRepresentation::from(&bucket)))
}

/// Handle BucketDrop command.
pub fn bucket_drop(service: &BucketService, bucket: String) -> Result<Output> {
    service.drop_bucket(&bucket)?;
    Ok(Output::Unit)
}
