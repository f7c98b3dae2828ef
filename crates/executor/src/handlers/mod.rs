//! Command handlers organized by category.
//!
//! | Module | Commands |
//! |--------|----------|
//! | `bucket` | BucketList, BucketCreate, BucketGet, BucketDrop |
//! | `value` | ValueGet, ValuePut, ValueDelete, KeysFind |

pub mod bucket;
pub mod value;
