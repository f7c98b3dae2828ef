//! Transport responses: a status code plus an optional JSON body.
//!
//! | Outcome | Status | Body |
//! |---------|--------|------|
//! | bucket created | 201 | bucket |
//! | list, get, find | 200 | payload |
//! | put, delete, drop | 204 | none |
//! | error | per kind | `{status, error-code, description}` |

use bucketstore_core::{Error, ErrorResponse};
use serde::Serialize;
use tracing::warn;

use crate::Output;

/// HTTP-style status and JSON body for one command
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// Status code
    pub status: u16,
    /// JSON payload, `None` for no-content responses
    pub body: Option<serde_json::Value>,
}

fn render<T: Serialize>(payload: &T) -> Option<serde_json::Value> {
    match serde_json::to_value(payload) {
        Ok(body) => Some(body),
        Err(err) => {
            warn!(target: "bucketstore::executor", error = %err, "Failed to render response payload");
            None
        }
    }
}

impl Response {
    /// Render a successful output
    ///
    /// `created` selects 201 over 200 for outputs that carry a body.
    pub fn from_output(output: Output, created: bool) -> Self {
        let ok = if created { 201 } else { 200 };
        match output {
            Output::Unit | Output::Stored(_) => Self {
                status: 204,
                body: None,
            },
            Output::BucketNames(names) => Self {
                status: ok,
                body: render(&names),
            },
            Output::Bucket(bucket) => Self {
                status: ok,
                body: render(&bucket),
            },
            Output::Object(obj) => Self {
                status: ok,
                body: Some(obj),
            },
            Output::Keys(keys) => Self {
                status: ok,
                body: render(&keys),
            },
        }
    }

    /// Render an error as `{status, error-code, description}`
    pub fn from_error(err: &Error) -> Self {
        let payload = ErrorResponse::from(err);
        Self {
            status: payload.status,
            body: render(&payload),
        }
    }

    /// True for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
