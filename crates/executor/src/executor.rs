//! The Executor - single entry point for command execution.
//!
//! The Executor is a stateless dispatcher that routes commands to the
//! bucket service and converts results to outputs.

use bucketstore_core::Result;
use bucketstore_storage::StoreConfig;
use tracing::debug;

use crate::handlers::{bucket, value};
use crate::{BucketService, Command, Output, Response};

/// The command executor.
///
/// Holds the service but no state of its own; all state lives in the
/// repository.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` and can be shared across threads.
///
/// # Example
///
/// ```ignore
/// use bucketstore_executor::{Command, Executor};
///
/// let executor = Executor::in_memory();
/// let output = executor.execute(Command::BucketList)?;
/// ```
#[derive(Debug, Clone)]
pub struct Executor {
    service: BucketService,
}

impl Executor {
    /// Create an executor over a service.
    pub fn new(service: BucketService) -> Self {
        Self { service }
    }

    /// Open a `SQLite`-backed executor.
    pub fn open(config: StoreConfig) -> Result<Self> {
        Ok(Self::new(BucketService::open(config)?))
    }

    /// Executor over a non-durable in-memory repository.
    pub fn in_memory() -> Self {
        Self::new(BucketService::in_memory())
    }

    /// The wrapped service.
    pub fn service(&self) -> &BucketService {
        &self.service
    }

    /// Execute a single command.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        let s = &self.service;
        match cmd {
            Command::BucketList => bucket::bucket_list(s),
            Command::BucketCreate { name, schema } => bucket::bucket_create(s, name, schema),
            Command::BucketGet { bucket } => bucket::bucket_get(s, bucket),
            Command::BucketDrop { bucket } => bucket::bucket_drop(s, bucket),
            Command::ValueGet { bucket, key } => value::value_get(s, bucket, key),
            Command::ValuePut { bucket, key, value } => value::value_put(s, bucket, key, value),
            Command::ValueDelete { bucket, key } => value::value_delete(s, bucket, key),
            Command::KeysFind { bucket, criteria } => value::keys_find(s, bucket, criteria),
        }
    }

    /// Execute commands in order, one result per command.
    ///
    /// A failing command does not stop the ones after it.
    pub fn execute_many(&self, cmds: Vec<Command>) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(cmd)).collect()
    }

    /// Execute a command and render the transport response.
    pub fn respond(&self, cmd: Command) -> Response {
        let name = cmd.name();
        let creates = cmd.creates();
        match self.execute(cmd) {
            Ok(output) => Response::from_output(output, creates),
            Err(err) => {
                debug!(target: "bucketstore::executor", command = name, error = %err, "Command failed");
                Response::from_error(&err)
            }
        }
    }
}
