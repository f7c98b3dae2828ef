//! Store configuration via `bucketstore.toml`
//!
//! A missing `path` opens a private in-memory database, which is what unit
//! tests use. File-backed stores default to WAL journaling with a small pool
//! of reader connections next to the single writer.

use bucketstore_core::Error;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error as ThisError;

/// Config file name conventionally placed next to the database file.
pub const CONFIG_FILE_NAME: &str = "bucketstore.toml";

/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Default number of reader connections for file-backed stores.
const DEFAULT_READ_POOL_SIZE: usize = 4;
/// Upper bound for the reader pool.
const MAX_READ_POOL_SIZE: usize = 64;

/// Configuration loading errors
#[derive(Debug, ThisError)]
pub enum ConfigError {
    /// Config file could not be read or written
    #[error("config file '{path}': {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`StoreConfig`]
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be rendered as TOML
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A setting is out of range
    #[error("invalid setting: {0}")]
    Invalid(String),
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::unexpected(err)
    }
}

/// `SQLite` journal mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalMode {
    /// Write-ahead log; readers never block the writer
    #[default]
    Wal,
    /// Rollback journal
    Delete,
}

impl JournalMode {
    /// Returns the `SQLite` pragma value.
    pub fn pragma_value(self) -> &'static str {
        match self {
            JournalMode::Wal => "wal",
            JournalMode::Delete => "delete",
        }
    }
}

/// Store configuration loaded from `bucketstore.toml`.
///
/// # Example
///
/// ```toml
/// path = "/var/lib/bucketstore/data.db"
/// busy_timeout_ms = 5000
/// read_pool_size = 4
/// journal_mode = "wal"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Database file; `None` opens a private in-memory database.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// How long a connection waits on a locked database (ms).
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// Reader connections next to the writer. Ignored for in-memory stores.
    #[serde(default = "default_read_pool_size")]
    pub read_pool_size: usize,
    /// Journal mode for file-backed stores.
    #[serde(default)]
    pub journal_mode: JournalMode,
}

fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

fn default_read_pool_size() -> usize {
    DEFAULT_READ_POOL_SIZE
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            read_pool_size: DEFAULT_READ_POOL_SIZE,
            journal_mode: JournalMode::default(),
        }
    }
}

impl StoreConfig {
    /// In-memory store (no file, single connection)
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// File-backed store at `path` with default settings
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Set the reader pool size
    pub fn with_read_pool_size(mut self, size: usize) -> Self {
        self.read_pool_size = size;
        self
    }

    /// Set the busy timeout
    pub fn with_busy_timeout_ms(mut self, ms: u64) -> Self {
        self.busy_timeout_ms = ms;
        self
    }

    /// True when no database file is configured
    pub fn is_in_memory(&self) -> bool {
        self.path.is_none()
    }

    /// Reader connections actually opened
    pub fn effective_read_pool_size(&self) -> usize {
        if self.is_in_memory() {
            0
        } else {
            self.read_pool_size
        }
    }

    /// Check settings are in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.read_pool_size > MAX_READ_POOL_SIZE {
            return Err(ConfigError::Invalid(format!(
                "read_pool_size {} exceeds maximum of {}",
                self.read_pool_size, MAX_READ_POOL_SIZE
            )));
        }
        if let Some(path) = &self.path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("path must not be empty".to_string()));
            }
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Bucketstore configuration
#
# Database file. Omit to run with a private in-memory database.
# path = "bucketstore.db"

# How long a connection waits on a locked database, in milliseconds.
busy_timeout_ms = 5000

# Reader connections opened next to the single writer (file-backed only).
read_pool_size = 4

# Journal mode: "wal" (default) or "delete"
journal_mode = "wal"
"#
    }

    /// Parse config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: StoreConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// A relative `path` setting is resolved against the config file's directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&content)?;
        if let (Some(db_path), Some(dir)) = (config.path.as_ref(), path.parent()) {
            if db_path.is_relative() {
                config.path = Some(dir.join(db_path));
            }
        }
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
