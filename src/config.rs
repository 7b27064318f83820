//! Configuration for jsondb
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Extension of every collection file (`<name>.json`)
pub const COLLECTION_EXTENSION: &str = "json";

/// Suffix marking a write-in-progress file next to its target
pub const TEMP_SUFFIX: &str = ".tmp";

/// Main configuration for a database handle
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// The database directory. Internal structure:
    ///   {data_dir}/
    ///     ├── users.json       (one file per collection)
    ///     └── orders.json
    pub data_dir: PathBuf,

    /// What gets fsynced during an atomic replace
    pub sync_strategy: SyncStrategy,
}

/// Sync strategy for the atomic replace protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// fsync the temporary file before renaming it
    File,

    /// fsync the temporary file, then the parent directory after the rename
    FileAndDirectory,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./jsondb_data"),
            sync_strategy: SyncStrategy::FileAndDirectory,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the database directory
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
