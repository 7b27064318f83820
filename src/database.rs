//! Database Module
//!
//! A database is a directory of collection files.
//!
//! ## Responsibilities
//! - Initialize a new database directory (never reusing an existing one)
//! - Attach to an existing database directory
//! - Validate collection names and forward to the `CollectionStore`
//! - Turn user documents into `insert` entries

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::codec::{build_entry, Collection, Operation};
use crate::config::Config;
use crate::error::{JsonDbError, PathKind, Result};
use crate::path::{path_exists, validate_name};
use crate::storage::CollectionStore;

/// Handle to a database directory
///
/// Holds no open files; every call opens and releases what it needs.
#[derive(Debug, Clone)]
pub struct Database {
    /// Database configuration
    config: Config,

    /// Collection files inside `config.data_dir`
    store: CollectionStore,
}

impl Database {
    /// Create the database directory (and missing parents)
    ///
    /// Fails with `AlreadyExists` if anything is already at the path.
    pub fn initialize(path: impl AsRef<Path>) -> Result<Self> {
        Self::initialize_with_config(Self::config_for(path.as_ref()))
    }

    pub fn initialize_with_config(config: Config) -> Result<Self> {
        if let Some(kind) = path_exists(&config.data_dir)? {
            return Err(JsonDbError::AlreadyExists {
                path: config.data_dir,
                kind,
            });
        }

        fs::create_dir_all(&config.data_dir)?;
        tracing::info!(path = %config.data_dir.display(), "initialized database");

        Ok(Self::from_config(config))
    }

    /// Attach to an existing database directory
    ///
    /// Fails with `NotFound` if nothing is there and `NotADirectory` for a
    /// regular file. Contents are not inspected here; a bad collection file
    /// only surfaces when that collection is read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_config(Self::config_for(path.as_ref()))
    }

    pub fn load_with_config(config: Config) -> Result<Self> {
        match path_exists(&config.data_dir)? {
            Some(PathKind::Directory) => {}
            Some(PathKind::File) => return Err(JsonDbError::NotADirectory(config.data_dir)),
            None => return Err(JsonDbError::NotFound(config.data_dir)),
        }

        tracing::info!(path = %config.data_dir.display(), "loaded database");
        Ok(Self::from_config(config))
    }

    /// Create an empty collection
    pub fn create_collection(&self, name: &str) -> Result<()> {
        validate_name(name)?;
        self.store.create(name)
    }

    /// Append an `insert` entry carrying `document` to a collection
    pub fn insert_record<T: Serialize + ?Sized>(&self, collection: &str, document: &T) -> Result<()> {
        validate_name(collection)?;
        let entry = build_entry(Operation::Insert, Some(document))?;
        self.store.append(collection, entry)
    }

    /// Read every entry of a collection, in append order
    pub fn read_collection(&self, name: &str) -> Result<Collection> {
        validate_name(name)?;
        self.store.read_all(name)
    }

    /// Sorted names of the collections in this database
    pub fn list_collections(&self) -> Result<Vec<String>> {
        self.store.list()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the database directory
    pub fn base_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn config_for(path: &Path) -> Config {
        Config::builder().data_dir(path).build()
    }

    fn from_config(config: Config) -> Self {
        let store = CollectionStore::new(&config.data_dir, config.sync_strategy);
        Self { config, store }
    }
}
