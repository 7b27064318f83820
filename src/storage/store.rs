//! Collection Store
//!
//! Owns the collection files inside one database directory.
//!
//! ## Responsibilities
//! - Create empty collection files, never overwriting anything
//! - Read and decode a whole collection
//! - Append entries through the atomic replace protocol

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::codec::{decode_collection, encode_collection, Collection, Entry};
use crate::config::{SyncStrategy, COLLECTION_EXTENSION};
use crate::error::{JsonDbError, PathKind, Result};
use crate::path::{path_exists, validate_name};

use super::atomic;

/// Manages the collection files of a database directory
///
/// Every public method validates the collection name before building a
/// path from it.
#[derive(Debug, Clone)]
pub struct CollectionStore {
    /// Directory holding `<name>.json` files
    dir: PathBuf,

    sync_strategy: SyncStrategy,
}

impl CollectionStore {
    pub fn new(dir: impl Into<PathBuf>, sync_strategy: SyncStrategy) -> Self {
        Self {
            dir: dir.into(),
            sync_strategy,
        }
    }

    /// Create an empty collection.
    ///
    /// Fails with `AlreadyExists` if a file or directory already occupies
    /// the collection path. The file is opened with `create_new`, so an
    /// object appearing between the check and the open is not overwritten
    /// either.
    pub fn create(&self, name: &str) -> Result<()> {
        validate_name(name)?;
        let path = self.collection_path(name);

        if let Some(kind) = path_exists(&path)? {
            return Err(JsonDbError::AlreadyExists { path, kind });
        }

        let bytes = encode_collection(&Collection::new())?;

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                let kind = path_exists(&path)?.unwrap_or(PathKind::File);
                return Err(JsonDbError::AlreadyExists { path, kind });
            }
            Err(e) => return Err(e.into()),
        };

        if let Err(e) = write_synced(&mut file, &bytes) {
            drop(file);
            // We created it, so a half-written file is ours to remove
            if let Err(cleanup) = fs::remove_file(&path) {
                tracing::warn!(
                    path = %path.display(),
                    error = %cleanup,
                    "failed to remove partial collection file"
                );
            }
            return Err(e);
        }
        drop(file);

        if self.sync_strategy == SyncStrategy::FileAndDirectory {
            atomic::sync_after_commit(&path);
        }

        tracing::info!(collection = name, path = %path.display(), "created collection");
        Ok(())
    }

    /// Read and decode the whole collection
    pub fn read_all(&self, name: &str) -> Result<Collection> {
        validate_name(name)?;
        let path = self.collection_path(name);

        let bytes = match fs::read(&path) {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(JsonDbError::NotFound(path));
            }
            Err(e) => return Err(e.into()),
        };

        let collection = decode_collection(&bytes)?;
        tracing::debug!(collection = name, entries = collection.len(), "read collection");
        Ok(collection)
    }

    /// Append an entry.
    ///
    /// Steps:
    /// 1. Read the current collection (a corrupt file fails the append)
    /// 2. Push the entry in memory
    /// 3. Atomically replace the file with the re-encoded collection
    ///
    /// On failure the collection file is left exactly as it was.
    pub fn append(&self, name: &str, entry: Entry) -> Result<()> {
        let mut collection = self.read_all(name)?;
        let id = entry.id.clone();
        let op = entry.operation.as_str();
        collection.push(entry);

        let bytes = encode_collection(&collection)?;
        let path = self.collection_path(name);

        atomic::replace_file(&path, self.sync_strategy, |file| {
            file.write_all(&bytes)?;
            Ok(())
        })?;

        tracing::debug!(
            collection = name,
            id = %id,
            op,
            entries = collection.len(),
            "appended entry"
        );
        Ok(())
    }

    /// Sorted names of the collections in the directory
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for dir_entry in fs::read_dir(&self.dir)? {
            let dir_entry = dir_entry?;
            if !dir_entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = Self::parse_collection_name(&dir_entry.path()) {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Caller must have validated `name`
    fn collection_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, COLLECTION_EXTENSION))
    }

    /// "users.json" → Some("users"); temp files and invalid names → None
    fn parse_collection_name(path: &Path) -> Option<String> {
        if path.extension()?.to_str()? != COLLECTION_EXTENSION {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        validate_name(stem).ok()?;
        Some(stem.to_string())
    }
}

fn write_synced(file: &mut File, bytes: &[u8]) -> Result<()> {
    file.write_all(bytes)?;
    file.sync_all()?;
    Ok(())
}
