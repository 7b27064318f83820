//! Error types for jsondb
//!
//! Provides a unified error type for all operations.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using JsonDbError
pub type Result<T> = std::result::Result<T, JsonDbError>;

/// Kind of filesystem object found at a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    File,
    Directory,
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathKind::File => write!(f, "file"),
            PathKind::Directory => write!(f, "directory"),
        }
    }
}

/// Unified error type for jsondb operations
#[derive(Debug, Error)]
pub enum JsonDbError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Naming / Path Errors
    // -------------------------------------------------------------------------
    #[error("invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// `kind` tells a file conflict apart from a directory occupying the name
    #[error("{kind} already exists at {}", .path.display())]
    AlreadyExists { path: PathBuf, kind: PathKind },

    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("collection is corrupt: {0}")]
    CorruptCollection(String),

    #[error("failed to encode document: {0}")]
    Encode(String),

    #[error("document cannot be empty")]
    EmptyDocument,

    #[error("failed to generate entry id: {0}")]
    IdGeneration(String),

    // -------------------------------------------------------------------------
    // Shell Errors
    // -------------------------------------------------------------------------
    #[error("no database loaded. Use 'init' or 'load' command first")]
    NoDatabaseLoaded,

    #[error("{0}")]
    Command(String),

    #[error("{0} is not supported yet")]
    Unsupported(&'static str),
}
