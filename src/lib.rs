//! # jsondb
//!
//! An embedded, file-backed JSON document store with:
//! - One directory per database, one JSON file per collection
//! - Append-only entry logs (`_id`, `ts`, `op`, `doc`)
//! - Atomic write-then-rename appends, fsynced before the rename
//! - Collection name validation that keeps paths inside the database
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Shell (Session)                          │
//! │                 (one command at a time)                      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Database                                │
//! │             (init / load / name validation)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!               ┌───────────────┐        ┌────────────────┐
//!               │CollectionStore│───────▶│  Entry Codec   │
//!               │ create / read │        └────────────────┘
//!               │   / append    │        ┌────────────────┐
//!               └───────┬───────┘───────▶│ Path Validator │
//!                       │                └────────────────┘
//!                       ▼
//!               ┌───────────────┐
//!               │atomic replace │
//!               │(tmp + rename) │
//!               └───────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod path;
pub mod codec;
pub mod storage;
pub mod database;
pub mod shell;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{JsonDbError, PathKind, Result};
pub use config::Config;
pub use database::Database;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of jsondb
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
