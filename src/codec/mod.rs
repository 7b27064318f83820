//! Entry Codec
//!
//! Turns user documents into durable log entries and converts whole
//! collections to and from their file format.
//!
//! ## Entry Format
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │ "_id"  │ 32 lowercase hex chars (128 random bits)    │
//! │ "ts"   │ int64 nanoseconds since the unix epoch      │
//! │ "op"   │ "insert" | "query" | "delete" | "update"    │
//! │ "doc"  │ any JSON value, omitted when absent         │
//! └──────────────────────────────────────────────────────┘
//! ```

mod collection;
mod entry;

pub use collection::{decode_collection, encode_collection, Collection};
pub use entry::{build_entry, Entry, Operation};
