//! Collection file codec
//!
//! Serializes the whole collection document:
//! ```text
//! {
//!   "entries": [ { "_id": ..., "ts": ..., "op": ..., "doc": ... }, ... ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{JsonDbError, Result};

use super::Entry;

/// The on-disk unit of storage: an ordered, append-only sequence of entries
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Collection {
    /// Always serialized, even when empty
    pub entries: Vec<Entry>,
}

/// Decode target that tolerates a missing or `null` entries field
#[derive(Deserialize)]
struct StoredCollection {
    #[serde(default)]
    entries: Option<Vec<Entry>>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry at the end of the log
    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in append order
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }
}

/// Encode a collection as pretty-printed JSON with a trailing newline
pub fn encode_collection(collection: &Collection) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(collection)
        .map_err(|e| JsonDbError::Encode(e.to_string()))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Decode a collection file.
///
/// Empty (or whitespace-only) input is a valid empty collection: it is
/// what a created-but-never-written file looks like.
pub fn decode_collection(bytes: &[u8]) -> Result<Collection> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Collection::new());
    }

    let stored: StoredCollection = serde_json::from_slice(bytes)
        .map_err(|e| JsonDbError::CorruptCollection(e.to_string()))?;

    Ok(Collection {
        entries: stored.entries.unwrap_or_default(),
    })
}
