//! Entry definitions
//!
//! Defines the structure of individual collection log entries.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{JsonDbError, Result};

/// Number of random bytes in an entry id (hex-encoded to 32 chars)
const ID_BYTES: usize = 16;

/// A single immutable entry in a collection log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Random 128-bit id, lowercase hex
    #[serde(rename = "_id")]
    pub id: String,

    /// Creation time (unix nanos). Display ordering only.
    #[serde(rename = "ts")]
    pub timestamp: i64,

    /// The operation that produced this entry
    #[serde(rename = "op")]
    pub operation: Operation,

    /// Document payload, `None` for operations without one.
    /// `Some(Value::Null)` is written the same as `None`.
    #[serde(rename = "doc", default, skip_serializing_if = "is_absent")]
    pub document: Option<Value>,
}

/// Operations that can be logged
///
/// Only `Insert` is produced today. The others are reserved for an
/// execution layer over the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Insert,
    Query,
    Delete,
    Update,
}

impl Operation {
    /// Whether entries of this kind must carry a document
    pub fn requires_document(self) -> bool {
        match self {
            Operation::Insert | Operation::Update => true,
            Operation::Query | Operation::Delete => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Insert => "insert",
            Operation::Query => "query",
            Operation::Delete => "delete",
            Operation::Update => "update",
        }
    }
}

/// Build a fresh entry for `operation` carrying `document`.
///
/// A missing or `null` document is rejected with `EmptyDocument` when the
/// operation requires one.
pub fn build_entry<T: Serialize + ?Sized>(
    operation: Operation,
    document: Option<&T>,
) -> Result<Entry> {
    let document = match document {
        Some(doc) => {
            let value = serde_json::to_value(doc)
                .map_err(|e| JsonDbError::Encode(e.to_string()))?;
            if value.is_null() {
                None
            } else {
                Some(value)
            }
        }
        None => None,
    };

    if document.is_none() && operation.requires_document() {
        return Err(JsonDbError::EmptyDocument);
    }

    Ok(Entry {
        id: generate_id()?,
        timestamp: now_nanos(),
        operation,
        document,
    })
}

fn is_absent(document: &Option<Value>) -> bool {
    matches!(document, None | Some(Value::Null))
}

fn generate_id() -> Result<String> {
    let mut bytes = [0u8; ID_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| JsonDbError::IdGeneration(e.to_string()))?;
    Ok(hex::encode(bytes))
}

/// Current time as unix nanos, saturating on overflow and clamping
/// pre-epoch clocks to zero
fn now_nanos() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_nanos()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
