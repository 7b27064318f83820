//! Tests for the collection file codec
//!
//! These tests verify:
//! - Encode/decode round trip preserves entries and their order
//! - The entries array is always emitted
//! - Empty input decodes to an empty collection
//! - Null or missing entries normalize to empty
//! - Malformed JSON is reported as CorruptCollection

use jsondb::codec::{build_entry, decode_collection, encode_collection, Collection, Operation};
use jsondb::JsonDbError;
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn collection_with(docs: &[Value]) -> Collection {
    let mut collection = Collection::new();
    for doc in docs {
        collection.push(build_entry(Operation::Insert, Some(doc)).unwrap());
    }
    collection
}

// =============================================================================
// Encode Tests
// =============================================================================

#[test]
fn test_encode_empty_collection_keeps_entries_field() {
    let bytes = encode_collection(&Collection::new()).unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(value, json!({"entries": []}));
}

#[test]
fn test_encode_is_pretty_printed() {
    let bytes = encode_collection(&collection_with(&[json!({"a": 1})])).unwrap();
    let text = String::from_utf8(bytes).unwrap();

    assert!(text.contains("\n  \"entries\": ["));
    assert!(text.ends_with('\n'));
}

// =============================================================================
// Round-Trip Tests
// =============================================================================

#[test]
fn test_round_trip_preserves_entries() {
    let mut collection = collection_with(&[json!({"name": "Ada"}), json!([1, 2, 3]), json!("text")]);
    collection.push(build_entry::<Value>(Operation::Delete, None).unwrap());

    let bytes = encode_collection(&collection).unwrap();
    let decoded = decode_collection(&bytes).unwrap();

    assert_eq!(decoded, collection);
}

#[test]
fn test_null_document_is_written_as_absent() {
    let mut entry = build_entry(Operation::Insert, Some(&json!({"a": 1}))).unwrap();
    entry.document = Some(Value::Null);
    let mut collection = Collection::new();
    collection.push(entry);

    let bytes = encode_collection(&collection).unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(value["entries"][0].get("doc").is_none());

    let decoded = decode_collection(&bytes).unwrap();
    assert_eq!(decoded.entries[0].document, None);
    assert_eq!(decoded.entries[0].id, collection.entries[0].id);
}

#[test]
fn test_round_trip_empty() {
    let bytes = encode_collection(&Collection::new()).unwrap();
    let decoded = decode_collection(&bytes).unwrap();

    assert!(decoded.is_empty());
}

// =============================================================================
// Decode Edge Cases
// =============================================================================

#[test]
fn test_decode_zero_bytes_is_empty_collection() {
    let decoded = decode_collection(b"").unwrap();
    assert_eq!(decoded.len(), 0);
}

#[test]
fn test_decode_whitespace_is_empty_collection() {
    let decoded = decode_collection(b"  \n\t ").unwrap();
    assert!(decoded.is_empty());
}

#[test]
fn test_decode_null_entries_normalizes_to_empty() {
    let decoded = decode_collection(br#"{"entries": null}"#).unwrap();
    assert!(decoded.entries.is_empty());
}

#[test]
fn test_decode_missing_entries_normalizes_to_empty() {
    let decoded = decode_collection(b"{}").unwrap();
    assert!(decoded.entries.is_empty());
}

#[test]
fn test_decode_null_doc_is_absent() {
    let bytes = br#"{"entries":[{"_id":"00000000000000000000000000000000","ts":5,"op":"delete","doc":null}]}"#;
    let decoded = decode_collection(bytes).unwrap();

    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded.entries[0].operation, Operation::Delete);
    assert_eq!(decoded.entries[0].document, None);
}

#[test]
fn test_decode_malformed_json_is_corrupt() {
    let result = decode_collection(b"{\"entries\": [");
    assert!(matches!(result, Err(JsonDbError::CorruptCollection(_))));
}

#[test]
fn test_decode_garbage_is_corrupt() {
    let result = decode_collection(b"not json at all");
    assert!(matches!(result, Err(JsonDbError::CorruptCollection(_))));
}

#[test]
fn test_decode_unknown_operation_is_corrupt() {
    let bytes = br#"{"entries":[{"_id":"ab","ts":1,"op":"upsert","doc":{}}]}"#;
    let result = decode_collection(bytes);
    assert!(matches!(result, Err(JsonDbError::CorruptCollection(_))));
}
