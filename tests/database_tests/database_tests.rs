//! Tests for Database
//!
//! These tests verify:
//! - initialize/load lifecycle and their failure modes
//! - Collection creation and record insertion through the handle
//! - The on-disk file after an end-to-end session

use std::fs;

use jsondb::codec::Operation;
use jsondb::config::{Config, SyncStrategy};
use jsondb::{Database, JsonDbError, PathKind};
use serde_json::{json, Value};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_database() -> (TempDir, Database) {
    let temp_dir = TempDir::new().unwrap();
    let db = Database::initialize(temp_dir.path().join("db")).unwrap();
    (temp_dir, db)
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[test]
fn test_initialize_creates_directory() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("mydb");

    let db = Database::initialize(&path).unwrap();

    assert!(path.is_dir());
    assert_eq!(db.base_dir(), path.as_path());
}

#[test]
fn test_initialize_creates_missing_parents() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("a").join("b").join("mydb");

    Database::initialize(&path).unwrap();

    assert!(path.is_dir());
}

#[test]
fn test_initialize_existing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("mydb");
    Database::initialize(&path).unwrap();

    let result = Database::initialize(&path);

    match result {
        Err(JsonDbError::AlreadyExists { kind, .. }) => assert_eq!(kind, PathKind::Directory),
        other => panic!("expected AlreadyExists, got {:?}", other),
    }
}

#[test]
fn test_initialize_over_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("not-a-dir");
    fs::write(&path, b"data").unwrap();

    let result = Database::initialize(&path);

    assert!(matches!(
        result,
        Err(JsonDbError::AlreadyExists { kind: PathKind::File, .. })
    ));
    assert_eq!(fs::read(&path).unwrap(), b"data");
}

#[test]
fn test_load_missing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();

    let result = Database::load(temp_dir.path().join("nope"));

    assert!(matches!(result, Err(JsonDbError::NotFound(_))));
}

#[test]
fn test_load_stat_error_is_propagated() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("f");
    fs::write(&file, b"plain file").unwrap();

    let result = Database::load(file.join("child"));

    assert!(matches!(result, Err(JsonDbError::Io(_))));
}

#[test]
fn test_load_regular_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("not-a-db");
    fs::write(&file, b"data").unwrap();

    let result = Database::load(&file);

    assert!(matches!(result, Err(JsonDbError::NotADirectory(_))));
    assert_eq!(fs::read(&file).unwrap(), b"data");
}

#[test]
fn test_load_does_not_inspect_contents() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("broken.json"), b"}{").unwrap();

    let db = Database::load(temp_dir.path()).unwrap();

    assert!(matches!(
        db.read_collection("broken"),
        Err(JsonDbError::CorruptCollection(_))
    ));
}

#[test]
fn test_load_with_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .data_dir(temp_dir.path())
        .sync_strategy(SyncStrategy::File)
        .build();

    let db = Database::load_with_config(config).unwrap();

    assert_eq!(db.config().sync_strategy, SyncStrategy::File);
}

// =============================================================================
// Collection / Record Tests
// =============================================================================

#[test]
fn test_create_collection_rejects_invalid_name() {
    let (_temp, db) = setup_temp_database();

    for name in ["", "../etc", "a/b", "name with space"] {
        assert!(
            matches!(db.create_collection(name), Err(JsonDbError::InvalidName { .. })),
            "expected {:?} to be rejected",
            name
        );
    }
}

#[test]
fn test_insert_sequencing() {
    let (_temp, db) = setup_temp_database();
    db.create_collection("things").unwrap();

    let docs = [json!({"d": 1}), json!({"d": 2}), json!({"d": 3})];
    for doc in &docs {
        db.insert_record("things", doc).unwrap();
    }

    let collection = db.read_collection("things").unwrap();
    assert_eq!(collection.len(), 3);
    for (entry, doc) in collection.iter().zip(docs.iter()) {
        assert_eq!(entry.operation, Operation::Insert);
        assert_eq!(entry.document.as_ref(), Some(doc));
    }

    let ids: std::collections::HashSet<_> = collection.iter().map(|e| e.id.clone()).collect();
    assert_eq!(ids.len(), 3);
}

#[test]
fn test_insert_null_document_fails() {
    let (_temp, db) = setup_temp_database();
    db.create_collection("things").unwrap();

    let result = db.insert_record("things", &Value::Null);

    assert!(matches!(result, Err(JsonDbError::EmptyDocument)));
    assert!(db.read_collection("things").unwrap().is_empty());
}

#[test]
fn test_insert_into_missing_collection_fails() {
    let (_temp, db) = setup_temp_database();

    let result = db.insert_record("ghost", &json!({"a": 1}));

    assert!(matches!(result, Err(JsonDbError::NotFound(_))));
}

#[test]
fn test_insert_invalid_collection_name_fails() {
    let (_temp, db) = setup_temp_database();

    let result = db.insert_record("../things", &json!({"a": 1}));

    assert!(matches!(result, Err(JsonDbError::InvalidName { .. })));
}

#[test]
fn test_list_collections() {
    let (_temp, db) = setup_temp_database();
    assert!(db.list_collections().unwrap().is_empty());

    db.create_collection("users").unwrap();
    db.create_collection("orders").unwrap();

    assert_eq!(db.list_collections().unwrap(), vec!["orders", "users"]);
}

// =============================================================================
// End-to-End Scenario
// =============================================================================

#[test]
fn test_full_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("mydb");

    Database::initialize(&path).unwrap();
    assert!(path.is_dir());

    assert!(matches!(
        Database::initialize(&path),
        Err(JsonDbError::AlreadyExists { .. })
    ));

    let db = Database::load(&path).unwrap();

    db.create_collection("users").unwrap();
    let file = path.join("users.json");
    let value: Value = serde_json::from_slice(&fs::read(&file).unwrap()).unwrap();
    assert_eq!(value, json!({"entries": []}));

    db.insert_record("users", &json!({"name": "Ada"})).unwrap();
    let value: Value = serde_json::from_slice(&fs::read(&file).unwrap()).unwrap();
    let entries = value["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["op"], "insert");
    assert_eq!(entries[0]["doc"], json!({"name": "Ada"}));
    assert_eq!(entries[0]["_id"].as_str().unwrap().len(), 32);
    assert!(entries[0]["ts"].as_i64().unwrap() > 0);

    assert!(matches!(
        db.create_collection("users"),
        Err(JsonDbError::AlreadyExists { kind: PathKind::File, .. })
    ));
}

#[test]
fn test_data_survives_reload() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("mydb");

    {
        let db = Database::initialize(&path).unwrap();
        db.create_collection("users").unwrap();
        db.insert_record("users", &json!({"name": "Ada"})).unwrap();
    }

    let db = Database::load(&path).unwrap();
    let collection = db.read_collection("users").unwrap();

    assert_eq!(collection.len(), 1);
    assert_eq!(collection.entries[0].document, Some(json!({"name": "Ada"})));
}
