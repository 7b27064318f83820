//! Command definitions
//!
//! Parses one line of user input into a command.

use serde_json::Value;

use crate::error::{JsonDbError, Result};

/// A parsed shell command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Quit,
    Info,

    /// Create a new database directory
    Init { path: String },

    /// Attach to an existing database directory
    Load { path: String },

    /// Create an empty collection
    Create { collection: String },

    /// Insert a JSON document into a collection
    Insert { collection: String, document: Value },

    /// Named in the vocabulary but without execution semantics yet
    Query { collection: String },
    Update { collection: String },
    Delete { collection: String },
    Drop { collection: String },
}

impl Command {
    /// Parse a line. Blank lines yield `Ok(None)`.
    ///
    /// The command word is case-insensitive. For `insert`, everything after
    /// the collection name is the JSON document, whitespace included.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = split_word(line);
        let word = word.to_lowercase();

        let command = match word.as_str() {
            "help" | "h" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            "info" => Command::Info,
            "init" => Command::Init {
                path: single_arg(rest, "init command requires exactly one argument: the database path")?,
            },
            "load" => Command::Load {
                path: single_arg(rest, "load command requires the path of an existing database")?,
            },
            "create" => Command::Create {
                collection: single_arg(rest, "create command requires exactly one argument: the collection name")?,
            },
            "insert" => {
                let (collection, data) = split_word(rest);
                if collection.is_empty() || data.is_empty() {
                    return Err(JsonDbError::Command(
                        "insert command requires a collection name and a JSON document".to_string(),
                    ));
                }
                let document = serde_json::from_str(data).map_err(|e| {
                    JsonDbError::Command(format!("insert command: invalid JSON document: {}", e))
                })?;
                Command::Insert {
                    collection: collection.to_string(),
                    document,
                }
            }
            "query" => Command::Query { collection: first_arg(rest, "query")? },
            "update" => Command::Update { collection: first_arg(rest, "update")? },
            "delete" => Command::Delete { collection: first_arg(rest, "delete")? },
            "drop" => Command::Drop { collection: first_arg(rest, "drop")? },
            _ => return Err(JsonDbError::Command(format!("incorrect command: {}", word))),
        };

        Ok(Some(command))
    }
}

/// "insert users {..}" → ("insert", "users {..}")
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(idx) => (&s[..idx], s[idx..].trim_start()),
        None => (s, ""),
    }
}

fn single_arg(rest: &str, usage: &str) -> Result<String> {
    let mut args = rest.split_whitespace();
    match (args.next(), args.next()) {
        (Some(arg), None) => Ok(arg.to_string()),
        _ => Err(JsonDbError::Command(usage.to_string())),
    }
}

fn first_arg(rest: &str, command: &str) -> Result<String> {
    rest.split_whitespace()
        .next()
        .map(str::to_string)
        .ok_or_else(|| JsonDbError::Command(format!("{} command requires a collection name", command)))
}
