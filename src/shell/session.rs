//! Shell session
//!
//! The state one interactive shell carries between commands. Passed
//! explicitly to whoever runs the loop; nothing here is global.

use crate::database::Database;
use crate::error::{JsonDbError, Result};

use super::Command;

const HELP: &str = "\
Usage: <command> [arguments]

Commands:
  init   <path>                       - create a new database directory
  load   <path>                       - load an existing database directory
  info                                - display info about the loaded database
  create <collection>                 - create a new collection in the database
  insert <collection> <json>          - insert a new record into a collection
  query  <collection> <clause>        - query records (not supported yet)
  update <collection> <clause> <json> - update records (not supported yet)
  delete <collection> <clause>        - delete records (not supported yet)
  drop   <collection>                 - drop a collection (not supported yet)
  help                                - display this help message
  quit                                - leave the shell";

/// What the loop should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Keep reading commands, printing the message if there is one
    Continue(Option<String>),

    Quit,
}

/// Explicit per-shell context
#[derive(Debug, Default)]
pub struct Session {
    /// Currently loaded database, if any
    db: Option<Database>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `db` already loaded
    pub fn with_database(db: Database) -> Self {
        Self { db: Some(db) }
    }

    /// Prompt to print before reading the next line
    pub fn prompt(&self) -> String {
        match &self.db {
            Some(db) => format!(" ({})> ", db.base_dir().display()),
            None => "> ".to_string(),
        }
    }

    pub fn database(&self) -> Option<&Database> {
        self.db.as_ref()
    }

    /// Execute one command against this session
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        let message = match command {
            Command::Help => Some(HELP.to_string()),
            Command::Quit => return Ok(Outcome::Quit),
            Command::Info => Some(self.info()?),
            Command::Init { path } => {
                let db = Database::initialize(&path)?;
                self.db = Some(db);
                Some(format!("initialized database {}", path))
            }
            Command::Load { path } => {
                let db = Database::load(&path)?;
                self.db = Some(db);
                Some(format!("loaded database {}", path))
            }
            Command::Create { collection } => {
                self.loaded()?.create_collection(&collection)?;
                Some(format!("created collection {}", collection))
            }
            Command::Insert {
                collection,
                document,
            } => {
                self.loaded()?.insert_record(&collection, &document)?;
                None
            }
            Command::Query { .. } => return Err(JsonDbError::Unsupported("query")),
            Command::Update { .. } => return Err(JsonDbError::Unsupported("update")),
            Command::Delete { .. } => return Err(JsonDbError::Unsupported("delete")),
            Command::Drop { .. } => return Err(JsonDbError::Unsupported("drop")),
        };

        Ok(Outcome::Continue(message))
    }

    fn loaded(&self) -> Result<&Database> {
        self.db.as_ref().ok_or(JsonDbError::NoDatabaseLoaded)
    }

    fn info(&self) -> Result<String> {
        let Some(db) = &self.db else {
            return Ok("Info:\n  No database loaded".to_string());
        };

        let collections = db.list_collections()?;
        let mut out = format!("Info:\n  Database loaded: {}", db.base_dir().display());
        if collections.is_empty() {
            out.push_str("\n  Collections: none");
        } else {
            out.push_str(&format!("\n  Collections: {}", collections.join(", ")));
        }
        Ok(out)
    }
}
