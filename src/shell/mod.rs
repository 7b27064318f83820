//! Shell Module
//!
//! Text commands for the interactive `jsondb` binary.
//!
//! ## Command Format
//! ```text
//! <command> [arguments]
//!
//! init <path> | load <path> | info | help | quit
//! create <collection>
//! insert <collection> <json document...>
//! query | update | delete | drop <collection> ...   (parsed, not executed)
//! ```
//!
//! `Session` holds the loaded database; each command runs to completion
//! before the next line is read.

mod command;
mod session;

pub use command::Command;
pub use session::{Outcome, Session};
