//! Path Validator
//!
//! Decides whether a name is safe to use as a single path segment inside
//! the database directory, and what (if anything) already sits at a path.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{JsonDbError, PathKind, Result};

/// Stat `path`, following symlinks.
///
/// Returns `Ok(None)` when nothing is there. Any other stat failure
/// (permission denied, ...) is an error, never "absent".
pub fn path_exists(path: &Path) -> Result<Option<PathKind>> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(Some(PathKind::Directory)),
        Ok(_) => Ok(Some(PathKind::File)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(JsonDbError::Io(e)),
    }
}

/// Check that `name` matches `[A-Za-z0-9_-]+`.
///
/// Separators and `..` get their own reason so traversal attempts are
/// reported as such.
pub fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.contains(['/', '\\', std::path::MAIN_SEPARATOR]) || name.contains("..") {
        "path separators and '..' are not allowed"
    } else if !name.chars().all(is_name_char) {
        "name must match [A-Za-z0-9_-]+"
    } else {
        return Ok(());
    };

    Err(JsonDbError::InvalidName {
        name: name.to_string(),
        reason,
    })
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}
