//! Atomic file replacement
//!
//! Write-then-rename protocol:
//! 1. Write the new content to `<target>.tmp` (same directory)
//! 2. fsync the temporary file
//! 3. Close it
//! 4. Rename it over the target
//! 5. fsync the parent directory (`SyncStrategy::FileAndDirectory` only)
//!
//! Until step 4 completes the target holds its previous complete content.
//! If any of steps 1-4 fails the temporary file is removed and the
//! triggering error is returned. Step 4 is the commit point: a failure in
//! step 5 is logged and the replace still reports success.

use std::ffi::OsString;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::config::{SyncStrategy, TEMP_SUFFIX};
use crate::error::Result;

/// Path of the write-in-progress file for `target`
pub fn temp_path(target: &Path) -> PathBuf {
    let mut name = OsString::from(target.as_os_str());
    name.push(TEMP_SUFFIX);
    PathBuf::from(name)
}

/// Replace `target` with whatever `write` puts into the temporary file.
pub fn replace_file<F>(target: &Path, strategy: SyncStrategy, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    let temp = temp_path(target);

    if let Err(e) = write_and_rename(&temp, target, write) {
        if let Err(cleanup) = fs::remove_file(&temp) {
            tracing::warn!(
                temp = %temp.display(),
                error = %cleanup,
                "failed to remove temporary file"
            );
        }
        return Err(e);
    }

    tracing::debug!(path = %target.display(), "replaced file atomically");

    if strategy == SyncStrategy::FileAndDirectory {
        sync_after_commit(target);
    }

    Ok(())
}

/// fsync the parent of an already committed `path`.
///
/// The change is visible at this point, so reporting an error would make
/// callers retry work that already happened.
pub(crate) fn sync_after_commit(path: &Path) {
    if let Err(e) = sync_parent_dir(path) {
        tracing::warn!(
            path = %path.display(),
            error = %e,
            "directory fsync failed after commit"
        );
    }
}

fn write_and_rename<F>(temp: &Path, target: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    let mut file = File::create(temp)?;
    write(&mut file)?;
    file.sync_all()?;
    drop(file);

    fs::rename(temp, target)?;
    Ok(())
}

/// fsync the directory holding `path` so a rename inside it is durable
#[cfg(unix)]
fn sync_parent_dir(path: &Path) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    File::open(parent)?.sync_all()?;
    Ok(())
}

/// NTFS journals metadata updates; there is no directory handle to fsync.
#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) -> Result<()> {
    Ok(())
}
