//! Turning a bookmark into a `cd` command for the calling shell.
//!
//! A child process cannot change its parent shell's working directory, so
//! cdbm never changes directory itself. It prints `cd '<path>'` and the shell
//! wrapper `eval`s it. The target is re-checked here at jump time: the checks
//! made when the bookmark was added say nothing about the filesystem now.

use std::path::PathBuf;

use tracing::debug;

use crate::bookmark::Bookmark;
use crate::error::{CdbmError, Result};
use crate::paths::{self, Entry};

/// Re-validate the bookmark's directory and return the path to jump to.
///
/// Fails with `DirectoryGone` if it vanished, `SecuritySymlink` if the leaf
/// became a symlink and `NotADirectory` if something else took its place.
pub fn resolve_directory(bookmark: &Bookmark) -> Result<PathBuf> {
    let path = paths::absolutize(&bookmark.directory)?;

    match paths::classify(&path)? {
        Entry::Directory => {
            debug!(name = %bookmark.name, directory = %path.display(), "resolved bookmark");
            Ok(path)
        }
        Entry::Missing => Err(CdbmError::DirectoryGone(path)),
        Entry::Symlink => Err(CdbmError::SecuritySymlink(path)),
        Entry::Other => Err(CdbmError::NotADirectory(path)),
    }
}

/// Resolve the bookmark to a shell command of the form `cd '<path>'`.
pub fn resolve(bookmark: &Bookmark) -> Result<String> {
    let path = resolve_directory(bookmark)?;
    // absolutize() only hands back UTF-8 paths.
    let path = path.to_str().ok_or_else(|| CdbmError::InvalidPath {
        path: path.display().to_string(),
        reason: "path is not valid UTF-8".to_string(),
    })?;

    Ok(format!("cd {}", shell_quote(path)))
}

/// Quote `s` as a single POSIX shell word.
///
/// Single quotes suppress every expansion; the only character that needs work
/// is `'` itself, which becomes `'\''` (close, escaped quote, reopen).
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}
