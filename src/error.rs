//! Error types for cdbm.

use std::io;
use std::path::PathBuf;

/// Every way a cdbm operation can fail.
///
/// All variants are terminal for the current command. Nothing here is retried:
/// bad input and filesystem state are not transient.
#[derive(Debug, thiserror::Error)]
pub enum CdbmError {
    #[error("Invalid bookmark name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("Bookmark '{0}' already exists. Use a different name")]
    DuplicateName(String),

    #[error("Invalid directory path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Directory '{}' does not exist", .0.display())]
    PathNotFound(PathBuf),

    #[error("'{}' is a symlink; symlinks are not allowed as bookmark targets", .0.display())]
    SymlinkRejected(PathBuf),

    #[error("Security violation: bookmarked path '{}' is a symlink", .0.display())]
    SecuritySymlink(PathBuf),

    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("Bookmark '{0}' not found")]
    NotFound(String),

    #[error("Bookmark store '{}' is corrupted: {reason}", .path.display())]
    CorruptStore { path: PathBuf, reason: String },

    #[error("Failed to save bookmarks to '{}': {source}", .path.display())]
    PersistFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Bookmarked directory '{}' no longer exists", .0.display())]
    DirectoryGone(PathBuf),

    #[error("Failed to access '{}': {source}", .path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid configuration in '{}': {reason}", .path.display())]
    Config { path: PathBuf, reason: String },

    #[error("Unsupported shell: {0} (supported shells: bash, zsh)")]
    UnsupportedShell(String),
}

pub type Result<T> = std::result::Result<T, CdbmError>;
