//! Bookmark record and name validation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CdbmError, Result};

/// Longest accepted bookmark name.
pub const MAX_NAME_LEN: usize = 100;

/// A single bookmark as stored on disk.
///
/// Older store files used capitalised keys (`Name`, `Directory`); both
/// spellings are accepted when reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Unique, case-sensitive identifier
    #[serde(alias = "Name")]
    pub name: String,

    /// Absolute, lexically cleaned directory path
    #[serde(alias = "Directory")]
    pub directory: PathBuf,
}

impl Bookmark {
    pub fn new(name: &str, directory: impl Into<PathBuf>) -> Self {
        Self {
            name: name.to_string(),
            directory: directory.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

/// Check a bookmark name against `^[A-Za-z0-9._-]{1,100}$`.
pub fn validate_name(name: &str) -> Result<()> {
    let invalid = |reason| CdbmError::InvalidName {
        name: name.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(invalid("name cannot be empty"));
    }

    let valid = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));

    if !valid {
        return Err(invalid(
            "only letters, numbers, '.', '_' and '-' are allowed",
        ));
    }

    // All accepted characters are ASCII, so bytes == chars here.
    if name.len() > MAX_NAME_LEN {
        return Err(invalid("name too long (max 100 characters)"));
    }

    Ok(())
}
