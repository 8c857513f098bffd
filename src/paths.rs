//! Path helpers shared by the store and the resolver.
//!
//! Nothing in here follows symlinks: paths are cleaned lexically and
//! inspected with `symlink_metadata`.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::{CdbmError, Result};

/// What sits at a path, seen without following a symlink leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    Missing,
    Symlink,
    Directory,
    Other,
}

/// Make `path` absolute against the current directory and clean it lexically.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    let invalid = |reason: String| CdbmError::InvalidPath {
        path: path.display().to_string(),
        reason,
    };

    if path.as_os_str().is_empty() {
        return Err(invalid("path is empty".to_string()));
    }

    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let cwd = std::env::current_dir()
            .map_err(|e| invalid(format!("cannot determine current directory: {}", e)))?;
        cwd.join(path)
    };

    let cleaned = lexical_clean(&joined);
    if cleaned.to_str().is_none() {
        return Err(invalid("path is not valid UTF-8".to_string()));
    }

    Ok(cleaned)
}

/// Drop `.` components and fold `..` into its parent without touching the
/// filesystem. `..` at the root stays at the root.
pub fn lexical_clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let at_root = out.parent().is_none() && out.has_root();
                if at_root {
                    continue;
                }
                let last_is_normal = matches!(out.components().next_back(), Some(Component::Normal(_)));
                if last_is_normal {
                    out.pop();
                } else {
                    out.push("..");
                }
            }
            Component::Normal(part) => out.push(part),
        }
    }

    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// `lstat` the path and classify it.
pub fn classify(path: &Path) -> Result<Entry> {
    match fs::symlink_metadata(path) {
        Ok(meta) => {
            let file_type = meta.file_type();
            Ok(if file_type.is_symlink() {
                Entry::Symlink
            } else if file_type.is_dir() {
                Entry::Directory
            } else {
                Entry::Other
            })
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Entry::Missing),
        Err(e) => Err(CdbmError::Access {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
