//! On-disk format of the bookmark store.
//!
//! The store is one JSON document. It is always written as an object keyed by
//! bookmark name; a plain array of records is also accepted on read.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::bookmark::{validate_name, Bookmark};
use crate::error::{CdbmError, Result};

/// Accepted layouts of the store document.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoreDocument {
    Map(BTreeMap<String, Bookmark>),
    List(Vec<Bookmark>),
}

/// Read the store file. A missing or blank file is an empty store.
pub(crate) fn read_store(path: &Path) -> Result<BTreeMap<String, Bookmark>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(store = %path.display(), "store file absent, starting empty");
            return Ok(BTreeMap::new());
        }
        Err(e) => {
            return Err(CdbmError::Access {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    let corrupt = |reason: String| CdbmError::CorruptStore {
        path: path.to_path_buf(),
        reason,
    };

    let document: StoreDocument = serde_json::from_str(&content).map_err(|e| {
        corrupt(format!(
            "expected an object or array of {{name, directory}} records ({})",
            e
        ))
    })?;

    let records: Vec<(Option<String>, Bookmark)> = match document {
        StoreDocument::Map(map) => map.into_iter().map(|(k, v)| (Some(k), v)).collect(),
        StoreDocument::List(list) => list.into_iter().map(|v| (None, v)).collect(),
    };

    let mut bookmarks = BTreeMap::new();
    for (key, bookmark) in records {
        if let Some(key) = key {
            if key != bookmark.name {
                return Err(corrupt(format!(
                    "entry '{}' holds a bookmark named '{}'",
                    key, bookmark.name
                )));
            }
        }
        validate_name(&bookmark.name).map_err(|e| corrupt(e.to_string()))?;
        if bookmarks.contains_key(&bookmark.name) {
            return Err(corrupt(format!("duplicate bookmark '{}'", bookmark.name)));
        }
        bookmarks.insert(bookmark.name.clone(), bookmark);
    }

    Ok(bookmarks)
}

/// Serialize the whole map and replace the store file atomically.
///
/// Bytes go to `<file>.tmp` next to the target (owner-only permissions),
/// are synced, then renamed over the target. A store path that is a symlink
/// is written through to the file it points at.
pub(crate) fn write_store(path: &Path, bookmarks: &BTreeMap<String, Bookmark>) -> io::Result<()> {
    let target = write_target(path)?;
    let parent = target.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(parent) = parent {
        create_private_dir(parent)?;
    }

    let content = serde_json::to_string_pretty(bookmarks)?;

    let temp_path = temp_path_for(&target);
    let result = write_private(&temp_path, content.as_bytes())
        .and_then(|_| fs::rename(&temp_path, &target));

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result?;

    // The rename is already visible; a failed directory sync only weakens durability.
    if let Some(parent) = parent {
        if let Err(e) = sync_dir(parent) {
            debug!(dir = %parent.display(), error = %e, "directory sync failed");
        }
    }
    Ok(())
}

/// The file a write to `path` should replace.
fn write_target(path: &Path) -> io::Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => match fs::canonicalize(path) {
            Ok(resolved) => Ok(resolved),
            // Dangling link: create the file it names.
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let link = fs::read_link(path)?;
                Ok(match path.parent() {
                    Some(parent) => parent.join(link),
                    None => link,
                })
            }
            Err(e) => Err(e),
        },
        _ => Ok(path.to_path_buf()),
    }
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "store".into());
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_private(path: &Path, bytes: &[u8]) -> io::Result<()> {
    // A leftover temp file would keep its old mode; start from a fresh one.
    match fs::remove_file(path) {
        Ok(()) => debug!(temp = %path.display(), "removed stale temp file"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file: File = options.open(path)?;
    file.write_all(bytes)?;
    file.write_all(b"\n")?;
    file.sync_all()
}

fn create_private_dir(dir: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder.create(dir)
}
