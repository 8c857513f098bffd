//! The bookmark store: validated CRUD backed by a single JSON file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::fs::{read_store, write_store};
use crate::bookmark::{validate_name, Bookmark};
use crate::error::{CdbmError, Result};
use crate::paths::{self, Entry};

/// In-memory bookmark map, flushed to disk after every mutation.
///
/// Every mutating call validates first, then changes the map, then rewrites
/// the whole store file. If the write fails the change is undone, so the map
/// never holds state that is not on disk.
#[derive(Debug)]
pub struct Store {
    /// Store file (JSON)
    path: PathBuf,
    /// Bookmarks keyed by name, ordered by name
    bookmarks: BTreeMap<String, Bookmark>,
}

impl Store {
    /// Load the store at `path`. A missing file gives an empty store; the file
    /// is created by the first mutation.
    pub fn load<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();
        let bookmarks = read_store(&path)?;
        debug!(store = %path.display(), count = bookmarks.len(), "loaded bookmarks");

        Ok(Self { path, bookmarks })
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    /// Bookmark `directory` under `name`.
    pub fn add(&mut self, name: &str, directory: impl AsRef<Path>) -> Result<Bookmark> {
        validate_name(name)?;

        if self.bookmarks.contains_key(name) {
            return Err(CdbmError::DuplicateName(name.to_string()));
        }

        let directory = validated_directory(directory.as_ref())?;
        let bookmark = Bookmark::new(name, directory);

        self.bookmarks.insert(name.to_string(), bookmark.clone());
        if let Err(e) = self.persist() {
            self.bookmarks.remove(name);
            return Err(e);
        }

        info!(name, directory = %bookmark.directory.display(), "bookmark added");
        Ok(bookmark)
    }

    /// Look up a single bookmark. Malformed names are rejected before the
    /// map is consulted.
    pub fn get_one(&self, name: &str) -> Result<&Bookmark> {
        validate_name(name)?;

        self.bookmarks
            .get(name)
            .ok_or_else(|| CdbmError::NotFound(name.to_string()))
    }

    /// All bookmarks, sorted by name.
    pub fn get_all(&self) -> Vec<&Bookmark> {
        self.bookmarks.values().collect()
    }

    /// Rename and/or move a bookmark.
    ///
    /// `None` leaves that field unchanged. Callers are expected to supply at
    /// least one change.
    pub fn edit(
        &mut self,
        name: &str,
        new_name: Option<&str>,
        new_directory: Option<&Path>,
    ) -> Result<Bookmark> {
        let existing = self
            .bookmarks
            .get(name)
            .cloned()
            .ok_or_else(|| CdbmError::NotFound(name.to_string()))?;

        let target_name = match new_name {
            Some(new_name) => {
                validate_name(new_name)?;
                if new_name != name && self.bookmarks.contains_key(new_name) {
                    return Err(CdbmError::DuplicateName(new_name.to_string()));
                }
                new_name.to_string()
            }
            None => existing.name.clone(),
        };

        let directory = match new_directory {
            Some(dir) => validated_directory(dir)?,
            None => existing.directory.clone(),
        };

        let updated = Bookmark::new(&target_name, directory);

        self.bookmarks.remove(name);
        self.bookmarks.insert(target_name.clone(), updated.clone());
        if let Err(e) = self.persist() {
            self.bookmarks.remove(&target_name);
            self.bookmarks.insert(name.to_string(), existing);
            return Err(e);
        }

        info!(
            from = name,
            to = %target_name,
            directory = %updated.directory.display(),
            "bookmark edited"
        );
        Ok(updated)
    }

    /// Remove a bookmark, returning it.
    pub fn delete(&mut self, name: &str) -> Result<Bookmark> {
        let removed = self
            .bookmarks
            .remove(name)
            .ok_or_else(|| CdbmError::NotFound(name.to_string()))?;

        if let Err(e) = self.persist() {
            self.bookmarks.insert(name.to_string(), removed);
            return Err(e);
        }

        info!(name, "bookmark deleted");
        Ok(removed)
    }

    fn persist(&self) -> Result<()> {
        write_store(&self.path, &self.bookmarks).map_err(|source| {
            warn!(store = %self.path.display(), error = %source, "write failed, rolling back");
            CdbmError::PersistFailed {
                path: self.path.clone(),
                source,
            }
        })
    }
}

/// Absolute, lexically cleaned form of `directory`, which must be a real
/// directory and not a symlink.
fn validated_directory(directory: &Path) -> Result<PathBuf> {
    let absolute = paths::absolutize(directory)?;

    match paths::classify(&absolute)? {
        Entry::Directory => Ok(absolute),
        Entry::Missing => Err(CdbmError::PathNotFound(absolute)),
        Entry::Symlink => Err(CdbmError::SymlinkRejected(absolute)),
        Entry::Other => Err(CdbmError::NotADirectory(absolute)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    /// A scratch area with a store path and two real directories.
    fn setup() -> (TempDir, PathBuf, PathBuf, PathBuf) {
        let dir = tempdir().unwrap();
        let store_path = dir.path().join("config/store.json");
        let one = dir.path().join("one");
        let two = dir.path().join("two");
        fs::create_dir(&one).unwrap();
        fs::create_dir(&two).unwrap();
        (dir, store_path, one, two)
    }

    /// Replace the store file with a directory so the next rename fails.
    fn block_writes(store_path: &Path) {
        if store_path.exists() {
            fs::remove_file(store_path).unwrap();
        }
        fs::create_dir_all(store_path).unwrap();
    }

    #[test]
    fn test_add_and_get() {
        let (_dir, store_path, one, _) = setup();
        let mut store = Store::load(&store_path).unwrap();

        let messy = one.join("./sub/..");
        let added = store.add("one", &messy).unwrap();
        assert_eq!(added.directory, one);

        let got = store.get_one("one").unwrap();
        assert_eq!(got.name, "one");
        assert_eq!(got.directory, one);
        assert!(store_path.exists());
    }

    #[test]
    fn test_add_duplicate_name() {
        let (_dir, store_path, one, two) = setup();
        let mut store = Store::load(&store_path).unwrap();

        store.add("dup", &one).unwrap();
        let err = store.add("dup", &two).unwrap_err();
        assert!(matches!(err, CdbmError::DuplicateName(ref n) if n == "dup"));
        assert_eq!(store.get_one("dup").unwrap().directory, one);
    }

    #[test]
    fn test_add_rejects_bad_names() {
        let (_dir, store_path, one, _) = setup();
        let mut store = Store::load(&store_path).unwrap();

        let too_long = "n".repeat(101);
        for name in ["../evil", "", "na me", too_long.as_str()] {
            assert!(matches!(
                store.add(name, &one),
                Err(CdbmError::InvalidName { .. })
            ));
        }
        assert!(store.is_empty());
        assert!(!store_path.exists());
    }

    #[test]
    fn test_add_path_errors() {
        let (dir, store_path, _, _) = setup();
        let mut store = Store::load(&store_path).unwrap();

        let missing = dir.path().join("missing");
        assert!(matches!(
            store.add("missing", &missing),
            Err(CdbmError::PathNotFound(p)) if p == missing
        ));

        let file = dir.path().join("file.txt");
        fs::write(&file, "not a dir").unwrap();
        assert!(matches!(
            store.add("file", &file),
            Err(CdbmError::NotADirectory(_))
        ));

        assert!(matches!(
            store.add("empty", ""),
            Err(CdbmError::InvalidPath { .. })
        ));
        assert!(store.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_rejected() {
        let (dir, store_path, one, two) = setup();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&two, &link).unwrap();

        let mut store = Store::load(&store_path).unwrap();
        assert!(matches!(
            store.add("link", &link),
            Err(CdbmError::SymlinkRejected(_))
        ));

        store.add("one", &one).unwrap();
        assert!(matches!(
            store.edit("one", None, Some(link.as_path())),
            Err(CdbmError::SymlinkRejected(_))
        ));
        assert_eq!(store.get_one("one").unwrap().directory, one);
    }

    #[test]
    fn test_get_one_errors() {
        let (_dir, store_path, _, _) = setup();
        let store = Store::load(&store_path).unwrap();

        assert!(matches!(
            store.get_one("a/b"),
            Err(CdbmError::InvalidName { .. })
        ));
        assert!(matches!(store.get_one("nope"), Err(CdbmError::NotFound(_))));
    }

    #[test]
    fn test_get_all_sorted() {
        let (_dir, store_path, one, two) = setup();
        let mut store = Store::load(&store_path).unwrap();

        store.add("zeta", &one).unwrap();
        store.add("Alpha", &two).unwrap();
        store.add("mid", &one).unwrap();

        let names: Vec<&str> = store.get_all().iter().map(|b| b.name()).collect();
        assert_eq!(names, vec!["Alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_edit_rename_and_move() {
        let (_dir, store_path, one, two) = setup();
        let mut store = Store::load(&store_path).unwrap();
        store.add("a", &one).unwrap();

        let edited = store.edit("a", Some("b"), Some(two.as_path())).unwrap();
        assert_eq!(edited, Bookmark::new("b", two.clone()));
        assert!(matches!(store.get_one("a"), Err(CdbmError::NotFound(_))));

        // Same name is not a collision with itself.
        store.edit("b", Some("b"), Some(one.as_path())).unwrap();
        assert_eq!(store.get_one("b").unwrap().directory, one);

        let reloaded = Store::load(&store_path).unwrap();
        assert_eq!(reloaded.get_one("b").unwrap().directory, one);
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn test_edit_rename_collision() {
        let (_dir, store_path, one, two) = setup();
        let mut store = Store::load(&store_path).unwrap();
        store.add("a", &one).unwrap();
        store.add("b", &two).unwrap();

        assert!(matches!(
            store.edit("a", Some("b"), None),
            Err(CdbmError::DuplicateName(_))
        ));
        assert_eq!(store.get_one("a").unwrap().directory, one);
        assert_eq!(store.get_one("b").unwrap().directory, two);
    }

    #[test]
    fn test_edit_errors() {
        let (dir, store_path, one, _) = setup();
        let mut store = Store::load(&store_path).unwrap();
        store.add("a", &one).unwrap();

        assert!(matches!(
            store.edit("nope", Some("x"), None),
            Err(CdbmError::NotFound(_))
        ));
        let too_long = "n".repeat(101);
        for bad in ["../evil", "", "na me", too_long.as_str()] {
            assert!(
                matches!(
                    store.edit("a", Some(bad), None),
                    Err(CdbmError::InvalidName { .. })
                ),
                "expected InvalidName for {:?}",
                bad
            );
        }
        assert!(matches!(
            store.edit("a", None, Some(dir.path().join("gone").as_path())),
            Err(CdbmError::PathNotFound(_))
        ));
        assert_eq!(store.get_one("a").unwrap().directory, one);
    }

    #[test]
    fn test_delete() {
        let (_dir, store_path, one, _) = setup();
        let mut store = Store::load(&store_path).unwrap();
        store.add("a", &one).unwrap();

        let removed = store.delete("a").unwrap();
        assert_eq!(removed.name, "a");
        assert!(matches!(store.get_one("a"), Err(CdbmError::NotFound(_))));
        assert!(Store::load(&store_path).unwrap().is_empty());
    }

    #[test]
    fn test_delete_missing_does_not_write() {
        let (_dir, store_path, _, _) = setup();
        let mut store = Store::load(&store_path).unwrap();

        assert!(matches!(store.delete("ghost"), Err(CdbmError::NotFound(_))));
        assert!(!store_path.exists());
    }

    #[test]
    fn test_round_trip() {
        let (_dir, store_path, one, two) = setup();
        let mut store = Store::load(&store_path).unwrap();
        store.add("one", &one).unwrap();
        store.add("two", &two).unwrap();
        store.add("also.one", &one).unwrap();

        let reloaded = Store::load(&store_path).unwrap();
        assert_eq!(reloaded.get_all(), store.get_all());
    }

    #[test]
    fn test_add_rolls_back_on_persist_failure() {
        let (_dir, store_path, one, _) = setup();
        let mut store = Store::load(&store_path).unwrap();
        block_writes(&store_path);

        assert!(matches!(
            store.add("a", &one),
            Err(CdbmError::PersistFailed { .. })
        ));
        assert!(matches!(store.get_one("a"), Err(CdbmError::NotFound(_))));
    }

    #[test]
    fn test_edit_and_delete_roll_back_on_persist_failure() {
        let (_dir, store_path, one, two) = setup();
        let mut store = Store::load(&store_path).unwrap();
        store.add("a", &one).unwrap();
        block_writes(&store_path);

        assert!(matches!(
            store.edit("a", Some("b"), Some(two.as_path())),
            Err(CdbmError::PersistFailed { .. })
        ));
        assert_eq!(store.get_one("a").unwrap().directory, one);
        assert!(matches!(store.get_one("b"), Err(CdbmError::NotFound(_))));

        assert!(matches!(
            store.delete("a"),
            Err(CdbmError::PersistFailed { .. })
        ));
        assert_eq!(store.get_one("a").unwrap().directory, one);
    }

    #[test]
    fn test_corrupt_store_fails_to_load() {
        let (_dir, store_path, _, _) = setup();
        fs::create_dir_all(store_path.parent().unwrap()).unwrap();
        fs::write(&store_path, "][").unwrap();

        assert!(matches!(
            Store::load(&store_path),
            Err(CdbmError::CorruptStore { .. })
        ));
    }
}
