//! Bookmark management: add, list, show, edit, delete

use anyhow::{bail, Result};
use std::io::Write;
use std::path::Path;

use super::Session;
use crate::bookmark::pretty;

/// Bookmark a directory under `name`.
pub fn add(session: &mut Session, name: &str, directory: &Path, out: &mut dyn Write) -> Result<()> {
    let bookmark = session.store.add(name, directory)?;
    writeln!(
        out,
        "✓ Added bookmark {} → {}",
        bookmark.name,
        bookmark.directory.display()
    )?;
    Ok(())
}

/// Print every bookmark, sorted by name.
pub fn list(session: &Session, out: &mut dyn Write) -> Result<()> {
    let bookmarks = session.store.get_all();

    if bookmarks.is_empty() {
        writeln!(out, "No bookmarks found.")?;
        return Ok(());
    }

    let rendered: Vec<String> = bookmarks
        .into_iter()
        .map(|bm| pretty(Some(bm), &session.style))
        .collect();
    writeln!(out, "{}", rendered.join("\n\n"))?;
    Ok(())
}

/// Print one bookmark.
pub fn show(session: &Session, name: &str, out: &mut dyn Write) -> Result<()> {
    let bookmark = session.store.get_one(name)?;
    writeln!(out, "{}", pretty(Some(bookmark), &session.style))?;
    Ok(())
}

/// Rename and/or move a bookmark. Empty values count as "not given"; at least
/// one change is required.
pub fn edit(
    session: &mut Session,
    name: &str,
    new_name: Option<&str>,
    new_directory: Option<&Path>,
    out: &mut dyn Write,
) -> Result<()> {
    let new_name = new_name.filter(|n| !n.is_empty());
    let new_directory = new_directory.filter(|d| !d.as_os_str().is_empty());

    if new_name.is_none() && new_directory.is_none() {
        bail!("at least one of --new-name or --new-directory must be specified");
    }

    let bookmark = session.store.edit(name, new_name, new_directory)?;
    writeln!(
        out,
        "✓ Updated bookmark {} → {}",
        bookmark.name,
        bookmark.directory.display()
    )?;
    Ok(())
}

/// Delete a bookmark.
pub fn delete(session: &mut Session, name: &str, out: &mut dyn Write) -> Result<()> {
    let removed = session.store.delete(name)?;
    writeln!(out, "✓ Deleted bookmark: {}", removed.name)?;
    Ok(())
}
