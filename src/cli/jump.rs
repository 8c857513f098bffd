//! Navigation: print the `cd` command the shell wrapper evaluates.

use anyhow::Result;
use std::io::Write;

use super::Session;
use crate::resolve::resolve;

/// Look up and re-validate `name`, then print `cd '<path>'`.
///
/// Stdout is `eval`ed by the wrapper, so it is written only after every
/// check has passed.
pub fn cd(session: &Session, name: &str, out: &mut dyn Write) -> Result<()> {
    let bookmark = session.store.get_one(name)?;
    let command = resolve(bookmark)?;
    writeln!(out, "{}", command)?;
    Ok(())
}
