//
//  init.rs
//  cdbm
//

use anyhow::{bail, Result};
use std::io::Write;

use crate::shell::{init_script, Shell};

/// Print the wrapper function for `shell`.
pub fn run(shell: Option<&str>, out: &mut dyn Write) -> Result<()> {
    let Some(shell) = shell.filter(|s| !s.is_empty()) else {
        bail!("no shell specified. Usage: cdbm init <bash|zsh>");
    };

    let shell: Shell = shell.parse()?;
    write!(out, "{}", init_script(shell))?;
    Ok(())
}
