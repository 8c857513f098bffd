//! cdbm CLI - directory bookmarks for your shell.

use std::io::{self, IsTerminal};

use cdbm::cli::{run, Cli};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr only: stdout may be `eval`ed by the shell wrapper.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("CDBM_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let stdout = io::stdout();
    let auto_color = stdout.is_terminal() && std::env::var_os("NO_COLOR").is_none();
    let mut out = stdout.lock();

    if let Err(e) = run(cli, &mut out, auto_color) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
