//! CLI module for cdbm.
//!
//! Commands:
//! - Manage: add, list, show, edit, delete
//! - Navigate: cd (or a bare bookmark name)
//! - Shell: init

pub mod bookmarks;
pub mod init;
pub mod jump;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::bookmark::PrettyStyle;
use crate::config::{default_config_dir, CdbmConfig, CONFIG_FILE};
use crate::storage::Store;

#[derive(Parser)]
#[command(name = "cdbm")]
#[command(version, about = "cdbm - Directory bookmarks for your shell", long_about = None)]
pub struct Cli {
    /// Bookmark store file (default: <config dir>/store.json)
    #[arg(long, global = true, env = "CDBM_STORE")]
    pub store: Option<PathBuf>,

    /// Config file (default: $XDG_CONFIG_HOME/cdbm/config.toml)
    #[arg(long, global = true, env = "CDBM_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    // ─── Manage ───────────────────────────────────────────────────
    /// Bookmark a directory
    Add {
        /// Bookmark name (letters, numbers, '.', '_' and '-')
        #[arg(allow_hyphen_values = true)]
        name: String,

        /// Directory to bookmark
        #[arg(default_value = ".")]
        directory: PathBuf,
    },

    /// List all bookmarks
    #[command(visible_alias = "ls")]
    List,

    /// Show a single bookmark
    Show {
        /// Bookmark name
        #[arg(allow_hyphen_values = true)]
        name: String,
    },

    /// Rename a bookmark or point it at another directory
    Edit {
        /// Bookmark name
        #[arg(allow_hyphen_values = true)]
        name: String,

        /// New bookmark name
        #[arg(short = 'n', long = "new-name", alias = "newName", allow_hyphen_values = true)]
        new_name: Option<String>,

        /// New bookmarked directory
        #[arg(short = 'd', long = "new-directory", alias = "newDirectory")]
        new_directory: Option<PathBuf>,
    },

    /// Delete a bookmark
    #[command(visible_alias = "rm")]
    Delete {
        /// Bookmark name
        #[arg(allow_hyphen_values = true)]
        name: String,
    },

    // ─── Navigate ─────────────────────────────────────────────────
    /// Print the `cd` command for a bookmark (evaluated by the shell wrapper)
    Cd {
        /// Bookmark name
        #[arg(allow_hyphen_values = true)]
        name: String,
    },

    // ─── Shell ────────────────────────────────────────────────────
    /// Print shell integration code: eval "$(cdbm init bash)"
    Init {
        /// Target shell (bash or zsh)
        shell: Option<String>,
    },

    /// `cdbm <name>` is shorthand for `cdbm cd <name>`
    #[command(external_subcommand)]
    Jump(Vec<String>),
}

/// Everything a store-backed command needs.
pub struct Session {
    pub store: Store,
    pub style: PrettyStyle,
}

/// Run a parsed command, writing its normal output to `out`.
///
/// `auto_color` is used when the config does not force styling on or off.
/// Errors are returned, never written to `out`.
pub fn run(cli: Cli, out: &mut dyn Write, auto_color: bool) -> Result<()> {
    let Cli {
        store,
        config,
        command,
    } = cli;
    let open = || open_session(store.as_deref(), config.as_deref(), auto_color);

    match command {
        Commands::Add { name, directory } => bookmarks::add(&mut open()?, &name, &directory, out),
        Commands::List => bookmarks::list(&open()?, out),
        Commands::Show { name } => bookmarks::show(&open()?, &name, out),
        Commands::Edit {
            name,
            new_name,
            new_directory,
        } => bookmarks::edit(
            &mut open()?,
            &name,
            new_name.as_deref(),
            new_directory.as_deref(),
            out,
        ),
        Commands::Delete { name } => bookmarks::delete(&mut open()?, &name, out),
        Commands::Cd { name } => jump::cd(&open()?, &name, out),
        Commands::Jump(args) => match args.as_slice() {
            [name] => jump::cd(&open()?, name, out),
            _ => bail!("expected a single bookmark name, got: {}", args.join(" ")),
        },
        Commands::Init { shell } => init::run(shell.as_deref(), out),
    }
}

/// Load config and the bookmark store.
fn open_session(
    store_override: Option<&Path>,
    config_override: Option<&Path>,
    auto_color: bool,
) -> Result<Session> {
    let config_dir = default_config_dir();
    let config_path = config_override
        .map(PathBuf::from)
        .or_else(|| config_dir.as_ref().map(|dir| dir.join(CONFIG_FILE)));

    let config = match &config_path {
        Some(path) => CdbmConfig::load(path).context("failed to load configuration")?,
        None => CdbmConfig::default(),
    };

    // Relative `[store].path` values are taken from the config file's directory.
    let base_dir = config_path
        .as_ref()
        .and_then(|p| p.parent().map(PathBuf::from))
        .or(config_dir);

    let Some(store_path) = config.resolve_store_path(
        store_override,
        base_dir.as_deref(),
        dirs::home_dir().as_deref(),
    ) else {
        bail!("could not determine the config directory; set XDG_CONFIG_HOME or pass --store");
    };

    let store = Store::load(&store_path)
        .with_context(|| format!("failed to open bookmark store {}", store_path.display()))?;

    Ok(Session {
        store,
        style: config.pretty_style(auto_color),
    })
}
