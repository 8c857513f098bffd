//! # cdbm
//!
//! Directory bookmarks for the shell.
//!
//! cdbm associates a short name with a directory and later turns that name
//! back into a `cd` command the calling shell can `eval`.
//!
//! ## Key Features
//!
//! - **Validated names**: `^[A-Za-z0-9._-]{1,100}$`, unique and case-sensitive
//! - **No symlink targets**: checked when a bookmark is added and again on every jump
//! - **Injection-safe output**: paths are emitted as single POSIX shell words
//! - **Durable**: the whole store is rewritten atomically after every change
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cdbm::{resolve, Store};
//!
//! let mut store = Store::load("/home/me/.config/cdbm/store.json").unwrap();
//! store.add("src", "/home/me/src").unwrap();
//!
//! let bookmark = store.get_one("src").unwrap();
//! println!("{}", resolve(bookmark).unwrap()); // cd '/home/me/src'
//! ```

pub mod bookmark;
pub mod cli;
pub mod config;
pub mod error;
pub mod paths;
pub mod resolve;
pub mod shell;
pub mod storage;

// Re-exports for convenience
pub use bookmark::{pretty, Bookmark, PrettyStyle};
pub use config::CdbmConfig;
pub use error::{CdbmError, Result};
pub use resolve::{resolve, shell_quote};
pub use shell::{init_script, Shell};
pub use storage::Store;
