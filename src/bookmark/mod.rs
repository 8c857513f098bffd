//! Bookmark - a named pointer to a directory.
//!
//! A bookmark pairs a short name (`^[A-Za-z0-9._-]{1,100}$`) with an absolute
//! directory path. Rendering for humans lives in [`render`].

mod render;
mod types;

pub use render::{pretty, PrettyStyle};
pub use types::{validate_name, Bookmark, MAX_NAME_LEN};
