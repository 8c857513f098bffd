//! Storage layer for cdbm.
//!
//! - [`Store`]: validated CRUD over the in-memory bookmark map
//! - `fs`: reading and atomically rewriting the JSON store file

mod fs;
mod store;

pub use store::Store;
