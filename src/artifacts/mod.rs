//! Object store data structures and algorithms
//!
//! - `core`: Shared error types
//! - `database`: Database entry types
//! - `log`: Flat log reconstruction
//! - `objects`: Object types (blob, tree, commit) and their codec
//! - `snapshot`: Directory-to-tree conversion

pub mod core;
pub mod database;
pub mod log;
pub mod objects;
pub mod snapshot;
