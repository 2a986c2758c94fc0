//! Command implementations
//!
//! Commands are organized into two categories following git's architecture:
//!
//! - `plumbing`: Object-level commands (hash-object, cat-file, ls-tree, ...)
//! - `porcelain`: Repository-level commands (init, log)

pub mod plumbing;
pub mod porcelain;
