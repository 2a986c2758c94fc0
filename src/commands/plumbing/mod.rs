//! Plumbing commands (low-level object operations)
//!
//! Each command is an `impl Repository` block pairing a store operation that
//! returns typed results with a method printing them to the repository writer.
//!
//! ## Commands
//!
//! - `hash-object`: Compute a blob id and optionally store it
//! - `cat-file`: Print an object's payload or kind
//! - `ls-tree`: List the entries of a tree
//! - `ls-objects`: List every stored object with its kind
//! - `write-tree`: Snapshot the work directory as a tree
//! - `commit-tree`: Record a commit of a tree

pub mod cat_file;
pub mod commit_tree;
pub mod hash_object;
pub mod ls_objects;
pub mod ls_tree;
pub mod write_tree;
