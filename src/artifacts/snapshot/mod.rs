//! Directory snapshots
//!
//! Translating a working directory into tree and blob objects:
//!
//! - `ignore_list`: exact-name exclusions read from a directory's ignore file
//! - `tree_builder`: recursive directory-to-tree conversion

pub mod ignore_list;
pub mod tree_builder;
