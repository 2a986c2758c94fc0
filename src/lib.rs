//! A minimal content-addressable object store compatible with git's loose
//! object format.
//!
//! - `areas`: repository facade, configuration, object database and workspace
//! - `artifacts`: object model, codec, snapshots and log entries
//! - `commands`: one `impl Repository` block per command

pub mod areas;
pub mod artifacts;
pub mod commands;
