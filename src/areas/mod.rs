//! Core repository components
//!
//! - `config`: Explicit repository configuration
//! - `database`: Content-addressed object store under `objects/`
//! - `repository`: Facade owning the configuration, store, workspace and output
//! - `workspace`: Working directory file system operations

pub mod config;
pub mod database;
pub mod repository;
pub mod workspace;
