//! Core utilities and shared types
//!
//! This module contains types shared across the object store:
//!
//! - `error`: the closed `StoreError` taxonomy and its `Malformation` reasons

pub mod error;

pub use error::{Malformation, StoreError, StoreResult};
