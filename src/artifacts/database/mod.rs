//! Database entry types
//!
//! Entries produced when enumerating the object directory: an object id paired
//! with the kind read from its header.

pub mod database_entry;
