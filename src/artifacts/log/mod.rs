//! Flat log reconstruction
//!
//! The log is not a history walk: every stored object whose header names a
//! loggable kind is parsed as a commit, and the well-formed ones become
//! [`log_entry::LogEntry`] values in enumeration order.

pub mod log_entry;
