//! Porcelain commands (user-facing operations)
//!
//! ## Commands
//!
//! - `init`: Create the repository skeleton
//! - `log`: Show every stored commit

pub mod init;
pub mod log;
