//! Object types and their canonical encodings
//!
//! Every stored object is identified by the SHA-1 of its framed form. There are
//! three kinds:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Directory listing (modes, names and object IDs)
//! - **Commit**: Tree snapshot with author metadata and a message
//!
//! Framing, hashing and compression live in `codec`:
//! `<type> <size>\0<content>`

pub mod blob;
pub mod codec;
pub mod commit;
pub mod entry_mode;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a SHA-1 hash in raw bytes
pub const OBJECT_ID_BYTES: usize = OBJECT_ID_LENGTH / 2;
