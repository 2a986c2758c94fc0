//! Tree object
//!
//! Trees represent directory snapshots. They contain entries for files (blobs)
//! and subdirectories (other trees), along with their names and modes.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <name>\0<20-byte-sha1>`
//!
//! Entries are kept in strictly ascending byte-wise order of their names, so
//! re-serializing a parsed tree reproduces the stored payload byte for byte.

use crate::artifacts::core::{Malformation, StoreResult};
use crate::artifacts::objects::OBJECT_ID_BYTES;
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;

/// One `(mode, name, id)` record of a tree
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub mode: EntryMode,
    #[new(into)]
    pub name: String,
    pub oid: ObjectId,
}

impl TreeEntry {
    pub fn is_tree(&self) -> bool {
        self.mode.is_tree()
    }

    /// Name as shown in listings: directories get a trailing `/`.
    pub fn display_name(&self) -> String {
        if self.is_tree() {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Tree object representing a directory snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    /// Build a tree from entries in any order.
    pub fn new(mut entries: Vec<TreeEntry>) -> Self {
        entries.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
        Tree { entries }
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<TreeEntry> {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Packable for Tree {
    fn serialize(&self) -> StoreResult<Bytes> {
        let mut content = Vec::new();

        for entry in &self.entries {
            content.extend_from_slice(entry.mode.as_str().as_bytes());
            content.push(b' ');
            content.extend_from_slice(entry.name.as_bytes());
            content.push(0);
            content.extend_from_slice(&entry.oid.to_raw());
        }

        Ok(content.into())
    }
}

impl Unpackable for Tree {
    /// Parse entries left to right, keeping their stored order.
    fn deserialize(payload: Bytes) -> StoreResult<Self> {
        let mut entries = Vec::new();
        let mut offset = 0;

        while offset < payload.len() {
            let rest = &payload[offset..];

            let space = rest
                .iter()
                .position(|&b| b == b' ')
                .ok_or(Malformation::TreeEntryMissingSpace { offset })?;
            let mode = String::from_utf8_lossy(&rest[..space]);
            let mode = EntryMode::from_octal_str(&mode).ok_or_else(|| {
                Malformation::TreeEntryInvalidMode {
                    offset,
                    mode: mode.to_string(),
                }
            })?;

            let rest = &rest[space + 1..];
            let nul = rest
                .iter()
                .position(|&b| b == b'\0')
                .ok_or(Malformation::TreeEntryMissingNul { offset })?;
            let name = std::str::from_utf8(&rest[..nul])
                .map_err(|_| Malformation::TreeEntryInvalidName { offset })?
                .to_string();

            let rest = &rest[nul + 1..];
            let raw: &[u8; OBJECT_ID_BYTES] = rest
                .get(..OBJECT_ID_BYTES)
                .and_then(|bytes| bytes.try_into().ok())
                .ok_or(Malformation::TreeEntryTruncatedId { offset })?;

            entries.push(TreeEntry::new(mode, name, ObjectId::from_raw(raw)));
            offset += space + 1 + nul + 1 + OBJECT_ID_BYTES;
        }

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|entry| {
                format!(
                    "{} {} {}\t{}",
                    entry.mode.as_str(),
                    entry.mode.object_type(),
                    entry.oid,
                    entry.name
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}
