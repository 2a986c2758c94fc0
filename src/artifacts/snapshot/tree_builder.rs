//! Recursive directory-to-tree conversion
//!
//! Each call builds one directory: sub-directories are built first by a
//! recursive call that returns the child tree id, regular files are stored as
//! blobs, and the collected entries are stored as a tree sorted by name.
//!
//! A failure anywhere aborts the whole build. Blobs written before the failure
//! stay in the store, but the enclosing trees are never written.

use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::StoreResult;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::entry_mode::{EntryMode, FileMode};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use derive_new::new;
use std::path::Path;

#[derive(Debug, new)]
pub struct TreeBuilder<'r> {
    database: &'r Database,
    workspace: &'r Workspace,
}

impl TreeBuilder<'_> {
    pub fn build(&self, dir_path: &Path) -> StoreResult<ObjectId> {
        let children = self.workspace.list_dir(dir_path)?;

        let mut entries = Vec::with_capacity(children.len());
        for child in children {
            let (mode, oid) = if child.is_dir {
                (EntryMode::Directory, self.build(&child.path)?)
            } else {
                let content = self.workspace.read_file(&child.path)?;
                let oid = self.database.store(&Blob::new(content))?;
                (EntryMode::File(FileMode::Regular), oid)
            };

            entries.push(TreeEntry::new(mode, child.name, oid));
        }

        let tree = Tree::new(entries);
        let oid = self.database.store(&tree)?;
        tracing::debug!(
            %oid,
            path = %dir_path.display(),
            entries = tree.entries().len(),
            "built tree"
        );

        Ok(oid)
    }
}
