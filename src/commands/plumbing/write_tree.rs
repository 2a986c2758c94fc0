use crate::areas::repository::Repository;
use crate::artifacts::core::StoreResult;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::snapshot::tree_builder::TreeBuilder;
use anyhow::Context;
use std::path::Path;

impl Repository {
    /// Snapshot `dir_path` recursively and return the root tree id.
    pub fn build_tree(&self, dir_path: &Path) -> StoreResult<ObjectId> {
        TreeBuilder::new(self.database(), self.workspace()).build(dir_path)
    }

    pub fn write_tree(&self) -> anyhow::Result<()> {
        let tree_oid = self
            .build_tree(self.path())
            .with_context(|| format!("Failed to snapshot {}", self.path().display()))?;

        writeln!(self.writer(), "{tree_oid}")?;

        Ok(())
    }
}
