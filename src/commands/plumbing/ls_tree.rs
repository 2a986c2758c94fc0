use crate::areas::repository::Repository;
use crate::artifacts::core::StoreResult;
use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::tree::{Tree, TreeEntry};

impl Repository {
    /// Entries of the tree named by `id_or_prefix`, in stored order.
    ///
    /// A commit id lists the commit's tree. Any other payload is parsed as a
    /// tree and fails as malformed when it is not one.
    pub fn list_tree_entries(&self, id_or_prefix: &str) -> StoreResult<Vec<TreeEntry>> {
        let database = self.database();
        let mut oid = database.resolve_prefix(id_or_prefix)?;

        if let Some(commit) = database.parse_object_as_commit(&oid)? {
            oid = commit.tree_oid().clone();
        }

        let (_, payload) = database.get(&oid)?;
        let tree = Tree::deserialize(payload).map_err(|e| e.at(&database.object_path(&oid)))?;

        Ok(tree.into_entries())
    }

    pub fn ls_tree(&self, id_or_prefix: &str) -> anyhow::Result<()> {
        for entry in self.list_tree_entries(id_or_prefix)? {
            writeln!(self.writer(), "{}", entry.display_name())?;
        }

        Ok(())
    }
}
