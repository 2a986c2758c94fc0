use crate::areas::repository::Repository;
use crate::artifacts::core::{StoreError, StoreResult};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;

impl Repository {
    /// Store a commit of `tree_oid` authored by the configured author.
    ///
    /// The parent is the branch label named by `HEAD`, not a commit id.
    /// `tree_oid` must name a stored tree.
    pub fn create_commit(&self, tree_oid: &ObjectId, message: &str) -> StoreResult<ObjectId> {
        let kind = self.database().read_header(tree_oid)?;
        if kind != ObjectType::Tree {
            return Err(StoreError::UnexpectedKind {
                id: tree_oid.clone(),
                expected: ObjectType::Tree,
                actual: kind,
            });
        }

        let parent = self.head_label()?;
        let commit = Commit::new(
            tree_oid.clone(),
            parent,
            self.config().author().clone(),
            message,
        );

        let commit_oid = self.database().store(&commit)?;
        tracing::debug!(%commit_oid, %tree_oid, subject = commit.short_message(), "created commit");

        Ok(commit_oid)
    }

    /// Commit the given tree, or a fresh snapshot of the work directory.
    pub fn commit_tree(&self, message: &str, tree: Option<&str>) -> anyhow::Result<()> {
        let tree_oid = match tree {
            Some(id_or_prefix) => self.database().resolve_prefix(id_or_prefix)?,
            None => self
                .build_tree(self.path())
                .with_context(|| format!("Failed to snapshot {}", self.path().display()))?,
        };

        let commit_oid = self
            .create_commit(&tree_oid, message)
            .context("Failed to create commit")?;

        writeln!(self.writer(), "{commit_oid}")?;

        Ok(())
    }
}
