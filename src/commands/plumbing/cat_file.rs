use crate::areas::repository::Repository;
use crate::artifacts::core::StoreResult;
use crate::artifacts::objects::object::{Object, ObjectBox};
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatFileMode {
    /// Print the payload; trees are pretty-printed one entry per line
    Pretty,
    /// Print the object kind
    Type,
}

impl Repository {
    /// Load an object by full id or unambiguous prefix.
    pub fn read_object(&self, id_or_prefix: &str) -> StoreResult<(ObjectType, Bytes)> {
        let oid = self.database().resolve_prefix(id_or_prefix)?;
        self.database().get(&oid)
    }

    pub fn cat_file(&self, id_or_prefix: &str, mode: CatFileMode) -> anyhow::Result<()> {
        let oid = self.database().resolve_prefix(id_or_prefix)?;

        match mode {
            CatFileMode::Type => {
                let object_type = self.database().read_header(&oid)?;
                writeln!(self.writer(), "{object_type}")?;
            }
            CatFileMode::Pretty => match self.database().parse_object(&oid)? {
                ObjectBox::Blob(blob) => self.writer().write_all(blob.content())?,
                ObjectBox::Tree(tree) if tree.is_empty() => {}
                ObjectBox::Tree(tree) => writeln!(self.writer(), "{}", tree.display())?,
                ObjectBox::Commit(commit) => write!(self.writer(), "{}", commit.display())?,
            },
        }

        Ok(())
    }
}
