use crate::areas::repository::Repository;
use crate::artifacts::core::StoreResult;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use std::path::Path;

impl Repository {
    pub fn store_blob(&self, content: impl Into<Bytes>) -> StoreResult<ObjectId> {
        self.database().store(&Blob::new(content))
    }

    pub fn hash_object(&self, file_path: &Path, write: bool) -> anyhow::Result<()> {
        let content = self.workspace().read_file(file_path)?;

        let object_id = if write {
            self.store_blob(content)
                .with_context(|| format!("Failed to store {}", file_path.display()))?
        } else {
            Blob::new(content).object_id()?
        };

        writeln!(self.writer(), "{object_id}")?;

        Ok(())
    }
}
