use crate::areas::repository::Repository;
use crate::artifacts::core::StoreResult;
use crate::artifacts::database::database_entry::DatabaseEntry;

impl Repository {
    pub fn list_all_objects(&self) -> StoreResult<Vec<DatabaseEntry>> {
        self.database().list_all()
    }

    pub fn ls_objects(&self) -> anyhow::Result<()> {
        for entry in self.list_all_objects()? {
            writeln!(self.writer(), "{entry}")?;
        }

        Ok(())
    }
}
