use crate::areas::repository::Repository;
use crate::artifacts::core::StoreResult;
use crate::artifacts::log::log_entry::LogEntry;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;

impl Repository {
    /// Every well-formed commit in enumeration order.
    ///
    /// Objects whose header names a loggable kind are parsed as commits; the
    /// ones that turn out malformed are skipped.
    pub fn render_log(&self) -> StoreResult<Vec<LogEntry>> {
        let mut entries = Vec::new();

        for oid in self.database().list_ids()? {
            match self.load_log_entry(&oid) {
                Ok(Some(entry)) => entries.push(entry),
                Ok(None) => {}
                Err(e) if e.is_malformed() => {
                    tracing::debug!(oid = oid.to_short_oid(), error = %e, "skipping object in log");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(entries)
    }

    fn load_log_entry(&self, oid: &ObjectId) -> StoreResult<Option<LogEntry>> {
        let object_type = self.database().read_header(oid)?;
        if !object_type.is_loggable() {
            return Ok(None);
        }

        let (object_type, payload) = self.database().get(oid)?;
        let commit = Commit::deserialize(payload).map_err(|e| e.at(&self.database().object_path(oid)))?;

        Ok(Some(LogEntry::from_commit(object_type, oid.clone(), commit)))
    }

    pub fn log(&self) -> anyhow::Result<()> {
        for entry in self.render_log()? {
            writeln!(self.writer(), "{}", entry.header().yellow())?;
            write!(self.writer(), "{}", entry.details())?;
        }

        Ok(())
    }
}
