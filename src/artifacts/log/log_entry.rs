use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use derive_new::new;

/// One rendered entry of `log`
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct LogEntry {
    pub object_type: ObjectType,
    pub oid: ObjectId,
    pub author: Author,
    pub message: String,
}

impl LogEntry {
    pub fn from_commit(object_type: ObjectType, oid: ObjectId, commit: Commit) -> Self {
        LogEntry::new(
            object_type,
            oid,
            commit.author().clone(),
            commit.message().to_string(),
        )
    }

    /// `<kind> <id>`
    pub fn header(&self) -> String {
        format!("{} {}", self.object_type, self.oid)
    }

    /// Author, local date, a blank line, then the message and a newline.
    pub fn details(&self) -> String {
        format!(
            "Author: {} {}\nDate: {}\n\n{}\n",
            self.author.name(),
            self.author.email(),
            self.author.readable_local_timestamp(),
            self.message
        )
    }
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n{}", self.header(), self.details())
    }
}
