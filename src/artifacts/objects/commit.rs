//! Commit object
//!
//! Commits record a tree snapshot together with:
//! - An optional parent *label* (the branch named by `HEAD`, not a commit id)
//! - Author and committer information
//! - Commit message
//!
//! Commits are not chained into a history graph; the log is a flat scan.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <label>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```

use crate::artifacts::core::{Malformation, StoreResult};
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Author or committer information
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    timestamp: DateTime<FixedOffset>,
}

impl Author {
    /// Create a new author stamped with the current local time
    pub fn new(name: String, email: String) -> Self {
        Author {
            name,
            email,
            timestamp: chrono::Local::now().fixed_offset(),
        }
    }

    pub fn new_with_timestamp(name: String, email: String, timestamp: DateTime<FixedOffset>) -> Self {
        Author {
            name,
            email,
            timestamp,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Seconds since the Unix epoch
    pub fn epoch(&self) -> i64 {
        self.timestamp.timestamp()
    }

    /// String in format "Name <email> timestamp timezone"
    pub fn display(&self) -> String {
        format!(
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }

    /// Timestamp converted to the local timezone, e.g. "Mon Jan 1 12:34:56 2024 +0200"
    pub fn readable_local_timestamp(&self) -> String {
        self.timestamp
            .with_timezone(&chrono::Local)
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    /// Parse a user-supplied date in RFC 2822 or `%Y-%m-%d %H:%M:%S %z` form
    pub fn parse_date(date_str: &str) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc2822(date_str)
            .or_else(|_| DateTime::parse_from_str(date_str, "%Y-%m-%d %H:%M:%S %z"))
            .ok()
    }
}

impl TryFrom<&str> for Author {
    type Error = Malformation;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        // Format: "name <email> timestamp timezone"
        // Split the two trailing fields on any whitespace so names may contain spaces
        let invalid = || Malformation::InvalidAuthor(value.to_string());
        let (rest, timezone) = value
            .trim_end()
            .rsplit_once(char::is_whitespace)
            .ok_or_else(invalid)?;
        let (name_email_part, epoch_text) = rest
            .trim_end()
            .rsplit_once(char::is_whitespace)
            .ok_or_else(invalid)?;

        let epoch = epoch_text
            .parse::<i64>()
            .map_err(|_| Malformation::InvalidTimestamp(epoch_text.to_string()))?;

        let email_start = name_email_part.find('<').ok_or_else(invalid)?;
        let email_end = name_email_part
            .rfind('>')
            .filter(|&end| end > email_start)
            .ok_or_else(invalid)?;

        let name = name_email_part[..email_start].trim().to_string();
        if name.is_empty() {
            return Err(invalid());
        }
        let email = name_email_part[email_start + 1..email_end].to_string();

        let offset = parse_timezone(timezone).unwrap_or(Utc.fix());
        let timestamp = DateTime::from_timestamp(epoch, 0)
            .ok_or_else(|| Malformation::InvalidTimestamp(epoch_text.to_string()))?
            .with_timezone(&offset);

        Ok(Author {
            name,
            email,
            timestamp,
        })
    }
}

/// Parse a `+HHMM` / `-HHMM` offset.
fn parse_timezone(timezone: &str) -> Option<FixedOffset> {
    let (sign, digits) = match timezone.as_bytes().first()? {
        b'+' => (1, &timezone[1..]),
        b'-' => (-1, &timezone[1..]),
        _ => return None,
    };
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Commit object
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    tree_oid: ObjectId,
    /// Branch label recorded as parent; absent when the repository has no HEAD
    parent: Option<String>,
    author: Author,
    committer: Author,
    message: String,
}

impl Commit {
    /// Create a new commit
    ///
    /// The author is also used as committer. The message is stored with exactly
    /// one trailing newline.
    pub fn new(tree_oid: ObjectId, parent: Option<String>, author: Author, message: &str) -> Self {
        Commit {
            tree_oid,
            parent,
            author: author.clone(),
            committer: author,
            message: format!("{}\n", message.trim_end_matches('\n')),
        }
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    /// The message exactly as stored, including blank lines
    pub fn message(&self) -> &str {
        &self.message
    }

    /// First line of the commit message
    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    fn header_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("tree {}", self.tree_oid)];
        if let Some(parent) = &self.parent {
            lines.push(format!("parent {parent}"));
        }
        lines.push(format!("author {}", self.author.display()));
        lines.push(format!("committer {}", self.committer.display()));
        lines
    }
}

impl Packable for Commit {
    fn serialize(&self) -> StoreResult<Bytes> {
        Ok(self.display().into_bytes().into())
    }
}

impl Unpackable for Commit {
    /// Parse commit metadata up to the first blank line that follows at least
    /// one non-empty line; everything after that blank line is the message.
    fn deserialize(payload: Bytes) -> StoreResult<Self> {
        let content = std::str::from_utf8(&payload).map_err(|_| Malformation::NotUtf8)?;
        let lines = content.split('\n').collect::<Vec<&str>>();

        let mut tree_oid = None;
        let mut parent = None;
        let mut author = None;
        let mut committer = None;
        let mut message = String::new();
        let mut seen_metadata = false;

        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                if seen_metadata {
                    message = lines[i + 1..].join("\n");
                    break;
                }
                continue;
            }
            seen_metadata = true;

            if let Some(oid) = line.strip_prefix("tree ") {
                if tree_oid.is_none() {
                    let oid = ObjectId::try_parse(oid.trim())
                        .map_err(|_| Malformation::InvalidTreeId(oid.to_string()))?;
                    tree_oid = Some(oid);
                }
            } else if let Some(label) = line.strip_prefix("parent ") {
                parent.get_or_insert_with(|| label.trim().to_string());
            } else if let Some(value) = line.strip_prefix("author ") {
                if author.is_none() {
                    author = Some(Author::try_from(value)?);
                }
            } else if let Some(value) = line.strip_prefix("committer ") {
                // a committer line that cannot be parsed falls back to the author
                committer = committer.or_else(|| Author::try_from(value).ok());
            }
        }

        let author = author.ok_or(Malformation::MissingAuthor)?;
        let tree_oid = tree_oid.ok_or(Malformation::MissingTree)?;

        Ok(Commit {
            tree_oid,
            parent,
            committer: committer.unwrap_or_else(|| author.clone()),
            author,
            message,
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        format!("{}\n\n{}", self.header_lines().join("\n"), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::core::StoreError;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    const TREE_OID: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

    fn reason(error: StoreError) -> Malformation {
        match error {
            StoreError::MalformedObject { reason, .. } => reason,
            other => panic!("Expected MalformedObject, got {other:?}"),
        }
    }

    fn parse(payload: &str) -> StoreResult<Commit> {
        Commit::deserialize(Bytes::copy_from_slice(payload.as_bytes()))
    }

    #[fixture]
    fn author() -> Author {
        let timestamp = DateTime::parse_from_str("2023-01-01 12:00:00 +0400", "%Y-%m-%d %H:%M:%S %z")
            .expect("valid fixture date");
        Author::new_with_timestamp("fake_user".to_string(), "fake@email.com".to_string(), timestamp)
    }

    #[rstest]
    fn serializes_in_canonical_layout(author: Author) {
        let commit = Commit::new(
            ObjectId::try_parse(TREE_OID).unwrap(),
            Some("main".to_string()),
            author,
            "Initial commit",
        );

        let expected = format!(
            "tree {TREE_OID}\n\
             parent main\n\
             author fake_user <fake@email.com> 1672560000 +0400\n\
             committer fake_user <fake@email.com> 1672560000 +0400\n\
             \n\
             Initial commit\n"
        );
        assert_eq!(String::from_utf8(commit.serialize().unwrap().to_vec()).unwrap(), expected);
    }

    #[rstest]
    fn parses_what_it_serializes(author: Author) {
        let commit = Commit::new(
            ObjectId::try_parse(TREE_OID).unwrap(),
            None,
            author,
            "Subject\n\nBody line one\n\n\nBody line two\n",
        );

        let parsed = Commit::deserialize(commit.serialize().unwrap()).unwrap();

        assert_eq!(parsed, commit);
        assert_eq!(parsed.message(), "Subject\n\nBody line one\n\n\nBody line two\n");
        assert_eq!(parsed.short_message(), "Subject");
    }

    #[test]
    fn extracts_author_fields() {
        let commit = parse(&format!(
            "tree {TREE_OID}\nparent master\nauthor teyyub <t@example.com> 1661410769 +0400\n\nhello\n"
        ))
        .unwrap();

        assert_eq!(commit.author().name(), "teyyub");
        assert_eq!(commit.author().email(), "t@example.com");
        assert_eq!(commit.author().epoch(), 1661410769);
        assert_eq!(commit.parent(), Some("master"));
        assert_eq!(commit.message(), "hello\n");
    }

    #[test]
    fn accepts_author_names_with_spaces() {
        let commit = parse(&format!(
            "tree {TREE_OID}\nauthor Ada Lovelace <ada@example.com> 0 +0000\n\nmsg"
        ))
        .unwrap();

        assert_eq!(commit.author().name(), "Ada Lovelace");
        assert_eq!(commit.message(), "msg");
    }

    #[test]
    fn leading_blank_lines_do_not_end_metadata() {
        let commit = parse(&format!(
            "\n\ntree {TREE_OID}\nauthor a <a@b.c> 10 +0000\n\nmessage"
        ))
        .unwrap();

        assert_eq!(commit.message(), "message");
    }

    #[test]
    fn missing_message_is_empty() {
        let commit = parse(&format!("tree {TREE_OID}\nauthor a <a@b.c> 10 +0000")).unwrap();
        assert_eq!(commit.message(), "");
    }

    #[test]
    fn author_text_inside_the_message_is_not_metadata() {
        let error = parse(&format!("tree {TREE_OID}\n\nauthor a <a@b.c> 10 +0000\n")).unwrap_err();
        assert_eq!(reason(error), Malformation::MissingAuthor);
    }

    #[test]
    fn runs_of_whitespace_separate_author_fields() {
        let commit = parse(&format!(
            "tree {TREE_OID}\nauthor a <a@b.c> 10  +0000\n\nm"
        ))
        .unwrap();
        assert_eq!(commit.author().name(), "a");
        assert_eq!(commit.author().epoch(), 10);

        let author = Author::try_from("Jane Doe <jane@example.com>\t1672560000 +0400").unwrap();
        assert_eq!(author.name(), "Jane Doe");
        assert_eq!(author.epoch(), 1672560000);
        assert_eq!(author.timestamp().offset().local_minus_utc(), 4 * 3600);
    }

    #[test]
    fn unknown_timezone_is_tolerated() {
        let commit = parse(&format!("tree {TREE_OID}\nauthor a <a@b.c> 10 EST\n\nm")).unwrap();
        assert_eq!(commit.author().epoch(), 10);
    }

    #[rstest]
    #[case("tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904\n\nno author\n", Malformation::MissingAuthor)]
    #[case(
        "tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904\nauthor a <a@b.c> soon +0000\n\nm",
        Malformation::InvalidTimestamp("soon".to_string())
    )]
    #[case(
        "tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904\nauthor a a@b.c 10 +0000\n\nm",
        Malformation::InvalidAuthor("a a@b.c 10 +0000".to_string())
    )]
    #[case(
        "tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904\nauthor <a@b.c> 10\n\nm",
        Malformation::InvalidAuthor("<a@b.c> 10".to_string())
    )]
    #[case("author a <a@b.c> 10 +0000\n\nm", Malformation::MissingTree)]
    #[case("tree nope\nauthor a <a@b.c> 10 +0000\n\nm", Malformation::InvalidTreeId("nope".to_string()))]
    fn rejects_malformed_commits(#[case] payload: &str, #[case] expected: Malformation) {
        assert_eq!(reason(parse(payload).unwrap_err()), expected);
    }

    #[test]
    fn rejects_non_utf8_payloads() {
        let error = Commit::deserialize(Bytes::from_static(&[0xff, 0xfe, b'\n'])).unwrap_err();
        assert_eq!(reason(error), Malformation::NotUtf8);
    }

    #[test]
    fn parses_user_supplied_dates() {
        assert!(Author::parse_date("2023-01-01 12:00:00 +0000").is_some());
        assert!(Author::parse_date("Sun, 01 Jan 2023 12:00:00 +0000").is_some());
        assert!(Author::parse_date("yesterday").is_none());
    }
}
