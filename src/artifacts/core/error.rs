//! Store error taxonomy
//!
//! Every fallible operation of the object store reports one of a closed set of
//! error kinds. Each variant carries the structured context needed to match on
//! it in tests without comparing rendered strings.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use std::path::{Path, PathBuf};

/// Result alias for object store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem failure (permission, missing path, disk I/O).
    #[error("Unable to {operation} {}: {source}", .path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Corrupt compression stream, bad header, truncated payload or
    /// unparsable tree/commit payload.
    #[error("Malformed object{}: {reason}", location_suffix(.location))]
    MalformedObject {
        location: Option<PathBuf>,
        reason: Malformation,
    },

    /// Nothing is stored at the resolved path.
    #[error("Object {id} not found at {}", .path.display())]
    ObjectNotFound { id: String, path: PathBuf },

    /// The prefix matches more than one stored object.
    #[error("Ambiguous object prefix {prefix}: candidates are {}", join_candidates(.candidates))]
    AmbiguousPrefix {
        prefix: String,
        candidates: Vec<ObjectId>,
    },

    /// The input can be neither an object id nor a prefix of one.
    #[error("Invalid object id {value:?}")]
    InvalidObjectId { value: String },

    /// The object exists but is of another kind than the operation needs.
    #[error("Object {id} is a {actual}, expected a {expected}")]
    UnexpectedKind {
        id: ObjectId,
        expected: ObjectType,
        actual: ObjectType,
    },
}

/// Why an object failed to decode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Malformation {
    #[error("corrupt compression stream ({0})")]
    CorruptStream(String),
    #[error("header is missing the space after the object kind")]
    MissingSpace,
    #[error("header is missing the null terminator")]
    MissingNul,
    #[error("unknown object kind {0:?}")]
    UnknownKind(String),
    #[error("invalid payload length {0:?}")]
    InvalidLength(String),
    #[error("truncated payload: header declares {declared} bytes, found {actual}")]
    Truncated { declared: usize, actual: usize },
    #[error("payload length mismatch: header declares {declared} bytes, found {actual}")]
    LengthMismatch { declared: usize, actual: usize },
    #[error("tree entry at offset {offset} is missing the space after its mode")]
    TreeEntryMissingSpace { offset: usize },
    #[error("tree entry at offset {offset} is missing the null after its name")]
    TreeEntryMissingNul { offset: usize },
    #[error("tree entry at offset {offset} has a truncated object id")]
    TreeEntryTruncatedId { offset: usize },
    #[error("tree entry at offset {offset} has an unknown mode {mode:?}")]
    TreeEntryInvalidMode { offset: usize, mode: String },
    #[error("tree entry at offset {offset} has a name that is not valid UTF-8")]
    TreeEntryInvalidName { offset: usize },
    #[error("payload is not valid UTF-8")]
    NotUtf8,
    #[error("commit has no tree line")]
    MissingTree,
    #[error("commit has an invalid tree id {0:?}")]
    InvalidTreeId(String),
    #[error("commit has no author line")]
    MissingAuthor,
    #[error("invalid author line {0:?}")]
    InvalidAuthor(String),
    #[error("invalid author timestamp {0:?}")]
    InvalidTimestamp(String),
}

impl StoreError {
    pub fn io(operation: &'static str, path: impl AsRef<Path>, source: std::io::Error) -> Self {
        StoreError::Io {
            operation,
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn malformed(reason: Malformation) -> Self {
        StoreError::MalformedObject {
            location: None,
            reason,
        }
    }

    /// Attach the object file path to a `MalformedObject` that was raised
    /// without one. Other variants pass through unchanged.
    pub fn at(self, object_path: &Path) -> Self {
        match self {
            StoreError::MalformedObject {
                location: None,
                reason,
            } => StoreError::MalformedObject {
                location: Some(object_path.to_path_buf()),
                reason,
            },
            other => other,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, StoreError::MalformedObject { .. })
    }
}

impl From<Malformation> for StoreError {
    fn from(reason: Malformation) -> Self {
        StoreError::malformed(reason)
    }
}

fn location_suffix(location: &Option<PathBuf>) -> String {
    match location {
        Some(path) => format!(" at {}", path.display()),
        None => String::new(),
    }
}

fn join_candidates(candidates: &[ObjectId]) -> String {
    candidates
        .iter()
        .map(|oid| oid.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}
