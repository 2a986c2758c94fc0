use crate::artifacts::objects::commit::Author;
use std::path::{Path, PathBuf};

pub const DEFAULT_METADATA_DIR: &str = ".git";
pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";
pub const DEFAULT_AUTHOR_NAME: &str = "Anonymous";
pub const DEFAULT_AUTHOR_EMAIL: &str = "anonymous@localhost";

/// Everything a repository needs to know about its surroundings
///
/// Built once by the caller and handed to [`Repository::new`]; nothing below
/// the binary reads the process environment.
///
/// [`Repository::new`]: crate::areas::repository::Repository::new
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    work_dir: PathBuf,
    git_dir: PathBuf,
    metadata_dir_name: String,
    ignore_file_name: String,
    author: Author,
}

impl RepositoryConfig {
    /// Defaults rooted at `work_dir`: metadata in `<work_dir>/.git`, ignore
    /// file `.gitignore`, anonymous author stamped with the current time.
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        let work_dir = work_dir.into();

        RepositoryConfig {
            git_dir: work_dir.join(DEFAULT_METADATA_DIR),
            work_dir,
            metadata_dir_name: DEFAULT_METADATA_DIR.to_string(),
            ignore_file_name: DEFAULT_IGNORE_FILE.to_string(),
            author: Author::new(
                DEFAULT_AUTHOR_NAME.to_string(),
                DEFAULT_AUTHOR_EMAIL.to_string(),
            ),
        }
    }

    /// Place the metadata directory elsewhere. Only that directory itself is
    /// skipped by the tree builder, not other entries sharing its name.
    pub fn with_git_dir(mut self, git_dir: impl Into<PathBuf>) -> Self {
        self.git_dir = git_dir.into();
        self
    }

    pub fn with_ignore_file_name(mut self, ignore_file_name: impl Into<String>) -> Self {
        self.ignore_file_name = ignore_file_name.into();
        self
    }

    pub fn with_author(mut self, author: Author) -> Self {
        self.author = author;
        self
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.git_dir.join("objects")
    }

    /// Name skipped at every depth of a snapshot; only set while the git dir
    /// is `<work_dir>/.git`.
    pub fn metadata_dir_name(&self) -> Option<&str> {
        (self.git_dir == self.work_dir.join(&self.metadata_dir_name))
            .then_some(self.metadata_dir_name.as_str())
    }

    pub fn ignore_file_name(&self) -> &str {
        &self.ignore_file_name
    }

    pub fn author(&self) -> &Author {
        &self.author
    }
}
