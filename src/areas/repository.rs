use crate::areas::config::RepositoryConfig;
use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::{StoreError, StoreResult};
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

const HEAD_FILE: &str = "HEAD";
const HEAD_REF_PREFIX: &str = "ref: refs/heads/";

pub struct Repository {
    config: RepositoryConfig,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    workspace: Workspace,
}

impl Repository {
    pub fn new(config: RepositoryConfig, writer: Box<dyn std::io::Write>) -> Self {
        let database = Database::new(config.objects_dir().into_boxed_path());
        let workspace = Workspace::new(
            config.work_dir().to_path_buf().into_boxed_path(),
            config.git_dir().to_path_buf().into_boxed_path(),
            config.ignore_file_name().to_string(),
            config.metadata_dir_name().map(str::to_string),
        );

        Repository {
            config,
            writer: RefCell::new(writer),
            database,
            workspace,
        }
    }

    pub fn path(&self) -> &Path {
        self.config.work_dir()
    }

    pub fn git_path(&self) -> &Path {
        self.config.git_dir()
    }

    pub fn head_path(&self) -> PathBuf {
        self.config.git_dir().join(HEAD_FILE)
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Branch label named by `HEAD`, recorded as the parent of new commits.
    ///
    /// `None` when `HEAD` is missing or is not a symbolic branch reference.
    pub fn head_label(&self) -> StoreResult<Option<String>> {
        let head_path = self.head_path();

        let content = match std::fs::read_to_string(&head_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io("read HEAD", &head_path, e)),
        };

        Ok(content
            .trim()
            .strip_prefix(HEAD_REF_PREFIX)
            .filter(|label| !label.is_empty())
            .map(str::to_string))
    }
}
