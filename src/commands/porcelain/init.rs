use crate::areas::repository::Repository;
use crate::artifacts::core::{StoreError, StoreResult};
use std::fs;

const DEFAULT_BRANCH: &str = "main";

impl Repository {
    /// Create the metadata skeleton: `objects/`, `refs/`, `logs/` and `HEAD`.
    ///
    /// Returns `false` without touching anything when the metadata directory
    /// already exists.
    pub fn initialize(&self) -> StoreResult<bool> {
        let git_path = self.git_path();
        if git_path.exists() {
            tracing::debug!(path = %git_path.display(), "repository already exists");
            return Ok(false);
        }

        for dir in [
            self.database().objects_path().to_path_buf(),
            git_path.join("refs"),
            git_path.join("logs"),
        ] {
            fs::create_dir_all(&dir).map_err(|e| StoreError::io("create directory", &dir, e))?;
        }

        let head_path = self.head_path();
        fs::write(&head_path, format!("ref: refs/heads/{DEFAULT_BRANCH}\n"))
            .map_err(|e| StoreError::io("write HEAD", &head_path, e))?;

        Ok(true)
    }

    pub fn init(&self) -> anyhow::Result<()> {
        if self.initialize()? {
            writeln!(
                self.writer(),
                "Initialized empty repository in {}",
                self.git_path().display()
            )?;
        } else {
            writeln!(
                self.writer(),
                "Repository already exists in {}",
                self.git_path().display()
            )?;
        }

        Ok(())
    }
}
