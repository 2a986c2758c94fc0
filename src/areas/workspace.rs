use crate::artifacts::core::{StoreError, StoreResult};
use crate::artifacts::snapshot::ignore_list::IgnoreList;
use bytes::Bytes;
use derive_new::new;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// An immediate child of a workspace directory
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct WorkspaceEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Working directory file system access
///
/// Relative paths are resolved against the workspace root.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
    git_dir: Box<Path>,
    ignore_file_name: String,
    metadata_dir_name: Option<String>,
}

impl Workspace {
    pub fn new(
        path: Box<Path>,
        git_dir: Box<Path>,
        ignore_file_name: String,
        metadata_dir_name: Option<String>,
    ) -> Self {
        Workspace {
            path,
            git_dir,
            ignore_file_name,
            metadata_dir_name,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List the non-ignored immediate children of `dir_path`, sorted by name.
    ///
    /// An entry is skipped when it is the git dir itself, when it carries the
    /// metadata dir name of the default layout, or when its name appears in the
    /// directory's ignore file.
    pub fn list_dir(&self, dir_path: &Path) -> StoreResult<Vec<WorkspaceEntry>> {
        let dir_path = self.path.join(dir_path);

        let metadata = std::fs::metadata(&dir_path)
            .map_err(|e| StoreError::io("read directory", &dir_path, e))?;
        if !metadata.is_dir() {
            return Err(StoreError::io(
                "read directory",
                &dir_path,
                std::io::Error::from(std::io::ErrorKind::NotADirectory),
            ));
        }

        let ignore_list = self.load_ignore_list(&dir_path)?;
        // the git dir may not exist yet, in which case nothing can match it
        let git_dir = std::fs::canonicalize(&self.git_dir).ok();

        let mut entries = Vec::new();
        for entry in WalkDir::new(&dir_path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| StoreError::io("read directory", &dir_path, e.into()))?;

            let name = entry.file_name().to_str().ok_or_else(|| {
                StoreError::io(
                    "read file name in",
                    entry.path(),
                    std::io::Error::new(std::io::ErrorKind::InvalidData, "file name is not valid UTF-8"),
                )
            })?;

            let is_metadata = self.metadata_dir_name.as_deref() == Some(name)
                || (entry.file_type().is_dir()
                    && git_dir
                        .as_deref()
                        .is_some_and(|git_dir| is_same_dir(entry.path(), git_dir)));

            if is_metadata || ignore_list.is_ignored(name) {
                tracing::trace!(path = %entry.path().display(), "skipping ignored entry");
                continue;
            }

            entries.push(WorkspaceEntry::new(
                name.to_string(),
                entry.path().to_path_buf(),
                entry.file_type().is_dir(),
            ));
        }

        Ok(entries)
    }

    /// Load the optional ignore file of `dir_path`; a missing file ignores nothing.
    pub fn load_ignore_list(&self, dir_path: &Path) -> StoreResult<IgnoreList> {
        let ignore_path = self.path.join(dir_path).join(&self.ignore_file_name);

        match std::fs::read(&ignore_path) {
            Ok(content) => Ok(IgnoreList::parse(&String::from_utf8_lossy(&content))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(IgnoreList::default()),
            Err(e) => Err(StoreError::io("read ignore file", &ignore_path, e)),
        }
    }

    pub fn read_file(&self, file_path: &Path) -> StoreResult<Bytes> {
        let file_path = self.path.join(file_path);

        std::fs::read(&file_path)
            .map(Bytes::from)
            .map_err(|e| StoreError::io("read file", &file_path, e))
    }
}

fn is_same_dir(path: &Path, canonical_dir: &Path) -> bool {
    path.file_name() == canonical_dir.file_name()
        && std::fs::canonicalize(path).is_ok_and(|path| path == canonical_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn workspace_dir() -> TempDir {
        let dir = TempDir::new().expect("Failed to create temp dir");
        dir.child("b.txt").write_str("b").unwrap();
        dir.child("a.txt").write_str("a").unwrap();
        dir.child("nested").create_dir_all().unwrap();
        dir.child(".git").child("HEAD").write_str("ref: refs/heads/main\n").unwrap();
        dir
    }

    fn workspace(dir: &TempDir) -> Workspace {
        Workspace::new(
            dir.path().to_path_buf().into_boxed_path(),
            dir.path().join(".git").into_boxed_path(),
            ".gitignore".to_string(),
            Some(".git".to_string()),
        )
    }

    fn workspace_with_git_dir(dir: &TempDir, git_dir: &Path) -> Workspace {
        Workspace::new(
            dir.path().to_path_buf().into_boxed_path(),
            git_dir.to_path_buf().into_boxed_path(),
            ".gitignore".to_string(),
            None,
        )
    }

    fn names(entries: &[WorkspaceEntry]) -> Vec<&str> {
        entries.iter().map(|entry| entry.name.as_str()).collect()
    }

    #[rstest]
    fn lists_children_without_metadata_dir(workspace_dir: TempDir) {
        let workspace = workspace(&workspace_dir);

        let entries = workspace.list_dir(Path::new("")).unwrap();

        assert_eq!(names(&entries), vec!["a.txt", "b.txt", "nested"]);
        assert!(entries[2].is_dir);
        assert!(!entries[0].is_dir);
    }

    #[rstest]
    fn honours_the_ignore_file(workspace_dir: TempDir) {
        workspace_dir.child(".gitignore").write_str("# local\nb.txt\n").unwrap();
        let workspace = workspace(&workspace_dir);

        let entries = workspace.list_dir(workspace_dir.path()).unwrap();

        assert_eq!(names(&entries), vec![".gitignore", "a.txt", "nested"]);
    }

    #[rstest]
    fn external_git_dir_name_does_not_hide_work_tree_folders(workspace_dir: TempDir) {
        let store_dir = TempDir::new().expect("Failed to create temp dir");
        let git_dir = store_dir.path().join("store");
        std::fs::create_dir_all(git_dir.join("objects")).unwrap();
        workspace_dir.child("store").child("keep.txt").write_str("keep").unwrap();
        let workspace = workspace_with_git_dir(&workspace_dir, &git_dir);

        let entries = workspace.list_dir(Path::new("")).unwrap();

        // without the default layout `.git` is an ordinary folder too
        assert_eq!(names(&entries), vec![".git", "a.txt", "b.txt", "nested", "store"]);
        assert_eq!(names(&workspace.list_dir(Path::new("store")).unwrap()), vec!["keep.txt"]);
    }

    #[rstest]
    fn git_dir_inside_the_work_tree_is_skipped_by_path(workspace_dir: TempDir) {
        workspace_dir.child("store").child("objects").create_dir_all().unwrap();
        workspace_dir.child("nested").child("store").child("keep.txt").write_str("keep").unwrap();
        let workspace = workspace_with_git_dir(&workspace_dir, &workspace_dir.path().join("store"));

        let entries = workspace.list_dir(Path::new("")).unwrap();
        assert_eq!(names(&entries), vec![".git", "a.txt", "b.txt", "nested"]);

        let nested = workspace.list_dir(Path::new("nested")).unwrap();
        assert_eq!(names(&nested), vec!["store"]);
    }

    #[rstest]
    fn missing_directory_is_an_io_error(workspace_dir: TempDir) {
        let workspace = workspace(&workspace_dir);

        assert!(matches!(
            workspace.list_dir(Path::new("absent")).unwrap_err(),
            StoreError::Io { .. }
        ));
        assert!(matches!(
            workspace.list_dir(Path::new("a.txt")).unwrap_err(),
            StoreError::Io { .. }
        ));
    }

    #[rstest]
    fn reads_file_bytes(workspace_dir: TempDir) {
        let workspace = workspace(&workspace_dir);
        assert_eq!(&workspace.read_file(Path::new("a.txt")).unwrap()[..], b"a");
    }
}
