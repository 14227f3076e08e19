use tokio::fs;

use crate::sandbox::{PathGuard, ValidatedPath};
use crate::types::{DirEntryInfo, EntryKind, FsError, FsResult};

use super::read_children;

/// Result of listing one directory
#[derive(Debug)]
pub struct Listing {
    pub path: ValidatedPath,
    pub entries: Vec<DirEntryInfo>,
}

/// Lists the immediate children of a directory
#[derive(Debug, Clone)]
pub struct DirectoryLister {
    guard: PathGuard,
}

impl DirectoryLister {
    pub fn new(guard: PathGuard) -> Self {
        Self { guard }
    }

    pub async fn list(&self, raw: &str) -> FsResult<Listing> {
        let path = self.guard.validate(raw)?;
        tracing::debug!(path = %path, "Listing directory");

        let read_error = |source| FsError::DirectoryRead {
            path: path.as_path().to_path_buf(),
            source,
        };

        // read_dir on a file fails with a platform-specific error; check first
        // so the message is always the same
        let metadata = fs::metadata(&path).await.map_err(read_error)?;
        if !metadata.is_dir() {
            return Err(read_error(std::io::Error::other("not a directory")));
        }

        let entries = read_children(path.as_path())
            .await
            .map_err(read_error)?
            .into_iter()
            .map(|child| DirEntryInfo {
                name: child.name,
                is_directory: child.kind == EntryKind::Directory,
                is_file: child.kind == EntryKind::File,
            })
            .collect();

        Ok(Listing { path, entries })
    }
}
