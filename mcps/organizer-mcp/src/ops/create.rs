use tokio::fs;

use crate::sandbox::{PathGuard, ValidatedPath};
use crate::types::{FsError, FsResult};

/// Creates directories, including missing ancestors. Idempotent.
#[derive(Debug, Clone)]
pub struct DirectoryCreator {
    guard: PathGuard,
}

impl DirectoryCreator {
    pub fn new(guard: PathGuard) -> Self {
        Self { guard }
    }

    pub async fn make_dir(&self, raw: &str) -> FsResult<ValidatedPath> {
        let path = self.guard.validate(raw)?;

        fs::create_dir_all(&path)
            .await
            .map_err(|source| FsError::DirectoryCreate {
                path: path.as_path().to_path_buf(),
                source,
            })?;

        tracing::info!(path = %path, "Created directory");
        Ok(path)
    }
}
