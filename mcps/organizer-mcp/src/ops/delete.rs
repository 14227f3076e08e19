use std::io::ErrorKind;

use tokio::fs;

use crate::sandbox::{PathGuard, ValidatedPath};
use crate::types::{DeleteOutcome, DeleteReason, EntryKind, FsError, FsResult};

/// Deletes a file, or a directory with everything below it.
///
/// Missing paths and unsupported entry types are outcomes, not errors.
#[derive(Debug, Clone)]
pub struct PathDeleter {
    guard: PathGuard,
    protect_roots: bool,
}

impl PathDeleter {
    pub fn new(guard: PathGuard, protect_roots: bool) -> Self {
        Self {
            guard,
            protect_roots,
        }
    }

    /// Remove the file or directory tree at `raw`.
    ///
    /// A missing path is `not_found` and a symlink or special file is
    /// `unsupported_type`, both as outcomes. Any other I/O failure while
    /// stating or removing, such as permission denied, is `FsError::Delete`.
    pub async fn delete(&self, raw: &str) -> FsResult<DeleteOutcome> {
        let path = self.guard.validate(raw)?;

        if self.protect_roots && self.guard.roots().is_root(path.as_path()) {
            return Err(FsError::RootProtected {
                path: path.into_path_buf(),
            });
        }

        // symlink_metadata: a symlink is reported as itself and never followed
        let metadata = match fs::symlink_metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(not_found(&path)),
            Err(source) => {
                return Err(FsError::Delete {
                    path: path.into_path_buf(),
                    source,
                })
            }
        };

        let kind = EntryKind::from_file_type(metadata.file_type());
        let removed = match kind {
            EntryKind::Directory => fs::remove_dir_all(&path).await,
            EntryKind::File => fs::remove_file(&path).await,
            EntryKind::Other => {
                tracing::debug!(path = %path, "Not deleting unsupported entry type");
                return Ok(DeleteOutcome {
                    deleted: false,
                    reason: DeleteReason::UnsupportedType,
                    kind: Some(EntryKind::Other),
                    path: path.to_string(),
                });
            }
        };

        match removed {
            Ok(()) => {}
            // Gone between the stat and the removal
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(not_found(&path)),
            Err(source) => {
                return Err(FsError::Delete {
                    path: path.into_path_buf(),
                    source,
                })
            }
        }

        tracing::info!(path = %path, kind = ?kind, "Deleted");
        Ok(DeleteOutcome {
            deleted: true,
            reason: DeleteReason::None,
            kind: Some(kind),
            path: path.to_string(),
        })
    }
}

fn not_found(path: &ValidatedPath) -> DeleteOutcome {
    DeleteOutcome {
        deleted: false,
        reason: DeleteReason::NotFound,
        kind: None,
        path: path.to_string(),
    }
}
