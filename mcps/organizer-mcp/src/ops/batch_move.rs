use tokio::fs;

use crate::params::MoveRequest;
use crate::sandbox::PathGuard;
use crate::types::{FsError, FsResult, MoveReport, MoveResult, MoveStatus};

/// Moves many (from, to) pairs, reporting each one separately.
///
/// Items run in order, one at a time. A failing item never stops the batch.
/// An existing file at the destination is replaced.
#[derive(Debug, Clone)]
pub struct BatchMover {
    guard: PathGuard,
    protect_roots: bool,
}

impl BatchMover {
    pub fn new(guard: PathGuard, protect_roots: bool) -> Self {
        Self {
            guard,
            protect_roots,
        }
    }

    pub async fn move_all(&self, requests: &[MoveRequest]) -> MoveReport {
        let mut details = Vec::with_capacity(requests.len());

        for request in requests {
            let outcome = self.move_one(request).await;
            let (status, error) = match outcome {
                Ok(()) => (MoveStatus::Ok, None),
                Err(e) => {
                    tracing::warn!(from = %request.from, to = %request.to, error = %e, "Move failed");
                    (MoveStatus::Error, Some(e.to_string()))
                }
            };
            details.push(MoveResult {
                from: request.from.clone(),
                to: request.to.clone(),
                status,
                error,
            });
        }

        let moved_count = details
            .iter()
            .filter(|d| d.status == MoveStatus::Ok)
            .count();

        MoveReport {
            moved_count,
            failed_count: details.len() - moved_count,
            details,
        }
    }

    async fn move_one(&self, request: &MoveRequest) -> FsResult<()> {
        let from = self.guard.validate(&request.from)?;
        let to = self.guard.validate(&request.to)?;

        if self.protect_roots {
            for path in [&from, &to] {
                if self.guard.roots().is_root(path.as_path()) {
                    return Err(FsError::RootProtected {
                        path: path.as_path().to_path_buf(),
                    });
                }
            }
        }

        // Nothing on disk changes until the move is known to be possible
        if let Err(e) = fs::symlink_metadata(&from).await {
            return Err(FsError::Move {
                from: from.as_path().to_path_buf(),
                to: to.as_path().to_path_buf(),
                reason: if e.kind() == std::io::ErrorKind::NotFound {
                    "source does not exist".to_string()
                } else {
                    e.to_string()
                },
            });
        }
        if to.as_path() != from.as_path() && to.as_path().starts_with(from.as_path()) {
            return Err(FsError::Move {
                from: from.as_path().to_path_buf(),
                to: to.as_path().to_path_buf(),
                reason: "destination is inside the source".to_string(),
            });
        }

        if let Some(parent) = to.as_path().parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| FsError::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        fs::rename(&from, &to).await.map_err(|e| FsError::Move {
            from: from.as_path().to_path_buf(),
            to: to.as_path().to_path_buf(),
            reason: e.to_string(),
        })?;

        tracing::info!(from = %from, to = %to, "Moved");
        Ok(())
    }
}
