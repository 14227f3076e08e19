//! Filesystem operations
//!
//! Each component owns a [`PathGuard`](crate::sandbox::PathGuard) clone and
//! validates every path it touches before the first filesystem call.

mod batch_move;
mod create;
mod delete;
mod list;
mod search;

pub use batch_move::BatchMover;
pub use create::DirectoryCreator;
pub use delete::PathDeleter;
pub use list::{DirectoryLister, Listing};
pub use search::{PathSearcher, SearchFilter};

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::types::EntryKind;

/// Directory child as seen by the walkers
#[derive(Debug)]
struct Child {
    name: String,
    path: PathBuf,
    kind: EntryKind,
}

/// Read the immediate children of `dir`, sorted by name.
///
/// Types come from the entry itself and are not followed through symlinks,
/// so a symlink is reported as [`EntryKind::Other`].
async fn read_children(dir: &Path) -> std::io::Result<Vec<Child>> {
    let mut read_dir = fs::read_dir(dir).await?;
    let mut children = Vec::new();

    while let Some(entry) = read_dir.next_entry().await? {
        let kind = match entry.file_type().await {
            Ok(file_type) => EntryKind::from_file_type(file_type),
            Err(e) => {
                tracing::debug!(path = %entry.path().display(), error = %e, "Could not stat entry");
                EntryKind::Other
            }
        };
        children.push(Child {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: entry.path(),
            kind,
        });
    }

    children.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(children)
}
