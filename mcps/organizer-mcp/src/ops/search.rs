use std::collections::{HashSet, VecDeque};

use crate::sandbox::PathGuard;
use crate::types::{EntryKind, FsError, FsResult, SearchMatch, SearchReport};

use super::{read_children, Child};

/// What a search collects and how many hits it stops at.
///
/// Extension and name matching is case-insensitive.
#[derive(Debug, Clone)]
pub struct SearchFilter {
    search_files: bool,
    search_directories: bool,
    extensions: Vec<String>,
    names: HashSet<String>,
    limit: usize,
}

impl SearchFilter {
    /// Files only, any extension, stopping after `limit` hits
    pub fn new(limit: usize) -> FsResult<Self> {
        if limit == 0 {
            return Err(FsError::InvalidParams(
                "limit must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            search_files: true,
            search_directories: false,
            extensions: Vec::new(),
            names: HashSet::new(),
            limit,
        })
    }

    pub fn files(mut self, enabled: bool) -> Self {
        self.search_files = enabled;
        self
    }

    pub fn directories(mut self, enabled: bool) -> Self {
        self.search_directories = enabled;
        self
    }

    /// File name suffixes such as `.png`. Empty means every file matches.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().to_lowercase())
            .collect();
        self
    }

    /// Exact directory names. Empty means every directory matches; entries
    /// are kept as given, so `[""]` matches nothing.
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.names = names
            .into_iter()
            .map(|n| n.as_ref().to_lowercase())
            .collect();
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    fn matches_file(&self, name: &str) -> bool {
        if !self.search_files {
            return false;
        }
        if self.extensions.is_empty() {
            return true;
        }
        let name = name.to_lowercase();
        self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }

    fn matches_directory(&self, name: &str) -> bool {
        self.search_directories && (self.names.is_empty() || self.names.contains(&name.to_lowercase()))
    }
}

/// Depth-first search below a root directory
#[derive(Debug, Clone)]
pub struct PathSearcher {
    guard: PathGuard,
    max_limit: usize,
}

impl PathSearcher {
    /// `max_limit` caps whatever limit a filter asks for
    pub fn new(guard: PathGuard, max_limit: usize) -> Self {
        Self {
            guard,
            max_limit: max_limit.max(1),
        }
    }

    /// Walk `raw_root` in pre-order, collecting matches until the limit.
    ///
    /// Directories are always descended into, whether or not they match.
    /// Children are visited in name order. Unreadable subdirectories are
    /// skipped; an unreadable root is an error.
    pub async fn search(&self, raw_root: &str, filter: &SearchFilter) -> FsResult<SearchReport> {
        let root = self.guard.validate(raw_root)?;
        let limit = filter.limit().min(self.max_limit);
        tracing::debug!(root = %root, limit, "Searching");

        let top = read_children(root.as_path())
            .await
            .map_err(|source| FsError::DirectoryRead {
                path: root.as_path().to_path_buf(),
                source,
            })?;

        let mut matches: Vec<SearchMatch> = Vec::new();
        // One frame per open directory; the last frame is the one being walked
        let mut stack: Vec<VecDeque<Child>> = vec![top.into()];

        while let Some(frame) = stack.last_mut() {
            let Some(child) = frame.pop_front() else {
                stack.pop();
                continue;
            };

            match child.kind {
                EntryKind::Directory => {
                    if filter.matches_directory(&child.name) {
                        matches.push(SearchMatch {
                            path: child.path.display().to_string(),
                            kind: EntryKind::Directory,
                        });
                        if matches.len() >= limit {
                            break;
                        }
                    }
                    match read_children(&child.path).await {
                        Ok(children) => stack.push(children.into()),
                        Err(e) => {
                            tracing::warn!(path = %child.path.display(), error = %e, "Skipping unreadable directory");
                        }
                    }
                }
                EntryKind::File => {
                    if filter.matches_file(&child.name) {
                        matches.push(SearchMatch {
                            path: child.path.display().to_string(),
                            kind: EntryKind::File,
                        });
                        if matches.len() >= limit {
                            break;
                        }
                    }
                }
                EntryKind::Other => {}
            }
        }

        let truncated_at = (matches.len() >= limit).then_some(limit);
        tracing::debug!(root = %root, found = matches.len(), "Search finished");

        Ok(SearchReport {
            root: root.to_string(),
            matches,
            truncated_at,
        })
    }
}
