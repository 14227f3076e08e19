//! Sandbox module for path validation and security
//!
//! Every caller-supplied path goes through [`PathGuard::validate`] before any
//! filesystem access. Containment is decided on lexically normalized paths,
//! component by component, so `/data/inbox2` is never inside `/data/inbox`.

use std::ffi::OsString;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::types::{Config, FsError, FsResult};

/// Resolve `.` and `..` without touching the filesystem.
///
/// `..` at the root stays at the root, matching how the OS resolves `/..`.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => normalized.push(prefix.as_os_str()),
            Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(part) => normalized.push(part),
        }
    }
    normalized
}

/// Expand a leading `~` or `~/` against the home directory
fn expand_home(path: &str, home_dir: Option<&Path>) -> PathBuf {
    match home_dir {
        Some(home) if path == "~" => home.to_path_buf(),
        Some(home) => match path.strip_prefix("~/") {
            Some(rest) => home.join(rest),
            None => PathBuf::from(path),
        },
        None => PathBuf::from(path),
    }
}

/// Ordered, non-empty set of absolute, normalized root directories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedRoots {
    roots: Vec<PathBuf>,
}

impl AllowedRoots {
    /// Build from absolute paths. Duplicates are dropped, order is kept.
    pub fn new<I, P>(roots: I) -> FsResult<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut normalized: Vec<PathBuf> = Vec::new();
        for root in roots {
            let root = root.as_ref();
            if !root.is_absolute() {
                return Err(FsError::Config(format!(
                    "allowed root {} is not an absolute path",
                    root.display()
                )));
            }
            let root = normalize_lexically(root);
            if !normalized.contains(&root) {
                normalized.push(root);
            }
        }

        if normalized.is_empty() {
            return Err(FsError::Config(
                "at least one allowed root directory is required".to_string(),
            ));
        }

        Ok(Self { roots: normalized })
    }

    /// Build from config entries, expanding `~` and resolving relative
    /// entries against the current working directory.
    pub fn from_config(config: &Config) -> FsResult<Self> {
        let home_dir = dirs::home_dir();
        let cwd = std::env::current_dir()
            .map_err(|e| FsError::Config(format!("Could not determine working directory: {}", e)))?;

        let resolved = config.roots.iter().map(|raw| {
            let expanded = expand_home(raw.trim(), home_dir.as_deref());
            if expanded.is_absolute() {
                expanded
            } else {
                cwd.join(expanded)
            }
        });

        Self::new(resolved.collect::<Vec<_>>())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.roots.iter().map(PathBuf::as_path)
    }

    /// First configured root; relative caller paths resolve against it
    pub fn primary(&self) -> &Path {
        &self.roots[0]
    }

    /// The first root that equals or contains `path`
    pub fn containing(&self, path: &Path) -> Option<&Path> {
        self.iter().find(|root| path.starts_with(root))
    }

    /// True if `path` is exactly one of the roots
    pub fn is_root(&self, path: &Path) -> bool {
        self.iter().any(|root| root == path)
    }

    pub fn display_strings(&self) -> Vec<String> {
        self.iter().map(|p| p.display().to_string()).collect()
    }
}

/// An absolute, normalized path that was inside an allowed root when checked.
///
/// Only [`PathGuard::validate`] creates these. They are not cached: the
/// filesystem can change between calls, so every call validates again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPath(PathBuf);

impl ValidatedPath {
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for ValidatedPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ValidatedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Validates caller paths against the allowed roots
#[derive(Debug, Clone)]
pub struct PathGuard {
    roots: Arc<AllowedRoots>,
    /// Canonical root locations; set when symlink resolution is on
    real_roots: Option<Arc<Vec<PathBuf>>>,
    home_dir: Option<PathBuf>,
}

impl PathGuard {
    pub fn new(roots: Arc<AllowedRoots>) -> Self {
        Self {
            roots,
            real_roots: None,
            home_dir: dirs::home_dir(),
        }
    }

    pub fn from_config(config: &Config) -> FsResult<Self> {
        let guard = Self::new(Arc::new(AllowedRoots::from_config(config)?));
        Ok(if config.resolve_symlinks {
            guard.with_symlink_resolution()
        } else {
            guard
        })
    }

    /// Additionally require the symlink-resolved location to stay inside a root.
    ///
    /// Roots that do not exist yet keep their lexical form.
    pub fn with_symlink_resolution(mut self) -> Self {
        let real_roots = self
            .roots
            .iter()
            .map(|root| root.canonicalize().unwrap_or_else(|_| root.to_path_buf()))
            .collect();
        self.real_roots = Some(Arc::new(real_roots));
        self
    }

    pub fn roots(&self) -> &AllowedRoots {
        &self.roots
    }

    /// Turn raw input into an absolute, normalized path. No containment check.
    pub fn resolve(&self, raw: &str) -> FsResult<PathBuf> {
        if raw.trim().is_empty() {
            return Err(FsError::InvalidPath("path must not be empty".to_string()));
        }
        if raw.contains('\0') {
            return Err(FsError::InvalidPath("Path contains null byte".to_string()));
        }

        let expanded = expand_home(raw, self.home_dir.as_deref());
        let absolute = if expanded.is_absolute() {
            expanded
        } else {
            self.roots.primary().join(expanded)
        };

        Ok(normalize_lexically(&absolute))
    }

    /// Resolve `raw` and prove it lies inside an allowed root
    pub fn validate(&self, raw: &str) -> FsResult<ValidatedPath> {
        let resolved = self.resolve(raw)?;

        if self.roots.containing(&resolved).is_none() {
            tracing::warn!(path = %resolved.display(), "Rejected path outside allowed roots");
            return Err(FsError::OutsideAllowedRoots { path: resolved });
        }

        if let Some(real_roots) = &self.real_roots {
            let inside = real_location(&resolved)
                .map(|real| real_roots.iter().any(|root| real.starts_with(root)))
                .unwrap_or(false);
            if !inside {
                tracing::warn!(path = %resolved.display(), "Rejected path escaping allowed roots via symlink");
                return Err(FsError::OutsideAllowedRoots { path: resolved });
            }
        }

        Ok(ValidatedPath(resolved))
    }
}

/// Canonicalize the longest existing ancestor and re-attach the missing tail
fn real_location(path: &Path) -> Option<PathBuf> {
    let mut existing = path;
    let mut missing: Vec<OsString> = Vec::new();
    loop {
        match existing.canonicalize() {
            Ok(mut real) => {
                for part in missing.iter().rev() {
                    real.push(part);
                }
                return Some(real);
            }
            Err(_) => {
                missing.push(existing.file_name()?.to_os_string());
                existing = existing.parent()?;
            }
        }
    }
}
