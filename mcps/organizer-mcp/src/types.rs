//! Type definitions for the organizer MCP

use std::io;
use std::path::{Path, PathBuf};

use serde::{de, Deserialize, Deserializer, Serialize};
use thiserror::Error;

// ============================================================================
// Configuration Types
// ============================================================================

/// Server configuration, usually loaded from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Allowed root directories. Nothing outside these is ever touched.
    #[serde(default)]
    pub roots: Vec<String>,
    /// Also check the real (symlink-resolved) location of every path
    #[serde(default)]
    pub resolve_symlinks: bool,
    #[serde(default)]
    pub limits: Limits,
    #[serde(default)]
    pub safety: SafetyConfig,
}

impl Config {
    /// Default config restricted to the given roots
    pub fn with_roots<I, S>(roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Limits {
    /// Result cap used when a search does not specify one
    #[serde(default = "default_search_limit")]
    pub default_search_limit: usize,
    /// Upper bound for caller-supplied search limits
    #[serde(default = "default_max_search_limit")]
    pub max_search_limit: usize,
}

fn default_search_limit() -> usize {
    100
}

fn default_max_search_limit() -> usize {
    1000
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            default_search_limit: default_search_limit(),
            max_search_limit: default_max_search_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyConfig {
    /// Refuse to delete an allowed root directory itself
    #[serde(default = "default_true")]
    pub protect_roots: bool,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            protect_roots: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Accept `true`/`false` as JSON booleans or as strings.
///
/// Some clients stringify every argument, so `"true"` has to work too.
pub fn deserialize_lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Bool(bool),
        Text(String),
    }

    match Lenient::deserialize(deserializer)? {
        Lenient::Bool(value) => Ok(value),
        Lenient::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            other => Err(de::Error::custom(format!(
                "expected a boolean, got \"{}\"",
                other
            ))),
        },
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Type tag for a filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
    Other,
}

impl EntryKind {
    pub fn from_file_type(file_type: std::fs::FileType) -> Self {
        if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }
}

/// Immediate child of a listed directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirEntryInfo {
    pub name: String,
    pub is_directory: bool,
    pub is_file: bool,
}

/// Response for list_directory
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDirectoryResponse {
    pub path: String,
    pub entries: Vec<DirEntryInfo>,
    pub total_count: usize,
}

/// Response for create_directory
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateDirectoryResponse {
    pub created: String,
}

/// A single search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMatch {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

/// Response for search_paths
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchReport {
    pub root: String,
    /// Hits in walk order
    pub matches: Vec<SearchMatch>,
    /// Set to the limit when the walk stopped early because the limit was hit
    pub truncated_at: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveStatus {
    Ok,
    Error,
}

/// Outcome of one item of a batch move
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveResult {
    pub from: String,
    pub to: String,
    pub status: MoveStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response for move_items
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveReport {
    pub moved_count: usize,
    pub failed_count: usize,
    /// One entry per request, in request order
    pub details: Vec<MoveResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteReason {
    NotFound,
    UnsupportedType,
    None,
}

/// Response for delete_path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub deleted: bool,
    pub reason: DeleteReason,
    /// Absent when nothing exists at the path
    #[serde(rename = "type")]
    pub kind: Option<EntryKind>,
    pub path: String,
}

/// Response for list_allowed_directories
#[derive(Debug, Serialize, Deserialize)]
pub struct AllowedDirectoriesResponse {
    pub roots: Vec<String>,
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug)]
pub enum FsError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Access denied: {} is outside the allowed roots", .path.display())]
    OutsideAllowedRoots { path: PathBuf },

    #[error("Refusing to modify allowed root {}", .path.display())]
    RootProtected { path: PathBuf },

    #[error("Failed to read directory {}: {source}", .path.display())]
    DirectoryRead { path: PathBuf, source: io::Error },

    #[error("Failed to create directory {}: {source}", .path.display())]
    DirectoryCreate { path: PathBuf, source: io::Error },

    #[error("Failed to move {} to {}: {reason}", .from.display(), .to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    #[error("Failed to delete {}: {source}", .path.display())]
    Delete { path: PathBuf, source: io::Error },

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl FsError {
    /// Stable code for structured error payloads
    pub fn kind(&self) -> &'static str {
        match self {
            FsError::InvalidPath(_) => "invalid_path",
            FsError::OutsideAllowedRoots { .. } => "outside_allowed_roots",
            FsError::RootProtected { .. } => "root_protected",
            FsError::DirectoryRead { .. } => "directory_read_error",
            FsError::DirectoryCreate { .. } => "directory_create_error",
            FsError::Move { .. } => "move_error",
            FsError::Delete { .. } => "delete_error",
            FsError::InvalidParams(_) => "invalid_params",
            FsError::Config(_) => "config_error",
        }
    }

    /// The resolved path the error is about, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            FsError::OutsideAllowedRoots { path }
            | FsError::RootProtected { path }
            | FsError::DirectoryRead { path, .. }
            | FsError::DirectoryCreate { path, .. }
            | FsError::Delete { path, .. } => Some(path),
            FsError::Move { from, .. } => Some(from),
            _ => None,
        }
    }
}

pub type FsResult<T> = Result<T, FsError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Flag {
        #[serde(deserialize_with = "deserialize_lenient_bool")]
        value: bool,
    }

    #[test]
    fn test_lenient_bool_accepts_strings() {
        let parsed: Flag = serde_json::from_value(json!({ "value": "TRUE" })).unwrap();
        assert!(parsed.value);
        let parsed: Flag = serde_json::from_value(json!({ "value": false })).unwrap();
        assert!(!parsed.value);
        assert!(serde_json::from_value::<Flag>(json!({ "value": "maybe" })).is_err());
    }

    #[test]
    fn test_config_from_toml() {
        let config: Config = toml::from_str(
            r#"
            roots = ["/data/inbox", "~/Downloads"]

            [limits]
            default_search_limit = 25
            "#,
        )
        .unwrap();

        assert_eq!(config.roots.len(), 2);
        assert!(!config.resolve_symlinks);
        assert_eq!(config.limits.default_search_limit, 25);
        assert_eq!(config.limits.max_search_limit, 1000);
        assert!(config.safety.protect_roots);
    }

    #[test]
    fn test_wire_format() {
        let outcome = DeleteOutcome {
            deleted: false,
            reason: DeleteReason::NotFound,
            kind: None,
            path: "/data/gone".to_string(),
        };
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["reason"], "not_found");
        assert!(value["type"].is_null());

        let report = MoveReport {
            moved_count: 1,
            failed_count: 0,
            details: vec![MoveResult {
                from: "a".to_string(),
                to: "b".to_string(),
                status: MoveStatus::Ok,
                error: None,
            }],
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["movedCount"], 1);
        assert_eq!(value["details"][0]["status"], "ok");
        assert!(value["details"][0].get("error").is_none());
    }

    #[test]
    fn test_error_kind_and_path() {
        let err = FsError::OutsideAllowedRoots {
            path: PathBuf::from("/etc/passwd"),
        };
        assert_eq!(err.kind(), "outside_allowed_roots");
        assert_eq!(err.path(), Some(Path::new("/etc/passwd")));
        assert!(err.to_string().contains("/etc/passwd"));
    }

    #[test]
    fn test_root_protected_message_covers_moves() {
        let err = FsError::RootProtected {
            path: PathBuf::from("/data/inbox"),
        };
        assert_eq!(err.kind(), "root_protected");
        assert_eq!(err.to_string(), "Refusing to modify allowed root /data/inbox");
    }
}
