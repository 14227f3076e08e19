//! Parameter types for organizer MCP tools

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListDirectoryParams {
    #[schemars(description = "Path of the directory to list")]
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateDirectoryParams {
    #[schemars(description = "Directory to create; missing parent directories are created too")]
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchPathsParams {
    #[schemars(description = "Directory to search recursively")]
    pub path: String,

    #[schemars(with = "bool", description = "Include files in the results (default: true)")]
    #[serde(
        default = "default_true",
        deserialize_with = "crate::types::deserialize_lenient_bool"
    )]
    pub search_files: bool,

    #[schemars(with = "bool", description = "Include directories in the results (default: false)")]
    #[serde(default, deserialize_with = "crate::types::deserialize_lenient_bool")]
    pub search_directories: bool,

    #[schemars(
        description = "File name suffixes to match, case-insensitive (e.g. ['.png', '.jpg']). Empty matches every file."
    )]
    #[serde(default)]
    pub extensions: Vec<String>,

    #[schemars(
        description = "Exact directory names to match, case-insensitive (e.g. ['Screenshots']). Empty matches every directory."
    )]
    #[serde(default)]
    pub names: Vec<String>,

    #[schemars(description = "Stop after this many matches (default from server config)")]
    #[serde(default)]
    pub limit: Option<usize>,
}

/// One source/destination pair of a batch move
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MoveRequest {
    #[schemars(description = "Path to move")]
    pub from: String,

    #[schemars(description = "Destination path; an existing file there is replaced")]
    pub to: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct MoveItemsParams {
    #[schemars(description = "Moves to perform, in order. Each one succeeds or fails on its own.")]
    pub items: Vec<MoveRequest>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeletePathParams {
    #[schemars(description = "File or directory to delete. Directories are deleted recursively.")]
    pub path: String,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_params_defaults() {
        let params: SearchPathsParams =
            serde_json::from_value(json!({ "path": "~/Downloads" })).unwrap();
        assert!(params.search_files);
        assert!(!params.search_directories);
        assert!(params.extensions.is_empty());
        assert!(params.names.is_empty());
        assert_eq!(params.limit, None);
    }

    #[test]
    fn test_search_params_camel_case_and_lenient_bools() {
        let params: SearchPathsParams = serde_json::from_value(json!({
            "path": "/data",
            "searchFiles": "false",
            "searchDirectories": true,
            "names": ["Screenshots"],
            "limit": 5
        }))
        .unwrap();
        assert!(!params.search_files);
        assert!(params.search_directories);
        assert_eq!(params.names, vec!["Screenshots"]);
        assert_eq!(params.limit, Some(5));
    }

    #[test]
    fn test_non_string_path_rejected() {
        assert!(serde_json::from_value::<DeletePathParams>(json!({ "path": 42 })).is_err());
        assert!(serde_json::from_value::<DeletePathParams>(json!({})).is_err());
    }
}
