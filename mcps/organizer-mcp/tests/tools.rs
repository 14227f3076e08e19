//! Tool-level tests for the organizer MCP server
//!
//! Every test drives the server through `EmbeddableMcp::call_tool`, the same
//! dispatch a host uses in-process, against a scratch directory tree.

use std::path::Path;

use mcp_common::{CallToolResult, EmbeddableError, EmbeddableMcp};
use organizer_mcp::{Config, OrganizerMcpServer};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};

struct Sandbox {
    _dir: TempDir,
    root: std::path::PathBuf,
    outside: std::path::PathBuf,
    server: OrganizerMcpServer,
}

/// Scratch tree with an allowed `root/` and a sibling `root-other/` outside it
fn sandbox() -> Sandbox {
    let dir = tempdir().unwrap();
    let root = dir.path().join("root");
    let outside = dir.path().join("root-other");
    std::fs::create_dir_all(&root).unwrap();
    std::fs::create_dir_all(&outside).unwrap();

    let server =
        OrganizerMcpServer::with_config(Config::with_roots([root.display().to_string()])).unwrap();

    Sandbox {
        _dir: dir,
        root,
        outside,
        server,
    }
}

fn write(path: &Path, contents: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

fn p(path: &Path) -> String {
    path.display().to_string()
}

fn summary(result: &CallToolResult) -> String {
    result.content[0].as_text().unwrap().text.clone()
}

fn payload(result: &CallToolResult) -> Value {
    assert!(!result.is_error.unwrap_or(false));
    serde_json::from_str(&result.content[1].as_text().unwrap().text).unwrap()
}

#[tokio::test]
async fn list_directory_reports_types() {
    let sb = sandbox();
    write(&sb.root.join("a.txt"), "a");
    std::fs::create_dir(sb.root.join("Screenshots")).unwrap();

    let result = sb
        .server
        .call_tool("list_directory", json!({ "path": p(&sb.root) }))
        .await
        .unwrap();
    let data = payload(&result);

    assert_eq!(data["totalCount"], 2);
    assert_eq!(data["entries"][0]["name"], "Screenshots");
    assert_eq!(data["entries"][0]["isDirectory"], true);
    assert_eq!(data["entries"][1]["name"], "a.txt");
    assert_eq!(data["entries"][1]["isFile"], true);
    assert!(summary(&result).starts_with("2 entries"));
}

#[tokio::test]
async fn sibling_prefix_directory_is_outside() {
    let sb = sandbox();

    let err = sb
        .server
        .call_tool("list_directory", json!({ "path": p(&sb.outside) }))
        .await
        .unwrap_err();

    let mcp = err.mcp_error().expect("tool should fail with an MCP error");
    let data = mcp.data.as_ref().unwrap();
    assert_eq!(data["kind"], "outside_allowed_roots");
    assert_eq!(data["path"], p(&sb.outside));
}

#[tokio::test]
async fn unreadable_directory_is_structured_failure() {
    let sb = sandbox();

    let err = sb
        .server
        .call_tool("list_directory", json!({ "path": p(&sb.root.join("missing")) }))
        .await
        .unwrap_err();

    assert_eq!(
        err.mcp_error().unwrap().data.as_ref().unwrap()["kind"],
        "directory_read_error"
    );
}

#[tokio::test]
async fn non_string_path_is_rejected() {
    let sb = sandbox();

    let err = sb
        .server
        .call_tool("delete_path", json!({ "path": ["a", "b"] }))
        .await
        .unwrap_err();
    assert!(matches!(err, EmbeddableError::InvalidParams(_)));
}

#[tokio::test]
async fn create_directory_twice_succeeds() {
    let sb = sandbox();
    let target = sb.root.join("Pictures/Screenshots");

    for _ in 0..2 {
        let result = sb
            .server
            .call_tool("create_directory", json!({ "path": p(&target) }))
            .await
            .unwrap();
        assert_eq!(payload(&result)["created"], p(&target));
    }
    assert!(target.is_dir());
}

#[tokio::test]
async fn search_filters_and_caps() {
    let sb = sandbox();
    write(&sb.root.join("Photo.PNG"), "");
    write(&sb.root.join("doc.pdf"), "");
    std::fs::create_dir_all(sb.root.join("Desktop/screenshots")).unwrap();
    for i in 0..6 {
        write(&sb.root.join(format!("dump/img{}.png", i)), "");
    }

    let result = sb
        .server
        .call_tool(
            "search_paths",
            json!({ "path": p(&sb.root), "extensions": [".png"], "limit": 4 }),
        )
        .await
        .unwrap();
    let data = payload(&result);
    assert_eq!(data["matches"].as_array().unwrap().len(), 4);
    assert_eq!(data["truncatedAt"], 4);
    assert!(summary(&result).contains("stopped at limit 4"));

    let result = sb
        .server
        .call_tool(
            "search_paths",
            json!({
                "path": p(&sb.root),
                "searchFiles": false,
                "searchDirectories": "true",
                "names": ["Screenshots"]
            }),
        )
        .await
        .unwrap();
    let data = payload(&result);
    assert_eq!(
        data["matches"],
        json!([{ "path": p(&sb.root.join("Desktop/screenshots")), "type": "directory" }])
    );
    assert!(data["truncatedAt"].is_null());
}

#[tokio::test]
async fn search_with_zero_limit_is_invalid() {
    let sb = sandbox();

    let err = sb
        .server
        .call_tool("search_paths", json!({ "path": p(&sb.root), "limit": 0 }))
        .await
        .unwrap_err();
    assert_eq!(
        err.mcp_error().unwrap().data.as_ref().unwrap()["kind"],
        "invalid_params"
    );
}

#[tokio::test]
async fn move_items_isolates_failures() {
    let sb = sandbox();
    write(&sb.root.join("one.png"), "1");
    write(&sb.root.join("two.png"), "2");
    write(&sb.outside.join("loot.png"), "x");

    let result = sb
        .server
        .call_tool(
            "move_items",
            json!({ "items": [
                { "from": p(&sb.root.join("one.png")), "to": p(&sb.root.join("Images/one.png")) },
                { "from": p(&sb.outside.join("loot.png")), "to": p(&sb.root.join("Images/loot.png")) },
                { "from": p(&sb.root.join("two.png")), "to": p(&sb.root.join("Images/two.png")) }
            ] }),
        )
        .await
        .unwrap();
    let data = payload(&result);

    assert_eq!(data["movedCount"], 2);
    assert_eq!(data["failedCount"], 1);
    let statuses: Vec<&str> = data["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, vec!["ok", "error", "ok"]);

    assert!(sb.root.join("Images/one.png").exists());
    assert!(sb.root.join("Images/two.png").exists());
    assert!(sb.outside.join("loot.png").exists());
    assert!(!sb.root.join("Images/loot.png").exists());
}

#[tokio::test]
async fn move_items_overwrites_destination() {
    let sb = sandbox();
    write(&sb.root.join("a.txt"), "new contents");
    write(&sb.root.join("dst/b.txt"), "old contents");

    let result = sb
        .server
        .call_tool(
            "move_items",
            json!({ "items": [{ "from": p(&sb.root.join("a.txt")), "to": p(&sb.root.join("dst/b.txt")) }] }),
        )
        .await
        .unwrap();

    assert_eq!(payload(&result)["movedCount"], 1);
    assert!(!sb.root.join("a.txt").exists());
    assert_eq!(
        std::fs::read_to_string(sb.root.join("dst/b.txt")).unwrap(),
        "new contents"
    );
}

#[tokio::test]
async fn delete_reports_outcomes() {
    let sb = sandbox();
    write(&sb.root.join("old/nested/deep.txt"), "x");

    let result = sb
        .server
        .call_tool("delete_path", json!({ "path": p(&sb.root.join("nothing-here")) }))
        .await
        .unwrap();
    let data = payload(&result);
    assert_eq!(data["deleted"], false);
    assert_eq!(data["reason"], "not_found");

    let result = sb
        .server
        .call_tool("delete_path", json!({ "path": p(&sb.root.join("old")) }))
        .await
        .unwrap();
    let data = payload(&result);
    assert_eq!(data["deleted"], true);
    assert_eq!(data["type"], "directory");

    let listing = sb
        .server
        .call_tool("list_directory", json!({ "path": p(&sb.root) }))
        .await
        .unwrap();
    assert_eq!(payload(&listing)["totalCount"], 0);
}

#[tokio::test]
async fn delete_outside_roots_never_mutates() {
    let sb = sandbox();
    write(&sb.outside.join("keep.txt"), "keep");

    let traversal = format!("{}/../root-other", p(&sb.root));
    for path in [p(&sb.outside), traversal] {
        let err = sb
            .server
            .call_tool("delete_path", json!({ "path": path }))
            .await
            .unwrap_err();
        assert!(err.mcp_error().is_some());
    }
    assert!(sb.outside.join("keep.txt").exists());
}

#[tokio::test]
async fn list_allowed_directories_returns_roots() {
    let sb = sandbox();

    let result = sb
        .server
        .call_tool("list_allowed_directories", json!({}))
        .await
        .unwrap();
    assert_eq!(payload(&result)["roots"], json!([p(&sb.root)]));
}
