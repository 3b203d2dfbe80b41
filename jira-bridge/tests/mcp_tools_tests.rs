//! Tool-level tests driving the MCP tools against mock collaborators

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::{CallToolResult, RawContent};
use serde_json::{json, Map, Value};

use jira_bridge::attachments::{AttachmentStore, ContentFetcher};
use jira_bridge::error::{JiraBridgeError, Result};
use jira_bridge::jira::{Issue, IssueFieldsPatch, JiraApi, Project, SearchResults};
use jira_bridge::mcp::tools::attachments::register_attachment_tools;
use jira_bridge::mcp::tools::issues::register_issue_tools;
use jira_bridge::mcp::tools::projects::register_project_tools;
use jira_bridge::mcp::{ToolContext, ToolRegistry};

/// Tracker double serving canned issues
struct MockJira {
    issues: HashMap<String, Value>,
}

impl MockJira {
    fn with_issue(key: &str, issue: Value) -> Self {
        let mut issues = HashMap::new();
        issues.insert(key.to_string(), issue);
        Self { issues }
    }
}

#[async_trait::async_trait]
impl JiraApi for MockJira {
    async fn get_issue(&self, key: &str) -> Result<Issue> {
        let value = self
            .issues
            .get(key)
            .ok_or_else(|| JiraBridgeError::IssueNotFound(key.to_string()))?;
        Ok(serde_json::from_value(value.clone())?)
    }

    async fn search_issues(
        &self,
        _jql: &str,
        max_results: u32,
        start_at: u32,
    ) -> Result<SearchResults> {
        let issues: Vec<Issue> = self
            .issues
            .values()
            .map(|v| serde_json::from_value(v.clone()))
            .collect::<std::result::Result<_, _>>()?;
        Ok(SearchResults {
            start_at,
            max_results,
            total: issues.len() as u64,
            issues,
        })
    }

    async fn create_issue(&self, _fields: IssueFieldsPatch) -> Result<Issue> {
        Err(JiraBridgeError::Other("not implemented".to_string()))
    }

    async fn update_issue(&self, key: &str, _fields: IssueFieldsPatch) -> Result<Issue> {
        self.get_issue(key).await
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        Ok(Vec::new())
    }

    async fn get_project(&self, key: &str) -> Result<Project> {
        Err(JiraBridgeError::ProjectNotFound(key.to_string()))
    }
}

/// Byte source double; URLs without a configured body fail
struct MockFetcher {
    bodies: HashMap<String, Vec<u8>>,
}

impl MockFetcher {
    fn new(bodies: &[(&str, &[u8])]) -> Self {
        Self {
            bodies: bodies
                .iter()
                .map(|(url, body)| (url.to_string(), body.to_vec()))
                .collect(),
        }
    }
}

#[async_trait::async_trait]
impl ContentFetcher for MockFetcher {
    async fn fetch_content(&self, url: &str) -> Result<Vec<u8>> {
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| JiraBridgeError::RemoteApi {
                status: 502,
                body: format!("unreachable: {url}"),
            })
    }
}

fn sample_issue() -> Value {
    json!({
        "id": "10002",
        "key": "X-1",
        "self": "https://jira.example.com/rest/api/2/issue/10002",
        "fields": {
            "summary": "Widget breaks",
            "description": "It just does",
            "status": {"id": "3", "name": "In Progress", "description": null},
            "project": {"id": "10000", "key": "X", "name": "Example"},
            "created": "2024-01-05T09:00:00.000+0000",
            "updated": "2024-01-06T10:30:00.000+0000",
            "attachment": [
                {"id": "1", "filename": "a.png", "size": 6, "mimeType": "image/png",
                 "created": null, "content": "http://x/a"},
                {"id": "2", "filename": "b.txt", "size": 5, "mimeType": "text/plain",
                 "created": null, "content": "http://x/bad"}
            ]
        }
    })
}

struct Harness {
    _dir: tempfile::TempDir,
    registry: ToolRegistry,
    context: ToolContext,
}

fn harness(jira: MockJira, fetcher: MockFetcher) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(AttachmentStore::new(dir.path().join("attachments")).unwrap());

    let mut registry = ToolRegistry::new();
    register_issue_tools(&mut registry);
    register_project_tools(&mut registry);
    register_attachment_tools(&mut registry);

    let context = ToolContext::new(Arc::new(jira), Arc::new(fetcher), store);
    Harness {
        _dir: dir,
        registry,
        context,
    }
}

fn payload(result: &CallToolResult) -> Value {
    match &result.content[0].raw {
        RawContent::Text(text) => serde_json::from_str(&text.text).unwrap(),
        _ => panic!("expected text content"),
    }
}

fn args(value: Value) -> Map<String, Value> {
    value.as_object().unwrap().clone()
}

#[tokio::test]
async fn test_registry_exposes_all_tools() {
    let h = harness(MockJira::with_issue("X-1", sample_issue()), MockFetcher::new(&[]));

    let names = h.registry.list_tool_names();
    for expected in [
        "issue_get",
        "issue_search",
        "issue_create",
        "issue_update",
        "issue_debug_fields",
        "project_list",
        "project_get",
        "attachment_get",
        "attachment_get_by_filename",
        "attachment_list",
        "attachment_download_all",
    ] {
        assert!(names.contains(&expected.to_string()), "missing {expected}");
    }
}

#[tokio::test]
async fn test_issue_get_returns_projection() {
    let h = harness(MockJira::with_issue("X-1", sample_issue()), MockFetcher::new(&[]));

    let tool = h.registry.get_tool("issue_get").unwrap();
    let result = tool
        .execute(args(json!({"issue_key": "X-1"})), &h.context)
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(false));
    let value = payload(&result);
    assert_eq!(value["key"], "X-1");
    assert_eq!(value["summary"], "Widget breaks");
    assert_eq!(value["status"]["name"], "In Progress");
    assert_eq!(value["attachments"][0]["filename"], "a.png");
}

#[tokio::test]
async fn test_issue_get_unknown_yields_error_payload() {
    let h = harness(MockJira::with_issue("X-1", sample_issue()), MockFetcher::new(&[]));

    let tool = h.registry.get_tool("issue_get").unwrap();
    let result = tool
        .execute(args(json!({"issue_key": "X-404"})), &h.context)
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(true));
    let value = payload(&result);
    assert!(value["error"].as_str().unwrap().contains("X-404"));
}

#[tokio::test]
async fn test_issue_update_without_fields_is_rejected() {
    let h = harness(MockJira::with_issue("X-1", sample_issue()), MockFetcher::new(&[]));

    let tool = h.registry.get_tool("issue_update").unwrap();
    let result = tool
        .execute(args(json!({"issue_key": "X-1"})), &h.context)
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(true));
    assert_eq!(payload(&result)["error"], "no fields to update");
}

#[tokio::test]
async fn test_download_all_isolates_per_item_failures() {
    let h = harness(
        MockJira::with_issue("X-1", sample_issue()),
        MockFetcher::new(&[("http://x/a", b"imgpng")]),
    );

    let tool = h.registry.get_tool("attachment_download_all").unwrap();
    let result = tool
        .execute(args(json!({"issue_key": "X-1"})), &h.context)
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(false));
    let value = payload(&result);
    assert_eq!(value["total"], 2);
    assert_eq!(value["success"], 1);
    assert_eq!(value["failed"], 1);
    assert_eq!(value["downloads"][0]["filename"], "a.png");
    assert_eq!(value["failures"][0]["filename"], "b.txt");
    assert!(value["failures"][0]["error"]
        .as_str()
        .unwrap()
        .contains("unreachable"));
}

#[tokio::test]
async fn test_attachment_list_annotates_cache_state() {
    let h = harness(
        MockJira::with_issue("X-1", sample_issue()),
        MockFetcher::new(&[("http://x/a", b"imgpng")]),
    );

    let list = h.registry.get_tool("attachment_list").unwrap();

    // Nothing materialized yet
    let before = payload(
        &list
            .execute(args(json!({"issue_key": "X-1"})), &h.context)
            .await
            .unwrap(),
    );
    assert_eq!(before["attachments"][0]["exists_locally"], false);
    assert_eq!(before["attachments"][0]["local_path"], Value::Null);

    // Materialize what the fetcher can serve
    let download = h.registry.get_tool("attachment_download_all").unwrap();
    download
        .execute(args(json!({"issue_key": "X-1"})), &h.context)
        .await
        .unwrap();

    let after = payload(
        &list
            .execute(args(json!({"issue_key": "X-1"})), &h.context)
            .await
            .unwrap(),
    );
    assert_eq!(after["attachments"][0]["exists_locally"], true);
    assert!(after["attachments"][0]["local_path"]
        .as_str()
        .unwrap()
        .ends_with("a.png"));
    assert_eq!(after["attachments"][1]["exists_locally"], false);
}

#[tokio::test]
async fn test_attachment_by_filename_saves_and_encodes_text() {
    let h = harness(
        MockJira::with_issue("X-1", sample_issue()),
        MockFetcher::new(&[("http://x/bad", b"hello")]),
    );

    let tool = h.registry.get_tool("attachment_get_by_filename").unwrap();
    let result = tool
        .execute(
            args(json!({"issue_key": "X-1", "filename": "b.txt"})),
            &h.context,
        )
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(false));
    let value = payload(&result);
    assert_eq!(value["encoding"], "text");
    assert_eq!(value["content"], "hello");

    let local_path = value["local_path"].as_str().unwrap();
    assert_eq!(std::fs::read(local_path).unwrap(), b"hello");
}

#[tokio::test]
async fn test_attachment_get_unknown_id_yields_error_payload() {
    let h = harness(MockJira::with_issue("X-1", sample_issue()), MockFetcher::new(&[]));

    let tool = h.registry.get_tool("attachment_get").unwrap();
    let result = tool
        .execute(
            args(json!({"issue_key": "X-1", "attachment_id": "999"})),
            &h.context,
        )
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(true));
    let message = payload(&result)["error"].as_str().unwrap().to_string();
    assert!(message.contains("999"));
    assert!(message.contains("X-1"));
}

#[tokio::test]
async fn test_issue_search_shapes_page() {
    let h = harness(MockJira::with_issue("X-1", sample_issue()), MockFetcher::new(&[]));

    let tool = h.registry.get_tool("issue_search").unwrap();
    let result = tool
        .execute(
            args(json!({"jql": "project = X", "max_results": 10})),
            &h.context,
        )
        .await
        .unwrap();

    let value = payload(&result);
    assert_eq!(value["total"], 1);
    assert_eq!(value["start_at"], 0);
    assert_eq!(value["max_results"], 10);
    assert_eq!(value["issues"][0]["key"], "X-1");
}
