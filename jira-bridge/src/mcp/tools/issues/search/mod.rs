//! JQL search tool

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde_json::{Map, Value};

use crate::format::format_issue;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::SearchIssuesRequest;

/// Tool for searching issues by JQL
#[derive(Default)]
pub struct SearchIssuesTool;

impl SearchIssuesTool {
    /// Creates a new instance of the SearchIssuesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for SearchIssuesTool {
    fn name(&self) -> &'static str {
        "issue_search"
    }

    fn description(&self) -> &'static str {
        "Search issues with a JQL query, returning one page of projected issues plus paging information"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "jql": {
                    "type": "string",
                    "description": "JQL query string, e.g. project = PROJ AND status = Open"
                },
                "max_results": {
                    "type": "integer",
                    "description": "Page size (default 50)"
                },
                "start_at": {
                    "type": "integer",
                    "description": "Zero-based offset of the first result (default 0)"
                }
            },
            "required": ["jql"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: SearchIssuesRequest = BaseToolImpl::parse_arguments(arguments)?;
        tracing::info!(
            "Searching issues: jql={}, max_results={}, start_at={}",
            request.jql,
            request.max_results,
            request.start_at
        );

        match context
            .jira
            .search_issues(&request.jql, request.max_results, request.start_at)
            .await
        {
            Ok(results) => {
                let issues: Vec<Value> = results
                    .issues
                    .iter()
                    .map(|issue| Value::Object(format_issue(issue)))
                    .collect();

                let mut payload = Map::new();
                payload.insert("total".into(), serde_json::json!(results.total));
                payload.insert("issues".into(), Value::Array(issues));
                payload.insert("start_at".into(), serde_json::json!(request.start_at));
                payload.insert("max_results".into(), serde_json::json!(request.max_results));
                Ok(BaseToolImpl::json_response(&payload))
            }
            Err(e) => {
                tracing::error!("Issue search failed: {}", e);
                Ok(BaseToolImpl::error_payload(e.to_string()))
            }
        }
    }
}
