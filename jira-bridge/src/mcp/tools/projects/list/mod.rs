//! Project listing tool

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde_json::{Map, Value};

use crate::format::format_project_summary;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::ListProjectsRequest;

/// Tool for listing all visible projects
#[derive(Default)]
pub struct ListProjectsTool;

impl ListProjectsTool {
    /// Creates a new instance of the ListProjectsTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListProjectsTool {
    fn name(&self) -> &'static str {
        "project_list"
    }

    fn description(&self) -> &'static str {
        "List all projects visible to the configured account"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let _request: ListProjectsRequest = BaseToolImpl::parse_arguments(arguments)?;
        tracing::info!("Listing projects");

        match context.jira.list_projects().await {
            Ok(projects) => {
                let projects: Vec<Value> =
                    projects.iter().map(format_project_summary).collect();
                let mut payload = Map::new();
                payload.insert("projects".into(), Value::Array(projects));
                Ok(BaseToolImpl::json_response(&payload))
            }
            Err(e) => {
                tracing::error!("Project listing failed: {}", e);
                Ok(BaseToolImpl::error_payload(e.to_string()))
            }
        }
    }
}
