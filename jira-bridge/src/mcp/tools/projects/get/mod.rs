//! Project detail tool

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

use crate::format::format_project;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::GetProjectRequest;

/// Tool for fetching a single project
#[derive(Default)]
pub struct GetProjectTool;

impl GetProjectTool {
    /// Creates a new instance of the GetProjectTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetProjectTool {
    fn name(&self) -> &'static str {
        "project_get"
    }

    fn description(&self) -> &'static str {
        "Get the details of a single project by key"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "project_key": {
                    "type": "string",
                    "description": "Project key, e.g. PROJ"
                }
            },
            "required": ["project_key"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetProjectRequest = BaseToolImpl::parse_arguments(arguments)?;
        tracing::info!("Fetching project {}", request.project_key);

        match context.jira.get_project(&request.project_key).await {
            Ok(project) => Ok(BaseToolImpl::json_response(&format_project(&project))),
            Err(e) => {
                tracing::error!("Failed to fetch project {}: {}", request.project_key, e);
                Ok(BaseToolImpl::error_payload(e.to_string()))
            }
        }
    }
}
