//! Issue fetch tool
//!
//! Returns the projection of one issue, attachments and custom fields
//! included.

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

use crate::format::format_issue;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::GetIssueRequest;

/// Tool for fetching a single issue
#[derive(Default)]
pub struct GetIssueTool;

impl GetIssueTool {
    /// Creates a new instance of the GetIssueTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetIssueTool {
    fn name(&self) -> &'static str {
        "issue_get"
    }

    fn description(&self) -> &'static str {
        "Get the details of a single issue by key, including status, people, labels, attachments, and custom fields"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "issue_key": {
                    "type": "string",
                    "description": "Issue key, e.g. PROJ-123"
                }
            },
            "required": ["issue_key"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetIssueRequest = BaseToolImpl::parse_arguments(arguments)?;
        tracing::info!("Fetching issue {}", request.issue_key);

        match context.jira.get_issue(&request.issue_key).await {
            Ok(issue) => Ok(BaseToolImpl::json_response(&format_issue(&issue))),
            Err(e) => {
                tracing::error!("Failed to fetch issue {}: {}", request.issue_key, e);
                Ok(BaseToolImpl::error_payload(e.to_string()))
            }
        }
    }
}
