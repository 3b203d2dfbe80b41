//! Issue update tool
//!
//! Builds a partial field patch; fields the caller leaves unset are never
//! sent, so the tracker keeps their current values.

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

use crate::format::format_issue;
use crate::jira::{IssueFieldsPatch, NamedRef};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::UpdateIssueRequest;

/// Tool for updating existing issues
#[derive(Default)]
pub struct UpdateIssueTool;

impl UpdateIssueTool {
    /// Creates a new instance of the UpdateIssueTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for UpdateIssueTool {
    fn name(&self) -> &'static str {
        "issue_update"
    }

    fn description(&self) -> &'static str {
        "Update selected fields of an existing issue and return the refreshed projection"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "issue_key": {
                    "type": "string",
                    "description": "Issue key to update"
                },
                "summary": {
                    "type": ["string", "null"],
                    "description": "New summary (optional)"
                },
                "description": {
                    "type": ["string", "null"],
                    "description": "New description (optional)"
                },
                "issue_type": {
                    "type": ["string", "null"],
                    "description": "New issue type name (optional)"
                },
                "priority": {
                    "type": ["string", "null"],
                    "description": "New priority name (optional)"
                },
                "assignee": {
                    "type": ["string", "null"],
                    "description": "New assignee login name (optional)"
                },
                "labels": {
                    "type": ["array", "null"],
                    "items": {"type": "string"},
                    "description": "Replacement label set (optional)"
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
        let request: UpdateIssueRequest = BaseToolImpl::parse_arguments(arguments)?;
        tracing::info!("Updating issue {}", request.issue_key);

        let fields = IssueFieldsPatch {
            project: None,
            summary: request.summary,
            description: request.description,
            issue_type: request.issue_type.map(NamedRef::new),
            priority: request.priority.map(NamedRef::new),
            assignee: request.assignee.map(NamedRef::new),
            labels: request.labels,
        };

        if fields.is_empty() {
            return Ok(BaseToolImpl::error_payload("no fields to update"));
        }

        match context.jira.update_issue(&request.issue_key, fields).await {
            Ok(issue) => Ok(BaseToolImpl::json_response(&format_issue(&issue))),
            Err(e) => {
                tracing::error!("Failed to update issue {}: {}", request.issue_key, e);
                Ok(BaseToolImpl::error_payload(e.to_string()))
            }
        }
    }
}
