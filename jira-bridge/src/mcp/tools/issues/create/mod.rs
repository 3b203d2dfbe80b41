//! Issue creation tool

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

use crate::format::format_issue;
use crate::jira::{IssueFieldsPatch, KeyRef, NamedRef};
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::CreateIssueRequest;

/// Tool for creating new issues
#[derive(Default)]
pub struct CreateIssueTool;

impl CreateIssueTool {
    /// Creates a new instance of the CreateIssueTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for CreateIssueTool {
    fn name(&self) -> &'static str {
        "issue_create"
    }

    fn description(&self) -> &'static str {
        "Create a new issue in a project and return its projection"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "project_key": {
                    "type": "string",
                    "description": "Key of the project to create the issue in"
                },
                "summary": {
                    "type": "string",
                    "description": "One-line summary"
                },
                "description": {
                    "type": "string",
                    "description": "Long description (optional)"
                },
                "issue_type": {
                    "type": "string",
                    "description": "Issue type name (default Task)"
                },
                "priority": {
                    "type": ["string", "null"],
                    "description": "Priority name (optional)"
                },
                "assignee": {
                    "type": ["string", "null"],
                    "description": "Assignee login name (optional)"
                },
                "labels": {
                    "type": ["array", "null"],
                    "items": {"type": "string"},
                    "description": "Labels to apply (optional)"
                }
            },
            "required": ["project_key", "summary"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: CreateIssueRequest = BaseToolImpl::parse_arguments(arguments)?;
        tracing::info!(
            "Creating issue: project={}, summary={}",
            request.project_key,
            request.summary
        );

        let fields = IssueFieldsPatch {
            project: Some(KeyRef {
                key: request.project_key.clone(),
            }),
            summary: Some(request.summary),
            description: (!request.description.is_empty()).then_some(request.description),
            issue_type: Some(NamedRef::new(request.issue_type)),
            priority: request.priority.map(NamedRef::new),
            assignee: request.assignee.map(NamedRef::new),
            labels: request.labels,
        };

        match context.jira.create_issue(fields).await {
            Ok(issue) => {
                tracing::info!("Created issue {}", issue.key);
                Ok(BaseToolImpl::json_response(&format_issue(&issue)))
            }
            Err(e) => {
                tracing::error!("Issue creation failed: {}", e);
                Ok(BaseToolImpl::error_payload(e.to_string()))
            }
        }
    }
}
