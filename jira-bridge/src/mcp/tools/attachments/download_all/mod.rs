//! Batch download tool
//!
//! Materializes every attachment of an issue. Each item succeeds or fails on
//! its own; the report always comes back, even when every download failed.

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::DownloadAllAttachmentsRequest;

use super::download_all_payload;

/// Tool for downloading all of an issue's attachments
#[derive(Default)]
pub struct DownloadAllAttachmentsTool;

impl DownloadAllAttachmentsTool {
    /// Creates a new instance of the DownloadAllAttachmentsTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for DownloadAllAttachmentsTool {
    fn name(&self) -> &'static str {
        "attachment_download_all"
    }

    fn description(&self) -> &'static str {
        "Download every attachment of an issue to the local attachment directory, reporting per-file success and failure"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "issue_key": {
                    "type": "string",
                    "description": "Issue to download attachments for"
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
        let request: DownloadAllAttachmentsRequest = BaseToolImpl::parse_arguments(arguments)?;
        tracing::info!("Downloading all attachments of issue {}", request.issue_key);

        match context.jira.get_issue(&request.issue_key).await {
            Ok(issue) => {
                let payload =
                    download_all_payload(context, &request.issue_key, &issue.fields.attachments)
                        .await;
                Ok(BaseToolImpl::json_response(&payload))
            }
            Err(e) => {
                tracing::error!("Failed to fetch issue {}: {}", request.issue_key, e);
                Ok(BaseToolImpl::error_payload(e.to_string()))
            }
        }
    }
}
