//! Attachment listing tool
//!
//! Read-only by default: annotates each remote record with its local cache
//! state. With `download` set it delegates to the batch materializer instead.

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde_json::{Map, Value};

use crate::format::attachment_value;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::ListAttachmentsRequest;

use super::download_all_payload;

/// Tool for listing an issue's attachments with local cache state
#[derive(Default)]
pub struct ListAttachmentsTool;

impl ListAttachmentsTool {
    /// Creates a new instance of the ListAttachmentsTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListAttachmentsTool {
    fn name(&self) -> &'static str {
        "attachment_list"
    }

    fn description(&self) -> &'static str {
        "List an issue's attachments, annotating which ones already exist locally; optionally download them all instead"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "issue_key": {
                    "type": "string",
                    "description": "Issue to list attachments for"
                },
                "download": {
                    "type": "boolean",
                    "description": "Download every attachment instead of listing (default false)"
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
        let request: ListAttachmentsRequest = BaseToolImpl::parse_arguments(arguments)?;
        tracing::info!(
            "Listing attachments: issue={}, download={}",
            request.issue_key,
            request.download
        );

        let issue = match context.jira.get_issue(&request.issue_key).await {
            Ok(issue) => issue,
            Err(e) => {
                tracing::error!("Failed to fetch issue {}: {}", request.issue_key, e);
                return Ok(BaseToolImpl::error_payload(e.to_string()));
            }
        };

        if request.download {
            let payload =
                download_all_payload(context, &request.issue_key, &issue.fields.attachments)
                    .await;
            return Ok(BaseToolImpl::json_response(&payload));
        }

        let known = context
            .store
            .list_known(&request.issue_key, &issue.fields.attachments);

        let attachments: Vec<Value> = known
            .iter()
            .map(|entry| {
                let mut value = attachment_value(&entry.record);
                let map = value.as_object_mut().expect("attachment projection is an object");
                map.insert(
                    "local_path".into(),
                    entry
                        .local_path
                        .as_ref()
                        .map(|p| serde_json::json!(p.to_string_lossy()))
                        .unwrap_or(Value::Null),
                );
                map.insert(
                    "exists_locally".into(),
                    serde_json::json!(entry.exists_locally),
                );
                value
            })
            .collect();

        let mut payload = Map::new();
        payload.insert("issue_key".into(), serde_json::json!(request.issue_key));
        payload.insert("total".into(), serde_json::json!(attachments.len()));
        payload.insert("attachments".into(), Value::Array(attachments));
        payload.insert(
            "attachments_dir".into(),
            serde_json::json!(context
                .store
                .container_dir(&request.issue_key)
                .to_string_lossy()),
        );
        Ok(BaseToolImpl::json_response(&payload))
    }
}
