//! Content-by-id tool
//!
//! Fetches one attachment's bytes and returns them inline, encoded per the
//! media type. Does not touch the local store.

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde_json::Map;

use crate::attachments::encode_for_transport;
use crate::error::JiraBridgeError;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::GetAttachmentRequest;

/// Tool for fetching one attachment's content by id
#[derive(Default)]
pub struct GetAttachmentTool;

impl GetAttachmentTool {
    /// Creates a new instance of the GetAttachmentTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetAttachmentTool {
    fn name(&self) -> &'static str {
        "attachment_get"
    }

    fn description(&self) -> &'static str {
        "Get one attachment's content by id; text travels verbatim, binary content is base64-encoded"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "issue_key": {
                    "type": "string",
                    "description": "Issue the attachment belongs to"
                },
                "attachment_id": {
                    "type": "string",
                    "description": "Attachment id"
                }
            },
            "required": ["issue_key", "attachment_id"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetAttachmentRequest = BaseToolImpl::parse_arguments(arguments)?;
        tracing::info!(
            "Fetching attachment: issue={}, attachment_id={}",
            request.issue_key,
            request.attachment_id
        );

        let issue = match context.jira.get_issue(&request.issue_key).await {
            Ok(issue) => issue,
            Err(e) => {
                tracing::error!("Failed to fetch issue {}: {}", request.issue_key, e);
                return Ok(BaseToolImpl::error_payload(e.to_string()));
            }
        };

        let record = match issue
            .fields
            .attachments
            .iter()
            .find(|record| record.id == request.attachment_id)
        {
            Some(record) => record,
            None => {
                let err = JiraBridgeError::AttachmentNotFound {
                    issue: request.issue_key.clone(),
                    name: request.attachment_id.clone(),
                };
                return Ok(BaseToolImpl::error_payload(err.to_string()));
            }
        };

        let data = match context.fetcher.fetch_content(&record.content).await {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(
                    "Failed to fetch content of attachment {}: {}",
                    record.id,
                    e
                );
                return Ok(BaseToolImpl::error_payload(e.to_string()));
            }
        };

        let encoded = encode_for_transport(record.mime_type.as_deref(), &data);

        let mut payload = Map::new();
        payload.insert("id".into(), serde_json::json!(record.id));
        payload.insert("filename".into(), serde_json::json!(record.filename));
        payload.insert("size".into(), serde_json::json!(record.size));
        payload.insert(
            "content_type".into(),
            serde_json::json!(record.mime_type.clone().unwrap_or_default()),
        );
        payload.insert(
            "created".into(),
            serde_json::json!(record.created.clone().unwrap_or_default()),
        );
        payload.insert("content".into(), serde_json::json!(encoded.content));
        payload.insert("encoding".into(), serde_json::json!(encoded.encoding.as_str()));
        Ok(BaseToolImpl::json_response(&payload))
    }
}
