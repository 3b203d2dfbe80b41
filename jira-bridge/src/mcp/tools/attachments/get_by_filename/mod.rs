//! Content-by-filename tool
//!
//! Like the by-id tool, but addressed by display name, and optionally
//! materializes the bytes on disk. The disk write is unconditional: a
//! same-named entry from an earlier call is overwritten.

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde_json::Map;

use crate::attachments::encode_for_transport;
use crate::error::JiraBridgeError;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::GetAttachmentByFilenameRequest;

/// Tool for fetching one attachment's content by display name
#[derive(Default)]
pub struct GetAttachmentByFilenameTool;

impl GetAttachmentByFilenameTool {
    /// Creates a new instance of the GetAttachmentByFilenameTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetAttachmentByFilenameTool {
    fn name(&self) -> &'static str {
        "attachment_get_by_filename"
    }

    fn description(&self) -> &'static str {
        "Get one attachment's content by filename, optionally saving the bytes to the local attachment directory"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "issue_key": {
                    "type": "string",
                    "description": "Issue the attachment belongs to"
                },
                "filename": {
                    "type": "string",
                    "description": "Display name of the attachment"
                },
                "save_to_disk": {
                    "type": "boolean",
                    "description": "Also store the bytes locally (default true)"
                }
            },
            "required": ["issue_key", "filename"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetAttachmentByFilenameRequest = BaseToolImpl::parse_arguments(arguments)?;
        tracing::info!(
            "Fetching attachment by filename: issue={}, filename={}",
            request.issue_key,
            request.filename
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
            .find(|record| record.filename == request.filename)
        {
            Some(record) => record,
            None => {
                let err = JiraBridgeError::AttachmentNotFound {
                    issue: request.issue_key.clone(),
                    name: request.filename.clone(),
                };
                return Ok(BaseToolImpl::error_payload(err.to_string()));
            }
        };

        let data = match context.fetcher.fetch_content(&record.content).await {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(
                    "Failed to fetch content of attachment {}: {}",
                    record.filename,
                    e
                );
                return Ok(BaseToolImpl::error_payload(e.to_string()));
            }
        };

        let mut payload = Map::new();
        payload.insert("id".into(), serde_json::json!(record.id));
        payload.insert("filename".into(), serde_json::json!(record.filename));
        payload.insert("size".into(), serde_json::json!(data.len()));
        payload.insert(
            "content_type".into(),
            serde_json::json!(record.mime_type.clone().unwrap_or_default()),
        );
        payload.insert(
            "created".into(),
            serde_json::json!(record.created.clone().unwrap_or_default()),
        );

        if request.save_to_disk {
            match context
                .store
                .write_bytes(&request.issue_key, &request.filename, &data)
            {
                Ok(local_path) => {
                    payload.insert(
                        "local_path".into(),
                        serde_json::json!(local_path.to_string_lossy()),
                    );
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to store attachment {}: {}",
                        request.filename,
                        e
                    );
                    return Ok(BaseToolImpl::error_payload(e.to_string()));
                }
            }
        }

        let encoded = encode_for_transport(record.mime_type.as_deref(), &data);
        payload.insert("content".into(), serde_json::json!(encoded.content));
        payload.insert("encoding".into(), serde_json::json!(encoded.encoding.as_str()));
        Ok(BaseToolImpl::json_response(&payload))
    }
}
