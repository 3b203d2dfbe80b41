//! Field inspection tool
//!
//! Produces an inventory of an issue's projected fields with type names and
//! short previews. Useful for discovering which custom fields a tracker
//! instance actually populates.

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde_json::{Map, Value};

use crate::format::format_issue;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::DebugIssueFieldsRequest;

/// Longest preview emitted per field
const PREVIEW_LENGTH: usize = 100;

/// Tool for inspecting an issue's field structure
#[derive(Default)]
pub struct DebugIssueFieldsTool;

impl DebugIssueFieldsTool {
    /// Creates a new instance of the DebugIssueFieldsTool
    pub fn new() -> Self {
        Self
    }

    fn json_type_name(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    fn preview(value: &Value) -> String {
        let rendered = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        rendered.chars().take(PREVIEW_LENGTH).collect()
    }

    /// Build the sorted field inventory from an issue projection
    fn field_inventory(projection: &Map<String, Value>) -> Vec<Value> {
        let mut entries: Vec<Value> = projection
            .iter()
            .filter(|(name, _)| !matches!(name.as_str(), "id" | "key" | "self"))
            .map(|(name, value)| {
                if name == "attachments" {
                    // Attachments are the records callers drill into; show them whole
                    serde_json::json!({
                        "name": name,
                        "type": Self::json_type_name(value),
                        "value": value,
                    })
                } else {
                    serde_json::json!({
                        "name": name,
                        "type": Self::json_type_name(value),
                        "preview": Self::preview(value),
                    })
                }
            })
            .collect();

        entries.sort_by(|a, b| {
            a["name"]
                .as_str()
                .unwrap_or_default()
                .cmp(b["name"].as_str().unwrap_or_default())
        });
        entries
    }
}

#[async_trait]
impl McpTool for DebugIssueFieldsTool {
    fn name(&self) -> &'static str {
        "issue_debug_fields"
    }

    fn description(&self) -> &'static str {
        "Inspect an issue's field structure: every projected field with its JSON type and a short preview"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "issue_key": {
                    "type": "string",
                    "description": "Issue key to inspect"
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
        let request: DebugIssueFieldsRequest = BaseToolImpl::parse_arguments(arguments)?;
        tracing::info!("Inspecting fields of issue {}", request.issue_key);

        match context.jira.get_issue(&request.issue_key).await {
            Ok(issue) => {
                let projection = format_issue(&issue);
                let mut payload = Map::new();
                payload.insert("id".into(), serde_json::json!(issue.id));
                payload.insert("key".into(), serde_json::json!(issue.key));
                payload.insert(
                    "fields".into(),
                    Value::Array(Self::field_inventory(&projection)),
                );
                Ok(BaseToolImpl::json_response(&payload))
            }
            Err(e) => {
                tracing::error!("Failed to inspect issue {}: {}", request.issue_key, e);
                Ok(BaseToolImpl::error_payload(e.to_string()))
            }
        }
    }
}
