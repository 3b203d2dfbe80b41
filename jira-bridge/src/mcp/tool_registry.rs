//! Tool registry for MCP operations
//!
//! Registry pattern for managing the bridge's tools: dynamic dispatch by tool
//! name instead of one large match statement, plus the shared context every
//! tool executes against.

use rmcp::model::{Annotated, CallToolResult, RawContent, RawTextContent, Tool};
use rmcp::Error as McpError;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

use crate::attachments::{AttachmentStore, ContentFetcher};
use crate::jira::JiraApi;

/// Context shared by all tools during execution
#[derive(Clone)]
pub struct ToolContext {
    /// The tracker client
    pub jira: Arc<dyn JiraApi>,
    /// Byte source for attachment content locators
    pub fetcher: Arc<dyn ContentFetcher>,
    /// Local attachment store
    pub store: Arc<AttachmentStore>,
}

impl ToolContext {
    /// Create a new tool context
    pub fn new(
        jira: Arc<dyn JiraApi>,
        fetcher: Arc<dyn ContentFetcher>,
        store: Arc<AttachmentStore>,
    ) -> Self {
        Self {
            jira,
            fetcher,
            store,
        }
    }
}

/// Trait defining the interface for all MCP tools
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Get the tool's name
    fn name(&self) -> &'static str;

    /// Get the tool's description
    fn description(&self) -> &'static str;

    /// Get the tool's JSON schema for arguments
    fn schema(&self) -> serde_json::Value;

    /// Execute the tool with the given arguments and context
    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError>;
}

/// Registry for managing MCP tools
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn McpTool>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool in the registry
    pub fn register<T: McpTool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        self.tools.insert(name, Box::new(tool));
    }

    /// Get a tool by name
    pub fn get_tool(&self, name: &str) -> Option<&dyn McpTool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    /// List all registered tool names
    pub fn list_tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Get all registered tools as Tool objects for the MCP list_tools response
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tools
            .values()
            .map(|tool| {
                let schema = tool.schema();
                let schema_map = if let serde_json::Value::Object(map) = schema {
                    map
                } else {
                    serde_json::Map::new()
                };

                Tool {
                    name: tool.name().into(),
                    description: Some(tool.description().into()),
                    input_schema: Arc::new(schema_map),
                    annotations: None,
                }
            })
            .collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Base implementation providing common utility methods for MCP tools
pub struct BaseToolImpl;

impl BaseToolImpl {
    /// Parse tool arguments from a JSON map into a typed struct.
    ///
    /// Argument-shape violations are the one case surfaced as a protocol
    /// error instead of an `{"error": ...}` payload.
    pub fn parse_arguments<T: serde::de::DeserializeOwned>(
        arguments: serde_json::Map<String, serde_json::Value>,
    ) -> std::result::Result<T, McpError> {
        serde_json::from_value(serde_json::Value::Object(arguments))
            .map_err(|e| McpError::invalid_request(format!("Invalid arguments: {e}"), None))
    }

    /// Create a success response carrying a JSON mapping
    pub fn json_response(payload: &Map<String, Value>) -> CallToolResult {
        let text = serde_json::to_string_pretty(&Value::Object(payload.clone()))
            .unwrap_or_else(|_| "{}".to_string());
        CallToolResult {
            content: vec![Annotated::new(
                RawContent::Text(RawTextContent { text }),
                None,
            )],
            is_error: Some(false),
        }
    }

    /// Create an `{"error": message}` payload response.
    ///
    /// Tool failures travel inside the result mapping rather than as
    /// protocol-level errors, so callers always get JSON back.
    pub fn error_payload(message: impl Into<String>) -> CallToolResult {
        let payload = serde_json::json!({ "error": message.into() });
        let text = serde_json::to_string_pretty(&payload).unwrap_or_else(|_| "{}".to_string());
        CallToolResult {
            content: vec![Annotated::new(
                RawContent::Text(RawTextContent { text }),
                None,
            )],
            is_error: Some(true),
        }
    }
}
