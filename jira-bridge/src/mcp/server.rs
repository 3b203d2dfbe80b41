//! MCP server implementation for the tracker tools

use rmcp::model::*;
use rmcp::service::RequestContext;
use rmcp::{Error as McpError, RoleServer, ServerHandler};
use std::sync::Arc;

use crate::attachments::{AttachmentStore, ContentFetcher};
use crate::config::JiraConfig;
use crate::error::Result;
use crate::jira::{JiraApi, JiraClient};

use super::tool_registry::{ToolContext, ToolRegistry};
use super::tools::attachments::register_attachment_tools;
use super::tools::issues::register_issue_tools;
use super::tools::projects::register_project_tools;

/// MCP server exposing the issue, project, and attachment tools
#[derive(Clone)]
pub struct McpServer {
    tool_registry: Arc<ToolRegistry>,
    /// Tool context containing shared state for tool execution
    pub tool_context: Arc<ToolContext>,
}

impl McpServer {
    /// Create a server around an explicit client and store.
    ///
    /// The client is passed in rather than constructed internally so callers
    /// (and tests) control the collaborator; there is no global handle.
    pub fn new(
        jira: Arc<dyn JiraApi>,
        fetcher: Arc<dyn ContentFetcher>,
        store: Arc<AttachmentStore>,
    ) -> Self {
        let mut tool_registry = ToolRegistry::new();
        register_issue_tools(&mut tool_registry);
        register_project_tools(&mut tool_registry);
        register_attachment_tools(&mut tool_registry);

        let tool_context = Arc::new(ToolContext::new(jira, fetcher, store));

        Self {
            tool_registry: Arc::new(tool_registry),
            tool_context,
        }
    }

    /// Create a server from connection settings.
    ///
    /// # Errors
    ///
    /// Returns an error when credentials are incomplete, the server URL does
    /// not parse, or the attachment root cannot be created.
    pub fn from_config(config: &JiraConfig) -> Result<Self> {
        let client = Arc::new(JiraClient::new(config)?);
        let store = Arc::new(AttachmentStore::from_config(config)?);
        Ok(Self::new(client.clone(), client, store))
    }

    fn capabilities() -> ServerCapabilities {
        ServerCapabilities {
            prompts: None,
            tools: Some(ToolsCapability {
                list_changed: Some(false),
            }),
            resources: None,
            logging: None,
            completions: None,
            experimental: None,
        }
    }

    const INSTRUCTIONS: &'static str = "A bridge to a Jira-compatible issue tracker. Use issue_* tools to read, search, create, and update issues, project_* tools to browse projects, and attachment_* tools to list, fetch, and download issue attachments to the local cache directory.";
}

impl ServerHandler for McpServer {
    async fn initialize(
        &self,
        request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<InitializeResult, McpError> {
        tracing::info!(
            "MCP client connecting: {} v{}",
            request.client_info.name,
            request.client_info.version
        );

        Ok(InitializeResult {
            protocol_version: ProtocolVersion::default(),
            capabilities: Self::capabilities(),
            instructions: Some(Self::INSTRUCTIONS.into()),
            server_info: Implementation {
                name: "jira-bridge".into(),
                version: crate::VERSION.into(),
            },
        })
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_registry.list_tools(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        if let Some(tool) = self.tool_registry.get_tool(&request.name) {
            tool.execute(request.arguments.unwrap_or_default(), &self.tool_context)
                .await
        } else {
            Err(McpError::invalid_request(
                format!("Unknown tool: {}", request.name),
                None,
            ))
        }
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: Self::capabilities(),
            server_info: Implementation {
                name: "jira-bridge".into(),
                version: crate::VERSION.into(),
            },
            instructions: Some(Self::INSTRUCTIONS.into()),
        }
    }
}
