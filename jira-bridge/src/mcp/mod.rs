//! Model Context Protocol (MCP) server support
//!
//! The server exposes every operation as a named tool. Tool failures are
//! reshaped into `{"error": ...}` payloads inside the result mapping; only
//! malformed arguments and unknown tool names surface as protocol errors.

/// Server handler and wiring
pub mod server;
/// Tool trait, registry, and shared execution context
pub mod tool_registry;
/// Tool implementations
pub mod tools;
/// Request types
pub mod types;

pub use server::McpServer;
pub use tool_registry::{BaseToolImpl, McpTool, ToolContext, ToolRegistry};
