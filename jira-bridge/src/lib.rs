//! # jira-bridge
//!
//! An MCP tool server proxying CRUD and attachment operations against a
//! Jira-compatible issue tracker.
//!
//! ## Features
//!
//! - **Issue tools**: fetch, JQL search, create, update, field inspection
//! - **Project tools**: listing and detail
//! - **Attachment tools**: inline content, cache-state listings, and batch
//!   download into a local per-issue directory tree
//! - **MCP support**: Model Context Protocol server over stdio
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use jira_bridge::config::JiraConfig;
//! use jira_bridge::mcp::McpServer;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = JiraConfig::load(None);
//! let server = McpServer::from_config(&config)?;
//! # let _ = server;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Local attachment materialization
pub mod attachments;

/// Connection and storage configuration
pub mod config;

/// Error types used throughout the library
pub mod error;

/// Response projections
pub mod format;

/// Upstream issue-tracker client
pub mod jira;

/// Model Context Protocol (MCP) server support
pub mod mcp;

// Re-export core types
pub use attachments::{AttachmentStore, ContentFetcher, DownloadReport};
pub use config::JiraConfig;
pub use error::{ErrorContext, JiraBridgeError, Result};
pub use jira::{JiraApi, JiraClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::attachments::{AttachmentStore, ContentFetcher};
    pub use crate::config::JiraConfig;
    pub use crate::error::{JiraBridgeError, Result};
    pub use crate::jira::{JiraApi, JiraClient};
    pub use crate::mcp::McpServer;
}
