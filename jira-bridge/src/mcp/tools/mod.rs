//! MCP tool implementations
//!
//! One directory per tool, grouped by noun. Registration functions wire every
//! tool of a group into the registry.

/// Attachment tools
pub mod attachments;
/// Issue tools
pub mod issues;
/// Project tools
pub mod projects;
