//! Issue tools: fetch, search, create, update, and field inspection

/// Issue creation tool
pub mod create;
/// Field inspection tool
pub mod debug_fields;
/// Issue fetch tool
pub mod get;
/// JQL search tool
pub mod search;
/// Issue update tool
pub mod update;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all issue-related tools with the registry
pub fn register_issue_tools(registry: &mut ToolRegistry) {
    registry.register(get::GetIssueTool::new());
    registry.register(search::SearchIssuesTool::new());
    registry.register(create::CreateIssueTool::new());
    registry.register(update::UpdateIssueTool::new());
    registry.register(debug_fields::DebugIssueFieldsTool::new());
}
