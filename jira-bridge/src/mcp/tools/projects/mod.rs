//! Project tools: listing and detail

/// Project detail tool
pub mod get;
/// Project listing tool
pub mod list;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all project-related tools with the registry
pub fn register_project_tools(registry: &mut ToolRegistry) {
    registry.register(list::ListProjectsTool::new());
    registry.register(get::GetProjectTool::new());
}
