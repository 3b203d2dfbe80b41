//! Request types for MCP operations

use serde::Deserialize;

fn default_max_results() -> u32 {
    50
}

fn default_issue_type() -> String {
    "Task".to_string()
}

fn default_true() -> bool {
    true
}

/// Request to fetch one issue
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetIssueRequest {
    /// Issue key, e.g. `X-1`
    pub issue_key: String,
}

/// Request to search issues by JQL
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchIssuesRequest {
    /// JQL query string
    pub jql: String,
    /// Page size (default 50)
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    /// Zero-based offset of the first result (default 0)
    #[serde(default)]
    pub start_at: u32,
}

/// Request to create a new issue
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateIssueRequest {
    /// Key of the project to create in
    pub project_key: String,
    /// One-line summary
    pub summary: String,
    /// Long description (optional)
    #[serde(default)]
    pub description: String,
    /// Issue type name (default `Task`)
    #[serde(default = "default_issue_type")]
    pub issue_type: String,
    /// Priority name
    pub priority: Option<String>,
    /// Assignee login name
    pub assignee: Option<String>,
    /// Labels to apply
    pub labels: Option<Vec<String>>,
}

/// Request to update an issue; unset fields stay untouched
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateIssueRequest {
    /// Issue key to update
    pub issue_key: String,
    /// New summary
    pub summary: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New issue type name
    pub issue_type: Option<String>,
    /// New priority name
    pub priority: Option<String>,
    /// New assignee login name
    pub assignee: Option<String>,
    /// Replacement label set
    pub labels: Option<Vec<String>>,
}

/// Request to list all projects
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListProjectsRequest {
    // No parameters needed
}

/// Request to fetch one project
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetProjectRequest {
    /// Project key, e.g. `X`
    pub project_key: String,
}

/// Request to fetch one attachment's content by id
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetAttachmentRequest {
    /// Issue the attachment belongs to
    pub issue_key: String,
    /// Attachment id
    pub attachment_id: String,
}

/// Request to fetch one attachment's content by display name
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetAttachmentByFilenameRequest {
    /// Issue the attachment belongs to
    pub issue_key: String,
    /// Display name of the attachment
    pub filename: String,
    /// Whether to also materialize the bytes on disk (default true)
    #[serde(default = "default_true")]
    pub save_to_disk: bool,
}

/// Request to list an issue's attachments
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListAttachmentsRequest {
    /// Issue to list attachments for
    pub issue_key: String,
    /// Download every attachment instead of listing (default false)
    #[serde(default)]
    pub download: bool,
}

/// Request to download all of an issue's attachments
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DownloadAllAttachmentsRequest {
    /// Issue to download attachments for
    pub issue_key: String,
}

/// Request to inspect an issue's field structure
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DebugIssueFieldsRequest {
    /// Issue to inspect
    pub issue_key: String,
}
