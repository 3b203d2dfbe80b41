//! Upstream issue-tracker client
//!
//! [`JiraApi`] is the seam between the MCP tools and the tracker: the real
//! [`JiraClient`] talks REST over HTTP, tests substitute mock implementations.
//! The client is constructed explicitly from configuration and passed in;
//! there is no shared global connection handle.

/// HTTP client implementation
pub mod client;
/// REST wire types
pub mod types;

pub use client::JiraClient;
pub use types::{
    Attachment, Component, CreatedIssue, Issue, IssueBody, IssueFields, IssueFieldsPatch,
    IssueType, KeyRef, NamedRef, Priority, Project, ProjectRef, SearchResults, Status, User,
};

use crate::error::Result;

/// Operations the bridge needs from the tracker
#[async_trait::async_trait]
pub trait JiraApi: Send + Sync {
    /// Fetch one issue by key
    async fn get_issue(&self, key: &str) -> Result<Issue>;

    /// Run a JQL search, returning one result page
    async fn search_issues(&self, jql: &str, max_results: u32, start_at: u32)
        -> Result<SearchResults>;

    /// Create an issue and return the full bean
    async fn create_issue(&self, fields: IssueFieldsPatch) -> Result<Issue>;

    /// Apply a partial update and return the refreshed bean
    async fn update_issue(&self, key: &str, fields: IssueFieldsPatch) -> Result<Issue>;

    /// List all projects visible to the account
    async fn list_projects(&self) -> Result<Vec<Project>>;

    /// Fetch one project by key
    async fn get_project(&self, key: &str) -> Result<Project>;
}
