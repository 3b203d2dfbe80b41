//! Wire types for the Jira REST v2 API
//!
//! Deserialization targets mirror the tracker's JSON exactly (camelCase field
//! names, string ids). Fields the bridge does not model explicitly are
//! captured into [`IssueFields::extra`] so custom fields survive the trip
//! without any reflection over the payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One issue as returned by `GET /rest/api/2/issue/{key}`
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    /// Numeric id, serialized as a string by the tracker
    pub id: String,
    /// Issue key, e.g. `X-1`
    pub key: String,
    /// Canonical REST URL of this issue
    #[serde(rename = "self")]
    pub self_url: String,
    /// The field bag
    pub fields: IssueFields,
}

/// The `fields` object of an issue
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueFields {
    /// One-line summary
    #[serde(default)]
    pub summary: Option<String>,
    /// Long description, null when absent
    #[serde(default)]
    pub description: Option<String>,
    /// Workflow status
    #[serde(default)]
    pub status: Option<Status>,
    /// Owning project
    #[serde(default)]
    pub project: Option<ProjectRef>,
    /// Creation timestamp, passed through as the tracker formats it
    #[serde(default)]
    pub created: Option<String>,
    /// Last-update timestamp
    #[serde(default)]
    pub updated: Option<String>,
    /// Current assignee
    #[serde(default)]
    pub assignee: Option<User>,
    /// Reporting user
    #[serde(default)]
    pub reporter: Option<User>,
    /// Issue type
    #[serde(rename = "issuetype", default)]
    pub issue_type: Option<IssueType>,
    /// Priority
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Components
    #[serde(default)]
    pub components: Vec<Component>,
    /// Labels
    #[serde(default)]
    pub labels: Vec<String>,
    /// Attachment records
    #[serde(rename = "attachment", default)]
    pub attachments: Vec<Attachment>,
    /// Everything else, custom fields included
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Workflow status of an issue
#[derive(Debug, Clone, Deserialize)]
pub struct Status {
    /// Status id
    pub id: String,
    /// Display name, e.g. `In Progress`
    pub name: String,
    /// Status description
    #[serde(default)]
    pub description: Option<String>,
}

/// Abbreviated project reference embedded in issue fields
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRef {
    /// Project id
    pub id: String,
    /// Project key
    pub key: String,
    /// Project display name
    pub name: String,
}

/// A tracker user
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Login name
    #[serde(default)]
    pub name: Option<String>,
    /// Human-readable name
    #[serde(default)]
    pub display_name: Option<String>,
    /// Email address, often withheld by privacy settings
    #[serde(default)]
    pub email_address: Option<String>,
}

/// Issue type descriptor
#[derive(Debug, Clone, Deserialize)]
pub struct IssueType {
    /// Type id
    pub id: String,
    /// Type name, e.g. `Task`
    pub name: String,
    /// Type description
    #[serde(default)]
    pub description: Option<String>,
}

/// Priority descriptor
#[derive(Debug, Clone, Deserialize)]
pub struct Priority {
    /// Priority id
    pub id: String,
    /// Priority name, e.g. `Major`
    pub name: String,
}

/// Project component
#[derive(Debug, Clone, Deserialize)]
pub struct Component {
    /// Component id
    pub id: String,
    /// Component name
    pub name: String,
}

/// One attachment record on an issue
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Attachment id
    pub id: String,
    /// Display name of the file
    pub filename: String,
    /// Size in bytes as reported by the tracker
    pub size: u64,
    /// Media type
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Creation timestamp
    #[serde(default)]
    pub created: Option<String>,
    /// Content locator: the URL the bytes are served from
    pub content: String,
}

/// Result page from `GET /rest/api/2/search`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    /// Zero-based index of the first returned issue
    pub start_at: u32,
    /// Page size the tracker applied
    pub max_results: u32,
    /// Total matches across all pages
    pub total: u64,
    /// Issues on this page
    #[serde(default)]
    pub issues: Vec<Issue>,
}

/// One project as returned by the project endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    /// Project id
    pub id: String,
    /// Project key
    pub key: String,
    /// Project display name
    pub name: String,
    /// Canonical REST URL of this project
    #[serde(rename = "self")]
    pub self_url: String,
    /// Project description
    #[serde(default)]
    pub description: Option<String>,
    /// Project lead
    #[serde(default)]
    pub lead: Option<User>,
}

/// Key-only reference used when creating issues
#[derive(Debug, Clone, Serialize)]
pub struct KeyRef {
    /// The referenced key
    pub key: String,
}

/// Name-only reference used for issue types, priorities, and assignees
#[derive(Debug, Clone, Serialize)]
pub struct NamedRef {
    /// The referenced name
    pub name: String,
}

impl NamedRef {
    /// Wrap a name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Field patch sent on issue create and update
///
/// Unset members are omitted from the serialized body so a partial update
/// only touches the fields the caller named.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IssueFieldsPatch {
    /// Owning project, required on create, never sent on update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<KeyRef>,
    /// New summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New issue type
    #[serde(rename = "issuetype", skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<NamedRef>,
    /// New priority
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<NamedRef>,
    /// New assignee
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<NamedRef>,
    /// Replacement label set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

impl IssueFieldsPatch {
    /// True when no field is set and an update would be a no-op
    pub fn is_empty(&self) -> bool {
        self.project.is_none()
            && self.summary.is_none()
            && self.description.is_none()
            && self.issue_type.is_none()
            && self.priority.is_none()
            && self.assignee.is_none()
            && self.labels.is_none()
    }
}

/// Request body wrapping a field patch
#[derive(Debug, Clone, Serialize)]
pub struct IssueBody {
    /// The patch
    pub fields: IssueFieldsPatch,
}

/// Response of `POST /rest/api/2/issue`: an abbreviated bean
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedIssue {
    /// New issue id
    pub id: String,
    /// New issue key
    pub key: String,
    /// Canonical REST URL
    #[serde(rename = "self")]
    pub self_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISSUE_JSON: &str = r#"{
        "id": "10002",
        "key": "X-1",
        "self": "https://jira.example.com/rest/api/2/issue/10002",
        "fields": {
            "summary": "Widget breaks",
            "description": null,
            "status": {"id": "3", "name": "In Progress", "description": "Being worked on"},
            "project": {"id": "10000", "key": "X", "name": "Example"},
            "created": "2024-01-05T09:00:00.000+0000",
            "updated": "2024-01-06T10:30:00.000+0000",
            "assignee": {"name": "jdoe", "displayName": "J. Doe", "emailAddress": "jdoe@example.com"},
            "issuetype": {"id": "1", "name": "Bug", "description": "A problem"},
            "labels": ["regression"],
            "attachment": [
                {"id": "12345", "filename": "a.png", "size": 2048,
                 "mimeType": "image/png", "created": "2024-01-05T09:05:00.000+0000",
                 "content": "https://jira.example.com/secure/attachment/12345/a.png"}
            ],
            "customfield_10010": "Sprint 4",
            "customfield_10020": null
        }
    }"#;

    #[test]
    fn test_issue_deserialization() {
        let issue: Issue = serde_json::from_str(ISSUE_JSON).unwrap();
        assert_eq!(issue.key, "X-1");
        assert_eq!(issue.fields.summary.as_deref(), Some("Widget breaks"));
        assert!(issue.fields.description.is_none());
        assert_eq!(issue.fields.status.as_ref().unwrap().name, "In Progress");
        assert_eq!(
            issue.fields.assignee.as_ref().unwrap().display_name.as_deref(),
            Some("J. Doe")
        );
        assert_eq!(issue.fields.attachments.len(), 1);
        assert_eq!(issue.fields.attachments[0].mime_type.as_deref(), Some("image/png"));
    }

    #[test]
    fn test_custom_fields_land_in_extra() {
        let issue: Issue = serde_json::from_str(ISSUE_JSON).unwrap();
        assert_eq!(
            issue.fields.extra.get("customfield_10010"),
            Some(&Value::String("Sprint 4".to_string()))
        );
        assert_eq!(issue.fields.extra.get("customfield_10020"), Some(&Value::Null));
    }

    #[test]
    fn test_patch_skips_unset_fields() {
        let patch = IssueFieldsPatch {
            summary: Some("New summary".to_string()),
            ..Default::default()
        };
        let body = serde_json::to_value(IssueBody { fields: patch }).unwrap();
        let fields = body.get("fields").unwrap().as_object().unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("summary").unwrap(), "New summary");
    }

    #[test]
    fn test_patch_emptiness() {
        assert!(IssueFieldsPatch::default().is_empty());
        let patch = IssueFieldsPatch {
            labels: Some(vec!["x".to_string()]),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_search_results_deserialization() {
        let raw = format!(
            r#"{{"startAt": 0, "maxResults": 50, "total": 1, "issues": [{ISSUE_JSON}]}}"#
        );
        let results: SearchResults = serde_json::from_str(&raw).unwrap();
        assert_eq!(results.total, 1);
        assert_eq!(results.issues[0].key, "X-1");
    }
}
