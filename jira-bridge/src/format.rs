//! Response projections
//!
//! Reshapes tracker beans into the flat, JSON-friendly mappings the tool
//! endpoints return. Key renames are explicit; custom fields are copied from
//! the deserialized extras map, never discovered by reflection.

use serde_json::{json, Map, Value};

use crate::jira::{Attachment, Issue, Project, User};

/// Project an issue into its response mapping
pub fn format_issue(issue: &Issue) -> Map<String, Value> {
    let fields = &issue.fields;
    let mut result = Map::new();

    result.insert("id".into(), json!(issue.id));
    result.insert("key".into(), json!(issue.key));
    result.insert("self".into(), json!(issue.self_url));
    result.insert("summary".into(), json!(fields.summary.clone().unwrap_or_default()));
    result.insert(
        "description".into(),
        json!(fields.description.clone().unwrap_or_default()),
    );

    if let Some(status) = &fields.status {
        result.insert(
            "status".into(),
            json!({
                "id": status.id,
                "name": status.name,
                "description": status.description.clone().unwrap_or_default(),
            }),
        );
    }

    if let Some(project) = &fields.project {
        result.insert(
            "project".into(),
            json!({
                "id": project.id,
                "key": project.key,
                "name": project.name,
            }),
        );
    }

    result.insert("created".into(), json!(fields.created.clone().unwrap_or_default()));
    result.insert("updated".into(), json!(fields.updated.clone().unwrap_or_default()));

    if let Some(assignee) = &fields.assignee {
        result.insert("assignee".into(), user_value(assignee));
    }

    if let Some(reporter) = &fields.reporter {
        result.insert("reporter".into(), user_value(reporter));
    }

    if let Some(issue_type) = &fields.issue_type {
        result.insert(
            "issue_type".into(),
            json!({
                "id": issue_type.id,
                "name": issue_type.name,
                "description": issue_type.description.clone().unwrap_or_default(),
            }),
        );
    }

    if let Some(priority) = &fields.priority {
        result.insert(
            "priority".into(),
            json!({
                "id": priority.id,
                "name": priority.name,
            }),
        );
    }

    if !fields.components.is_empty() {
        let components: Vec<Value> = fields
            .components
            .iter()
            .map(|c| json!({"id": c.id, "name": c.name}))
            .collect();
        result.insert("components".into(), Value::Array(components));
    }

    if !fields.labels.is_empty() {
        result.insert("labels".into(), json!(fields.labels));
    }

    if !fields.attachments.is_empty() {
        let attachments: Vec<Value> =
            fields.attachments.iter().map(attachment_value).collect();
        result.insert("attachments".into(), Value::Array(attachments));
    }

    // Custom fields, copied verbatim; nulls are dropped like the tracker UI drops them
    for (name, value) in &fields.extra {
        if name.starts_with("customfield_") && !value.is_null() {
            result.insert(name.clone(), value.clone());
        }
    }

    result
}

/// Project one attachment record into its response mapping
pub fn attachment_value(record: &Attachment) -> Value {
    json!({
        "id": record.id,
        "filename": record.filename,
        "size": record.size,
        "content_type": record.mime_type.clone().unwrap_or_default(),
        "created": record.created.clone().unwrap_or_default(),
        "url": record.content,
    })
}

/// Project a full project bean into its response mapping
pub fn format_project(project: &Project) -> Map<String, Value> {
    let mut result = Map::new();
    result.insert("id".into(), json!(project.id));
    result.insert("key".into(), json!(project.key));
    result.insert("name".into(), json!(project.name));
    result.insert("lead".into(), json!(lead_name(project)));
    result.insert(
        "description".into(),
        json!(project.description.clone().unwrap_or_default()),
    );
    result.insert("url".into(), json!(project.self_url));
    result
}

/// Abbreviated projection used by the project listing
pub fn format_project_summary(project: &Project) -> Value {
    json!({
        "id": project.id,
        "key": project.key,
        "name": project.name,
        "lead": lead_name(project),
    })
}

fn lead_name(project: &Project) -> String {
    project
        .lead
        .as_ref()
        .and_then(|lead| lead.display_name.clone())
        .unwrap_or_default()
}

fn user_value(user: &User) -> Value {
    json!({
        "name": user.name.clone().unwrap_or_default(),
        "display_name": user.display_name.clone().unwrap_or_default(),
        "email": user.email_address.clone().unwrap_or_default(),
    })
}
