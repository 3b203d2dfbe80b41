//! Attachment subcommands: list and download

use anyhow::Context;
use serde_json::Value;

use jira_bridge::attachments::AttachmentStore;
use jira_bridge::config::JiraConfig;
use jira_bridge::format::attachment_value;
use jira_bridge::jira::{JiraApi, JiraClient};

use crate::cli::AttachmentsSubcommand;

pub async fn run_attachments_command(
    subcommand: AttachmentsSubcommand,
    config: &JiraConfig,
) -> anyhow::Result<()> {
    let client = JiraClient::new(config).context("failed to build tracker client")?;
    let store = AttachmentStore::from_config(config)
        .context("failed to open local attachment store")?;

    match subcommand {
        AttachmentsSubcommand::List { key } => {
            let issue = client.get_issue(&key).await?;
            let known = store.list_known(&key, &issue.fields.attachments);

            let attachments: Vec<Value> = known
                .iter()
                .map(|entry| {
                    let mut value = attachment_value(&entry.record);
                    let map = value.as_object_mut().expect("attachment projection is an object");
                    map.insert(
                        "local_path".into(),
                        entry
                            .local_path
                            .as_ref()
                            .map(|p| serde_json::json!(p.to_string_lossy()))
                            .unwrap_or(Value::Null),
                    );
                    map.insert(
                        "exists_locally".into(),
                        serde_json::json!(entry.exists_locally),
                    );
                    value
                })
                .collect();

            print_json(&serde_json::json!({
                "issue_key": key,
                "total": attachments.len(),
                "attachments": attachments,
                "attachments_dir": store.container_dir(&key).to_string_lossy(),
            }))
        }
        AttachmentsSubcommand::Download { key } => {
            let issue = client.get_issue(&key).await?;
            let records = &issue.fields.attachments;

            if records.is_empty() {
                return print_json(&serde_json::json!({
                    "issue_key": key,
                    "message": "issue has no attachments",
                    "total": 0,
                    "downloads": [],
                }));
            }

            let report = store.download_all(&client, &key, records).await;

            let downloads: Vec<Value> = report
                .succeeded
                .iter()
                .map(|item| {
                    serde_json::json!({
                        "id": item.id,
                        "filename": item.filename,
                        "size": item.size,
                        "content_type": item.content_type.clone().unwrap_or_default(),
                        "local_path": item.local_path.to_string_lossy(),
                    })
                })
                .collect();

            let failures: Vec<Value> = report
                .failed
                .iter()
                .map(|failure| {
                    serde_json::json!({
                        "filename": failure.filename,
                        "error": failure.error,
                    })
                })
                .collect();

            print_json(&serde_json::json!({
                "issue_key": key,
                "total": records.len(),
                "success": report.succeeded.len(),
                "failed": report.failed.len(),
                "download_dir": store.container_dir(&key).to_string_lossy(),
                "downloads": downloads,
                "failures": if failures.is_empty() { Value::Null } else { Value::Array(failures) },
            }))
        }
    }
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
