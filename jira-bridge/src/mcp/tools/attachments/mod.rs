//! Attachment tools: inline content, listings, and local materialization

/// Batch download tool
pub mod download_all;
/// Content-by-id tool
pub mod get;
/// Content-by-filename tool
pub mod get_by_filename;
/// Listing tool
pub mod list;

use serde_json::{Map, Value};

use crate::jira::Attachment;
use crate::mcp::tool_registry::{ToolContext, ToolRegistry};

/// Register all attachment-related tools with the registry
pub fn register_attachment_tools(registry: &mut ToolRegistry) {
    registry.register(get::GetAttachmentTool::new());
    registry.register(get_by_filename::GetAttachmentByFilenameTool::new());
    registry.register(list::ListAttachmentsTool::new());
    registry.register(download_all::DownloadAllAttachmentsTool::new());
}

/// Materialize every record of an issue and shape the batch report.
///
/// Shared by the batch tool and the listing tool's download mode. Per-item
/// failures are isolated; this always produces a payload.
pub(crate) async fn download_all_payload(
    context: &ToolContext,
    issue_key: &str,
    records: &[Attachment],
) -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert("issue_key".into(), serde_json::json!(issue_key));

    if records.is_empty() {
        payload.insert("message".into(), serde_json::json!("issue has no attachments"));
        payload.insert("total".into(), serde_json::json!(0));
        payload.insert("downloads".into(), Value::Array(Vec::new()));
        return payload;
    }

    let report = context
        .store
        .download_all(context.fetcher.as_ref(), issue_key, records)
        .await;

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

    let failures = if report.failed.is_empty() {
        Value::Null
    } else {
        Value::Array(
            report
                .failed
                .iter()
                .map(|failure| {
                    serde_json::json!({
                        "filename": failure.filename,
                        "error": failure.error,
                    })
                })
                .collect(),
        )
    };

    payload.insert("total".into(), serde_json::json!(records.len()));
    payload.insert("success".into(), serde_json::json!(report.succeeded.len()));
    payload.insert("failed".into(), serde_json::json!(report.failed.len()));
    payload.insert(
        "download_dir".into(),
        serde_json::json!(context.store.container_dir(issue_key).to_string_lossy()),
    );
    payload.insert("downloads".into(), Value::Array(downloads));
    payload.insert("failures".into(), failures);
    payload
}
