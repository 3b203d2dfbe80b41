//! Issue subcommands: show and search

use anyhow::Context;
use serde_json::Value;

use jira_bridge::config::JiraConfig;
use jira_bridge::format::format_issue;
use jira_bridge::jira::{JiraApi, JiraClient};

use crate::cli::IssueSubcommand;

pub async fn run_issue_command(
    subcommand: IssueSubcommand,
    config: &JiraConfig,
) -> anyhow::Result<()> {
    let client = JiraClient::new(config).context("failed to build tracker client")?;

    match subcommand {
        IssueSubcommand::Show { key } => {
            let issue = client.get_issue(&key).await?;
            print_json(&Value::Object(format_issue(&issue)))
        }
        IssueSubcommand::Search {
            jql,
            max_results,
            start_at,
        } => {
            let results = client.search_issues(&jql, max_results, start_at).await?;
            let issues: Vec<Value> = results
                .issues
                .iter()
                .map(|issue| Value::Object(format_issue(issue)))
                .collect();
            print_json(&serde_json::json!({
                "total": results.total,
                "issues": issues,
                "start_at": start_at,
                "max_results": max_results,
            }))
        }
    }
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
