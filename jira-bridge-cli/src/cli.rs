use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jira-bridge")]
#[command(version)]
#[command(about = "An MCP server bridging a Jira-compatible issue tracker")]
#[command(long_about = "
jira-bridge exposes issue, project, and attachment operations of a
Jira-compatible tracker as MCP tools, and offers the same operations as
direct subcommands for scripting.

Example usage:
  jira-bridge serve                      # Run as MCP server over stdio
  jira-bridge issue show PROJ-123        # Print one issue as JSON
  jira-bridge attachments download PROJ-123  # Mirror attachments locally
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to a JSON config file with an `env` map
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run as MCP server (default when invoked via stdio)
    #[command(long_about = "
Runs jira-bridge as an MCP server over stdio. Connection settings come from
the config file or the JIRA_SERVER_URL, JIRA_USERNAME, and
JIRA_PASSWORD/JIRA_API_TOKEN environment variables.

Example:
  jira-bridge serve
  # Or configure in an MCP client's server settings
")]
    Serve,
    /// Read and search issues
    Issue {
        #[command(subcommand)]
        subcommand: IssueSubcommand,
    },
    /// List and download issue attachments
    Attachments {
        #[command(subcommand)]
        subcommand: AttachmentsSubcommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum IssueSubcommand {
    /// Print one issue as JSON
    Show {
        /// Issue key, e.g. PROJ-123
        key: String,
    },
    /// Run a JQL search and print the result page as JSON
    Search {
        /// JQL query string
        jql: String,
        /// Page size
        #[arg(long, default_value_t = 50)]
        max_results: u32,
        /// Zero-based offset of the first result
        #[arg(long, default_value_t = 0)]
        start_at: u32,
    },
}

#[derive(Subcommand, Debug)]
pub enum AttachmentsSubcommand {
    /// List an issue's attachments with local cache state
    List {
        /// Issue key, e.g. PROJ-123
        key: String,
    },
    /// Download every attachment of an issue to the local cache
    Download {
        /// Issue key, e.g. PROJ-123
        key: String,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["jira-bridge", "serve"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Serve)));
    }

    #[test]
    fn test_parse_issue_show() {
        let cli = Cli::try_parse_from(["jira-bridge", "issue", "show", "X-1"]).unwrap();
        match cli.command {
            Some(Commands::Issue {
                subcommand: IssueSubcommand::Show { key },
            }) => assert_eq!(key, "X-1"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_search_defaults() {
        let cli =
            Cli::try_parse_from(["jira-bridge", "issue", "search", "project = X"]).unwrap();
        match cli.command {
            Some(Commands::Issue {
                subcommand:
                    IssueSubcommand::Search {
                        jql,
                        max_results,
                        start_at,
                    },
            }) => {
                assert_eq!(jql, "project = X");
                assert_eq!(max_results, 50);
                assert_eq!(start_at, 0);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from([
            "jira-bridge",
            "attachments",
            "list",
            "X-1",
            "--config",
            "/tmp/mcp.json",
        ])
        .unwrap();
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("/tmp/mcp.json")));
    }
}
