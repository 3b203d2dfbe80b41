use std::process;

mod attachments;
mod cli;
mod error;
mod issue;

use clap::CommandFactory;
use cli::{Cli, Commands};
use error::{handle_command_result, EXIT_SUCCESS, EXIT_WARNING};
use jira_bridge::config::JiraConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    // Fast path for help - avoid initialization
    if cli.command.is_none() {
        Cli::command().print_help().expect("Failed to print help");
        process::exit(EXIT_SUCCESS);
    }

    use tracing::Level;

    // Configure logging based on verbosity flags and MCP mode detection
    use is_terminal::IsTerminal;
    let is_mcp_mode =
        matches!(cli.command, Some(Commands::Serve)) && !std::io::stdin().is_terminal();

    let log_level = if is_mcp_mode {
        Level::DEBUG // More verbose for MCP mode to help with debugging
    } else if cli.quiet {
        Level::ERROR
    } else if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::TRACE
    } else {
        Level::INFO
    };

    if is_mcp_mode {
        init_file_logging(log_level);
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(log_level)
            .init();
    }

    let config = JiraConfig::load(cli.config.as_deref());

    let exit_code = match cli.command {
        Some(Commands::Serve) => {
            tracing::info!("Starting MCP server");
            run_server(&config).await
        }
        Some(Commands::Issue { subcommand }) => {
            handle_command_result(issue::run_issue_command(subcommand, &config).await)
        }
        Some(Commands::Attachments { subcommand }) => {
            handle_command_result(attachments::run_attachments_command(subcommand, &config).await)
        }
        None => {
            // This case is handled early above
            unreachable!()
        }
    };

    process::exit(exit_code);
}

/// Write logs to a file in MCP mode; stdout belongs to the protocol there
fn init_file_logging(log_level: tracing::Level) {
    use std::fs;
    use std::path::PathBuf;

    let log_dir = if let Some(home) = dirs::home_dir() {
        home.join(".jira-bridge")
    } else {
        PathBuf::from(".jira-bridge")
    };

    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("Failed to create log directory: {e}");
    }

    let log_filename =
        std::env::var("JIRA_BRIDGE_LOG_FILE").unwrap_or_else(|_| "mcp.log".to_string());
    let log_file = log_dir.join(log_filename);

    match fs::OpenOptions::new().create(true).append(true).open(&log_file) {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_writer(file)
                .with_max_level(log_level)
                .with_ansi(false) // No color codes in file
                .init();
        }
        Err(e) => {
            // Fallback to stderr if file logging fails
            eprintln!("Failed to open log file, using stderr: {e}");
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_max_level(log_level)
                .init();
        }
    }
}

async fn run_server(config: &JiraConfig) -> i32 {
    use jira_bridge::mcp::McpServer;
    use rmcp::serve_server;
    use rmcp::transport::io::stdio;
    use tokio_util::sync::CancellationToken;

    let server = match McpServer::from_config(config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to create MCP server: {}", e);
            return EXIT_WARNING;
        }
    };

    // Set up cancellation token
    let ct = CancellationToken::new();
    let ct_clone = ct.clone();

    // Set up signal handlers
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl+c");

        tracing::info!("Shutdown signal received");
        ct_clone.cancel();
    });

    // Start the rmcp SDK server with stdio transport
    match serve_server(server, stdio()).await {
        Ok(_running_service) => {
            tracing::info!("MCP server started successfully");

            // Wait for cancellation
            ct.cancelled().await;

            tracing::info!("MCP server exited successfully");
            EXIT_SUCCESS
        }
        Err(e) => {
            tracing::error!("MCP server error: {}", e);
            EXIT_WARNING
        }
    }
}
