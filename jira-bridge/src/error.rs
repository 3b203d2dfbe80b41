//! Unified error handling for the jira-bridge library
//!
//! This module provides the typed error hierarchy shared by the Jira REST
//! client, the attachment store, and the MCP tool layer.

use std::io;
use thiserror::Error;

/// The main error type for the jira-bridge library
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JiraBridgeError {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// HTTP transport failure talking to the remote tracker
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Endpoint URL could not be constructed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Issue not found on the remote tracker
    #[error("Issue not found: {0}")]
    IssueNotFound(String),

    /// Project not found on the remote tracker
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    /// Attachment not present on the named issue
    #[error("Attachment '{name}' not found on issue {issue}")]
    AttachmentNotFound {
        /// Key of the issue that was searched
        issue: String,
        /// Attachment id or filename that was requested
        name: String,
    },

    /// Remote API answered with a non-success status
    #[error("Remote API error ({status}): {body}")]
    RemoteApi {
        /// HTTP status code returned by the tracker
        status: u16,
        /// Response body, as returned by the tracker
        body: String,
    },

    /// Local attachment storage failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Other errors
    #[error("{0}")]
    Other(String),

    /// Generic error with context
    #[error("{message}")]
    Context {
        /// Human-readable description of the failed operation
        message: String,
        /// Underlying cause
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type alias for jira-bridge operations
pub type Result<T> = std::result::Result<T, JiraBridgeError>;

/// Extension trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add context to an error
    fn context<S: Into<String>>(self, msg: S) -> Result<T>;

    /// Add context with a closure that's only called on error
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<S: Into<String>>(self, msg: S) -> Result<T> {
        self.map_err(|e| JiraBridgeError::Context {
            message: msg.into(),
            source: Box::new(e),
        })
    }

    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| JiraBridgeError::Context {
            message: f().into(),
            source: Box::new(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_context() {
        let err: Result<()> = Err(io::Error::new(io::ErrorKind::NotFound, "file not found").into());
        let err_with_context = err.context("Failed to open config file");

        assert!(err_with_context.is_err());
        let msg = err_with_context.unwrap_err().to_string();
        assert!(msg.contains("Failed to open config file"));
    }

    #[test]
    fn test_not_found_display() {
        let err = JiraBridgeError::AttachmentNotFound {
            issue: "X-1".to_string(),
            name: "a.png".to_string(),
        };
        assert_eq!(err.to_string(), "Attachment 'a.png' not found on issue X-1");
    }

    #[test]
    fn test_remote_api_display() {
        let err = JiraBridgeError::RemoteApi {
            status: 503,
            body: "maintenance".to_string(),
        };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("maintenance"));
    }
}
