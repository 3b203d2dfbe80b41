//! Connection and storage configuration
//!
//! Settings are resolved from an optional JSON config file first, then from
//! the process environment. The config file uses the same shape MCP client
//! configurations do: a top-level `env` object whose keys mirror the
//! environment variables.
//!
//! ```json
//! { "env": { "JIRA_SERVER_URL": "https://jira.example.com", "JIRA_USERNAME": "bot" } }
//! ```

use crate::error::{JiraBridgeError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Environment variable naming the tracker base URL
pub const ENV_SERVER_URL: &str = "JIRA_SERVER_URL";
/// Environment variable naming the account username
pub const ENV_USERNAME: &str = "JIRA_USERNAME";
/// Environment variable naming the account password
pub const ENV_PASSWORD: &str = "JIRA_PASSWORD";
/// Environment variable naming the API token (alternative to a password)
pub const ENV_API_TOKEN: &str = "JIRA_API_TOKEN";
/// Environment variable overriding the attachment cache root
pub const ENV_ATTACHMENTS_DIR: &str = "JIRA_BRIDGE_ATTACHMENTS_DIR";

/// Jira connection settings
#[derive(Debug, Clone, Default)]
pub struct JiraConfig {
    /// Base URL of the tracker, e.g. `https://jira.example.com`
    pub server_url: String,
    /// Account username
    pub username: String,
    /// Account password (preferred over the API token when both are set)
    pub password: String,
    /// API token, used when no password is configured
    pub api_token: String,
    /// Root directory for materialized attachments
    pub attachments_dir: PathBuf,
}

/// On-disk config file shape: `{"env": {"JIRA_SERVER_URL": ...}}`
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    env: HashMap<String, String>,
}

impl JiraConfig {
    /// Load configuration, preferring the config file over environment variables.
    ///
    /// A missing or unreadable config file is logged and ignored; the
    /// environment then supplies every value, matching how MCP clients launch
    /// the server with nothing but env entries.
    pub fn load(config_path: Option<&Path>) -> Self {
        let file_env = config_path.and_then(Self::read_config_file).unwrap_or_default();

        let lookup = |key: &str| -> String {
            file_env
                .get(key)
                .cloned()
                .or_else(|| std::env::var(key).ok())
                .unwrap_or_default()
        };

        let attachments_dir = {
            let raw = lookup(ENV_ATTACHMENTS_DIR);
            if raw.is_empty() {
                Self::default_attachments_dir()
            } else {
                PathBuf::from(raw)
            }
        };

        Self {
            server_url: lookup(ENV_SERVER_URL),
            username: lookup(ENV_USERNAME),
            password: lookup(ENV_PASSWORD),
            api_token: lookup(ENV_API_TOKEN),
            attachments_dir,
        }
    }

    fn read_config_file(path: &Path) -> Option<HashMap<String, String>> {
        match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str::<ConfigFile>(&raw) {
                Ok(file) => Some(file.env),
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse config file {}, falling back to env vars: {}",
                        path.display(),
                        e
                    );
                    None
                }
            },
            Err(e) => {
                tracing::warn!(
                    "Failed to read config file {}, falling back to env vars: {}",
                    path.display(),
                    e
                );
                None
            }
        }
    }

    /// Default attachment root: `~/.jira-bridge/attachments`
    pub fn default_attachments_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".jira-bridge")
            .join("attachments")
    }

    /// Resolve basic-auth credentials, preferring the password over the API token.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the server URL, username, or both
    /// secrets are missing.
    pub fn auth(&self) -> Result<(String, String)> {
        let secret = if !self.password.is_empty() {
            self.password.clone()
        } else {
            self.api_token.clone()
        };

        if self.server_url.is_empty() || self.username.is_empty() || secret.is_empty() {
            return Err(JiraBridgeError::Config(format!(
                "incomplete connection settings; set {ENV_SERVER_URL}, {ENV_USERNAME}, and either {ENV_PASSWORD} or {ENV_API_TOKEN}"
            )));
        }

        Ok((self.username.clone(), secret))
    }
}
