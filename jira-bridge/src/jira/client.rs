//! Jira REST v2 HTTP client
//!
//! Authenticated access to the tracker for issue, project, and attachment
//! operations. Every request carries basic auth; non-success statuses map to
//! typed errors so the tool layer can reshape them into error payloads.

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::types::{
    CreatedIssue, Issue, IssueBody, IssueFieldsPatch, Project, SearchResults,
};
use super::JiraApi;
use crate::attachments::ContentFetcher;
use crate::config::JiraConfig;
use crate::error::{JiraBridgeError, Result};

/// HTTP client timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// REST API prefix shared by all endpoints
const API_PREFIX: &str = "rest/api/2";

/// Authenticated client for one tracker instance
#[derive(Clone)]
pub struct JiraClient {
    /// HTTP client for making requests
    http: Client,
    /// Base URL of the tracker
    base_url: Url,
    /// Account username
    username: String,
    /// Password or API token
    secret: String,
}

impl JiraClient {
    /// Build a client from connection settings.
    ///
    /// # Errors
    ///
    /// Fails when credentials are incomplete or the server URL does not parse.
    pub fn new(config: &JiraConfig) -> Result<Self> {
        let (username, secret) = config.auth()?;

        // Url::join treats a base without a trailing slash as a file segment
        let mut server_url = config.server_url.clone();
        if !server_url.ends_with('/') {
            server_url.push('/');
        }
        let base_url = Url::parse(&server_url)?;

        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http,
            base_url,
            username,
            secret,
        })
    }

    /// Resolve an endpoint path against the tracker base URL
    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(&format!("{API_PREFIX}/{path}"))?)
    }

    /// Map a non-success response to a typed error.
    ///
    /// `on_not_found` supplies the endpoint-specific 404 error; everything
    /// else becomes [`JiraBridgeError::RemoteApi`] with the body preserved.
    async fn ensure_success(
        response: Response,
        on_not_found: Option<JiraBridgeError>,
    ) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND {
            if let Some(err) = on_not_found {
                return Err(err);
            }
        }

        let body = response.text().await.unwrap_or_default();
        Err(JiraBridgeError::RemoteApi {
            status: status.as_u16(),
            body,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
        on_not_found: Option<JiraBridgeError>,
    ) -> Result<T> {
        debug!(url = %url, "GET");
        let response = self
            .http
            .get(url)
            .basic_auth(&self.username, Some(&self.secret))
            .query(query)
            .send()
            .await?;

        let response = Self::ensure_success(response, on_not_found).await?;
        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl JiraApi for JiraClient {
    async fn get_issue(&self, key: &str) -> Result<Issue> {
        let url = self.endpoint(&format!("issue/{key}"))?;
        self.get_json(url, &[], Some(JiraBridgeError::IssueNotFound(key.to_string())))
            .await
    }

    async fn search_issues(
        &self,
        jql: &str,
        max_results: u32,
        start_at: u32,
    ) -> Result<SearchResults> {
        let url = self.endpoint("search")?;
        let query = [
            ("jql", jql.to_string()),
            ("maxResults", max_results.to_string()),
            ("startAt", start_at.to_string()),
        ];
        self.get_json(url, &query, None).await
    }

    async fn create_issue(&self, fields: IssueFieldsPatch) -> Result<Issue> {
        let url = self.endpoint("issue")?;
        debug!(url = %url, "POST create issue");

        let response = self
            .http
            .post(url)
            .basic_auth(&self.username, Some(&self.secret))
            .json(&IssueBody { fields })
            .send()
            .await?;

        let created: CreatedIssue = Self::ensure_success(response, None).await?.json().await?;

        // The create endpoint answers with an abbreviated bean; re-fetch for
        // the full field bag the projection expects.
        self.get_issue(&created.key).await
    }

    async fn update_issue(&self, key: &str, fields: IssueFieldsPatch) -> Result<Issue> {
        let url = self.endpoint(&format!("issue/{key}"))?;
        debug!(url = %url, "PUT update issue");

        let response = self
            .http
            .put(url)
            .basic_auth(&self.username, Some(&self.secret))
            .json(&IssueBody { fields })
            .send()
            .await?;

        Self::ensure_success(
            response,
            Some(JiraBridgeError::IssueNotFound(key.to_string())),
        )
        .await?;

        // The update endpoint answers 204; re-fetch the refreshed bean.
        self.get_issue(key).await
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        let url = self.endpoint("project")?;
        self.get_json(url, &[], None).await
    }

    async fn get_project(&self, key: &str) -> Result<Project> {
        let url = self.endpoint(&format!("project/{key}"))?;
        self.get_json(
            url,
            &[],
            Some(JiraBridgeError::ProjectNotFound(key.to_string())),
        )
        .await
    }
}

#[async_trait::async_trait]
impl ContentFetcher for JiraClient {
    async fn fetch_content(&self, url: &str) -> Result<Vec<u8>> {
        // Content locators come back absolute from the attachment records.
        let url = Url::parse(url)?;
        debug!(url = %url, "GET attachment content");

        let response = self
            .http
            .get(url)
            .basic_auth(&self.username, Some(&self.secret))
            .send()
            .await?;

        let response = Self::ensure_success(response, None).await?;
        Ok(response.bytes().await?.to_vec())
    }
}
