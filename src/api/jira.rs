use crate::config::settings::JiraCredentials;
use crate::errors::{RelayError, Result};
use crate::models::issue::{CreatedIssue, NewIssue};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

pub const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

pub struct JiraClient {
    client: Client,
    base_url: String,
    username: String,
    api_token: String,
    health_timeout: Duration,
}

impl JiraClient {
    pub fn new(base_url: String, username: String, api_token: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            username,
            api_token,
            health_timeout: HEALTH_CHECK_TIMEOUT,
        }
    }

    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    pub fn from_credentials(credentials: JiraCredentials) -> Self {
        Self::new(credentials.url, credentials.username, credentials.api_token)
    }

    /// Asks Jira who we are. Any 2xx within the timeout means the API is
    /// reachable and the credentials are accepted.
    pub async fn check_health(&self) -> Result<()> {
        let url = format!("{}/rest/api/2/myself", self.base_url);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.api_token))
            .timeout(self.health_timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(api_error(status, String::new()));
        }

        debug!("Jira API is healthy");
        Ok(())
    }

    /// Only 201 counts as created; anything else comes back as an error
    /// carrying the status and response body.
    pub async fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue> {
        let url = format!("{}/rest/api/2/issue/", self.base_url);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.username, Some(&self.api_token))
            .header(CONTENT_TYPE, "application/json")
            .json(issue)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let text = response.text().await.unwrap_or_default();
            return Err(api_error(status, text));
        }

        let text = response.text().await.unwrap_or_default();
        let created = serde_json::from_str::<CreatedIssue>(&text).unwrap_or_else(|e| {
            debug!(error = %e, "Jira create response was not the usual shape");
            CreatedIssue::default()
        });

        Ok(created)
    }
}

fn api_error(status: StatusCode, body: String) -> RelayError {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        RelayError::JiraAuthFailed(status.as_u16())
    } else {
        RelayError::JiraApiError(status.as_u16(), body)
    }
}
