use crate::api::jira::JiraClient;
use crate::config::settings::{JiraSettings, SettingsSource};
use crate::errors::Result;
use crate::models::issue::{CreatedIssue, NewIssue};
use tracing::{debug, error, info};

/// Files one issue in Jira.
///
/// Missing configuration is returned as an error before anything goes over
/// the wire. Once the request is sent, a failed create is only logged and
/// `Ok(None)` comes back, so webhook callers always get their ack.
pub async fn create_jira_issue(
    settings: &JiraSettings,
    summary: &str,
    description: &str,
    project_key: Option<&str>,
) -> Result<Option<CreatedIssue>> {
    let (credentials, project_key) = settings.issue_target(project_key)?;

    debug!(summary, description, project_key = %project_key, "Creating Jira issue");

    let issue = NewIssue::new(&project_key, summary, description);
    if let Ok(payload) = serde_json::to_string(&issue) {
        debug!(%payload, "Jira issue payload");
    }

    let jira = JiraClient::from_credentials(credentials);

    match jira.create_issue(&issue).await {
        Ok(created) => {
            info!(
                key = created.key.as_deref().unwrap_or("-"),
                id = created.id.as_deref().unwrap_or("-"),
                url = created.self_url.as_deref().unwrap_or("-"),
                project_key = %project_key,
                "Jira issue created successfully"
            );
            Ok(Some(created))
        }
        Err(e) => {
            error!(error = %e, project_key = %project_key, "Failed to create Jira issue");
            Ok(None)
        }
    }
}

/// Same as [`create_jira_issue`], resolving settings from `source` first.
pub async fn create_jira_issue_from(
    source: &SettingsSource,
    summary: &str,
    description: &str,
    project_key: Option<&str>,
) -> Result<Option<CreatedIssue>> {
    let settings = JiraSettings::load(source)?;
    create_jira_issue(&settings, summary, description, project_key).await
}
