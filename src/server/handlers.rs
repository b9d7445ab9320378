use super::AppState;
use crate::api::jira::JiraClient;
use crate::config::settings::JiraSettings;
use crate::errors::{RelayError, Result};
use crate::models::notification::Grafana8Notification;
use crate::relay;
use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use tracing::{debug, info, instrument, warn};

pub const WEBHOOK_ACK: &str = "Webhook received successfully";

fn status_ok() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}

/// Local check only: URL, username and token must be set.
#[instrument(name = "liveness", skip(state))]
pub async fn liveness(State(state): State<AppState>) -> Result<Json<Value>> {
    let settings = JiraSettings::load(&state.settings)?;

    if let Err(e) = settings.credentials() {
        warn!(error = %e, "Liveness check failed");
        return Err(e);
    }

    Ok(status_ok())
}

/// Reaches out to Jira. Whatever goes wrong, the caller only sees 503.
#[instrument(name = "readiness", skip(state))]
pub async fn readiness(State(state): State<AppState>) -> Result<Json<Value>> {
    let credentials = match JiraSettings::load(&state.settings).and_then(|s| s.credentials()) {
        Ok(credentials) => credentials,
        Err(e) => {
            warn!(error = %e, "Cannot check Jira API health");
            return Err(RelayError::JiraUnhealthy);
        }
    };

    let jira = JiraClient::from_credentials(credentials).with_health_timeout(state.health_timeout);
    match jira.check_health().await {
        Ok(()) => Ok(status_ok()),
        Err(RelayError::NetworkError(msg)) => {
            warn!(error = %msg, "Failed to connect to Jira API");
            Err(RelayError::JiraUnhealthy)
        }
        Err(e) => {
            warn!(error = %e, "Jira API returned a non-success status code");
            Err(RelayError::JiraUnhealthy)
        }
    }
}

/// Logs and echoes any JSON body. No body echoes `null`.
pub async fn dummy_webhook(body: Bytes) -> Result<Json<Value>> {
    let payload = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice::<Value>(&body)?
    };

    info!(%payload, "Dummy webhook received");
    Ok(Json(payload))
}

/// Acks every well-formed notification, even when Jira refuses the issue.
/// The body is read as JSON whatever its content type says.
#[instrument(name = "grafana8_webhook", skip_all)]
pub async fn grafana8_webhook(State(state): State<AppState>, body: Bytes) -> Result<Json<Value>> {
    let notification = serde_json::from_slice::<Grafana8Notification>(&body).map_err(|e| {
        warn!(error = %e, "Rejected Grafana notification");
        RelayError::from(e)
    })?;

    debug!(title = %notification.title, "Grafana notification received");

    relay::create_jira_issue_from(
        &state.settings,
        &notification.title,
        &notification.message,
        None,
    )
    .await?;

    Ok(Json(json!({ "message": WEBHOOK_ACK })))
}
