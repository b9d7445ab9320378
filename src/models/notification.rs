use serde::{Deserialize, Serialize};

/// Body Grafana 8 legacy alerting posts to a webhook contact point.
/// Only the two fields turned into an issue are read.
#[derive(Debug, Deserialize, Serialize)]
pub struct Grafana8Notification {
    pub title: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_grafana_fields_are_ignored() {
        let body = serde_json::json!({
            "title": "[Alerting] CPU high",
            "message": "CPU above 90% on web-1",
            "state": "alerting",
            "ruleId": 7,
            "evalMatches": [{ "metric": "cpu", "value": 93.1 }]
        });

        let notification: Grafana8Notification = serde_json::from_value(body).unwrap();
        assert_eq!(notification.title, "[Alerting] CPU high");
        assert_eq!(notification.message, "CPU above 90% on web-1");
    }

    #[test]
    fn test_missing_title_is_rejected() {
        let body = serde_json::json!({ "message": "M" });
        assert!(serde_json::from_value::<Grafana8Notification>(body).is_err());
    }

    #[test]
    fn test_non_string_message_is_rejected() {
        let body = serde_json::json!({ "title": "T", "message": 42 });
        assert!(serde_json::from_value::<Grafana8Notification>(body).is_err());
    }
}
