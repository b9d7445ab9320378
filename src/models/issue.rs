use serde::{Deserialize, Serialize};

/// Jira's built-in issue type every relayed alert is filed as.
pub const ISSUE_TYPE_ID: &str = "3";

#[derive(Debug, Serialize)]
pub struct NewIssue {
    pub fields: IssueFields,
}

#[derive(Debug, Serialize)]
pub struct IssueFields {
    pub project: ProjectRef,
    pub summary: String,
    pub description: String,
    #[serde(rename = "issuetype")]
    pub issue_type: IssueTypeRef,
}

#[derive(Debug, Serialize)]
pub struct ProjectRef {
    pub key: String,
}

#[derive(Debug, Serialize)]
pub struct IssueTypeRef {
    pub id: String,
}

impl NewIssue {
    pub fn new(project_key: &str, summary: &str, description: &str) -> Self {
        Self {
            fields: IssueFields {
                project: ProjectRef {
                    key: project_key.to_string(),
                },
                summary: summary.to_string(),
                description: description.to_string(),
                issue_type: IssueTypeRef {
                    id: ISSUE_TYPE_ID.to_string(),
                },
            },
        }
    }
}

/// Jira's answer to a successful create.
#[derive(Debug, Default, Deserialize)]
pub struct CreatedIssue {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default, rename = "self")]
    pub self_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_issue_wire_shape() {
        let issue = NewIssue::new("OPS", "Disk full", "/var is at 100%");
        let value = serde_json::to_value(&issue).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "fields": {
                    "project": { "key": "OPS" },
                    "summary": "Disk full",
                    "description": "/var is at 100%",
                    "issuetype": { "id": "3" }
                }
            })
        );
    }

    #[test]
    fn test_created_issue_parsing() {
        let body = r#"{"id":"10001","key":"OPS-17","self":"https://jira.example.com/rest/api/2/issue/10001"}"#;
        let created: CreatedIssue = serde_json::from_str(body).unwrap();
        assert_eq!(created.key.as_deref(), Some("OPS-17"));
        assert_eq!(created.id.as_deref(), Some("10001"));
        assert!(created.self_url.unwrap().ends_with("/issue/10001"));
    }
}
