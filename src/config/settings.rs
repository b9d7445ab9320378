use crate::errors::{RelayError, Result, ISSUE_CONFIG_MISSING, LIVENESS_CONFIG_MISSING};
use ::config::{Config, Environment};
use serde::Deserialize;

/// Where `JIRA_*` values are read from. Settings are resolved on every call,
/// never cached, so a changed environment is picked up by the next request.
#[derive(Clone, Debug, Default)]
pub enum SettingsSource {
    #[default]
    Process,
    #[cfg(test)]
    Fixed(std::sync::Arc<::config::Map<String, String>>),
}

impl SettingsSource {
    #[cfg(test)]
    pub fn fixed<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        SettingsSource::Fixed(std::sync::Arc::new(map))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct JiraSettings {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default)]
    pub project_key: Option<String>,
}

/// Everything needed to talk to Jira.
#[derive(Debug, Clone)]
pub struct JiraCredentials {
    pub url: String,
    pub username: String,
    pub api_token: String,
}

impl JiraSettings {
    pub fn load(source: &SettingsSource) -> Result<Self> {
        let env = Environment::with_prefix("JIRA").prefix_separator("_");
        let env = match source {
            SettingsSource::Process => env,
            #[cfg(test)]
            SettingsSource::Fixed(vars) => env.source(Some(vars.as_ref().clone())),
        };

        let settings = Config::builder()
            .add_source(env)
            .build()?
            .try_deserialize::<JiraSettings>()?;

        Ok(settings)
    }

    /// URL, username and token, the values liveness cares about.
    pub fn credentials(&self) -> Result<JiraCredentials> {
        match (
            present(&self.api_url),
            present(&self.username),
            present(&self.api_token),
        ) {
            (Some(url), Some(username), Some(api_token)) => Ok(JiraCredentials {
                url: url.trim_end_matches('/').to_string(),
                username: username.to_string(),
                api_token: api_token.to_string(),
            }),
            _ => Err(RelayError::ConfigMissing(LIVENESS_CONFIG_MISSING)),
        }
    }

    /// Credentials plus the project key issues land in. `project_override`
    /// wins over `JIRA_PROJECT_KEY` when non-empty.
    pub fn issue_target(
        &self,
        project_override: Option<&str>,
    ) -> Result<(JiraCredentials, String)> {
        let project_key = project_override
            .filter(|key| !key.is_empty())
            .or_else(|| present(&self.project_key));

        match (self.credentials(), project_key) {
            (Ok(credentials), Some(key)) => Ok((credentials, key.to_string())),
            _ => Err(RelayError::ConfigMissing(ISSUE_CONFIG_MISSING)),
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_source() -> SettingsSource {
        SettingsSource::fixed([
            ("JIRA_API_URL", "https://jira.example.com/"),
            ("JIRA_USERNAME", "relay-bot"),
            ("JIRA_API_TOKEN", "s3cret"),
            ("JIRA_PROJECT_KEY", "OPS"),
        ])
    }

    #[test]
    fn test_load_from_fixed_source() {
        let settings = JiraSettings::load(&full_source()).unwrap();
        assert_eq!(settings.username.as_deref(), Some("relay-bot"));
        assert_eq!(settings.project_key.as_deref(), Some("OPS"));
    }

    #[test]
    fn test_credentials_trim_trailing_slash() {
        let settings = JiraSettings::load(&full_source()).unwrap();
        let credentials = settings.credentials().unwrap();
        assert_eq!(credentials.url, "https://jira.example.com");
    }

    #[test]
    fn test_unrelated_variables_are_ignored() {
        let source = SettingsSource::fixed([("LOGLEVEL", "DEBUG"), ("HOME", "/root")]);
        let settings = JiraSettings::load(&source).unwrap();
        assert!(settings.api_url.is_none());
        assert!(settings.credentials().is_err());
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let source = SettingsSource::fixed([
            ("JIRA_API_URL", "https://jira.example.com"),
            ("JIRA_USERNAME", ""),
            ("JIRA_API_TOKEN", "s3cret"),
        ]);
        let settings = JiraSettings::load(&source).unwrap();
        let err = settings.credentials().unwrap_err();
        assert_eq!(err.to_string(), LIVENESS_CONFIG_MISSING);
    }

    #[test]
    fn test_issue_target_requires_project_key() {
        let source = SettingsSource::fixed([
            ("JIRA_API_URL", "https://jira.example.com"),
            ("JIRA_USERNAME", "relay-bot"),
            ("JIRA_API_TOKEN", "s3cret"),
        ]);
        let settings = JiraSettings::load(&source).unwrap();
        assert!(settings.credentials().is_ok());

        let err = settings.issue_target(None).unwrap_err();
        assert_eq!(err.to_string(), ISSUE_CONFIG_MISSING);

        let (_, key) = settings.issue_target(Some("SRE")).unwrap();
        assert_eq!(key, "SRE");
    }

    #[test]
    fn test_project_override_wins() {
        let settings = JiraSettings::load(&full_source()).unwrap();
        assert_eq!(settings.issue_target(None).unwrap().1, "OPS");
        assert_eq!(settings.issue_target(Some("SRE")).unwrap().1, "SRE");
        assert_eq!(settings.issue_target(Some("")).unwrap().1, "OPS");
    }
}
