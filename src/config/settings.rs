//! Redmine connection settings.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// Application configuration.
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the Redmine instance (e.g. "https://redmine.example.com/").
    pub redmine_url: String,
    /// The user's Redmine API access key.
    pub redmine_token: String,
    /// Saved query whose issues are shown.
    pub query_id: u32,
    /// Replace issue data with synthetic values, for demos.
    #[serde(default)]
    pub anonymize: bool,
}

impl Config {
    /// Create a new configuration.
    #[cfg(test)]
    pub fn new(
        redmine_url: impl Into<String>,
        redmine_token: impl Into<String>,
        query_id: u32,
    ) -> Self {
        Self {
            redmine_url: redmine_url.into(),
            redmine_token: redmine_token.into(),
            query_id,
            anonymize: false,
        }
    }

    /// Validate this configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` with details if validation fails.
    pub fn validate(&self) -> Result<()> {
        if self.redmine_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "redmine_url cannot be empty".to_string(),
            ));
        }

        if !self.redmine_url.starts_with("https://") && !self.redmine_url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "redmine_url '{}' must start with http:// or https://",
                self.redmine_url
            )));
        }

        if self.redmine_token.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "redmine_token cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// URL of an issue's page in the Redmine web UI.
    pub fn issue_url(&self, issue_id: u32) -> String {
        format!("{}/issues/{}", self.redmine_url.trim_end_matches('/'), issue_id)
    }
}
