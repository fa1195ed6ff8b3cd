//! Centralized error types for rqw.
//!
//! Every failure that can stop the program before or while the UI runs is
//! collected into [`AppError`]. Steady-state refresh failures never get this
//! far; the scheduler logs and drops them.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::issues::SourceError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// The Redmine client could not be constructed.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Fetching issues failed.
    #[error("{0}")]
    Source(#[from] SourceError),

    /// IO errors (terminal, runtime startup).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Get a user-friendly message for the diagnostic printed on exit.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find your home directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::ReadError { path, .. } => format!(
                    "Could not read configuration file {}. Check that it exists and is readable.",
                    path.display()
                ),
                ConfigError::ParseError(err) => {
                    format!("Configuration file is invalid: {}", err)
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Api(e) | AppError::Source(SourceError::Api(e)) => match e {
                ApiError::Unauthorized => {
                    "Authentication failed. Please check your Redmine API key.".to_string()
                }
                ApiError::Forbidden => {
                    "Access denied. Your API key cannot see this resource.".to_string()
                }
                ApiError::NotFound(resource) => format!("'{}' was not found.", resource),
                ApiError::ServerError(_) => {
                    "Redmine server error. Please try again later.".to_string()
                }
                ApiError::Network(_) => {
                    "Connection failed. Please check your network and the Redmine URL.".to_string()
                }
                ApiError::InvalidUrl(url) => {
                    format!("Invalid Redmine URL in configuration: {}", url)
                }
                ApiError::InvalidResponse(msg) => {
                    format!("Unexpected response from Redmine: {}", msg)
                }
            },
            AppError::Source(SourceError::QueryNotFound(id)) => format!(
                "Saved query {} does not exist or is not visible to your API key.",
                id
            ),
            AppError::Source(e) => e.to_string(),
            AppError::Io(e) => format!("A system operation failed: {}", e),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
        }
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::ReadError { .. }) => Some(
                "Create ~/.config/rqw/config.json with redmine_url, redmine_token and query_id.",
            ),
            AppError::Api(ApiError::Unauthorized)
            | AppError::Source(SourceError::Api(ApiError::Unauthorized)) => {
                Some("Your API key is shown under 'My account' in Redmine.")
            }
            _ => None,
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_app_error_from_config_error() {
        let app_err: AppError = ConfigError::NoConfigDir.into();
        assert!(matches!(app_err, AppError::Config(ConfigError::NoConfigDir)));
    }

    #[test]
    fn test_app_error_from_source_error() {
        let app_err: AppError = SourceError::QueryNotFound(7).into();
        assert!(matches!(
            app_err,
            AppError::Source(SourceError::QueryNotFound(7))
        ));
    }

    #[test]
    fn test_user_message_unauthorized() {
        let err = AppError::Source(SourceError::Api(ApiError::Unauthorized));
        assert!(err.user_message().contains("API key"));
        assert!(err.suggested_action().is_some());
    }

    #[test]
    fn test_user_message_query_not_found() {
        let msg = AppError::Source(SourceError::QueryNotFound(7)).user_message();
        assert!(msg.contains("query 7"));
    }

    #[test]
    fn test_user_message_read_error_includes_path() {
        let err = AppError::Config(ConfigError::ReadError {
            path: PathBuf::from("/home/me/.config/rqw/config.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        });
        assert!(err.user_message().contains("/home/me/.config/rqw/config.json"));
        assert!(err.suggested_action().unwrap().contains("config.json"));
    }

    #[test]
    fn test_user_message_validation() {
        let err = AppError::Config(ConfigError::ValidationError(
            "redmine_token cannot be empty".to_string(),
        ));
        assert!(err.user_message().contains("redmine_token cannot be empty"));
    }

    #[test]
    fn test_terminal_error() {
        let err = AppError::terminal("no tty");
        assert!(matches!(err, AppError::Terminal(_)));
        assert_eq!(err.user_message(), "Terminal error: no tty");
    }
}
