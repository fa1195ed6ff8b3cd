//! API key authentication for Redmine.
//!
//! Redmine accepts the user's API access key in the `X-Redmine-API-Key`
//! header. The key is kept out of `Debug` output so it never ends up in logs.

use std::fmt;

use reqwest::header::HeaderValue;

use super::error::{ApiError, Result};

/// The header Redmine reads the API key from.
pub const API_KEY_HEADER: &str = "X-Redmine-API-Key";

/// Redmine API access key.
#[derive(Clone)]
pub struct ApiKey {
    header: HeaderValue,
}

impl ApiKey {
    /// Wrap a raw token.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidResponse` if the token contains characters
    /// that cannot appear in an HTTP header.
    pub fn new(token: &str) -> Result<Self> {
        let mut header = HeaderValue::from_str(token.trim()).map_err(|_| {
            ApiError::InvalidResponse("API key contains invalid characters".to_string())
        })?;
        header.set_sensitive(true);
        Ok(Self { header })
    }

    /// The header value to send with each request.
    pub fn header_value(&self) -> &HeaderValue {
        &self.header
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey").field("header", &"<redacted>").finish()
    }
}
