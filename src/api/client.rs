//! Redmine API client implementation.
//!
//! This module provides the HTTP client for the Redmine REST API. It handles
//! authentication, pagination and error mapping. Each request is attempted
//! exactly once; the refresh scheduler's next tick is the retry.

use std::time::Duration;

use reqwest::{header, Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::auth::{ApiKey, API_KEY_HEADER};
use super::error::{ApiError, Result};
use super::types::{IssueEnvelope, IssuePage, RawIssue};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Page size for `/issues.json`. Redmine caps `limit` at 100.
const PAGE_LIMIT: u32 = 100;

/// The Redmine API client.
#[derive(Debug, Clone)]
pub struct RedmineClient {
    /// The HTTP client.
    client: Client,
    /// The base URL of the Redmine instance, without trailing slash.
    base_url: String,
    /// API access key.
    api_key: ApiKey,
}

impl RedmineClient {
    /// Create a client for the given Redmine instance.
    ///
    /// Does not contact the server.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The URL cannot be parsed
    /// - The token is not a valid header value
    /// - The HTTP client cannot be built
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let base_url = normalize_base_url(base_url);
        Url::parse(&base_url).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let api_key = ApiKey::new(token)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Get the base URL.
    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get a single issue by id.
    ///
    /// Calls `GET /issues/{id}.json`.
    #[allow(dead_code)] // Only reached through IssueSource::fetch_by_id
    #[instrument(skip(self))]
    pub async fn get_issue(&self, id: u32) -> Result<Option<RawIssue>> {
        debug!("Fetching issue");

        let url = format!("{}/issues/{}.json", self.base_url, id);
        let envelope: IssueEnvelope = self.get(&url, &[]).await?;
        Ok(envelope.issue)
    }

    /// Get every issue matched by a saved query.
    ///
    /// Requests pages at a locally tracked offset until `total_count` issues
    /// have been read or the server returns an empty page.
    #[instrument(skip(self))]
    pub async fn issues_by_query(&self, query_id: u32) -> Result<Vec<RawIssue>> {
        let url = format!("{}/issues.json", self.base_url);
        let mut issues = Vec::new();
        let mut offset: u32 = 0;

        loop {
            let query = [
                ("query_id", query_id.to_string()),
                ("offset", offset.to_string()),
                ("limit", PAGE_LIMIT.to_string()),
            ];
            let page: IssuePage = self.get(&url, &query).await?;
            debug!(
                offset,
                count = page.issues.len(),
                total = page.total_count,
                "Fetched issue page"
            );

            let received = page.issues.len();
            let total = page.total_count as usize;
            offset += received as u32;
            issues.extend(page.issues);

            if received == 0 || issues.len() >= total {
                break;
            }
        }

        debug!("Found {} issues", issues.len());
        Ok(issues)
    }

    /// Perform an authenticated GET request and parse the JSON body.
    async fn get<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T> {
        let response = self
            .client
            .get(url)
            .query(query)
            .header(API_KEY_HEADER, self.api_key.header_value().clone())
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        handle_response(response).await
    }
}

/// Check the HTTP status and parse the JSON body.
async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let url = response.url().path().to_string();

    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
    } else {
        let body = response.text().await.unwrap_or_default();
        debug!("Error response body: {}", body);
        Err(error_from_response(status, &url, &body))
    }
}

/// Build an error from a failed response.
///
/// Redmine reports validation problems as `{"errors": ["..."]}`.
fn error_from_response(status: StatusCode, url: &str, body: &str) -> ApiError {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(messages) = json.get("errors").and_then(|e| e.as_array()) {
            let joined = messages
                .iter()
                .filter_map(|v| v.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            if !joined.is_empty() {
                return ApiError::from_status(status, &joined);
            }
        }
    }

    ApiError::from_status(status, url)
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');

    if !url.starts_with("https://") && !url.contains("localhost") {
        warn!("URL does not use HTTPS: {}. The API key is sent in clear text.", url);
    }

    url.to_string()
}
