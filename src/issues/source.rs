//! Issue sources.
//!
//! [`IssueSource`] is the seam between the dashboard and the tracker. The
//! production implementation, [`RedmineSource`], wraps the REST client, runs
//! every record through the transformer and the optional post-processing
//! stage.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, instrument};

use super::anonymize::Postprocessor;
use super::model::Issue;
use super::transform::{transform, transform_all, TransformError};
use crate::api::{ApiError, RedmineClient};

/// Errors returned by an [`IssueSource`].
#[derive(Debug, Error)]
pub enum SourceError {
    /// No issue with this id exists.
    #[allow(dead_code)] // Returned by fetch_by_id
    #[error("Issue #{0} not found")]
    NotFound(u32),

    /// No saved query with this id exists.
    #[error("Query {0} not found")]
    QueryNotFound(u32),

    /// The tracker could not be reached or refused the request.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A record in the response was unusable.
    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Capability to fetch issues from a tracker.
///
/// Implementations may take as long as a network round trip; callers run them
/// off the UI thread.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Fetch a single issue by id.
    #[allow(dead_code)] // The dashboard only runs queries
    async fn fetch_by_id(&self, id: u32) -> Result<Issue, SourceError>;

    /// Fetch every issue matched by a saved query, in the tracker's order.
    async fn fetch_by_query(&self, query_id: u32) -> Result<Vec<Issue>, SourceError>;
}

/// [`IssueSource`] backed by a Redmine instance.
pub struct RedmineSource {
    client: RedmineClient,
    postprocessor: Option<Box<dyn Postprocessor>>,
}

impl RedmineSource {
    /// Create a source without post-processing.
    pub fn new(client: RedmineClient) -> Self {
        Self {
            client,
            postprocessor: None,
        }
    }

    /// Run every fetched issue through `postprocessor`.
    pub fn with_postprocessor(mut self, postprocessor: Box<dyn Postprocessor>) -> Self {
        self.postprocessor = Some(postprocessor);
        self
    }

    fn finish(&self, issue: Issue) -> Issue {
        match &self.postprocessor {
            Some(stage) => stage.apply(issue),
            None => issue,
        }
    }
}

#[async_trait]
impl IssueSource for RedmineSource {
    #[instrument(skip(self))]
    async fn fetch_by_id(&self, id: u32) -> Result<Issue, SourceError> {
        let raw = self.client.get_issue(id).await.map_err(|e| match e {
            ApiError::NotFound(_) => SourceError::NotFound(id),
            other => SourceError::Api(other),
        })?;

        let issue = transform(raw.as_ref())?;
        Ok(self.finish(issue))
    }

    #[instrument(skip(self))]
    async fn fetch_by_query(&self, query_id: u32) -> Result<Vec<Issue>, SourceError> {
        let raws = self
            .client
            .issues_by_query(query_id)
            .await
            .map_err(|e| match e {
                ApiError::NotFound(_) => SourceError::QueryNotFound(query_id),
                other => SourceError::Api(other),
            })?;

        let issues = transform_all(&raws)?;
        debug!(count = issues.len(), "Transformed issues");
        Ok(issues.into_iter().map(|issue| self.finish(issue)).collect())
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! In-memory [`IssueSource`] for tests.

    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;
    use crate::issues::Status;

    const PROJECT_CODES: [&str; 5] = ["ABC", "DEF", "GHI", "JKL", "MNO"];
    const ASSIGNEES: [&str; 6] = [
        "",
        "John Doe",
        "Jane Doe",
        "Walter White",
        "Jesse Pinkman",
        "Leslie Pollos",
    ];

    /// Serves issues from fixed collections.
    #[derive(Default)]
    pub struct MockIssueSource {
        next_id: u32,
        issues: Vec<Issue>,
        queries: HashMap<u32, Vec<Issue>>,
        failing: Mutex<bool>,
    }

    impl MockIssueSource {
        pub fn new() -> Self {
            Self {
                next_id: 100_000,
                ..Default::default()
            }
        }

        /// Create `amount` issues and return them.
        pub fn generate_issues(&mut self, amount: usize) -> Vec<Issue> {
            let statuses = Status::ALL;
            (0..amount)
                .map(|n| {
                    self.next_id += 1;
                    let issue = Issue::new(
                        self.next_id,
                        PROJECT_CODES[n % PROJECT_CODES.len()],
                        format!("Test issue #{}", self.next_id),
                        statuses[n % statuses.len()],
                        ASSIGNEES[n % ASSIGNEES.len()],
                    );
                    self.issues.push(issue.clone());
                    issue
                })
                .collect()
        }

        /// Register a query returning the given issues.
        pub fn add_query(&mut self, query_id: u32, issues: Vec<Issue>) {
            self.issues.extend(issues.iter().cloned());
            self.queries.entry(query_id).or_default().extend(issues);
        }

        /// Create `amount` issues under `query_id`.
        pub fn generate_query(&mut self, query_id: u32, amount: usize) -> Vec<Issue> {
            let issues = self.generate_issues(amount);
            self.queries
                .entry(query_id)
                .or_default()
                .extend(issues.iter().cloned());
            issues
        }

        /// Make every subsequent call fail.
        pub fn set_failing(&self, failing: bool) {
            *self.failing.lock().unwrap() = failing;
        }

        fn check_failing(&self) -> Result<(), SourceError> {
            if *self.failing.lock().unwrap() {
                Err(SourceError::Api(ApiError::ServerError("HTTP 503".to_string())))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl IssueSource for MockIssueSource {
        async fn fetch_by_id(&self, id: u32) -> Result<Issue, SourceError> {
            self.check_failing()?;
            self.issues
                .iter()
                .find(|issue| issue.id() == id)
                .cloned()
                .ok_or(SourceError::NotFound(id))
        }

        async fn fetch_by_query(&self, query_id: u32) -> Result<Vec<Issue>, SourceError> {
            self.check_failing()?;
            self.queries
                .get(&query_id)
                .cloned()
                .ok_or(SourceError::QueryNotFound(query_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::mock::MockIssueSource;
    use super::*;
    use crate::issues::{Anonymizer, Status};

    fn redmine_source(server: &MockServer) -> RedmineSource {
        RedmineSource::new(RedmineClient::new(&server.uri(), "secret").unwrap())
    }

    #[tokio::test]
    async fn test_fetch_by_id_existing_issue() {
        let mut source = MockIssueSource::new();
        let issues = source.generate_issues(5);
        let issue = &issues[0];

        let fetched = source.fetch_by_id(issue.id()).await.unwrap();
        assert_eq!(&fetched, issue);
    }

    #[tokio::test]
    async fn test_fetch_by_id_non_existent_issue() {
        let source = MockIssueSource::new();
        let err = source.fetch_by_id(145_678).await.unwrap_err();
        assert!(matches!(err, SourceError::NotFound(145_678)));
    }

    #[tokio::test]
    async fn test_fetch_by_query_existing() {
        let mut source = MockIssueSource::new();
        let expected = source.generate_query(1359, 5);

        let issues = source.fetch_by_query(1359).await.unwrap();
        assert_eq!(issues, expected);
    }

    #[tokio::test]
    async fn test_fetch_by_query_non_existent() {
        let mut source = MockIssueSource::new();
        source.generate_query(1359, 1);

        let err = source.fetch_by_query(1234).await.unwrap_err();
        assert!(matches!(err, SourceError::QueryNotFound(1234)));
    }

    #[test]
    fn test_redmine_source_finish_without_postprocessor() {
        let client = RedmineClient::new("https://redmine.example.com", "t").unwrap();
        let source = RedmineSource::new(client);
        let issue = Issue::new(1, "ABC", "Subject", Status::New, "");
        assert_eq!(source.finish(issue.clone()), issue);
    }

    #[test]
    fn test_redmine_source_finish_with_anonymizer() {
        let client = RedmineClient::new("https://redmine.example.com", "t").unwrap();
        let source = RedmineSource::new(client).with_postprocessor(Box::new(Anonymizer::new()));
        let issue = Issue::new(1, "Sec", "Secret", Status::Closed, "Someone");
        let processed = source.finish(issue);
        assert_ne!(processed.subject(), "Secret");
    }

    #[test]
    fn test_source_error_display() {
        assert_eq!(SourceError::NotFound(12).to_string(), "Issue #12 not found");
        assert_eq!(SourceError::QueryNotFound(7).to_string(), "Query 7 not found");
    }

    #[tokio::test]
    async fn test_add_query_serves_given_issues() {
        let mut source = MockIssueSource::new();
        let issues = vec![
            Issue::new(3, "ABC", "Third", Status::Solved, ""),
            Issue::new(1, "ABC", "First", Status::New, "Jane Doe"),
        ];
        source.add_query(7, issues.clone());

        assert_eq!(source.fetch_by_query(7).await.unwrap(), issues);
        assert_eq!(source.fetch_by_id(3).await.unwrap().subject(), "Third");
    }

    #[tokio::test]
    async fn test_failing_source() {
        let mut source = MockIssueSource::new();
        source.generate_query(7, 2);

        source.set_failing(true);
        let err = source.fetch_by_query(7).await.unwrap_err();
        assert!(matches!(err, SourceError::Api(ApiError::ServerError(_))));

        source.set_failing(false);
        assert_eq!(source.fetch_by_query(7).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_redmine_source_transforms_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/issues.json"))
            .and(query_param("query_id", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "issues": [
                    {
                        "id": 11,
                        "project": {"id": 1, "name": "Helpdesk"},
                        "status": {"id": 2, "name": "Support: in progress"},
                        "subject": "VPN drops",
                        "assigned_to": {"id": 4, "name": "Jane Doe"}
                    },
                    {
                        "id": 12,
                        "project": {"id": 1, "name": "Helpdesk"},
                        "status": {"id": 9, "name": "Rejected"},
                        "subject": "Coffee machine"
                    }
                ],
                "total_count": 2,
                "offset": 0,
                "limit": 100
            })))
            .mount(&server)
            .await;

        let issues = redmine_source(&server).fetch_by_query(7).await.unwrap();

        assert_eq!(
            issues,
            vec![
                Issue::new(11, "Hel", "VPN drops", Status::InProgress, "Jane Doe"),
                Issue::new(12, "Hel", "Coffee machine", Status::Unknown, ""),
            ]
        );
    }

    #[tokio::test]
    async fn test_redmine_source_missing_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/issues.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = redmine_source(&server).fetch_by_query(7).await.unwrap_err();
        assert!(matches!(err, SourceError::QueryNotFound(7)));
    }

    #[tokio::test]
    async fn test_redmine_source_missing_issue() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/issues/9.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = redmine_source(&server).fetch_by_id(9).await.unwrap_err();
        assert!(matches!(err, SourceError::NotFound(9)));
    }

    #[tokio::test]
    async fn test_redmine_source_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = redmine_source(&server).fetch_by_query(7).await.unwrap_err();
        assert!(matches!(err, SourceError::Api(ApiError::Unauthorized)));
    }
}
