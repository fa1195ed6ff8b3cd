//! Redmine REST API response types.
//!
//! These types model the JSON returned by `/issues.json` and
//! `/issues/{id}.json`. Only the fields the dashboard reads are declared;
//! everything else in the payload is ignored.

use serde::{Deserialize, Serialize};

/// The `{ "id": .., "name": .. }` reference Redmine uses for projects,
/// statuses, users and most other linked resources.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdName {
    pub id: u32,
    #[serde(default)]
    pub name: String,
}

/// A Redmine issue as returned on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawIssue {
    pub id: u32,
    #[serde(default)]
    pub project: Option<IdName>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub status: Option<IdName>,
    #[serde(default)]
    pub assigned_to: Option<IdName>,
}

/// Envelope of `GET /issues/{id}.json`.
#[allow(dead_code)] // Built by RedmineClient::get_issue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueEnvelope {
    pub issue: Option<RawIssue>,
}

/// One page of `GET /issues.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuePage {
    #[serde(default)]
    pub issues: Vec<RawIssue>,
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub limit: u32,
}
