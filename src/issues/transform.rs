//! Conversion of raw Redmine records into [`Issue`] values.

use thiserror::Error;

use super::model::{Issue, Status};
use crate::api::types::RawIssue;

/// Number of characters of the project name used as the project code.
const PROJECT_CODE_LEN: usize = 3;

/// Errors raised when a raw record cannot become an [`Issue`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    /// The record itself is absent.
    #[error("issue record is missing")]
    Missing,

    /// The record lacks a field the dashboard cannot do without.
    #[error("issue #{id} is incomplete: missing {field}")]
    Incomplete { id: u32, field: &'static str },
}

/// Convert one raw record.
///
/// Unrecognised or missing statuses resolve to [`Status::Unknown`] and a
/// missing assignee becomes the empty string; neither is an error.
pub fn transform(raw: Option<&RawIssue>) -> Result<Issue, TransformError> {
    let raw = raw.ok_or(TransformError::Missing)?;

    let project_name = raw
        .project
        .as_ref()
        .map(|p| p.name.as_str())
        .filter(|name| !name.is_empty())
        .ok_or(TransformError::Incomplete {
            id: raw.id,
            field: "project name",
        })?;

    let status = raw
        .status
        .as_ref()
        .map(|s| Status::from_label(&s.name))
        .unwrap_or_default();

    let assignee = raw
        .assigned_to
        .as_ref()
        .map(|a| a.name.clone())
        .unwrap_or_default();

    Ok(Issue::new(
        raw.id,
        project_code(project_name),
        raw.subject.clone(),
        status,
        assignee,
    ))
}

/// Convert a batch, failing on the first bad record.
pub fn transform_all(raws: &[RawIssue]) -> Result<Vec<Issue>, TransformError> {
    raws.iter().map(|raw| transform(Some(raw))).collect()
}

fn project_code(project_name: &str) -> String {
    project_name.chars().take(PROJECT_CODE_LEN).collect()
}
