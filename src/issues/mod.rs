//! Issue domain: the internal record, conversion from Redmine records, and
//! the sources the dashboard pulls from.

mod anonymize;
mod model;
mod source;
mod transform;

pub use anonymize::Anonymizer;
pub use model::Issue;
#[cfg(test)]
pub(crate) use model::Status;
#[cfg(test)]
pub(crate) use source::mock::MockIssueSource;
pub use source::{IssueSource, RedmineSource, SourceError};
