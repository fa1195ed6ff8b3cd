//! Internal issue record and status enumeration.

use std::fmt;

/// Resolved status of an issue.
///
/// The set is closed: every label the tracker reports maps to exactly one
/// variant, with `Unknown` catching everything the lookup table does not name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    New,
    InProgress,
    OnHold,
    Solved,
    Closed,
    #[default]
    Unknown,
}

/// Status labels as configured on the Redmine instance.
///
/// Matching is exact and case-sensitive.
const STATUS_LABELS: [(&str, Status); 5] = [
    ("New", Status::New),
    ("Support: in progress", Status::InProgress),
    ("Support: on hold", Status::OnHold),
    ("Support: solved", Status::Solved),
    ("Closed", Status::Closed),
];

impl Status {
    /// All variants in display order.
    #[cfg(test)]
    pub const ALL: [Status; 6] = [
        Status::New,
        Status::InProgress,
        Status::OnHold,
        Status::Solved,
        Status::Closed,
        Status::Unknown,
    ];

    /// Resolve a remote status label.
    pub fn from_label(label: &str) -> Self {
        STATUS_LABELS
            .iter()
            .find(|(known, _)| *known == label)
            .map(|(_, status)| *status)
            .unwrap_or(Status::Unknown)
    }

    /// The short token shown in the table's status column.
    pub fn glyph(&self) -> &'static str {
        match self {
            Status::New => "🆕",
            Status::InProgress => "👷",
            Status::OnHold => "✋🏻",
            Status::Solved => "✅",
            Status::Closed => "🔒",
            Status::Unknown => "❔",
        }
    }

    /// Human readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Status::New => "New",
            Status::InProgress => "In progress",
            Status::OnHold => "On hold",
            Status::Solved => "Solved",
            Status::Closed => "Closed",
            Status::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One tracked work item.
///
/// Issues are values: a refresh builds new ones instead of touching old ones,
/// so a copy held by the UI stays consistent until it re-reads the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    id: u32,
    project_code: String,
    subject: String,
    status: Status,
    assignee: String,
}

impl Issue {
    /// Create a new issue.
    pub fn new(
        id: u32,
        project_code: impl Into<String>,
        subject: impl Into<String>,
        status: Status,
        assignee: impl Into<String>,
    ) -> Self {
        Self {
            id,
            project_code: project_code.into(),
            subject: subject.into(),
            status,
            assignee: assignee.into(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Short project code, at most three characters.
    pub fn project_code(&self) -> &str {
        &self.project_code
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Assignee display name, empty when unassigned.
    pub fn assignee(&self) -> &str {
        &self.assignee
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_known() {
        assert_eq!(Status::from_label("New"), Status::New);
        assert_eq!(Status::from_label("Support: in progress"), Status::InProgress);
        assert_eq!(Status::from_label("Support: on hold"), Status::OnHold);
        assert_eq!(Status::from_label("Support: solved"), Status::Solved);
        assert_eq!(Status::from_label("Closed"), Status::Closed);
    }

    #[test]
    fn test_from_label_is_case_sensitive() {
        assert_eq!(Status::from_label("new"), Status::Unknown);
        assert_eq!(Status::from_label("CLOSED"), Status::Unknown);
        assert_eq!(Status::from_label("Support: Solved"), Status::Unknown);
    }

    #[test]
    fn test_from_label_unknown() {
        assert_eq!(Status::from_label(""), Status::Unknown);
        assert_eq!(Status::from_label("Rejected"), Status::Unknown);
    }

    #[test]
    fn test_glyphs_are_distinct() {
        let mut glyphs: Vec<&str> = Status::ALL.iter().map(|s| s.glyph()).collect();
        glyphs.sort_unstable();
        glyphs.dedup();
        assert_eq!(glyphs.len(), Status::ALL.len());
    }

    #[test]
    fn test_unknown_is_default() {
        assert_eq!(Status::default(), Status::Unknown);
        assert_eq!(Status::Unknown.glyph(), "❔");
    }

    #[test]
    fn test_issue_accessors() {
        let issue = Issue::new(42, "ABC", "Can't login", Status::New, "");
        assert_eq!(issue.id(), 42);
        assert_eq!(issue.project_code(), "ABC");
        assert_eq!(issue.subject(), "Can't login");
        assert_eq!(issue.status(), Status::New);
        assert_eq!(issue.assignee(), "");
    }
}
