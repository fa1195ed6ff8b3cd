//! Issue list view.
//!
//! Holds the display rows built from the current snapshot and the table
//! cursor. The cursor is the only state the view owns; which issue it points
//! at is resolved by id in [`App`](crate::app::App).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Row, Table, TableState},
    Frame,
};

use crate::issues::Issue;
use crate::ui::Theme;

/// Rows moved by `PgUp`/`PgDn`.
const PAGE_SIZE: usize = 10;

/// Column headers, in display order.
const HEADERS: [&str; 5] = ["ID", "P", "Subject", "S", "Assignee"];

/// One display row of the issue table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRow {
    pub id: u32,
    pub project_code: String,
    pub subject: String,
    pub status_glyph: &'static str,
    pub assignee: String,
}

impl From<&Issue> for IssueRow {
    fn from(issue: &Issue) -> Self {
        Self {
            id: issue.id(),
            project_code: issue.project_code().to_string(),
            subject: issue.subject().to_string(),
            status_glyph: issue.status().glyph(),
            assignee: issue.assignee().to_string(),
        }
    }
}

impl IssueRow {
    fn cells(&self) -> [String; 5] {
        [
            self.id.to_string(),
            self.project_code.clone(),
            self.subject.clone(),
            self.status_glyph.to_string(),
            self.assignee.clone(),
        ]
    }
}

/// The issue table.
#[derive(Debug, Default)]
pub struct ListView {
    rows: Vec<IssueRow>,
    state: TableState,
}

impl ListView {
    /// Create an empty list view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the rows from `issues`, keeping the cursor index in range.
    pub fn set_issues(&mut self, issues: &[Issue]) {
        self.rows = issues.iter().map(IssueRow::from).collect();

        let selected = match (self.state.selected(), self.rows.len()) {
            (_, 0) => None,
            (Some(index), len) => Some(index.min(len - 1)),
            (None, _) => Some(0),
        };
        self.state.select(selected);
    }

    /// Id of the issue in the highlighted row.
    pub fn selected_id(&self) -> Option<u32> {
        self.state
            .selected()
            .and_then(|index| self.rows.get(index))
            .map(|row| row.id)
    }

    /// Move the cursor to the row showing `id`. Returns `false` if no row does.
    pub fn select_id(&mut self, id: u32) -> bool {
        match self.rows.iter().position(|row| row.id == id) {
            Some(index) => {
                self.state.select(Some(index));
                true
            }
            None => false,
        }
    }

    /// Handle cursor movement keys. Returns `true` if the key was consumed.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        if self.rows.is_empty() {
            return false;
        }

        let last = self.rows.len() - 1;
        let current = self.state.selected().unwrap_or(0);
        let half_page = PAGE_SIZE / 2;

        let target = match (key.code, key.modifiers) {
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => current.saturating_sub(half_page),
            (KeyCode::Char('d'), KeyModifiers::CONTROL) => (current + half_page).min(last),
            (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => {
                current.saturating_sub(1)
            }
            (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => {
                (current + 1).min(last)
            }
            (KeyCode::PageUp, _) | (KeyCode::Char('b'), KeyModifiers::NONE) => {
                current.saturating_sub(PAGE_SIZE)
            }
            (KeyCode::PageDown, _) | (KeyCode::Char('f'), KeyModifiers::NONE) => {
                (current + PAGE_SIZE).min(last)
            }
            (KeyCode::Home, _) | (KeyCode::Char('g'), KeyModifiers::NONE) => 0,
            (KeyCode::End, _) | (KeyCode::Char('G'), _) => last,
            _ => return false,
        };

        self.state.select(Some(target));
        true
    }

    /// Render the table.
    ///
    /// Works on a copy of the cursor state so rendering never changes the view.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let rows = self.rows.iter().map(|row| Row::new(row.cells()));
        let widths = [
            Constraint::Length(7),
            Constraint::Length(3),
            Constraint::Min(20),
            Constraint::Length(3),
            Constraint::Length(20),
        ];

        let table = Table::new(rows, widths)
            .header(Row::new(HEADERS).style(theme.header()).bottom_margin(1))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border()),
            )
            .highlight_style(theme.selected_row());

        let mut state = self.state.clone();
        frame.render_stateful_widget(table, area, &mut state);
    }
}

#[cfg(test)]
impl ListView {
    /// The display rows, in snapshot order.
    pub fn rows(&self) -> &[IssueRow] {
        &self.rows
    }

    /// Index of the highlighted row.
    pub fn selected_index(&self) -> Option<usize> {
        self.state.selected()
    }
}
