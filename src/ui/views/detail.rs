//! Issue detail view.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::issues::Issue;
use crate::ui::Theme;

/// Read-only panel describing one issue.
pub struct DetailView;

impl DetailView {
    /// Lines shown for `issue`; empty when nothing is selected.
    pub fn lines(issue: Option<&Issue>) -> Vec<Line<'static>> {
        let Some(issue) = issue else {
            return vec![Line::raw("No issue selected.")];
        };

        vec![
            field("Project", issue.project_code().to_string()),
            field("ID", format!("#{}", issue.id())),
            field("Subject", issue.subject().to_string()),
            field(
                "Status",
                format!("{} {}", issue.status().glyph(), issue.status()),
            ),
            field("Assignee", issue.assignee().to_string()),
        ]
    }

    /// Render the panel.
    pub fn render(frame: &mut Frame, area: Rect, issue: Option<&Issue>, theme: &Theme) {
        let paragraph = Paragraph::new(Self::lines(issue))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border()),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}

fn field(heading: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{}: ", heading),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(value, Style::default().add_modifier(Modifier::ITALIC)),
    ])
}
