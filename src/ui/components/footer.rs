//! One-line key hints below the content.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::Theme;

/// Render the footer for the given tab.
pub fn render_footer(
    frame: &mut Frame,
    area: Rect,
    on_table: bool,
    issue_count: usize,
    theme: &Theme,
) {
    let hints = if on_table {
        " j/k: move  enter: open in browser  tab/l: details  q: quit "
    } else {
        " shift+tab/h: issues  q: quit "
    };

    let footer = Line::from(vec![
        Span::styled(format!(" {} issues ", issue_count), theme.selected_row()),
        Span::styled(hints, theme.hint()),
    ]);
    frame.render_widget(Paragraph::new(footer), area);
}
