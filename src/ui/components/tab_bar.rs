//! Tab strip at the top of the screen.

use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

use crate::ui::Theme;

/// Render `titles` as a tab strip with `active` highlighted.
pub fn render_tab_bar(
    frame: &mut Frame,
    area: Rect,
    titles: &[&str],
    active: usize,
    theme: &Theme,
) {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border())
                .title(" rqw "),
        )
        .select(active)
        .style(theme.hint())
        .highlight_style(theme.active_tab())
        .divider("│");

    frame.render_widget(tabs, area);
}
