//! Theme and styling configuration.

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the application.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Accent used for borders and the active tab.
    pub accent: Color,
    /// Foreground of the selected table row.
    pub selected_fg: Color,
    /// Background of the selected table row.
    pub selected_bg: Color,
    /// Color of borders and secondary text.
    pub muted: Color,
}

impl Theme {
    pub fn border(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn header(&self) -> Style {
        Style::default().fg(self.fg).add_modifier(Modifier::BOLD)
    }

    pub fn selected_row(&self) -> Style {
        Style::default().fg(self.selected_fg).bg(self.selected_bg)
    }

    pub fn active_tab(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn hint(&self) -> Style {
        Style::default().fg(self.muted)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            accent: Color::Rgb(0x7D, 0x56, 0xF4),
            selected_fg: Color::Indexed(229),
            selected_bg: Color::Indexed(57),
            muted: Color::Indexed(240),
        }
    }
}
