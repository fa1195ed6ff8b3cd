//! Reusable UI components.

mod footer;
mod tab_bar;

pub use footer::render_footer;
pub use tab_bar::render_tab_bar;
