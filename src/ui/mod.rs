//! User interface components and views.
//!
//! This module contains all TUI rendering logic: the tab strip, the issue
//! table and the detail panel.

mod components;
pub mod theme;
mod views;

pub use components::{render_footer, render_tab_bar};
pub use theme::Theme;
pub use views::{DetailView, ListView};
