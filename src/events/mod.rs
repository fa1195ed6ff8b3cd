//! Event handling for the application.
//!
//! Terminal input, periodic ticks and repaint signals from the refresh
//! scheduler all arrive at the state machine as an [`Event`].

mod handler;
mod keys;

use crossterm::event::KeyEvent;

pub use handler::{EventHandler, EventSource};
pub use keys::{Action, KeyBindings};

/// An input to [`App::update`](crate::app::App::update).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// Nothing happened within the tick rate.
    Tick,
    /// The refresh scheduler published new data (or tried to).
    Refresh,
    /// The process was asked to stop from outside the terminal.
    Quit,
}
