//! Event handler implementation.
//!
//! Polls for terminal events, shutdown requests and repaint signals and
//! converts them to application events.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEventKind};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::Event;

/// The tick rate for the event loop in milliseconds.
const TICK_RATE_MS: u64 = 100;

/// Anything the UI loop can pull events from.
pub trait EventSource {
    /// Block until the next event.
    fn next(&mut self) -> std::io::Result<Event>;
}

/// Produces events from the terminal and the refresh scheduler.
pub struct EventHandler {
    /// The tick rate duration.
    tick_rate: Duration,
    /// Repaint signals raised by the refresh scheduler.
    repaint: mpsc::Receiver<()>,
    /// Cancelled when the process is asked to stop from outside (SIGINT).
    shutdown: CancellationToken,
}

impl EventHandler {
    /// Create a new event handler with the default tick rate.
    pub fn new(repaint: mpsc::Receiver<()>, shutdown: CancellationToken) -> Self {
        Self::with_tick_rate(repaint, shutdown, TICK_RATE_MS)
    }

    /// Create a new event handler with a custom tick rate.
    pub fn with_tick_rate(
        repaint: mpsc::Receiver<()>,
        shutdown: CancellationToken,
        tick_rate_ms: u64,
    ) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            repaint,
            shutdown,
        }
    }

    /// Return `Event::Refresh` if the scheduler asked for a repaint.
    fn pending_refresh(&mut self) -> Option<Event> {
        self.repaint.try_recv().ok().map(|()| Event::Refresh)
    }
}

impl EventSource for EventHandler {
    /// Poll for the next event.
    ///
    /// A shutdown request wins over everything, then pending repaint
    /// signals. Otherwise this blocks until a
    /// terminal event is available or the tick rate elapses, returning
    /// `Event::Tick` in the latter case.
    fn next(&mut self) -> std::io::Result<Event> {
        if self.shutdown.is_cancelled() {
            return Ok(Event::Quit);
        }

        if let Some(event) = self.pending_refresh() {
            return Ok(event);
        }

        if event::poll(self.tick_rate)? {
            match event::read()? {
                CrosstermEvent::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    Ok(Event::Key(key_event))
                }
                // Release/repeat reports (Windows, kitty protocol) are ignored
                CrosstermEvent::Key(_) => Ok(Event::Tick),
                CrosstermEvent::Resize(width, height) => Ok(Event::Resize(width, height)),
                CrosstermEvent::Mouse(_)
                | CrosstermEvent::FocusGained
                | CrosstermEvent::FocusLost
                | CrosstermEvent::Paste(_) => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}
