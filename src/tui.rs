//! Terminal setup, teardown and the draw/update loop.

use std::io::{self, Stdout};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{debug, error, warn};

use crate::app::App;
use crate::error::{AppError, Result};
use crate::events::EventSource;

/// The terminal type used by the binary.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Enter raw mode and the alternate screen.
///
/// Also installs a panic hook that restores the terminal before the default
/// hook prints the panic message.
pub fn init() -> Result<Tui> {
    install_panic_hook();

    enable_raw_mode().map_err(|e| AppError::terminal(format!("cannot enable raw mode: {}", e)))?;

    let terminal = undo_on_error(enter_alternate_screen(), || {
        if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen) {
            warn!(error = %e, "Failed to leave alternate screen");
        }
        if let Err(e) = disable_raw_mode() {
            warn!(error = %e, "Failed to disable raw mode");
        }
    })?;
    debug!("Terminal initialized");
    Ok(terminal)
}

fn enter_alternate_screen() -> Result<Tui> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

/// Run `undo` if `result` is an error, then pass `result` through.
fn undo_on_error<T>(result: Result<T>, undo: impl FnOnce()) -> Result<T> {
    if result.is_err() {
        undo();
    }
    result
}

/// Leave the alternate screen and raw mode.
pub fn restore(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    debug!("Terminal restored");
    Ok(())
}

fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        if let Err(e) = disable_raw_mode() {
            eprintln!("Failed to disable raw mode during panic: {e}");
        }
        if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen) {
            eprintln!("Failed to leave alternate screen during panic: {e}");
        }
        original_hook(panic_info);
    }));
}

/// Draw, wait for an event, update; until the app asks to quit.
pub fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &mut impl EventSource,
) -> Result<()> {
    loop {
        terminal.draw(|frame| app.view(frame))?;

        if app.should_quit() {
            return Ok(());
        }

        let event = events.next().map_err(|e| {
            error!(error = %e, "Failed to read terminal event");
            e
        })?;
        app.update(event);
    }
}
