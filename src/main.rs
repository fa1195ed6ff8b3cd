//! rqw - a terminal dashboard for a Redmine saved query.
//!
//! Shows the issues of one saved query in a table, refreshes them in the
//! background and opens the selected issue in the browser.

mod api;
mod app;
mod browser;
mod config;
mod error;
mod events;
mod issues;
mod logging;
mod tasks;
mod tui;
mod ui;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::api::RedmineClient;
use crate::app::App;
use crate::browser::SystemBrowser;
use crate::config::Config;
use crate::error::Result;
use crate::events::EventHandler;
use crate::issues::{Anonymizer, IssueSource, RedmineSource};
use crate::tasks::{repaint_channel, snapshot_channel, RefreshScheduler};

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "rqw", version, about = "Watch a Redmine saved query from the terminal")]
struct Cli {
    /// Read the configuration from PATH instead of ~/.config/rqw/config.json.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Replace issue data with synthetic values.
    #[arg(long)]
    anonymize: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Warning: logging disabled: {e}");
    }

    let result = run(cli);
    logging::shutdown();
    report(result)
}

/// Print the diagnostic for a failed run and pick the exit code.
fn report(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Exiting with error");
            eprintln!("Error: {}", e.user_message());
            if let Some(action) = e.suggested_action() {
                eprintln!("{action}");
            }
            if let Some(dir) = logging::log_directory() {
                eprintln!("Logs: {}", dir.display());
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let _guard = runtime.enter();

    let client = RedmineClient::new(&config.redmine_url, &config.redmine_token)?;
    let mut source = RedmineSource::new(client);
    if cli.anonymize || config.anonymize {
        info!("Anonymizing issue data");
        source = source.with_postprocessor(Box::new(Anonymizer::new()));
    }
    let source: Arc<dyn IssueSource> = Arc::new(source);

    let query_id = config.query_id;
    let app = runtime.block_on(App::bootstrap(
        source.as_ref(),
        config,
        Box::new(SystemBrowser),
    ))?;

    let (snapshot_tx, snapshot_rx) = snapshot_channel();
    let (repaint_tx, repaint_rx) = repaint_channel();
    let cancel = CancellationToken::new();

    let scheduler = RefreshScheduler::new(
        source,
        query_id,
        snapshot_tx,
        repaint_tx,
        cancel.clone(),
    );
    let scheduler_handle = scheduler.spawn();
    spawn_interrupt_listener(cancel.clone());

    let mut app = app.with_snapshots(snapshot_rx);
    let mut events = EventHandler::new(repaint_rx, cancel.clone());

    let mut terminal = tui::init()?;
    let loop_result = tui::run(&mut terminal, &mut app, &mut events);
    let restore_result = tui::restore(&mut terminal);

    cancel.cancel();
    if let Err(e) = runtime.block_on(scheduler_handle) {
        warn!(error = %e, "Refresh scheduler did not stop cleanly");
    }

    loop_result?;
    restore_result
}

/// Cancel `shutdown` when the process receives SIGINT.
///
/// In raw mode Ctrl+C arrives as a key event; this covers signals sent from
/// outside the terminal.
fn spawn_interrupt_listener(shutdown: CancellationToken) {
    tokio::spawn(async move {
        tokio::select! {
            _ = shutdown.cancelled() => {}
            result = tokio::signal::ctrl_c() => match result {
                Ok(()) => {
                    info!("Interrupt received");
                    shutdown.cancel();
                }
                Err(e) => warn!(error = %e, "Cannot listen for interrupts"),
            },
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::issues::SourceError;

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["rqw", "--config", "/tmp/rqw.json", "--anonymize"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/rqw.json")));
        assert!(cli.anonymize);

        let cli = Cli::parse_from(["rqw"]);
        assert!(cli.config.is_none());
        assert!(!cli.anonymize);
    }

    #[test]
    fn test_report_success() {
        assert_eq!(report(Ok(())), ExitCode::SUCCESS);
    }

    #[test]
    fn test_report_failures() {
        assert_eq!(report(Err(ConfigError::NoConfigDir.into())), ExitCode::FAILURE);
        assert_eq!(report(Err(SourceError::QueryNotFound(7).into())), ExitCode::FAILURE);
    }
}
