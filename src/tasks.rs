//! Background refresh of the issue list.
//!
//! The UI thread never waits on the network. A single tokio task, the
//! [`RefreshScheduler`], polls the [`IssueSource`] on a fixed interval and
//! talks to the UI through two primitives only:
//!
//! 1. A capacity-one hand-off channel ([`SnapshotSender`] / [`SnapshotReceiver`])
//!    carrying whole issue snapshots. Publishing replaces any snapshot the UI
//!    has not taken yet, so the UI only ever sees the newest one.
//! 2. A repaint signal ([`RepaintSignal`]) that wakes the event loop with an
//!    [`Event::Refresh`](crate::events::Event::Refresh).
//!
//! Fetch failures are logged and dropped; the next tick is the retry.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::issues::{Issue, IssueSource};

/// Time between two fetches.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// An immutable, shareable issue collection.
pub type Snapshot = Arc<[Issue]>;

/// Publishing side of the hand-off channel.
#[derive(Debug, Clone)]
pub struct SnapshotSender {
    tx: watch::Sender<Snapshot>,
}

impl SnapshotSender {
    /// Hand a freshly fetched collection to the UI, replacing any pending one.
    pub fn publish(&self, issues: Vec<Issue>) {
        self.tx.send_replace(issues.into());
    }
}

/// Consuming side of the hand-off channel.
#[derive(Debug)]
pub struct SnapshotReceiver {
    rx: watch::Receiver<Snapshot>,
}

impl SnapshotReceiver {
    /// Take the pending snapshot, if one was published since the last take.
    pub fn take(&mut self) -> Option<Snapshot> {
        // `has_changed` errors once the scheduler is gone; nothing new can arrive then.
        if self.rx.has_changed().unwrap_or(false) {
            Some(Arc::clone(&self.rx.borrow_and_update()))
        } else {
            None
        }
    }
}

/// Create the hand-off channel.
pub fn snapshot_channel() -> (SnapshotSender, SnapshotReceiver) {
    let (tx, rx) = watch::channel(Snapshot::from(Vec::new()));
    (SnapshotSender { tx }, SnapshotReceiver { rx })
}

/// Asks the UI to redraw.
#[derive(Debug, Clone)]
pub struct RepaintSignal {
    tx: mpsc::Sender<()>,
}

impl RepaintSignal {
    /// Raise the signal. A signal that is already pending absorbs this one.
    pub fn notify(&self) {
        if let Err(mpsc::error::TrySendError::Closed(())) = self.tx.try_send(()) {
            debug!("Repaint receiver dropped");
        }
    }
}

/// Create the repaint signal and its receiving end.
pub fn repaint_channel() -> (RepaintSignal, mpsc::Receiver<()>) {
    let (tx, rx) = mpsc::channel(1);
    (RepaintSignal { tx }, rx)
}

/// Periodically fetches the issues of a saved query.
pub struct RefreshScheduler {
    source: Arc<dyn IssueSource>,
    query_id: u32,
    interval: Duration,
    /// Completion time of the last fetch; `None` means the next run is due now.
    last_update: Option<Instant>,
    snapshots: SnapshotSender,
    repaint: RepaintSignal,
    cancel: CancellationToken,
}

impl RefreshScheduler {
    /// Create a scheduler whose first fetch is due immediately.
    pub fn new(
        source: Arc<dyn IssueSource>,
        query_id: u32,
        snapshots: SnapshotSender,
        repaint: RepaintSignal,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            source,
            query_id,
            interval: REFRESH_INTERVAL,
            last_update: None,
            snapshots,
            repaint,
            cancel,
        }
    }

    /// Pretend the last fetch completed at `instant`.
    #[cfg(test)]
    pub fn with_last_update(mut self, instant: Instant) -> Self {
        self.last_update = Some(instant);
        self
    }

    /// When the next fetch is due, given the current time.
    pub fn next_run(&self, now: Instant) -> Instant {
        match self.last_update {
            Some(last) => last + self.interval,
            None => now,
        }
    }

    /// Spawn the scheduler on the current tokio runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Run until cancelled.
    pub async fn run(mut self) {
        info!(query_id = self.query_id, interval = ?self.interval, "Refresh scheduler started");

        loop {
            let next_run = self.next_run(Instant::now());
            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = tokio::time::sleep_until(next_run) => {}
            }

            let result = tokio::select! {
                _ = self.cancel.cancelled() => break,
                result = self.source.fetch_by_query(self.query_id) => result,
            };

            match result {
                Ok(issues) => {
                    debug!(count = issues.len(), "Publishing refreshed issues");
                    self.snapshots.publish(issues);
                }
                Err(e) => {
                    warn!(error = %e, "Refresh failed, keeping previous issues");
                }
            }

            self.repaint.notify();
            self.last_update = Some(Instant::now());
        }

        info!("Refresh scheduler stopped");
    }
}
