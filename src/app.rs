//! Main application state and event handling.
//!
//! This module implements The Elm Architecture (TEA) pattern: [`App`] is the
//! model, [`App::update`] the only place state changes, and [`App::view`] a
//! pure rendering of the current state.

use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};
use tracing::{debug, info, trace};

use crate::browser::UrlOpener;
use crate::config::Config;
use crate::events::{Action, Event, KeyBindings};
use crate::issues::{Issue, IssueSource, SourceError};
use crate::tasks::{Snapshot, SnapshotReceiver};
use crate::ui::{render_footer, render_tab_bar, DetailView, ListView, Theme};

/// The tabs of the main screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// The issue table.
    Issues,
    /// Read-only details of the selected issue.
    Details,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Issues => "Issues",
            Tab::Details => "Details",
        }
    }
}

/// The main application struct that holds all view state.
pub struct App {
    /// Tabs in display order.
    tabs: [Tab; 2],
    /// Index into `tabs`.
    active_tab: usize,
    /// The latest issue snapshot, in source order.
    issues: Snapshot,
    /// Table rows and cursor.
    list_view: ListView,
    /// Issue shown in the detail tab, resolved by id from the table cursor.
    selected_issue: Option<Issue>,
    /// Hand-off channel from the refresh scheduler.
    snapshots: Option<SnapshotReceiver>,
    /// Application configuration.
    config: Config,
    /// Launches issue pages.
    opener: Box<dyn UrlOpener>,
    key_bindings: KeyBindings,
    theme: Theme,
    /// Whether the application should quit.
    should_quit: bool,
}

impl App {
    /// Create an application showing `issues`.
    pub fn new(config: Config, issues: Vec<Issue>, opener: Box<dyn UrlOpener>) -> Self {
        debug!(count = issues.len(), "Creating application instance");

        let mut app = Self {
            tabs: [Tab::Issues, Tab::Details],
            active_tab: 0,
            issues: Snapshot::from(Vec::new()),
            list_view: ListView::new(),
            selected_issue: None,
            snapshots: None,
            config,
            opener,
            key_bindings: KeyBindings::new(),
            theme: Theme::default(),
            should_quit: false,
        };
        app.set_issues(issues.into());
        app
    }

    /// Build the initial state by fetching the configured query once.
    ///
    /// # Errors
    ///
    /// Returns the source's error; at startup there is no previous data to
    /// fall back on.
    pub async fn bootstrap(
        source: &dyn IssueSource,
        config: Config,
        opener: Box<dyn UrlOpener>,
    ) -> Result<Self, SourceError> {
        info!(query_id = config.query_id, "Loading initial issues");
        let issues = source.fetch_by_query(config.query_id).await?;
        Ok(Self::new(config, issues, opener))
    }

    /// Receive refreshed snapshots from `snapshots`.
    pub fn with_snapshots(mut self, snapshots: SnapshotReceiver) -> Self {
        self.snapshots = Some(snapshots);
        self
    }

    /// Returns whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The active tab.
    pub fn active_tab(&self) -> Tab {
        self.tabs[self.active_tab]
    }

    /// Update the application state based on an event.
    ///
    /// All state changes flow through this method.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Quit => self.quit(),
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Refresh => self.apply_pending_snapshot(),
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => {}
        }
    }

    fn quit(&mut self) {
        info!("Quit requested");
        self.should_quit = true;
    }

    /// Handle keyboard input events.
    fn handle_key_event(&mut self, key_event: KeyEvent) {
        let action = self.key_bindings.action(&key_event);

        match action {
            Some(Action::Quit) => return self.quit(),
            Some(Action::NextTab) => return self.next_tab(),
            Some(Action::PrevTab) => return self.prev_tab(),
            _ => {}
        }

        // The detail tab is read-only
        if self.active_tab() != Tab::Issues {
            return;
        }

        self.list_view.handle_input(key_event);
        self.resolve_selected();

        if action == Some(Action::Open) {
            self.open_selected();
        }
    }

    fn next_tab(&mut self) {
        self.active_tab = (self.active_tab + 1).min(self.tabs.len() - 1);
    }

    fn prev_tab(&mut self) {
        self.active_tab = self.active_tab.saturating_sub(1);
    }

    /// Take the scheduler's pending snapshot, if any, and show it.
    fn apply_pending_snapshot(&mut self) {
        let Some(snapshot) = self.snapshots.as_mut().and_then(SnapshotReceiver::take) else {
            trace!("Refresh without new snapshot");
            return;
        };

        debug!(count = snapshot.len(), "Applying refreshed issues");
        self.set_issues(snapshot);
    }

    /// Replace the issue snapshot.
    ///
    /// The selected issue keeps its identity: if its id is still present the
    /// cursor follows it and its content is refreshed, otherwise the old copy
    /// stays until the cursor next moves.
    fn set_issues(&mut self, issues: Snapshot) {
        self.issues = issues;
        self.list_view.set_issues(&self.issues);

        match self.selected_issue.as_ref().map(Issue::id) {
            Some(id) => {
                if let Some(fresh) = self.find_issue(id).cloned() {
                    self.list_view.select_id(id);
                    self.selected_issue = Some(fresh);
                }
            }
            None => self.resolve_selected(),
        }
    }

    /// Point `selected_issue` at the issue under the table cursor.
    fn resolve_selected(&mut self) {
        if let Some(issue) = self
            .list_view
            .selected_id()
            .and_then(|id| self.find_issue(id))
            .cloned()
        {
            self.selected_issue = Some(issue);
        }
    }

    fn find_issue(&self, id: u32) -> Option<&Issue> {
        self.issues.iter().find(|issue| issue.id() == id)
    }

    /// Open the highlighted issue in the browser.
    fn open_selected(&self) {
        if let Some(id) = self.list_view.selected_id() {
            let url = self.config.issue_url(id);
            debug!(issue_id = id, "Opening issue");
            self.opener.open(&url);
        }
    }

    /// Render the application UI.
    ///
    /// The view is a pure function of the current state.
    pub fn view(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tabs
                Constraint::Min(1),    // Content
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        let titles: Vec<&str> = self.tabs.iter().map(Tab::title).collect();
        render_tab_bar(frame, chunks[0], &titles, self.active_tab, &self.theme);
        self.render_content(frame, chunks[1]);
        render_footer(
            frame,
            chunks[2],
            self.active_tab() == Tab::Issues,
            self.issues.len(),
            &self.theme,
        );
    }

    fn render_content(&self, frame: &mut Frame, area: Rect) {
        match self.active_tab() {
            Tab::Issues => self.list_view.render(frame, area, &self.theme),
            Tab::Details => {
                DetailView::render(frame, area, self.selected_issue.as_ref(), &self.theme)
            }
        }
    }
}

#[cfg(test)]
impl App {
    /// Index of the active tab.
    pub fn active_tab_index(&self) -> usize {
        self.active_tab
    }

    /// The current issue snapshot.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// The issue shown in the detail tab.
    pub fn selected_issue(&self) -> Option<&Issue> {
        self.selected_issue.as_ref()
    }

    /// Get a reference to the list view.
    pub fn list_view(&self) -> &ListView {
        &self.list_view
    }
}
