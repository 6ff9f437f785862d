//! Main application state and event loop.
//!
//! This module implements The Elm Architecture (TEA) pattern: events flow
//! through [`App::update`], API results through [`App::handle_api_message`],
//! and [`App::view`] draws the current state. Network work is never started
//! here; it is queued as [`PendingRequest`]s for the main loop to spawn.

use chrono::{Datelike, Local, NaiveDate, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::{debug, info, trace};

use crate::events::{Event, KeyContext};
use crate::tasks::{ApiMessage, PendingRequest};
use crate::ui::theme::theme;
use crate::ui::{
    render_context_help, render_home, HelpAction, HelpView, ListAction, ListView, StatsAction,
    StatsView, SubmitAction, SubmitView,
};

pub const APP_TITLE: &str = "Student Feedback Manager";

/// The current view/screen state of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Welcome screen.
    #[default]
    Home,
    Submit,
    List,
    Stats,
    Help,
    /// Application is in the process of exiting.
    Exiting,
}

impl AppState {
    fn key_context(self) -> KeyContext {
        match self {
            AppState::Home | AppState::Exiting => KeyContext::Home,
            AppState::Submit => KeyContext::Submit,
            AppState::List => KeyContext::List,
            AppState::Stats => KeyContext::Stats,
            AppState::Help => KeyContext::Help,
        }
    }
}

/// Navigation bar entries: key, label, target.
const NAV_ITEMS: [(&str, &str, AppState); 3] = [
    ("s", "Submit Feedback", AppState::Submit),
    ("l", "View Feedback", AppState::List),
    ("t", "Feedback Stats", AppState::Stats),
];

/// Today's date as the feedback form defaults it.
fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// The main application struct that holds all state.
pub struct App {
    state: AppState,
    /// Where closing the help screen returns to.
    previous_state: AppState,
    should_quit: bool,
    /// Bumped after every successful submission.
    refresh: u64,
    /// Refresh value of the last listing and statistics fetches.
    list_fetched_at: Option<u64>,
    stats_fetched_at: Option<u64>,
    submit_view: SubmitView,
    list_view: ListView,
    stats_view: StatsView,
    help_view: HelpView,
    /// Requests queued for the main loop to spawn.
    pending: Vec<PendingRequest>,
}

impl App {
    pub fn new() -> Self {
        debug!("Creating new application instance");
        Self {
            state: AppState::Home,
            previous_state: AppState::Home,
            should_quit: false,
            refresh: 0,
            list_fetched_at: None,
            stats_fetched_at: None,
            submit_view: SubmitView::new(today()),
            list_view: ListView::new(),
            stats_view: StatsView::new(),
            help_view: HelpView::new(),
            pending: Vec::new(),
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Number of successful submissions this session.
    pub fn refresh_counter(&self) -> u64 {
        self.refresh
    }

    pub fn submit_view(&self) -> &SubmitView {
        &self.submit_view
    }

    pub fn list_view(&self) -> &ListView {
        &self.list_view
    }

    pub fn stats_view(&self) -> &StatsView {
        &self.stats_view
    }

    /// Drain the requests queued since the last call.
    pub fn take_pending_requests(&mut self) -> Vec<PendingRequest> {
        std::mem::take(&mut self.pending)
    }

    fn quit(&mut self) {
        info!("Quit requested");
        self.should_quit = true;
        self.state = AppState::Exiting;
    }

    /// Switch screens. Entering the listing or statistics screen always
    /// starts a fresh fetch.
    pub fn navigate(&mut self, target: AppState) {
        if self.state == target {
            return;
        }
        debug!(from = ?self.state, to = ?target, "Navigating");

        match target {
            AppState::Help => {
                self.previous_state = self.state;
                self.help_view.reset_scroll();
            }
            AppState::List | AppState::Stats => self.request_fetch(target),
            _ => {}
        }
        self.state = target;
    }

    fn request_fetch(&mut self, target: AppState) {
        let refresh = self.refresh;
        match target {
            AppState::List => {
                self.list_view.begin_loading();
                self.list_fetched_at = Some(refresh);
                self.pending.push(PendingRequest::FetchFeedback { refresh });
            }
            AppState::Stats => {
                self.stats_view.begin_loading();
                self.stats_fetched_at = Some(refresh);
                self.pending.push(PendingRequest::FetchStats { refresh });
            }
            _ => {}
        }
    }

    /// Refetch `target` if its data predates the current refresh value.
    fn refetch_if_stale(&mut self, target: AppState) {
        let fetched_at = match target {
            AppState::List => self.list_fetched_at,
            AppState::Stats => self.stats_fetched_at,
            _ => return,
        };
        if fetched_at != Some(self.refresh) {
            debug!(view = ?target, ?fetched_at, refresh = self.refresh, "Data is stale");
            self.request_fetch(target);
        }
    }

    /// Record a successful submission and refetch the screen on display, if
    /// it shows server data. Under the help screen the refetch waits until
    /// help is closed.
    fn bump_refresh(&mut self) {
        self.refresh += 1;
        info!(refresh = self.refresh, "Refresh counter incremented");
        if matches!(self.state, AppState::List | AppState::Stats) {
            self.request_fetch(self.state);
        }
    }

    fn close_help(&mut self) {
        self.state = self.previous_state;
        self.refetch_if_stale(self.state);
    }

    /// Update the application state based on an event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => {
                self.list_view.tick();
                self.stats_view.tick();
            }
        }
    }

    /// Apply the result of a background request.
    pub fn handle_api_message(&mut self, message: ApiMessage) {
        match message {
            ApiMessage::FeedbackSubmitted(result) => {
                if self.submit_view.finish_submission(&result, today()) {
                    info!("Feedback submitted");
                    self.bump_refresh();
                }
            }
            ApiMessage::FeedbackFetched { refresh, result } => {
                debug!(refresh, ok = result.is_ok(), "Feedback list fetched");
                self.list_view.apply_result(result);
            }
            ApiMessage::StatsFetched { refresh, result } => {
                debug!(refresh, ok = result.is_ok(), "Faculty stats fetched");
                self.stats_view.apply_result(result);
            }
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            self.quit();
            return;
        }

        match self.state {
            AppState::Help => {
                if let Some(HelpAction::Close) = self.help_view.handle_input(key) {
                    self.close_help();
                }
                return;
            }
            AppState::Exiting => return,
            AppState::Submit if self.submit_view.is_text_entry() => {
                self.handle_submit_key(key);
                return;
            }
            _ => {}
        }

        if key.modifiers == KeyModifiers::NONE || key.modifiers == KeyModifiers::SHIFT {
            let target = match key.code {
                KeyCode::Char('q') => {
                    self.quit();
                    return;
                }
                KeyCode::Char('?') => Some(AppState::Help),
                KeyCode::Char('h') => Some(AppState::Home),
                KeyCode::Char('s') => Some(AppState::Submit),
                KeyCode::Char('l') => Some(AppState::List),
                KeyCode::Char('t') => Some(AppState::Stats),
                _ => None,
            };
            if let Some(target) = target {
                self.navigate(target);
                return;
            }
        }

        match self.state {
            AppState::Submit => self.handle_submit_key(key),
            AppState::List => {
                if let Some(ListAction::Reload) = self.list_view.handle_input(key) {
                    info!("Reloading feedback list");
                    self.request_fetch(AppState::List);
                }
            }
            AppState::Stats => {
                if let Some(StatsAction::Reload) = self.stats_view.handle_input(key) {
                    info!("Reloading faculty stats");
                    self.request_fetch(AppState::Stats);
                }
            }
            AppState::Home | AppState::Help | AppState::Exiting => {}
        }
    }

    fn handle_submit_key(&mut self, key: KeyEvent) {
        match self.submit_view.handle_input(key) {
            Some(SubmitAction::Submit(feedback)) => {
                self.pending.push(PendingRequest::Submit(feedback));
            }
            Some(SubmitAction::Back) => self.navigate(AppState::Home),
            None => {}
        }
    }

    /// Render the application UI.
    pub fn view(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(1),    // Content
                Constraint::Length(2), // Footer
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0]);
        self.render_content(frame, chunks[1]);
        self.render_footer(frame, chunks[2]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let t = theme();

        let mut nav = Vec::with_capacity(NAV_ITEMS.len() * 2);
        for (key, label, target) in NAV_ITEMS {
            let style = if self.state == target {
                Style::default()
                    .fg(t.selection_fg)
                    .bg(t.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(t.fg)
            };
            nav.push(Span::styled(format!(" [{}] {} ", key, label), style));
            nav.push(Span::raw("  "));
        }

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                APP_TITLE,
                Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(nav),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(t.border)),
        );
        frame.render_widget(header, area);
    }

    fn render_content(&mut self, frame: &mut Frame, area: Rect) {
        match self.state {
            AppState::Home | AppState::Exiting => render_home(frame, area),
            AppState::Submit => self.submit_view.render(frame, area),
            AppState::List => self.list_view.render(frame, area),
            AppState::Stats => self.stats_view.render(frame, area),
            AppState::Help => self.help_view.render(frame, area),
        }
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        render_context_help(frame, rows[0], self.state.key_context());

        let copyright = Paragraph::new(copyright_notice(Local::now().year()))
            .style(Style::default().fg(theme().muted))
            .alignment(Alignment::Center);
        frame.render_widget(copyright, rows[1]);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// The footer notice for `year`.
pub fn copyright_notice(year: i32) -> String {
    format!("© {} Student Feedback App. All rights reserved.", year)
}
