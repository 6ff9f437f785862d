//! Feedback listing view: every stored submission as a grid of cards.

use chrono::{DateTime, Local, TimeZone};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tracing::warn;

use crate::api::{ApiError, FeedbackRecord};
use crate::ui::components::{render_status, star_scale, LoadState, LoadingIndicator};
use crate::ui::theme::theme;

pub const LIST_TITLE: &str = "All Student Feedback";
pub const LIST_EMPTY_MESSAGE: &str = "No feedback submitted yet. Be the first!";
pub const LIST_FAILED_MESSAGE: &str = "Failed to load feedback. Please try again.";
pub const NO_COMMENT: &str = "No comment provided.";

/// Narrowest a card may be before the grid drops a column.
const CARD_MIN_WIDTH: u16 = 36;
const CARD_HEIGHT: u16 = 9;

/// Display form of one feedback record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackCard {
    pub title: String,
    pub course: String,
    pub faculty: String,
    pub rating: String,
    pub comment: String,
    pub submitted: String,
}

impl FeedbackCard {
    pub fn from_record(record: &FeedbackRecord) -> Self {
        Self::from_record_in(record, &Local)
    }

    /// Build the card with the timestamp shown in `tz`.
    pub fn from_record_in<Tz: TimeZone>(record: &FeedbackRecord, tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let comment = match record.comment.as_deref() {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => NO_COMMENT.to_string(),
        };

        Self {
            title: record.name.clone(),
            course: record.course.clone(),
            faculty: record.faculty.clone(),
            rating: format!("{} ({}/5)", star_scale(record.rating), record.rating),
            comment,
            submitted: format_timestamp_in(record.created_at.as_deref(), tz),
        }
    }

    fn lines(&self) -> Vec<Line<'_>> {
        let t = theme();
        let label = Style::default().fg(t.muted);
        vec![
            Line::from(vec![Span::styled("Course: ", label), Span::raw(&self.course)]),
            Line::from(vec![Span::styled("Faculty: ", label), Span::raw(&self.faculty)]),
            Line::from(vec![
                Span::styled("Rating: ", label),
                Span::styled(&self.rating, Style::default().fg(t.star)),
            ]),
            Line::from(vec![Span::styled("Comment: ", label), Span::raw(&self.comment)]),
            Line::from(Span::styled(&self.submitted, label)),
        ]
    }
}

/// Format an RFC 3339 timestamp in local time as `M/D/YYYY, h:mm:ss AM`.
///
/// Absent timestamps format as an empty string and unparseable ones are
/// returned unchanged.
pub fn format_timestamp(raw: Option<&str>) -> String {
    format_timestamp_in(raw, &Local)
}

fn format_timestamp_in<Tz: TimeZone>(raw: Option<&str>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return String::new();
    };
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => parsed
            .with_timezone(tz)
            .format("%-m/%-d/%Y, %-I:%M:%S %p")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Actions that can be returned from the listing view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    Reload,
}

/// The listing view.
pub struct ListView {
    state: LoadState<Vec<FeedbackCard>>,
    loader: LoadingIndicator,
    /// First visible grid row.
    scroll: usize,
    /// Grid geometry from the last render.
    columns: usize,
    visible_rows: usize,
}

impl ListView {
    pub fn new() -> Self {
        Self {
            state: LoadState::Loading,
            loader: LoadingIndicator::with_message("Loading feedback..."),
            scroll: 0,
            columns: 1,
            visible_rows: 1,
        }
    }

    pub fn state(&self) -> &LoadState<Vec<FeedbackCard>> {
        &self.state
    }

    /// Enter the loading state ahead of a fetch.
    pub fn begin_loading(&mut self) {
        self.state = LoadState::Loading;
        self.loader.reset();
        self.scroll = 0;
    }

    /// Replace the view's contents with the outcome of a fetch.
    pub fn apply_result(&mut self, result: Result<Vec<FeedbackRecord>, ApiError>) {
        self.state = match result {
            Ok(records) => LoadState::Loaded(records.iter().map(FeedbackCard::from_record).collect()),
            Err(error) => {
                warn!(%error, transport = error.is_transport(), "Failed to load feedback");
                LoadState::Failed(LIST_FAILED_MESSAGE.to_string())
            }
        };
        self.scroll = 0;
    }

    pub fn tick(&mut self) {
        if self.state.is_loading() {
            self.loader.tick();
        }
    }

    fn total_rows(&self) -> usize {
        let count = self.state.data().map_or(0, Vec::len);
        count.div_ceil(self.columns.max(1))
    }

    fn max_scroll(&self) -> usize {
        self.total_rows().saturating_sub(self.visible_rows)
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<ListAction> {
        match key.code {
            KeyCode::Char('r') => return Some(ListAction::Reload),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll = (self.scroll + 1).min(self.max_scroll());
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
            }
            KeyCode::Char('g') | KeyCode::Home => self.scroll = 0,
            _ => {}
        }
        None
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();

        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", LIST_TITLE),
                Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.state.data().is_some_and(|cards| !cards.is_empty()) {
            self.render_grid(frame, inner);
            return;
        }

        match &self.state {
            LoadState::Loading => self.loader.render(frame, inner),
            LoadState::Failed(message) => {
                render_status(frame, inner, message, Style::default().fg(t.error))
            }
            LoadState::Loaded(_) => render_status(
                frame,
                inner,
                LIST_EMPTY_MESSAGE,
                Style::default().fg(t.muted),
            ),
        }
    }

    fn render_grid(&mut self, frame: &mut Frame, area: Rect) {
        self.columns = (area.width / CARD_MIN_WIDTH).max(1) as usize;
        self.visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
        self.scroll = self.scroll.min(self.max_scroll());

        let Some(cards) = self.state.data() else {
            return;
        };

        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(CARD_HEIGHT); self.visible_rows])
            .split(area);

        let t = theme();
        for (row_area, row) in row_areas
            .iter()
            .zip(cards.chunks(self.columns).skip(self.scroll))
        {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, self.columns as u32); self.columns])
                .split(*row_area);

            for (cell, card) in cells.iter().zip(row) {
                let block = Block::default()
                    .title(Span::styled(
                        format!(" {} ", card.title),
                        Style::default().fg(t.fg).add_modifier(Modifier::BOLD),
                    ))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(t.border));
                let paragraph = Paragraph::new(card.lines())
                    .block(block)
                    .wrap(Wrap { trim: true });
                frame.render_widget(paragraph, *cell);
            }
        }
    }
}

impl Default for ListView {
    fn default() -> Self {
        Self::new()
    }
}
