//! Statistics view: submissions per faculty as a pie chart with a legend.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tracing::warn;

use crate::api::{ApiError, FacultyCount};
use crate::feedback::StatsSummary;
use crate::ui::components::{render_pie, render_status, LoadState, LoadingIndicator};
use crate::ui::theme::{palette_color, theme};

pub const STATS_TITLE: &str = "Feedback Distribution by Faculty";
pub const STATS_EMPTY_MESSAGE: &str = "No faculty feedback data to display statistics yet.";
pub const STATS_FAILED_MESSAGE: &str =
    "Failed to load faculty feedback statistics. Please try again.";

/// Below this width the legend goes under the chart instead of beside it.
const SIDE_BY_SIDE_MIN_WIDTH: u16 = 70;

/// Actions that can be returned from the statistics view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsAction {
    Reload,
}

/// The statistics view.
pub struct StatsView {
    state: LoadState<StatsSummary>,
    loader: LoadingIndicator,
}

impl StatsView {
    pub fn new() -> Self {
        Self {
            state: LoadState::Loading,
            loader: LoadingIndicator::with_message("Loading statistics..."),
        }
    }

    pub fn state(&self) -> &LoadState<StatsSummary> {
        &self.state
    }

    pub fn begin_loading(&mut self) {
        self.state = LoadState::Loading;
        self.loader.reset();
    }

    /// Replace the view's contents with the outcome of a fetch.
    pub fn apply_result(&mut self, result: Result<Vec<FacultyCount>, ApiError>) {
        self.state = match result {
            Ok(counts) => LoadState::Loaded(StatsSummary::from_counts(counts)),
            Err(error) => {
                warn!(
                    %error,
                    transport = error.is_transport(),
                    "Failed to load faculty statistics"
                );
                LoadState::Failed(STATS_FAILED_MESSAGE.to_string())
            }
        };
    }

    pub fn tick(&mut self) {
        if self.state.is_loading() {
            self.loader.tick();
        }
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<StatsAction> {
        match key.code {
            KeyCode::Char('r') => Some(StatsAction::Reload),
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let t = theme();

        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", STATS_TITLE),
                Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match &self.state {
            LoadState::Loading => self.loader.render(frame, inner),
            LoadState::Failed(message) => {
                render_status(frame, inner, message, Style::default().fg(t.error))
            }
            LoadState::Loaded(summary) if summary.is_empty() => render_status(
                frame,
                inner,
                STATS_EMPTY_MESSAGE,
                Style::default().fg(t.muted),
            ),
            LoadState::Loaded(summary) => render_summary(frame, inner, summary),
        }
    }
}

impl Default for StatsView {
    fn default() -> Self {
        Self::new()
    }
}

/// `Total Feedback Submissions: N`.
pub fn total_line(summary: &StatsSummary) -> String {
    format!("Total Feedback Submissions: {}", summary.total())
}

fn render_summary(frame: &mut Frame, area: Rect, summary: &StatsSummary) {
    let t = theme();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(4)])
        .split(area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            total_line(summary),
            Style::default().fg(t.fg).add_modifier(Modifier::BOLD),
        )),
        rows[0],
    );

    let body = if rows[1].width >= SIDE_BY_SIDE_MIN_WIDTH {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(rows[1])
    } else {
        let legend_height = summary.shares().len() as u16 + 2;
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(legend_height)])
            .split(rows[1])
    };

    let values: Vec<u64> = summary.shares().iter().map(|s| s.value).collect();
    render_pie(frame, body[0], &values, Block::default());

    let legend: Vec<Line> = summary
        .summary_lines()
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(palette_color(i))),
                Span::raw(line),
            ])
        })
        .collect();

    let legend_block = Block::default()
        .title(" Summary ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(t.border));
    frame.render_widget(
        Paragraph::new(legend)
            .block(legend_block)
            .wrap(Wrap { trim: true }),
        body[1],
    );
}
