//! Loading state and spinner components.
//!
//! `LoadState` is the lifecycle every fetched view goes through; the
//! `LoadingIndicator` animates while a view is in its loading state.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::ui::theme::theme;

/// Spinner animation frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// The state of data fetched from the API.
///
/// Each fetch replaces the state wholesale; there is no partial data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState<T> {
    /// A request is outstanding.
    #[default]
    Loading,
    /// The request succeeded.
    Loaded(T),
    /// The request failed; holds the message to show.
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// The loaded data, if any.
    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    /// The failure message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// A loading indicator with an animated spinner.
#[derive(Debug, Clone)]
pub struct LoadingIndicator {
    message: String,
    /// Current spinner frame index.
    frame: usize,
}

impl LoadingIndicator {
    /// Create a loading indicator with a custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            frame: 0,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Advance the spinner animation. Called on every tick.
    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % SPINNER_FRAMES.len();
    }

    /// Restart the animation from the first frame.
    pub fn reset(&mut self) {
        self.frame = 0;
    }

    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.frame]
    }

    /// The spinner followed by the message.
    pub fn text(&self) -> String {
        format!("{} {}", self.spinner_frame(), self.message)
    }

    /// Render the indicator centered in the given area.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(self.text())
            .style(Style::default().fg(theme().accent))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }
}

/// Render a centered status line (empty or error states).
pub fn render_status(frame: &mut Frame, area: Rect, message: &str, style: Style) {
    let paragraph = Paragraph::new(message)
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_state_accessors() {
        let loading: LoadState<Vec<u8>> = LoadState::default();
        assert!(loading.is_loading());
        assert!(loading.data().is_none());

        let loaded = LoadState::Loaded(vec![1, 2]);
        assert_eq!(loaded.data(), Some(&vec![1, 2]));
        assert!(loaded.error().is_none());

        let failed: LoadState<Vec<u8>> = LoadState::Failed("boom".to_string());
        assert_eq!(failed.error(), Some("boom"));
        assert!(!failed.is_loading());
    }

    #[test]
    fn test_spinner_wraps() {
        let mut indicator = LoadingIndicator::with_message("Loading feedback...");
        for _ in 0..SPINNER_FRAMES.len() {
            indicator.tick();
        }
        assert_eq!(indicator.spinner_frame(), SPINNER_FRAMES[0]);
    }

    #[test]
    fn test_text_includes_message() {
        let mut indicator = LoadingIndicator::with_message("Loading feedback...");
        indicator.tick();
        indicator.reset();
        assert_eq!(indicator.text(), "⠋ Loading feedback...");
        assert_eq!(indicator.message(), "Loading feedback...");
    }
}
