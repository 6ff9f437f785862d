//! Five-star rating display and input.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::feedback::form::MAX_RATING;
use crate::ui::theme::theme;

const FILLED_STAR: char = '★';
const EMPTY_STAR: char = '☆';

/// A five-unit star scale for `rating`; values above five fill every star.
pub fn star_scale(rating: u8) -> String {
    (1..=MAX_RATING)
        .map(|star| if star <= rating { FILLED_STAR } else { EMPTY_STAR })
        .collect()
}

/// Apply a key to a rating. Returns the new rating if the key changed it.
///
/// Digits 1–5 set the rating directly; Left/Right step it within 1..=5.
pub fn adjust_rating(rating: u8, key: KeyEvent) -> Option<u8> {
    let next = match key.code {
        KeyCode::Char(c @ '1'..='5') => c as u8 - b'0',
        KeyCode::Right | KeyCode::Char('+') => (rating + 1).min(MAX_RATING),
        KeyCode::Left | KeyCode::Char('-') => rating.saturating_sub(1).max(1),
        _ => return None,
    };
    (next != rating).then_some(next)
}

/// Render the rating field.
pub fn render_rating(frame: &mut Frame, area: Rect, rating: u8, focused: bool) {
    let t = theme();

    let mut spans = vec![Span::styled(
        star_scale(rating),
        Style::default().fg(t.star),
    )];
    if rating == 0 {
        spans.push(Span::styled(
            "  press 1-5 to rate",
            Style::default().fg(t.input_placeholder),
        ));
    } else {
        spans.push(Span::styled(
            format!("  ({}/{})", rating, MAX_RATING),
            Style::default().fg(t.input_fg),
        ));
    }

    let (border_style, title_style) = if focused {
        (
            Style::default().fg(t.border_focused),
            Style::default()
                .fg(t.border_focused)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (Style::default().fg(t.border), Style::default().fg(t.fg))
    };

    let block = Block::default()
        .title(Span::styled(" Overall Rating * ", title_style))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
