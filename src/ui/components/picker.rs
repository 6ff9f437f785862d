//! Inline option picker for fixed choice lists.
//!
//! Renders as a bordered field showing the current choice; Left/Right cycle
//! through the options. Starts with nothing selected, like a
//! select box with an empty first option.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme::theme;

/// A picker over a fixed list of options.
#[derive(Debug, Clone)]
pub struct OptionPicker<T: 'static> {
    options: &'static [T],
    selected: Option<usize>,
    /// Text shown while nothing is selected.
    prompt: &'static str,
}

impl<T: Copy + PartialEq + std::fmt::Display> OptionPicker<T> {
    pub fn new(options: &'static [T], prompt: &'static str) -> Self {
        Self {
            options,
            selected: None,
            prompt,
        }
    }

    /// The selected option, if any.
    pub fn selected(&self) -> Option<T> {
        self.selected.and_then(|i| self.options.get(i).copied())
    }

    /// Select `value`, or clear the selection when it is `None` or unknown.
    pub fn select(&mut self, value: Option<T>) {
        self.selected = value.and_then(|v| self.options.iter().position(|o| *o == v));
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Move to the next option, wrapping to the first.
    pub fn next(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1) % self.options.len(),
            None => 0,
        });
    }

    /// Move to the previous option, wrapping to the last.
    pub fn previous(&mut self) {
        if self.options.is_empty() {
            return;
        }
        let last = self.options.len() - 1;
        self.selected = Some(match self.selected {
            Some(0) | None => last,
            Some(i) => i - 1,
        });
    }

    /// Handle keyboard input. Returns true if the selection changed.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        let before = self.selected;
        match key.code {
            KeyCode::Right => self.next(),
            KeyCode::Left => self.previous(),
            _ => return false,
        }
        before != self.selected
    }

    /// Render the picker in a bordered block titled `label`.
    pub fn render(&self, frame: &mut Frame, area: Rect, label: &str, focused: bool) {
        let t = theme();

        let (display, style) = match self.selected() {
            Some(value) if focused => (format!("← {} →", value), Style::default().fg(t.accent)),
            Some(value) => (value.to_string(), Style::default().fg(t.input_fg)),
            None => (
                format!("← {} →", self.prompt),
                Style::default().fg(t.input_placeholder),
            ),
        };

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
            .title(Span::styled(format!(" {} ", label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        frame.render_widget(Paragraph::new(display).style(style).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Faculty;
    use crossterm::event::KeyModifiers;

    fn picker() -> OptionPicker<Faculty> {
        OptionPicker::new(&Faculty::ALL, "Select a Faculty Member")
    }

    #[test]
    fn test_starts_unselected() {
        assert!(picker().selected().is_none());
    }

    #[test]
    fn test_next_wraps() {
        let mut p = picker();
        p.next();
        assert_eq!(p.selected(), Some(Faculty::Meenakshi));
        for _ in 0..Faculty::ALL.len() {
            p.next();
        }
        assert_eq!(p.selected(), Some(Faculty::Meenakshi));
    }

    #[test]
    fn test_previous_from_empty_selects_last() {
        let mut p = picker();
        p.previous();
        assert_eq!(p.selected(), Some(Faculty::Pratieksha));
        p.previous();
        assert_eq!(p.selected(), Some(Faculty::Ashwini));
    }

    #[test]
    fn test_select_and_clear() {
        let mut p = picker();
        p.select(Some(Faculty::Karuna));
        assert_eq!(p.selected(), Some(Faculty::Karuna));
        p.clear();
        assert!(p.selected().is_none());
    }

    #[test]
    fn test_handle_input_keys() {
        let mut p = picker();
        assert!(p.handle_input(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE)));
        assert!(p.handle_input(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE)));
        assert_eq!(p.selected(), Some(Faculty::Kiranpreet));
        assert!(!p.handle_input(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE)));
    }
}
