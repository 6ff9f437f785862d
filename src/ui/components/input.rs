//! Single-line text input component.
//!
//! Supports character insertion and deletion, cursor movement, and the usual
//! readline shortcuts (Ctrl+A, Ctrl+E, Ctrl+U, Ctrl+W). The cursor is tracked
//! in characters so multi-byte input (names, comments) edits correctly.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme::theme;

/// A text input widget.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    /// The current input value.
    value: String,
    /// Cursor position, in characters.
    cursor: usize,
    /// Placeholder text shown when empty.
    placeholder: String,
}

impl TextInput {
    /// Create a new empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new input with an initial value.
    pub fn with_value(value: impl Into<String>) -> Self {
        let mut input = Self::new();
        input.set_value(value);
        input
    }

    /// Set the placeholder text.
    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Set the value and move cursor to end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Byte offset of the character at `char_idx`.
    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Handle keyboard input.
    ///
    /// Returns true if the value was modified.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.cursor = 0;
                false
            }
            (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.cursor = self.char_len();
                false
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                if self.value.is_empty() {
                    return false;
                }
                self.clear();
                true
            }
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => self.delete_word_before_cursor(),
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                let at = self.byte_index(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                true
            }
            (KeyCode::Backspace, _) => {
                if self.cursor == 0 {
                    return false;
                }
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                true
            }
            (KeyCode::Delete, _) => {
                if self.cursor >= self.char_len() {
                    return false;
                }
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                true
            }
            (KeyCode::Left, _) => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            (KeyCode::Right, _) => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                false
            }
            (KeyCode::Home, _) => {
                self.cursor = 0;
                false
            }
            (KeyCode::End, _) => {
                self.cursor = self.char_len();
                false
            }
            _ => false,
        }
    }

    /// Delete back to the start of the previous word.
    fn delete_word_before_cursor(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let chars: Vec<char> = self.value.chars().collect();
        let mut start = self.cursor;
        while start > 0 && !chars[start - 1].is_alphanumeric() {
            start -= 1;
        }
        while start > 0 && chars[start - 1].is_alphanumeric() {
            start -= 1;
        }
        let (from, to) = (self.byte_index(start), self.byte_index(self.cursor));
        self.value.replace_range(from..to, "");
        self.cursor = start;
        true
    }

    /// Render the input in a bordered block titled `label`.
    pub fn render_with_label(&self, frame: &mut Frame, area: Rect, label: &str, focused: bool) {
        let t = theme();
        let showing_placeholder = self.value.is_empty() && !self.placeholder.is_empty();

        let display = if showing_placeholder {
            self.placeholder.as_str()
        } else {
            self.value.as_str()
        };

        let style = if showing_placeholder {
            Style::default().fg(t.input_placeholder)
        } else if focused {
            Style::default().fg(t.border_focused)
        } else {
            Style::default().fg(t.input_fg)
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

        // Keep the cursor visible by scrolling long values horizontally.
        let inner_width = area.width.saturating_sub(2) as usize;
        let scroll = if inner_width > 0 && self.cursor >= inner_width {
            self.cursor + 1 - inner_width
        } else {
            0
        };

        let input = Paragraph::new(display)
            .style(style)
            .block(block)
            .scroll((0, scroll as u16));
        frame.render_widget(input, area);

        if focused && area.width > 2 && area.height > 2 {
            let cursor_x = area.x + 1 + (self.cursor - scroll) as u16;
            frame.set_cursor_position(Position::new(cursor_x, area.y + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_new_input() {
        let input = TextInput::new();
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_with_value_puts_cursor_at_end() {
        let input = TextInput::with_value("hello");
        assert_eq!(input.value(), "hello");
        assert_eq!(input.cursor(), 5);
    }

    #[test]
    fn test_character_input() {
        let mut input = TextInput::new();
        assert!(input.handle_input(key(KeyCode::Char('a'))));
        assert!(input.handle_input(KeyEvent::new(KeyCode::Char('B'), KeyModifiers::SHIFT)));
        assert_eq!(input.value(), "aB");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = TextInput::with_value("Ré");
        input.handle_input(key(KeyCode::Char('n')));
        input.handle_input(key(KeyCode::Left));
        input.handle_input(key(KeyCode::Backspace));
        assert_eq!(input.value(), "Rn");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn test_backspace_at_start() {
        let mut input = TextInput::with_value("abc");
        input.handle_input(key(KeyCode::Home));
        assert!(!input.handle_input(key(KeyCode::Backspace)));
        assert_eq!(input.value(), "abc");
    }

    #[test]
    fn test_delete() {
        let mut input = TextInput::with_value("abc");
        input.handle_input(key(KeyCode::Home));
        assert!(input.handle_input(key(KeyCode::Delete)));
        assert_eq!(input.value(), "bc");
        assert!(!TextInput::with_value("x").handle_input(key(KeyCode::Delete)));
    }

    #[test]
    fn test_cursor_bounds() {
        let mut input = TextInput::with_value("ab");
        input.handle_input(key(KeyCode::Right));
        assert_eq!(input.cursor(), 2);
        input.handle_input(key(KeyCode::Left));
        input.handle_input(key(KeyCode::Left));
        input.handle_input(key(KeyCode::Left));
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_insert_in_middle() {
        let mut input = TextInput::with_value("ac");
        input.handle_input(key(KeyCode::Left));
        input.handle_input(key(KeyCode::Char('b')));
        assert_eq!(input.value(), "abc");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_ctrl_shortcuts() {
        let mut input = TextInput::with_value("hello world");
        assert!(input.handle_input(ctrl('w')));
        assert_eq!(input.value(), "hello ");

        input.handle_input(ctrl('a'));
        assert_eq!(input.cursor(), 0);
        input.handle_input(ctrl('e'));
        assert_eq!(input.cursor(), 6);

        assert!(input.handle_input(ctrl('u')));
        assert!(input.is_empty());
        assert!(!input.handle_input(ctrl('u')));
    }

    #[test]
    fn test_ctrl_w_skips_trailing_separators() {
        let mut input = TextInput::with_value("great course!  ");
        input.handle_input(ctrl('w'));
        assert_eq!(input.value(), "great ");
    }
}
