//! Help screen listing every key binding.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::events::{get_keybindings_grouped, KeyContext, Keybinding};
use crate::ui::theme::theme;

/// Actions that can be returned from the help view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpAction {
    Close,
}

/// The help screen.
pub struct HelpView {
    grouped_bindings: Vec<(KeyContext, &'static [Keybinding])>,
    scroll: usize,
    total_lines: usize,
    /// Height of the content area at the last render.
    visible_height: usize,
}

impl HelpView {
    pub fn new() -> Self {
        let grouped_bindings = get_keybindings_grouped();
        // Heading and blank line per section, one line per binding, a
        // trailing blank line per section, then the closing hint.
        let total_lines = grouped_bindings
            .iter()
            .map(|(_, bindings)| bindings.len() + 3)
            .sum::<usize>()
            + 1;

        Self {
            grouped_bindings,
            scroll: 0,
            total_lines,
            visible_height: 0,
        }
    }

    pub fn reset_scroll(&mut self) {
        self.scroll = 0;
    }

    fn max_scroll(&self) -> usize {
        self.total_lines.saturating_sub(self.visible_height)
    }

    /// Handle keyboard input. Every key is consumed while help is open.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<HelpAction> {
        match key.code {
            KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc => Some(HelpAction::Close),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll = (self.scroll + 1).min(self.max_scroll());
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.scroll = 0;
                None
            }
            _ => None,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();

        let block = Block::default()
            .title(" Help - Keyboard Shortcuts ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.accent));

        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.visible_height = inner.height as usize;
        self.scroll = self.scroll.min(self.max_scroll());

        let paragraph = Paragraph::new(self.content_lines()).scroll((self.scroll as u16, 0));
        frame.render_widget(paragraph, inner);
    }

    fn content_lines(&self) -> Vec<Line<'static>> {
        let t = theme();
        let mut lines = Vec::with_capacity(self.total_lines);

        for (context, bindings) in &self.grouped_bindings {
            lines.push(Line::from(Span::styled(
                format!("── {} ──", context.display()),
                Style::default().fg(t.warning).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));

            for binding in bindings.iter() {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{:>14}", binding.key),
                        Style::default().fg(t.success).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::raw(binding.description),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            "Press ?, q, or Esc to close",
            Style::default().fg(t.muted),
        )));
        lines
    }
}

impl Default for HelpView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_line_count_matches_content() {
        let view = HelpView::new();
        assert_eq!(view.content_lines().len(), view.total_lines);
    }

    #[test]
    fn test_close_keys() {
        let mut view = HelpView::new();
        for code in [KeyCode::Char('?'), KeyCode::Char('q'), KeyCode::Esc] {
            assert_eq!(view.handle_input(key(code)), Some(HelpAction::Close));
        }
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut view = HelpView::new();
        view.visible_height = 10;
        for _ in 0..200 {
            view.handle_input(key(KeyCode::Char('j')));
        }
        assert_eq!(view.scroll, view.max_scroll());

        for _ in 0..200 {
            view.handle_input(key(KeyCode::Char('k')));
        }
        assert_eq!(view.scroll, 0);
    }

    #[test]
    fn test_reset_scroll() {
        let mut view = HelpView::new();
        view.scroll = 4;
        view.reset_scroll();
        assert_eq!(view.scroll, 0);
    }
}
