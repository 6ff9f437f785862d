//! Contextual help bar component.
//!
//! Displays the key hints for the active screen in the footer.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::events::{get_context_hints, KeyContext};
use crate::ui::theme::theme;

/// Render the key hints for `context` on a single line.
pub fn render_context_help(frame: &mut Frame, area: Rect, context: KeyContext) {
    let line = Line::from(hint_spans(get_context_hints(context)));
    frame.render_widget(Paragraph::new(line), area);
}

/// Split hint text into spans, styling `[key]` segments apart from the
/// descriptions between them.
fn hint_spans(hints: &str) -> Vec<Span<'static>> {
    let t = theme();
    let key_style = Style::default().fg(t.accent);
    let text_style = Style::default().fg(t.muted);

    let mut spans = Vec::new();
    let mut rest = hints;

    while let Some(open) = rest.find('[') {
        let Some(close) = rest[open..].find(']').map(|i| open + i) else {
            break;
        };
        if open > 0 {
            spans.push(Span::styled(rest[..open].to_string(), text_style));
        }
        spans.push(Span::styled(rest[open..=close].to_string(), key_style));
        rest = &rest[close + 1..];
    }

    if !rest.is_empty() {
        spans.push(Span::styled(rest.to_string(), text_style));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_spans_simple() {
        let spans = hint_spans("[r] reload");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].content, "[r]");
        assert_eq!(spans[1].content, " reload");
    }

    #[test]
    fn test_hint_spans_multiple_keys() {
        let spans = hint_spans("[j/k] scroll  [r] reload  [?] help");
        assert_eq!(spans.len(), 6);
    }

    #[test]
    fn test_hint_spans_empty() {
        assert!(hint_spans("").is_empty());
    }

    #[test]
    fn test_hint_spans_unclosed_bracket() {
        let spans = hint_spans("[oops");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, "[oops");
    }
}
