//! Welcome screen shown at start-up.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

use crate::ui::theme::theme;

pub const WELCOME_TITLE: &str = "Welcome to the Student Feedback Portal!";

fn welcome_lines() -> Vec<Line<'static>> {
    let t = theme();
    vec![
        Line::from(Span::styled(
            WELCOME_TITLE,
            Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(
            "Use the navigation above to submit your feedback or see what others have shared. \
             Your input helps us improve!",
        ),
        Line::from(""),
        Line::from(
            "Feedback on courses and faculty members can be given anonymously or under your \
             name. You can also browse every submission and see overall statistics per faculty.",
        ),
        Line::from(""),
        Line::from(vec![
            Span::styled("[s]", Style::default().fg(t.accent)),
            Span::raw(" submit  "),
            Span::styled("[l]", Style::default().fg(t.accent)),
            Span::raw(" browse  "),
            Span::styled("[t]", Style::default().fg(t.accent)),
            Span::raw(" statistics  "),
            Span::styled("[?]", Style::default().fg(t.accent)),
            Span::raw(" all keys"),
        ]),
    ]
}

pub fn render_home(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme().border))
        .padding(Padding::new(2, 2, 1, 1));

    let paragraph = Paragraph::new(welcome_lines())
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
