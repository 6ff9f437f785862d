//! Feedback submission form.
//!
//! Holds the widgets behind a [`FeedbackDraft`], moves focus between them and
//! turns a submit keypress into a validated request. Sending the request is
//! left to the caller, which reports back through [`SubmitView::finish_submission`].

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tracing::debug;

use crate::api::{ApiError, Course, Faculty, NewFeedback, SubmitResponse};
use crate::feedback::{FeedbackDraft, FormStatus};
use crate::ui::components::{adjust_rating, render_rating, OptionPicker, TextInput};
use crate::ui::theme::theme;

/// Actions that can be returned from the submission view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAction {
    /// Send this validated feedback.
    Submit(NewFeedback),
    /// Leave the form without discarding it.
    Back,
}

/// The focusable parts of the form, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Anonymous,
    Name,
    Email,
    Course,
    Faculty,
    Rating,
    Comment,
    Date,
    Submit,
}

impl FormField {
    const ORDER: [FormField; 9] = [
        FormField::Anonymous,
        FormField::Name,
        FormField::Email,
        FormField::Course,
        FormField::Faculty,
        FormField::Rating,
        FormField::Comment,
        FormField::Date,
        FormField::Submit,
    ];

    /// Whether the field takes free text, so printable keys belong to it.
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            FormField::Name | FormField::Email | FormField::Comment | FormField::Date
        )
    }

    fn is_identity(&self) -> bool {
        matches!(self, FormField::Name | FormField::Email)
    }
}

/// The submission form view.
pub struct SubmitView {
    anonymous: bool,
    name: TextInput,
    email: TextInput,
    course: OptionPicker<Course>,
    faculty: OptionPicker<Faculty>,
    rating: u8,
    comment: TextInput,
    date: TextInput,
    focus: FormField,
    /// A create request is in flight.
    submitting: bool,
    status: Option<FormStatus>,
}

impl SubmitView {
    /// A blank form dated `today`.
    pub fn new(today: NaiveDate) -> Self {
        let mut view = Self {
            anonymous: false,
            name: TextInput::new(),
            email: TextInput::new(),
            course: OptionPicker::new(&Course::ALL, "Select a Course"),
            faculty: OptionPicker::new(&Faculty::ALL, "Select a Faculty Member"),
            rating: 0,
            comment: TextInput::new(),
            date: TextInput::new(),
            focus: FormField::Anonymous,
            submitting: false,
            status: None,
        };
        view.name.set_placeholder("Your name");
        view.email.set_placeholder("you@example.com");
        view.comment.set_placeholder("Any additional comments...");
        view.date.set_placeholder("YYYY-MM-DD");
        view.reset(today);
        view
    }

    /// Clear every field back to its initial value. The status message is
    /// left alone so a success message survives the reset.
    pub fn reset(&mut self, today: NaiveDate) {
        let draft = FeedbackDraft::new(today);
        self.anonymous = draft.anonymous;
        self.name.set_value(draft.name);
        self.email.set_value(draft.email);
        self.course.select(draft.course);
        self.faculty.select(draft.faculty);
        self.rating = draft.rating;
        self.comment.set_value(draft.comment);
        self.date.set_value(draft.feedback_date);
        self.focus = FormField::Anonymous;
    }

    /// The current field values.
    pub fn draft(&self) -> FeedbackDraft {
        FeedbackDraft {
            anonymous: self.anonymous,
            name: self.name.value().to_string(),
            email: self.email.value().to_string(),
            course: self.course.selected(),
            faculty: self.faculty.selected(),
            rating: self.rating,
            comment: self.comment.value().to_string(),
            feedback_date: self.date.value().to_string(),
        }
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    /// True while keystrokes are going into a text field.
    pub fn is_text_entry(&self) -> bool {
        self.focus.is_text()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn status(&self) -> Option<&FormStatus> {
        self.status.as_ref()
    }

    fn is_skipped(&self, field: FormField) -> bool {
        self.anonymous && field.is_identity()
    }

    fn step_focus(&mut self, forward: bool) {
        let len = FormField::ORDER.len();
        let mut index = FormField::ORDER
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0);
        loop {
            index = if forward {
                (index + 1) % len
            } else {
                (index + len - 1) % len
            };
            if !self.is_skipped(FormField::ORDER[index]) {
                break;
            }
        }
        self.focus = FormField::ORDER[index];
    }

    pub fn focus_next(&mut self) {
        self.step_focus(true);
    }

    pub fn focus_previous(&mut self) {
        self.step_focus(false);
    }

    pub fn toggle_anonymous(&mut self) {
        self.anonymous = !self.anonymous;
        if self.is_skipped(self.focus) {
            self.focus_next();
        }
    }

    /// Validate the form and, if it passes, mark a submission as in flight.
    ///
    /// Validation failures are shown under the form and send nothing.
    pub fn try_submit(&mut self) -> Option<SubmitAction> {
        if self.submitting {
            return None;
        }
        self.status = None;

        match self.draft().validate() {
            Ok(feedback) => {
                debug!(course = %feedback.course, faculty = %feedback.faculty, "Submitting feedback");
                self.submitting = true;
                Some(SubmitAction::Submit(feedback))
            }
            Err(error) => {
                debug!(%error, "Feedback failed validation");
                self.status = Some(error.into());
                None
            }
        }
    }

    /// Apply the outcome of a create request. On success the form is reset
    /// and true is returned.
    pub fn finish_submission(
        &mut self,
        result: &Result<SubmitResponse, ApiError>,
        today: NaiveDate,
    ) -> bool {
        self.submitting = false;
        let status = FormStatus::from_submission(result);
        let succeeded = !status.is_error();
        if succeeded {
            self.reset(today);
        }
        self.status = Some(status);
        succeeded
    }

    /// Handle keyboard input for the form.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<SubmitAction> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => return self.try_submit(),
            (KeyCode::Esc, _) => return Some(SubmitAction::Back),
            (KeyCode::Tab, _) | (KeyCode::Down, _) => {
                self.focus_next();
                return None;
            }
            (KeyCode::BackTab, _) | (KeyCode::Up, _) => {
                self.focus_previous();
                return None;
            }
            _ => {}
        }

        match self.focus {
            FormField::Anonymous => {
                if matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter) {
                    self.toggle_anonymous();
                }
            }
            FormField::Submit => {
                if matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter) {
                    return self.try_submit();
                }
            }
            field if field.is_text() && key.code == KeyCode::Enter => self.focus_next(),
            FormField::Name => {
                self.name.handle_input(key);
            }
            FormField::Email => {
                self.email.handle_input(key);
            }
            FormField::Comment => {
                self.comment.handle_input(key);
            }
            FormField::Date => {
                self.date.handle_input(key);
            }
            FormField::Course => {
                self.course.handle_input(key);
            }
            FormField::Faculty => {
                self.faculty.handle_input(key);
            }
            FormField::Rating => {
                if let Some(rating) = adjust_rating(self.rating, key) {
                    self.rating = rating;
                }
            }
        }

        // Digits rate from any field that does not take text.
        if !self.focus.is_text() && self.focus != FormField::Rating {
            if let Some(rating) = adjust_rating(self.rating, key)
                .filter(|_| matches!(key.code, KeyCode::Char('1'..='5')))
            {
                self.rating = rating;
            }
        }

        None
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let t = theme();

        let block = Block::default()
            .title(Span::styled(
                " Submit Your Feedback ",
                Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // anonymous toggle
                Constraint::Length(3), // name | email
                Constraint::Length(3), // course | faculty
                Constraint::Length(3), // rating | date
                Constraint::Length(3), // comment
                Constraint::Length(3), // submit button
                Constraint::Min(1),    // status
            ])
            .split(inner);

        self.render_anonymous(frame, rows[0]);

        let split = |area: Rect| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(area)
        };

        let identity = split(rows[1]);
        if self.anonymous {
            let note = Paragraph::new("Submitting anonymously: name and email will not be sent.")
                .style(Style::default().fg(t.muted))
                .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(t.border)));
            frame.render_widget(note, rows[1]);
        } else {
            self.name
                .render_with_label(frame, identity[0], "Your Name *", self.focus == FormField::Name);
            self.email.render_with_label(
                frame,
                identity[1],
                "Your Email *",
                self.focus == FormField::Email,
            );
        }

        let selection = split(rows[2]);
        self.course
            .render(frame, selection[0], "Course *", self.focus == FormField::Course);
        self.faculty
            .render(frame, selection[1], "Faculty *", self.focus == FormField::Faculty);

        let rating_row = split(rows[3]);
        render_rating(frame, rating_row[0], self.rating, self.focus == FormField::Rating);
        self.date.render_with_label(
            frame,
            rating_row[1],
            "Feedback Date *",
            self.focus == FormField::Date,
        );

        self.comment.render_with_label(
            frame,
            rows[4],
            "Comments (optional)",
            self.focus == FormField::Comment,
        );

        self.render_button(frame, rows[5]);
        self.render_status(frame, rows[6]);
    }

    fn render_anonymous(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let mark = if self.anonymous { "[x]" } else { "[ ]" };
        let style = if self.focus == FormField::Anonymous {
            Style::default()
                .fg(t.border_focused)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(t.fg)
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("{} Submit Anonymously", mark),
                style,
            ))),
            area,
        );
    }

    fn render_button(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let label = if self.submitting {
            "Submitting..."
        } else {
            "Submit Feedback"
        };
        let focused = self.focus == FormField::Submit;
        let style = if self.submitting {
            Style::default().fg(t.muted)
        } else if focused {
            Style::default()
                .fg(t.selection_fg)
                .bg(t.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(t.accent)
        };
        let border = if focused { t.border_focused } else { t.border };

        let width = area.width.min(label.len() as u16 + 6);
        let button_area = Rect::new(area.x, area.y, width, area.height);
        let button = Paragraph::new(label)
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(border)));
        frame.render_widget(button, button_area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let Some(status) = &self.status else {
            return;
        };
        let t = theme();
        let color = if status.is_error() { t.error } else { t.success };
        let paragraph = Paragraph::new(status.message())
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}
