//! Submission form state, validation, and outcome messages.
//!
//! `FeedbackDraft` is the plain data behind the submission view. It knows how
//! to validate itself into a [`NewFeedback`] request and how to reset to its
//! initial defaults; the view only deals with focus and key handling.

use chrono::NaiveDate;
use thiserror::Error;

use crate::api::types::{Course, Faculty, NewFeedback, SubmitResponse, ANONYMOUS_EMAIL, ANONYMOUS_NAME};
use crate::api::ApiError;

/// Highest selectable rating.
pub const MAX_RATING: u8 = 5;

/// Format the date field is entered and transmitted in.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Shown after a successful submission when the server sent no message.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Feedback submitted successfully!";

/// Used after a rejected submission when the server sent no message.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Something went wrong!";

/// Shown when the request never reached the server.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error or server unavailable. Please try again.";

/// Client-side validation failures, checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a rating!")]
    MissingRating,

    #[error("Name and Email are required unless submitting anonymously.")]
    MissingIdentity,

    #[error("Course and Faculty are required.")]
    MissingCourseOrFaculty,

    #[error("Please enter the feedback date as YYYY-MM-DD.")]
    InvalidDate,
}

/// The message shown under the form after a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Success(String),
    Error(String),
}

impl FormStatus {
    /// The text to display.
    pub fn message(&self) -> &str {
        match self {
            FormStatus::Success(m) | FormStatus::Error(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FormStatus::Error(_))
    }

    /// Map the result of a create request to the message the form shows.
    pub fn from_submission(result: &Result<SubmitResponse, ApiError>) -> Self {
        match result {
            Ok(response) => FormStatus::Success(
                response
                    .message
                    .clone()
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string()),
            ),
            Err(ApiError::Rejected { message, .. }) => FormStatus::Error(format!(
                "Error: {}",
                message.as_deref().unwrap_or(DEFAULT_FAILURE_MESSAGE)
            )),
            Err(_) => FormStatus::Error(NETWORK_ERROR_MESSAGE.to_string()),
        }
    }
}

impl From<ValidationError> for FormStatus {
    fn from(error: ValidationError) -> Self {
        FormStatus::Error(error.to_string())
    }
}

/// Everything the student has entered so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackDraft {
    pub anonymous: bool,
    pub name: String,
    pub email: String,
    pub course: Option<Course>,
    pub faculty: Option<Faculty>,
    /// 0 until the student picks a rating.
    pub rating: u8,
    pub comment: String,
    /// Raw text of the date field.
    pub feedback_date: String,
}

impl FeedbackDraft {
    /// A blank draft dated `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            anonymous: false,
            name: String::new(),
            email: String::new(),
            course: None,
            faculty: None,
            rating: 0,
            comment: String::new(),
            feedback_date: today.format(DATE_FORMAT).to_string(),
        }
    }

    /// Validate the draft and build the request body.
    ///
    /// Anonymous drafts carry the sentinel name and email no matter what was
    /// typed into those fields.
    pub fn validate(&self) -> Result<NewFeedback, ValidationError> {
        if !(1..=MAX_RATING).contains(&self.rating) {
            return Err(ValidationError::MissingRating);
        }

        if !self.anonymous && (self.name.trim().is_empty() || self.email.trim().is_empty()) {
            return Err(ValidationError::MissingIdentity);
        }

        let (Some(course), Some(faculty)) = (self.course, self.faculty) else {
            return Err(ValidationError::MissingCourseOrFaculty);
        };

        let feedback_date = NaiveDate::parse_from_str(self.feedback_date.trim(), DATE_FORMAT)
            .map_err(|_| ValidationError::InvalidDate)?;

        let (name, email) = if self.anonymous {
            (ANONYMOUS_NAME.to_string(), ANONYMOUS_EMAIL.to_string())
        } else {
            (self.name.trim().to_string(), self.email.trim().to_string())
        };

        Ok(NewFeedback {
            name,
            email,
            course,
            faculty,
            rating: self.rating,
            comment: self.comment.clone(),
            feedback_date,
        })
    }
}
