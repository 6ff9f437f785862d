//! Feedback domain logic shared by the views.
//!
//! Form validation and the statistics math live here so they can be tested
//! without a terminal.

pub mod form;
pub mod stats;

pub use form::{FeedbackDraft, FormStatus, ValidationError};
pub use stats::{FacultyShare, StatsSummary};
