//! Feedback API client and types.
//!
//! This module provides the interface for communicating with the remote
//! feedback service.

mod client;
pub mod error;
pub mod types;

pub use client::FeedbackClient;
pub use error::ApiError;
pub use types::{Course, Faculty, FacultyCount, FeedbackRecord, NewFeedback, SubmitResponse};
