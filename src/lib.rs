//! Student Feedback Manager
//!
//! A terminal front-end for a student feedback service: submit feedback on a
//! course and faculty member, browse every submission, and see how feedback
//! is distributed across faculty.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod feedback;
pub mod logging;
pub mod tasks;
pub mod ui;
