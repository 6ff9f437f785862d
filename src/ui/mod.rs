//! User interface components and views.
//!
//! Views own the state of one screen each; components are the widgets they
//! are built from.

pub mod components;
pub mod theme;
pub mod views;

pub use components::{render_context_help, LoadState};
pub use views::{
    format_timestamp, render_home, FeedbackCard, FormField, HelpAction, HelpView, ListAction,
    ListView, StatsAction, StatsView, SubmitAction, SubmitView,
};
