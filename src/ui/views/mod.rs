//! Application views (screens).

mod help;
mod home;
mod list;
mod stats;
mod submit;

pub use help::{HelpAction, HelpView};
pub use home::render_home;
pub use list::{format_timestamp, FeedbackCard, ListAction, ListView};
pub use stats::{StatsAction, StatsView};
pub use submit::{FormField, SubmitAction, SubmitView};
