//! Reusable UI components.

mod help_bar;
mod input;
mod loading;
mod picker;
mod pie_chart;
mod rating;

pub use help_bar::render_context_help;
pub use input::TextInput;
pub use loading::{render_status, LoadState, LoadingIndicator};
pub use picker::OptionPicker;
pub use pie_chart::render_pie;
pub use rating::{adjust_rating, render_rating, star_scale};
