//! Event handling for the application.
//!
//! Terminal input is polled by [`EventHandler`] and turned into [`Event`]s
//! that the app consumes in its update step.

mod handler;
mod keys;

pub use handler::EventHandler;
pub use keys::{get_context_hints, get_keybindings_grouped, KeyContext, Keybinding};

use crossterm::event::KeyEvent;

/// An application-level event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// The tick interval elapsed without input.
    Tick,
}
