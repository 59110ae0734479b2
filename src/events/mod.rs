//! Event handling for the application.
//!
//! Terminal input is polled by [`EventHandler`] and translated into table
//! actions by [`KeyBindings`]. Fetch results arrive separately through the
//! task channel in [`crate::tasks`].

mod handler;
mod keys;

use crossterm::event::KeyEvent;

pub use handler::EventHandler;
pub use keys::{Action, KeyBindings};

/// An event delivered to [`crate::app::App::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A key press.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// No input within the tick rate.
    Tick,
}
