//! Terminal input polling for the main loop.
//!
//! The main loop calls [`EventHandler::next`] once per iteration. When no
//! input arrives within the tick rate a [`Event::Tick`] is produced, which
//! drives the spinner and toast expiry and bounds how long a finished fetch
//! waits in the task channel before the loop drains it.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEventKind};

use super::Event;

/// Poll timeout in milliseconds.
const TICK_RATE_MS: u64 = 100;

/// Polls crossterm for terminal events.
#[derive(Debug)]
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a handler that ticks every 100 ms.
    pub fn new() -> Self {
        Self {
            tick_rate: Duration::from_millis(TICK_RATE_MS),
        }
    }

    /// Wait for the next event, or a tick when the terminal is idle.
    ///
    /// Input the table has no use for (mouse, focus, paste, key release)
    /// also comes back as a tick so the loop still redraws and drains fetches.
    pub fn next(&self) -> std::io::Result<Event> {
        if !event::poll(self.tick_rate)? {
            return Ok(Event::Tick);
        }
        Ok(translate(event::read()?).unwrap_or(Event::Tick))
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a crossterm event onto the events `App::update` handles.
///
/// Only key presses count; some terminals also report releases and repeats.
fn translate(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Resize(width, height) => Some(Event::Resize(width, height)),
        _ => None,
    }
}
