//! Loading indicator shown while the active page is being fetched.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

/// Spinner animation frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// A message with an animated spinner, advanced on every tick.
#[derive(Debug, Clone)]
pub struct LoadingIndicator {
    /// The message to display.
    message: String,
    /// Current spinner frame index.
    frame: usize,
    /// Whether the indicator is active.
    active: bool,
}

impl Default for LoadingIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingIndicator {
    /// Create an inactive loading indicator.
    pub fn new() -> Self {
        Self {
            message: "Loading...".to_string(),
            frame: 0,
            active: false,
        }
    }

    /// Get the current message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Start the indicator with a message.
    pub fn start_with_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.active = true;
        self.frame = 0;
    }

    /// Stop the indicator.
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Check if the indicator is active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance the spinner animation.
    pub fn tick(&mut self) {
        if self.active {
            self.frame = (self.frame + 1) % SPINNER_FRAMES.len();
        }
    }

    /// Get the current spinner frame.
    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.frame]
    }

    /// Get the spinner and message, or an empty string when inactive.
    pub fn text(&self) -> String {
        if self.active {
            format!("{} {}", self.spinner_frame(), self.message)
        } else {
            String::new()
        }
    }

    /// Render the indicator centered in the given area.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.active {
            return;
        }

        let paragraph = Paragraph::new(self.text())
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, area);
    }
}
