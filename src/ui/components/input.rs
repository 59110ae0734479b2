//! Numeric input field.
//!
//! A single-line input that only accepts ASCII digits, used to enter the row
//! count for "select first N". Supports cursor movement (left/right,
//! home/end), deletion, and Ctrl+U to clear.

use std::num::NonZeroUsize;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Longest accepted input; keeps the parsed value well inside `usize`.
const MAX_DIGITS: usize = 9;

/// A digits-only input widget.
#[derive(Debug, Clone, Default)]
pub struct NumberInput {
    /// The current input value.
    value: String,
    /// Cursor position within the value.
    cursor: usize,
    /// Placeholder text shown when empty.
    placeholder: String,
}

impl NumberInput {
    /// Create a new empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder text.
    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    /// Get the current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Clear the input.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Check if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Get the cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Parse the value as a positive count.
    ///
    /// Returns `None` for an empty input or zero.
    pub fn parse_count(&self) -> Option<NonZeroUsize> {
        self.value.parse::<usize>().ok().and_then(NonZeroUsize::new)
    }

    /// Handle keyboard input.
    ///
    /// Returns true if the value was modified.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                if c.is_ascii_digit() && self.value.len() < MAX_DIGITS {
                    self.value.insert(self.cursor, c);
                    self.cursor += 1;
                    true
                } else {
                    false
                }
            }
            (KeyCode::Backspace, _) => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.value.remove(self.cursor);
                    true
                } else {
                    false
                }
            }
            (KeyCode::Delete, _) => {
                if self.cursor < self.value.len() {
                    self.value.remove(self.cursor);
                    true
                } else {
                    false
                }
            }
            (KeyCode::Left, _) => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            (KeyCode::Right, _) => {
                self.cursor = (self.cursor + 1).min(self.value.len());
                false
            }
            (KeyCode::Home, _) => {
                self.cursor = 0;
                false
            }
            (KeyCode::End, _) => {
                self.cursor = self.value.len();
                false
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                let modified = !self.value.is_empty();
                self.clear();
                modified
            }
            _ => false,
        }
    }

    /// Render the input field with a border and place the terminal cursor.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let (display, style) = if self.value.is_empty() {
            (
                self.placeholder.as_str(),
                Style::default().fg(Color::DarkGray),
            )
        } else {
            (self.value.as_str(), Style::default().fg(Color::Yellow))
        };

        let input = Paragraph::new(display).style(style).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        frame.render_widget(input, area);

        let cursor_x = area.x + 1 + self.cursor as u16;
        if cursor_x < area.x + area.width.saturating_sub(1) {
            frame.set_cursor_position(Position::new(cursor_x, area.y + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(input: &mut NumberInput, s: &str) {
        for c in s.chars() {
            input.handle_input(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_accepts_only_digits() {
        let mut input = NumberInput::new();
        type_str(&mut input, "1a2-b3");
        assert_eq!(input.value(), "123");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_parse_count() {
        let mut input = NumberInput::new();
        assert_eq!(input.parse_count(), None);

        type_str(&mut input, "0");
        assert_eq!(input.parse_count(), None);

        input.clear();
        type_str(&mut input, "015");
        assert_eq!(input.parse_count(), NonZeroUsize::new(15));
    }

    #[test]
    fn test_max_digits() {
        let mut input = NumberInput::new();
        type_str(&mut input, "12345678901234");
        assert_eq!(input.value().len(), MAX_DIGITS);
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut input = NumberInput::new();
        type_str(&mut input, "123");

        assert!(input.handle_input(key(KeyCode::Backspace)));
        assert_eq!(input.value(), "12");

        input.handle_input(key(KeyCode::Home));
        assert!(input.handle_input(key(KeyCode::Delete)));
        assert_eq!(input.value(), "2");

        input.handle_input(key(KeyCode::Home));
        assert!(!input.handle_input(key(KeyCode::Backspace)));
    }

    #[test]
    fn test_insert_in_middle() {
        let mut input = NumberInput::new();
        type_str(&mut input, "13");
        input.handle_input(key(KeyCode::Left));
        type_str(&mut input, "2");
        assert_eq!(input.value(), "123");
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut input = NumberInput::new();
        type_str(&mut input, "42");
        assert!(input.handle_input(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)));
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }
}
