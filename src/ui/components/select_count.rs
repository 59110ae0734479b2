//! "Select first N rows" popup.
//!
//! A small form with one numeric input. Enter submits, Esc cancels. The
//! input is cleared every time the popup opens, so a previous count is never
//! carried over.

use std::num::NonZeroUsize;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::input::NumberInput;

/// Action returned from the popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectCountAction {
    /// The user submitted a positive count.
    Submit(NonZeroUsize),
    /// The user submitted an empty or zero count.
    Invalid,
    /// The user closed the popup.
    Cancel,
}

/// The popup for entering a row count.
#[derive(Debug, Default)]
pub struct SelectCountPopup {
    input: NumberInput,
    visible: bool,
}

impl SelectCountPopup {
    /// Create a hidden popup.
    pub fn new() -> Self {
        let mut input = NumberInput::new();
        input.set_placeholder("Number of rows...");
        Self {
            input,
            visible: false,
        }
    }

    /// Show the popup with an empty input.
    pub fn show(&mut self) {
        self.input.clear();
        self.visible = true;
    }

    /// Hide the popup and forget the entered count.
    pub fn hide(&mut self) {
        self.input.clear();
        self.visible = false;
    }

    /// Check if the popup is visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Get the current input text.
    pub fn value(&self) -> &str {
        self.input.value()
    }

    /// Handle keyboard input while visible.
    ///
    /// A valid submit or a cancel hides the popup; an invalid submit leaves
    /// it open.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<SelectCountAction> {
        match key.code {
            KeyCode::Esc => {
                self.hide();
                Some(SelectCountAction::Cancel)
            }
            KeyCode::Enter => match self.input.parse_count() {
                Some(count) => {
                    self.hide();
                    Some(SelectCountAction::Submit(count))
                }
                None => Some(SelectCountAction::Invalid),
            },
            _ => {
                self.input.handle_input(key);
                None
            }
        }
    }

    /// Render the popup centered in `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let dialog_area = centered_rect(area, 36, 7);
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(Span::styled(
                " Select rows ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(1)])
            .split(inner);

        self.input.render(frame, chunks[0]);

        let hint = Paragraph::new("[Enter] submit  [Esc] cancel")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hint, chunks[1]);
    }
}

/// A rectangle of the given size centered in `area`, clipped to it.
pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
