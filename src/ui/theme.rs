//! Colors used by the table view.

use ratatui::style::Color;

/// Color theme for the artwork table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Column header foreground.
    pub header: Color,
    /// Background of the row under the cursor.
    pub cursor_bg: Color,
    /// Checkbox color for selected rows.
    pub checked: Color,
    /// Secondary text (dates, empty cells, borders).
    pub muted: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header: Color::Cyan,
            cursor_bg: Color::DarkGray,
            checked: Color::Green,
            muted: Color::Gray,
        }
    }
}
