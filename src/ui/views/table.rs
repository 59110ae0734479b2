//! Artwork table view.
//!
//! Renders the current page buffer with a checkbox column and tracks the row
//! cursor. The view holds no selection state of its own; checkboxes are drawn
//! from the selection passed in at render time.

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::api::Artwork;
use crate::ui::theme::Theme;

/// Column headers after the checkbox column.
const COLUMNS: [&str; 6] = [
    "Title",
    "Place of Origin",
    "Artist",
    "Inscriptions",
    "Date Start",
    "Date End",
];

/// State of the header checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderCheck {
    /// No buffered row is selected.
    None,
    /// Some buffered rows are selected.
    Partial,
    /// Every buffered row is selected.
    All,
}

impl HeaderCheck {
    /// Derive the header state for a buffer and the page's selection.
    pub fn for_rows(rows: &[Artwork], selected: &[Artwork]) -> Self {
        let checked = rows
            .iter()
            .filter(|row| selected.iter().any(|s| s.id == row.id))
            .count();
        match checked {
            0 => HeaderCheck::None,
            n if n == rows.len() => HeaderCheck::All,
            _ => HeaderCheck::Partial,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            HeaderCheck::None => "[ ]",
            HeaderCheck::Partial => "[-]",
            HeaderCheck::All => "[x]",
        }
    }
}

/// The artwork table.
#[derive(Debug, Default)]
pub struct ArtworkTableView {
    /// Index of the row under the cursor.
    cursor: usize,
    /// ratatui table state, kept in sync with `cursor`.
    table_state: TableState,
    theme: Theme,
}

impl ArtworkTableView {
    /// Create a new table view with the cursor on the first row.
    pub fn new() -> Self {
        Self {
            cursor: 0,
            table_state: TableState::default().with_selected(Some(0)),
            theme: Theme::default(),
        }
    }

    /// Get the cursor row index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor down, stopping at the last of `len` rows.
    pub fn move_down(&mut self, len: usize) {
        if len > 0 && self.cursor + 1 < len {
            self.cursor += 1;
            self.table_state.select(Some(self.cursor));
        }
    }

    /// Move the cursor up.
    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        self.table_state.select(Some(self.cursor));
    }

    /// Put the cursor back on the first row.
    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
        self.table_state.select(Some(0));
    }

    /// Pull the cursor back inside a buffer of `len` rows.
    pub fn clamp_cursor(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
        self.table_state.select(Some(self.cursor));
    }

    /// Render the page buffer with checkboxes for `selected`.
    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        rows: &[Artwork],
        selected: &[Artwork],
        title: &str,
    ) {
        let block = Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.muted));

        if rows.is_empty() {
            let empty = Paragraph::new(Line::styled(
                "No artworks on this page",
                Style::default().fg(self.theme.muted),
            ))
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let header_style = Style::default()
            .fg(self.theme.header)
            .add_modifier(Modifier::BOLD);
        let header = Row::new(
            std::iter::once(HeaderCheck::for_rows(rows, selected).symbol())
                .chain(COLUMNS)
                .map(|h| Cell::from(h).style(header_style)),
        );

        let body = rows.iter().map(|artwork| {
            let checked = selected.iter().any(|s| s.id == artwork.id);
            self.row(artwork, checked)
        });

        let widths = [
            Constraint::Length(3),
            Constraint::Percentage(26),
            Constraint::Percentage(14),
            Constraint::Percentage(22),
            Constraint::Percentage(20),
            Constraint::Length(10),
            Constraint::Length(8),
        ];

        let table = Table::new(body, widths)
            .header(header)
            .block(block)
            .column_spacing(1)
            .highlight_style(Style::default().bg(self.theme.cursor_bg));

        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn row<'a>(&self, artwork: &'a Artwork, checked: bool) -> Row<'a> {
        let check = if checked {
            Cell::from("[x]").style(Style::default().fg(self.theme.checked))
        } else {
            Cell::from("[ ]")
        };
        let year = |y: Option<i32>| y.map(|y| y.to_string()).unwrap_or_default();
        let muted = Style::default().fg(self.theme.muted);

        Row::new(vec![
            check,
            Cell::from(artwork.title_display()),
            Cell::from(artwork.origin_display()),
            Cell::from(artwork.artist_line()),
            Cell::from(artwork.inscriptions_line()),
            Cell::from(year(artwork.date_start)).style(muted),
            Cell::from(year(artwork.date_end)).style(muted),
        ])
    }
}
