//! Help screen listing the table key bindings.
//!
//! Opened with '?' and closed with '?', 'q', or Escape. The vim-style rows
//! are only listed when vim mode is enabled.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::events::KeyBindings;

/// Actions that can be returned from the help view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpAction {
    /// Close the help screen.
    Close,
}

/// A titled group of `(keys, description)` rows.
type Section = (&'static str, Vec<(&'static str, &'static str)>);

/// The help screen.
#[derive(Debug)]
pub struct HelpView {
    sections: Vec<Section>,
    scroll: usize,
    visible_height: usize,
}

impl HelpView {
    /// Create a help view for the given bindings.
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            sections: sections(bindings),
            scroll: 0,
            visible_height: 0,
        }
    }

    /// Reset scroll position to top.
    pub fn reset_scroll(&mut self) {
        self.scroll = 0;
    }

    fn total_lines(&self) -> usize {
        // header + blank + rows + blank per section, then the footer
        self.sections
            .iter()
            .map(|(_, rows)| rows.len() + 3)
            .sum::<usize>()
            + 1
    }

    fn max_scroll(&self) -> usize {
        self.total_lines().saturating_sub(self.visible_height)
    }

    /// Handle keyboard input while help is open.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<HelpAction> {
        match key.code {
            KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc => Some(HelpAction::Close),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll = (self.scroll + 1).min(self.max_scroll());
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            _ => None,
        }
    }

    /// Render the help screen into `area`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Help - Keyboard Shortcuts ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.visible_height = inner.height as usize;
        self.scroll = self.scroll.min(self.max_scroll());

        let paragraph = Paragraph::new(self.lines()).scroll((self.scroll as u16, 0));
        frame.render_widget(paragraph, inner);
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::with_capacity(self.total_lines());

        for (title, rows) in &self.sections {
            lines.push(Line::from(Span::styled(
                format!("── {} ──", title),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::default());
            for (keys, description) in rows {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{:>14}", keys),
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::raw(*description),
                ]));
            }
            lines.push(Line::default());
        }

        lines.push(Line::from(Span::styled(
            "Press ?, q, or Esc to close",
            Style::default().fg(Color::DarkGray),
        )));
        lines
    }
}

fn sections(bindings: KeyBindings) -> Vec<Section> {
    let mut movement = vec![("↓ / ↑", "Move cursor")];
    let mut paging = vec![
        ("← / PgUp", "Previous page"),
        ("→ / PgDn", "Next page"),
        ("Home", "First page"),
        ("End", "Last page"),
        ("1-5", "Jump to page link"),
    ];
    if bindings.vim_mode {
        movement.push(("j / k", "Move cursor"));
        paging.extend([("h / l", "Previous / next page"), ("g / G", "First / last page")]);
    }

    vec![
        ("Rows", movement),
        (
            "Selection",
            vec![
                ("Space", "Toggle row"),
                ("a", "Toggle all rows on page"),
                ("n", "Select first N rows"),
            ],
        ),
        ("Pages", paging),
        (
            "General",
            vec![("?", "Show this help"), ("q / Ctrl+C", "Quit")],
        ),
    ]
}
