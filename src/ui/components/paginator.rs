//! Paginator: first / previous / page links / next / last.
//!
//! Page links form a window of at most [`PAGE_LINK_SIZE`] pages around the
//! current page, shifted so it stays full near either end.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::api::PageNumber;

/// Maximum number of page links shown.
pub const PAGE_LINK_SIZE: u32 = 5;

/// Pagination state derived from the current page and total record count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    current: PageNumber,
    page_count: u32,
    total: u64,
}

impl Paginator {
    /// Build a paginator for `total` records split into pages of `page_size`.
    pub fn new(current: PageNumber, total: u64, page_size: usize) -> Self {
        Self {
            current,
            page_count: page_count(total, page_size),
            total,
        }
    }

    /// Number of pages, at least one.
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// The last page.
    pub fn last_page(&self) -> PageNumber {
        PageNumber::new(self.page_count).unwrap_or(PageNumber::FIRST)
    }

    /// Clamp a target page into `1..=page_count`.
    pub fn clamp(&self, page: PageNumber) -> PageNumber {
        page.min(self.last_page())
    }

    /// Check if the current page is the first page.
    pub fn is_first(&self) -> bool {
        self.current == PageNumber::FIRST
    }

    /// Check if the current page is at or past the last page.
    pub fn is_last(&self) -> bool {
        self.current >= self.last_page()
    }

    /// The visible page links, in ascending order.
    pub fn page_links(&self) -> Vec<PageNumber> {
        let count = self.page_count;
        let visible = PAGE_LINK_SIZE.min(count);
        let current = self.current.get().min(count) - 1;

        let mut start = current.saturating_sub(visible / 2);
        let end = (start + visible - 1).min(count - 1);
        let shortfall = visible - (end - start + 1);
        start = start.saturating_sub(shortfall);

        (start..=end).filter_map(|i| PageNumber::new(i + 1)).collect()
    }

    /// The page behind the n-th (0-based) visible link.
    pub fn link(&self, index: usize) -> Option<PageNumber> {
        self.page_links().get(index).copied()
    }

    /// Render the paginator line.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let enabled = Style::default().fg(Color::White);
        let disabled = Style::default().fg(Color::DarkGray);
        let back = if self.is_first() { disabled } else { enabled };
        let forward = if self.is_last() { disabled } else { enabled };

        let mut spans = vec![
            Span::styled(" « ", back),
            Span::styled(" ‹ ", back),
            Span::raw(" "),
        ];

        for page in self.page_links() {
            if page == self.current {
                spans.push(Span::styled(
                    format!("[{}]", page),
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ));
            } else {
                spans.push(Span::styled(format!(" {} ", page), enabled));
            }
        }

        spans.extend([
            Span::raw(" "),
            Span::styled(" › ", forward),
            Span::styled(" » ", forward),
            Span::styled(
                format!(
                    "   Page {} of {} · {} records",
                    self.current,
                    self.page_count,
                    format_count(self.total)
                ),
                disabled,
            ),
        ]);

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

/// Number of pages needed for `total` records, at least one.
pub fn page_count(total: u64, page_size: usize) -> u32 {
    let page_size = page_size.max(1) as u64;
    let pages = total.div_ceil(page_size).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Format a count with thousands separators.
fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
