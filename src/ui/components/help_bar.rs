//! Key hint bar.
//!
//! Renders hints like `[space] toggle  [n] select N` with the bracketed keys
//! highlighted.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Hints shown under the table.
pub const TABLE_HINTS: &str =
    "[space] toggle  [a] page  [n] select N  [←/→] page  [1-5] link  [?] help  [q] quit";

/// Hints shown on the help screen.
pub const HELP_HINTS: &str = "[Esc/q/?] close help";

/// Render a hint line into `area`.
pub fn render_key_hints(frame: &mut Frame, area: Rect, hints: &str) {
    let paragraph = Paragraph::new(Line::from(hint_spans(hints)));
    frame.render_widget(paragraph, area);
}

/// Split hint text into styled spans, highlighting `[key]` segments.
fn hint_spans(hints: &str) -> Vec<Span<'static>> {
    let key_style = Style::default().fg(Color::Cyan);
    let text_style = Style::default().fg(Color::DarkGray);

    let mut spans = Vec::new();
    let mut rest = hints;

    while let Some(open) = rest.find('[') {
        let Some(close) = rest[open..].find(']').map(|i| open + i) else {
            break;
        };
        if open > 0 {
            spans.push(Span::styled(rest[..open].to_string(), text_style));
        }
        spans.push(Span::styled(rest[open..=close].to_string(), key_style));
        rest = &rest[close + 1..];
    }

    if !rest.is_empty() {
        spans.push(Span::styled(rest.to_string(), text_style));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_spans_simple() {
        let spans = hint_spans("[j/k] move");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].content, "[j/k]");
        assert_eq!(spans[1].content, " move");
    }

    #[test]
    fn test_hint_spans_multiple_keys() {
        // [space], " toggle  ", [n], " select N  ", [?], " help"
        let spans = hint_spans("[space] toggle  [n] select N  [?] help");
        assert_eq!(spans.len(), 6);
        assert_eq!(spans[2].style.fg, Some(Color::Cyan));
    }

    #[test]
    fn test_hint_spans_empty() {
        assert!(hint_spans("").is_empty());
    }

    #[test]
    fn test_hint_spans_unclosed_bracket() {
        let spans = hint_spans("press [q");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, "press [q");
    }

    #[test]
    fn test_table_hints_parse() {
        let keys = hint_spans(TABLE_HINTS)
            .iter()
            .filter(|s| s.content.starts_with('['))
            .count();
        assert_eq!(keys, 7);
    }
}
