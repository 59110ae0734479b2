//! Key binding definitions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Number of page links reachable with the digit keys.
pub const PAGE_LINK_KEYS: usize = 5;

/// A table action a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the row cursor down.
    CursorDown,
    /// Move the row cursor up.
    CursorUp,
    /// Toggle selection of the row under the cursor.
    ToggleRow,
    /// Toggle selection of every row on the page.
    ToggleAll,
    /// Open the "select first N rows" popup.
    OpenSelectCount,
    /// Go to the first page.
    FirstPage,
    /// Go to the previous page.
    PrevPage,
    /// Go to the next page.
    NextPage,
    /// Go to the last page.
    LastPage,
    /// Go to the n-th (0-based) visible page link.
    PageLink(usize),
    /// Show the help screen.
    Help,
    /// Quit the application.
    Quit,
}

/// Key binding configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    /// Whether vim-style bindings (h/j/k/l/g/G) are enabled.
    pub vim_mode: bool,
}

impl KeyBindings {
    /// Create new key bindings.
    pub fn new(vim_mode: bool) -> Self {
        Self { vim_mode }
    }

    /// Resolve a key press on the table to an action.
    pub fn resolve(&self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(Action::Quit),
                _ => None,
            };
        }

        let action = match key.code {
            KeyCode::Down => Action::CursorDown,
            KeyCode::Up => Action::CursorUp,
            KeyCode::Left | KeyCode::PageUp => Action::PrevPage,
            KeyCode::Right | KeyCode::PageDown => Action::NextPage,
            KeyCode::Home => Action::FirstPage,
            KeyCode::End => Action::LastPage,
            KeyCode::Char(' ') => Action::ToggleRow,
            KeyCode::Char('a') => Action::ToggleAll,
            KeyCode::Char('n') => Action::OpenSelectCount,
            KeyCode::Char('?') => Action::Help,
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if index >= PAGE_LINK_KEYS {
                    return None;
                }
                Action::PageLink(index)
            }
            KeyCode::Char(c) if self.vim_mode => match c {
                'j' => Action::CursorDown,
                'k' => Action::CursorUp,
                'h' => Action::PrevPage,
                'l' => Action::NextPage,
                'g' => Action::FirstPage,
                'G' => Action::LastPage,
                _ => return None,
            },
            _ => return None,
        };

        Some(action)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new(true)
    }
}
