//! Browser TUI state management.

use crossterm::event::{KeyCode, KeyModifiers};
use moviefind_search::{MovieRecord, SearchView};
use ratatui::widgets::TableState;

/// Result of handling one key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Nothing for the caller to do.
    None,
    /// The search text changed and must be forwarded to the session.
    QueryChanged,
    /// Leave the browser.
    Quit,
}

/// State for the browser TUI.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct BrowserState {
    /// Search text as typed.
    pub input: String,
    /// Latest projection of the search state.
    pub view: SearchView,
    /// Table state for the result list (handles selection and scroll).
    pub table_state: TableState,
}

impl BrowserState {
    /// Creates a state showing `view` with an empty search box.
    #[must_use]
    pub fn new(view: SearchView) -> Self {
        let mut state = Self::default();
        state.set_view(view);
        state
    }

    /// Replaces the displayed view and keeps the cursor within the list.
    pub fn set_view(&mut self, view: SearchView) {
        let len = view.movies.len();
        self.view = view;
        let selected = match (len, self.table_state.selected()) {
            (0, _) => None,
            (_, None) => Some(0),
            (n, Some(i)) => Some(i.min(n.saturating_sub(1))),
        };
        self.table_state.select(selected);
    }

    /// Returns the cursor position.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    /// Returns the record under the cursor (if any).
    #[must_use]
    pub fn current_movie(&self) -> Option<&MovieRecord> {
        self.table_state
            .selected()
            .and_then(|i| self.view.movies.get(i))
    }

    /// Moves cursor up.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn move_up(&mut self) {
        let current = self.cursor();
        if current > 0 {
            self.table_state.select(Some(current - 1));
        }
    }

    /// Moves cursor down.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn move_down(&mut self) {
        let current = self.cursor();
        if current + 1 < self.view.movies.len() {
            self.table_state.select(Some(current + 1));
        }
    }

    /// Applies one key press.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> KeyAction {
        match key {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
            KeyCode::Esc => {
                if self.input.is_empty() {
                    return KeyAction::None;
                }
                self.input.clear();
                KeyAction::QueryChanged
            }
            KeyCode::Backspace => {
                if self.input.pop().is_some() {
                    KeyAction::QueryChanged
                } else {
                    KeyAction::None
                }
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                KeyAction::QueryChanged
            }
            KeyCode::Up => {
                self.move_up();
                KeyAction::None
            }
            KeyCode::Down => {
                self.move_down();
                KeyAction::None
            }
            _ => KeyAction::None,
        }
    }
}
