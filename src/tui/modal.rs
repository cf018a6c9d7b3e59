// Modal system for TUI overlays
//
// Self-contained modal dialogs that handle their own input and return actions.
// App just holds Option<Modal>, input routing acts on returned ModalAction.

use crate::table::{ColumnId, RowAction};
use crossterm::event::KeyCode;

/// Actions returned by modal input handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    /// Input consumed, no state change needed
    None,
    /// Close the modal
    Close,
    /// Run a row action, then close
    Run { product_id: u64, action: RowAction },
    /// Show/hide a column (modal stays open)
    ToggleColumn(ColumnId),
}

/// Available modal types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Help overlay - shows keyboard shortcuts
    Help,
    /// Per-row action menu
    Actions {
        product_id: u64,
        /// Drives the expand/collapse label
        expanded: bool,
        cursor: usize,
    },
    /// Column visibility picker
    Columns { cursor: usize },
}

impl Modal {
    pub fn actions(product_id: u64, expanded: bool) -> Self {
        Modal::Actions {
            product_id,
            expanded,
            cursor: 0,
        }
    }

    pub fn columns() -> Self {
        Modal::Columns { cursor: 0 }
    }

    /// Handle keyboard input, return action for caller to execute
    pub fn handle_input(&mut self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::Actions {
                product_id, cursor, ..
            } => match key {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('m') => ModalAction::Close,
                KeyCode::Up | KeyCode::Char('k') => {
                    *cursor = step(*cursor, RowAction::ALL.len(), false);
                    ModalAction::None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    *cursor = step(*cursor, RowAction::ALL.len(), true);
                    ModalAction::None
                }
                KeyCode::Enter => ModalAction::Run {
                    product_id: *product_id,
                    action: RowAction::ALL[*cursor],
                },
                _ => ModalAction::None,
            },
            Modal::Columns { cursor } => {
                let columns: Vec<ColumnId> = ColumnId::hideable().collect();
                match key {
                    KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('c') => ModalAction::Close,
                    KeyCode::Up | KeyCode::Char('k') => {
                        *cursor = step(*cursor, columns.len(), false);
                        ModalAction::None
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        *cursor = step(*cursor, columns.len(), true);
                        ModalAction::None
                    }
                    KeyCode::Enter | KeyCode::Char(' ') => match columns.get(*cursor) {
                        Some(&column) => ModalAction::ToggleColumn(column),
                        None => ModalAction::None,
                    },
                    _ => ModalAction::None,
                }
            }
        }
    }
}

/// Move a wrapping cursor one step
fn step(cursor: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (cursor + 1) % len
    } else {
        (cursor + len - 1) % len
    }
}
