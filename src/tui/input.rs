// Keyboard dispatch
//
// Layered: Modal → Filter input → Global → Table.
// The first layer that claims a key stops the dispatch.

use super::app::{App, InputMode};
use crate::catalog::{LoadKind, ProductSource};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Handle one key event
pub fn handle_key_event<S: ProductSource>(app: &mut App<S>, key_event: KeyEvent) {
    // Some terminals report release/repeat; only presses act
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    // Ctrl+C quits from anywhere
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        app.should_quit = true;
        return;
    }

    if handle_modal_input(app, key_event.code) {
        return;
    }
    if handle_filter_input(app, key_event.code) {
        return;
    }
    if handle_global_keys(app, key_event.code) {
        return;
    }
    handle_table_keys(app, key_event.code);
}

/// Modal captures all input when active
fn handle_modal_input<S: ProductSource>(app: &mut App<S>, key: KeyCode) -> bool {
    let Some(modal) = app.modal.as_mut() else {
        return false;
    };
    let action = modal.handle_input(key);
    app.apply_modal_action(action);
    true
}

/// Filter mode captures printable keys
fn handle_filter_input<S: ProductSource>(app: &mut App<S>, key: KeyCode) -> bool {
    if app.mode != InputMode::Filter {
        return false;
    }
    match key {
        KeyCode::Enter => app.end_filter(true),
        KeyCode::Esc => app.end_filter(false),
        KeyCode::Backspace => app.filter_pop(),
        KeyCode::Char(c) => app.filter_push(c),
        // Navigation still works while typing
        KeyCode::Up => app.cursor_up(),
        KeyCode::Down => app.cursor_down(),
        _ => {}
    }
    true
}

/// Keys that work the same everywhere outside modals
fn handle_global_keys<S: ProductSource>(app: &mut App<S>, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.open_help(),
        KeyCode::Char('r') => app.start_load(LoadKind::Reload),
        KeyCode::Char('R') => app.start_load(LoadKind::Randomize),
        KeyCode::Char('t') => app.cycle_theme(),
        _ => return false,
    }
    true
}

fn handle_table_keys<S: ProductSource>(app: &mut App<S>, key: KeyCode) {
    match key {
        // Rows
        KeyCode::Up | KeyCode::Char('k') => app.cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => app.cursor_down(),

        // Pages
        KeyCode::Right | KeyCode::Char('n') | KeyCode::PageDown => app.next_page(),
        KeyCode::Left | KeyCode::Char('p') | KeyCode::PageUp => app.previous_page(),
        KeyCode::Home | KeyCode::Char('g') => app.first_page(),
        KeyCode::End | KeyCode::Char('G') => app.last_page(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.cycle_page_size(true),
        KeyCode::Char('-') => app.cycle_page_size(false),

        // Columns and sorting
        KeyCode::Tab => app.next_column(),
        KeyCode::BackTab => app.previous_column(),
        KeyCode::Char('s') => app.sort_cursor_column(),
        KeyCode::Char('c') => app.open_columns(),

        // Filter
        KeyCode::Char('/') => app.begin_filter(),
        KeyCode::Esc if !app.table.filter().is_empty() => app.end_filter(false),

        // Selection and rows
        KeyCode::Char(' ') => app.toggle_select_current(),
        KeyCode::Char('a') => {
            app.toggle_select_page();
        }
        KeyCode::Char('x') => app.clear_selection(),
        KeyCode::Enter => app.toggle_expand_current(),
        KeyCode::Char('m') | KeyCode::Char('o') => app.open_actions(),
        KeyCode::Char('y') => app.copy_current_id(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ColumnId;
    use crate::tui::app::tests::app_with;
    use crate::tui::modal::Modal;

    fn press<S: ProductSource>(app: &mut App<S>, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str<S: ProductSource>(app: &mut App<S>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_filter_mode_swallows_command_keys() {
        let mut app = app_with(25);
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "q");
        assert!(!app.should_quit);
        assert_eq!(app.table.filter(), "q");

        press(&mut app, KeyCode::Backspace);
        type_str(&mut app, "product 1");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, InputMode::Normal);
        assert_eq!(app.table.filter(), "product 1");

        // Esc outside filter mode clears a leftover filter
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.table.filter(), "");
    }

    #[test]
    fn test_modal_captures_input() {
        let mut app = app_with(5);
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.modal, Some(Modal::Help));

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.table.page_index(), 0);

        press(&mut app, KeyCode::Esc);
        assert!(app.modal.is_none());
    }

    #[test]
    fn test_column_picker_hides_columns() {
        let mut app = app_with(5);
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Enter); // first hideable column
        press(&mut app, KeyCode::Esc);

        let first = ColumnId::hideable().next().unwrap();
        assert!(app.table.is_hidden(first));
    }

    #[test]
    fn test_table_keys_page_select_and_expand() {
        let mut app = app_with(25);
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.table.page_index(), 2);
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.table.page_index(), 1);

        press(&mut app, KeyCode::Char(' '));
        assert!(app.table.is_selected(11));
        press(&mut app, KeyCode::Enter);
        assert!(app.table.is_expanded(11));

        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.table.page_size(), 20);
        assert_eq!(app.table.page_index(), 0); // row 11 is on the first 20-row page
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut app = app_with(5);
        let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        handle_key_event(&mut app, release);
        assert!(!app.should_quit);

        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }
}
