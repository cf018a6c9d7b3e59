// TUI application state
//
// App owns the loaded products, the table state, the loader and the overlay
// state (modal, toast, filter input). Every mutation happens on the event
// loop through the methods below; rendering only reads.

use super::clipboard;
use super::components::toast::{Toast, ToastNotifier};
use super::modal::{Modal, ModalAction};
use super::theme::Theme;
use crate::catalog::{HttpProductSource, LoadEvent, LoadKind, Loader, Product, ProductSource};
use crate::logging::LogBuffer;
use crate::notify::{Notification, Notifier};
use crate::table::{ColumnId, PageSelection, RowAction, TableState};
use std::time::Instant;

/// Clipboard writer (swapped out in tests)
pub type CopyFn = fn(&str) -> anyhow::Result<()>;

/// Where typed characters go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Keys are commands
    #[default]
    Normal,
    /// Keys edit the title filter
    Filter,
}

/// Main application state for the TUI
pub struct App<S: ProductSource = HttpProductSource> {
    /// Currently loaded rows (replaced wholesale on each successful load)
    pub products: Vec<Product>,

    /// Sort, filter, page, selection, expansion, hidden columns
    pub table: TableState,

    pub loader: Loader<S>,

    /// Highlighted row, as an index into the current page
    pub cursor: usize,

    /// Highlighted column, as an index into [`App::sort_columns`]
    pub column_cursor: usize,

    pub mode: InputMode,

    /// Active modal overlay (captures all input)
    pub modal: Option<Modal>,

    /// Active toast notification
    pub toast: Option<Toast>,

    pub theme: Theme,

    /// Captured tracing output (footer shows the latest problem)
    pub log_buffer: LogBuffer,

    pub should_quit: bool,

    /// Animation frame counter for spinners
    animation_frame: usize,

    copy: CopyFn,
}

impl<S: ProductSource> App<S> {
    pub fn new(loader: Loader<S>, page_size: usize, theme: Theme, log_buffer: LogBuffer) -> Self {
        Self {
            products: Vec::new(),
            table: TableState::new(page_size),
            loader,
            cursor: 0,
            column_cursor: 0,
            mode: InputMode::Normal,
            modal: None,
            toast: None,
            theme,
            log_buffer,
            should_quit: false,
            animation_frame: 0,
            copy: clipboard::copy_to_clipboard,
        }
    }

    /// Replace the clipboard writer
    pub fn with_copy(mut self, copy: CopyFn) -> Self {
        self.copy = copy;
        self
    }

    // ─────────────────────────────────────────────────────────────
    // Loading
    // ─────────────────────────────────────────────────────────────

    pub fn start_load(&mut self, kind: LoadKind) {
        self.loader.start(kind);
    }

    /// Apply a background load event
    pub fn on_load_event(&mut self, event: LoadEvent) {
        let mut notifier = ToastNotifier(&mut self.toast);
        if let Some(catalog) = self.loader.handle(event, &mut notifier, Instant::now()) {
            self.set_products(catalog.products);
        }
    }

    /// Install a new data set and bring the view state in line with it
    pub fn set_products(&mut self, products: Vec<Product>) {
        self.products = products;
        self.table.reconcile(&self.products);
        self.clamp_cursor();
    }

    /// Periodic housekeeping: spinner frame, progress linger, toast expiry
    pub fn tick(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
        self.loader.tick(Instant::now());
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
    }

    pub fn spinner_char(&self) -> char {
        const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];
        SPINNER[self.animation_frame % SPINNER.len()]
    }

    pub fn notify(&mut self, notification: Notification) {
        ToastNotifier(&mut self.toast).notify(notification);
    }

    // ─────────────────────────────────────────────────────────────
    // Row cursor
    // ─────────────────────────────────────────────────────────────

    /// Rows on the current page
    pub fn page_rows(&self) -> Vec<&Product> {
        self.table.visible_rows(&self.products)
    }

    /// Product under the row cursor
    pub fn current_product(&self) -> Option<&Product> {
        self.page_rows().get(self.cursor).copied()
    }

    fn current_id(&self) -> Option<u64> {
        self.current_product().map(|p| p.id)
    }

    fn clamp_cursor(&mut self) {
        let rows = self.page_rows().len();
        self.cursor = self.cursor.min(rows.saturating_sub(1));
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.page_rows().len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    // ─────────────────────────────────────────────────────────────
    // Pagination
    // ─────────────────────────────────────────────────────────────

    pub fn next_page(&mut self) {
        if self.table.next_page(&self.products) {
            self.cursor = 0;
        }
    }

    pub fn previous_page(&mut self) {
        if self.table.previous_page(&self.products) {
            self.cursor = 0;
        }
    }

    pub fn first_page(&mut self) {
        if self.table.first_page(&self.products) {
            self.cursor = 0;
        }
    }

    pub fn last_page(&mut self) {
        if self.table.last_page(&self.products) {
            self.cursor = 0;
        }
    }

    pub fn cycle_page_size(&mut self, forward: bool) {
        let size = self.table.cycle_page_size(forward, &self.products);
        self.clamp_cursor();
        tracing::debug!("Page size set to {}", size);
    }

    // ─────────────────────────────────────────────────────────────
    // Column cursor and sorting
    // ─────────────────────────────────────────────────────────────

    /// Visible columns the column cursor can land on
    pub fn sort_columns(&self) -> Vec<ColumnId> {
        self.table
            .visible_columns()
            .into_iter()
            .filter(|c| c.is_sortable())
            .collect()
    }

    /// Column under the column cursor
    pub fn cursor_column(&self) -> Option<ColumnId> {
        self.sort_columns().get(self.column_cursor).copied()
    }

    pub fn next_column(&mut self) {
        let count = self.sort_columns().len();
        if count > 0 {
            self.column_cursor = (self.column_cursor + 1) % count;
        }
    }

    pub fn previous_column(&mut self) {
        let count = self.sort_columns().len();
        if count > 0 {
            self.column_cursor = (self.column_cursor + count - 1) % count;
        }
    }

    /// Cycle the sort on the highlighted column
    pub fn sort_cursor_column(&mut self) {
        if let Some(column) = self.cursor_column() {
            let sort = self.table.toggle_sort(column);
            self.cursor = 0;
            tracing::debug!("Sort changed: {:?}", sort);
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Filter input
    // ─────────────────────────────────────────────────────────────

    pub fn begin_filter(&mut self) {
        self.mode = InputMode::Filter;
    }

    pub fn filter_push(&mut self, c: char) {
        let mut text = self.table.filter().to_string();
        text.push(c);
        self.apply_filter(text);
    }

    pub fn filter_pop(&mut self) {
        let mut text = self.table.filter().to_string();
        text.pop();
        self.apply_filter(text);
    }

    /// Leave filter mode, keeping the text or clearing it
    pub fn end_filter(&mut self, keep: bool) {
        if !keep {
            self.apply_filter(String::new());
        }
        self.mode = InputMode::Normal;
    }

    fn apply_filter(&mut self, text: String) {
        self.table.set_filter(text);
        self.cursor = 0;
    }

    // ─────────────────────────────────────────────────────────────
    // Selection, expansion, row actions
    // ─────────────────────────────────────────────────────────────

    pub fn toggle_select_current(&mut self) {
        if let Some(id) = self.current_id() {
            self.table.toggle_selected(id);
        }
    }

    /// Header checkbox: select or deselect every row on the page
    pub fn toggle_select_page(&mut self) -> PageSelection {
        let rows = self.table.visible_rows(&self.products);
        self.table.toggle_page_selection(&rows)
    }

    pub fn page_selection(&self) -> PageSelection {
        self.table.page_selection(&self.page_rows())
    }

    pub fn clear_selection(&mut self) {
        self.table.clear_selection();
    }

    pub fn toggle_expand_current(&mut self) {
        if let Some(id) = self.current_id() {
            self.table.toggle_expanded(id);
        }
    }

    /// Copy a product id to the clipboard and say how it went
    pub fn copy_id(&mut self, id: u64) {
        match (self.copy)(&id.to_string()) {
            Ok(()) => self.notify(Notification::success(format!("Copied product ID {}", id))),
            Err(e) => {
                tracing::warn!("Clipboard copy failed: {:#}", e);
                self.notify(Notification::error("Failed to copy"));
            }
        }
    }

    pub fn copy_current_id(&mut self) {
        if let Some(id) = self.current_id() {
            self.copy_id(id);
        }
    }

    pub fn run_action(&mut self, product_id: u64, action: RowAction) {
        match action {
            RowAction::CopyId => self.copy_id(product_id),
            RowAction::ToggleDetails => {
                self.table.toggle_expanded(product_id);
            }
            RowAction::ViewProduct | RowAction::EditProduct => {
                tracing::debug!("{:?} on product {} has no handler", action, product_id);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Modals and columns
    // ─────────────────────────────────────────────────────────────

    pub fn open_help(&mut self) {
        self.modal = Some(Modal::Help);
    }

    pub fn open_actions(&mut self) {
        if let Some(id) = self.current_id() {
            self.modal = Some(Modal::actions(id, self.table.is_expanded(id)));
        }
    }

    pub fn open_columns(&mut self) {
        self.modal = Some(Modal::columns());
    }

    pub fn toggle_column(&mut self, column: ColumnId) {
        self.table.toggle_column(column);
        let count = self.sort_columns().len();
        self.column_cursor = self.column_cursor.min(count.saturating_sub(1));
    }

    /// Carry out what a modal asked for
    pub fn apply_modal_action(&mut self, action: ModalAction) {
        match action {
            ModalAction::None => {}
            ModalAction::Close => self.modal = None,
            ModalAction::Run { product_id, action } => {
                self.modal = None;
                self.run_action(product_id, action);
            }
            ModalAction::ToggleColumn(column) => self.toggle_column(column),
        }
    }

    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.kind.next().theme();
    }

    /// Stop background work before the terminal is restored
    pub fn shutdown(&mut self) {
        self.loader.shutdown();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::catalog::{Catalog, FetchError, FetchRequest, LoaderOptions};
    use crate::notify::NotificationLevel;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc;

    /// Source that never gets called in these tests
    pub struct IdleSource;

    impl ProductSource for IdleSource {
        async fn fetch(&self, _request: FetchRequest) -> Result<Catalog, FetchError> {
            Err(FetchError::Network("offline".to_string()))
        }
    }

    pub fn products(count: u64) -> Vec<Product> {
        (1..=count)
            .map(|id| Product {
                id,
                title: format!("Product {:02}", id),
                price: id as f64,
                ..Product::default()
            })
            .collect()
    }

    fn copy_ok(_: &str) -> anyhow::Result<()> {
        Ok(())
    }

    fn copy_fails(_: &str) -> anyhow::Result<()> {
        anyhow::bail!("no display")
    }

    pub fn app_with(count: u64) -> App<IdleSource> {
        let (tx, _rx) = mpsc::channel(8);
        let loader = Loader::new(
            Arc::new(IdleSource),
            tx,
            LoaderOptions {
                limit: 100,
                progress_interval: Duration::from_millis(50),
            },
        );
        let mut app = App::new(loader, 10, Theme::default(), LogBuffer::new()).with_copy(copy_ok);
        app.set_products(products(count));
        app
    }

    #[test]
    fn test_cursor_stays_on_page() {
        let mut app = app_with(12);
        for _ in 0..20 {
            app.cursor_down();
        }
        assert_eq!(app.cursor, 9);

        app.next_page();
        assert_eq!(app.cursor, 0);
        app.cursor_down();
        app.cursor_down();
        assert_eq!(app.cursor, 1); // only two rows on page 2
        assert_eq!(app.current_product().map(|p| p.id), Some(12));
    }

    #[test]
    fn test_filter_typing_is_live_and_escape_clears() {
        let mut app = app_with(25);
        app.next_page();
        app.begin_filter();
        for c in "product 2".chars() {
            app.filter_push(c);
        }
        assert_eq!(app.table.page_index(), 0);
        assert_eq!(app.table.filtered_count(&app.products), 6); // 20..=25

        app.filter_pop();
        app.filter_push('1');
        assert_eq!(app.table.filtered_count(&app.products), 10); // 10..=19

        app.end_filter(false);
        assert_eq!(app.mode, InputMode::Normal);
        assert_eq!(app.table.filter(), "");
    }

    #[test]
    fn test_sort_follows_column_cursor() {
        let mut app = app_with(5);
        assert_eq!(app.cursor_column(), Some(ColumnId::Title));
        app.next_column();
        assert_eq!(app.cursor_column(), Some(ColumnId::Price));

        app.sort_cursor_column();
        app.sort_cursor_column();
        assert_eq!(app.page_rows()[0].id, 5); // price descending
    }

    #[test]
    fn test_header_checkbox_round_trip() {
        let mut app = app_with(15);
        assert_eq!(app.page_selection(), PageSelection::None);
        app.toggle_select_current();
        assert_eq!(app.page_selection(), PageSelection::Some);
        assert_eq!(app.toggle_select_page(), PageSelection::All);
        assert_eq!(app.table.selected().len(), 10);
        assert_eq!(app.toggle_select_page(), PageSelection::None);
        assert!(app.table.selected().is_empty());
    }

    #[test]
    fn test_copy_id_notifies_success_or_failure() {
        let mut app = app_with(3);
        app.copy_current_id();
        let toast = app.toast.as_ref().unwrap();
        assert_eq!(toast.notification.level, NotificationLevel::Success);
        assert_eq!(toast.notification.message, "Copied product ID 1");

        let mut app = app_with(3).with_copy(copy_fails);
        app.copy_current_id();
        let toast = app.toast.as_ref().unwrap();
        assert_eq!(toast.notification.level, NotificationLevel::Error);
        assert_eq!(toast.notification.message, "Failed to copy");
    }

    #[test]
    fn test_action_menu_toggles_details_and_placeholders_do_nothing() {
        let mut app = app_with(3);
        app.open_actions();
        assert!(matches!(app.modal, Some(Modal::Actions { product_id: 1, .. })));

        app.apply_modal_action(ModalAction::Run {
            product_id: 1,
            action: RowAction::ToggleDetails,
        });
        assert!(app.modal.is_none());
        assert!(app.table.is_expanded(1));

        app.run_action(2, RowAction::ViewProduct);
        app.run_action(2, RowAction::EditProduct);
        assert!(!app.table.is_expanded(2));
        assert!(!app.table.is_selected(2));
        assert!(app.toast.is_none());
    }

    #[test]
    fn test_hiding_columns_keeps_column_cursor_valid() {
        let mut app = app_with(3);
        for _ in 0..4 {
            app.next_column();
        }
        assert_eq!(app.cursor_column(), Some(ColumnId::Category));

        app.toggle_column(ColumnId::Category);
        app.toggle_column(ColumnId::Brand);
        assert_eq!(app.cursor_column(), Some(ColumnId::Rating));
    }

    #[test]
    fn test_failed_load_keeps_current_rows() {
        let mut app = app_with(5);
        app.table.toggle_selected(2);

        let generation = app.loader.generation();
        app.on_load_event(LoadEvent::Finished {
            generation,
            result: Err(FetchError::Status {
                status: 500,
                body: String::new(),
            }),
        });

        assert_eq!(app.products.len(), 5);
        assert!(app.table.is_selected(2));
        let toast = app.toast.as_ref().unwrap();
        assert_eq!(toast.notification.level, NotificationLevel::Error);
        assert!(toast.notification.message.contains("HTTP 500"));
    }

    #[test]
    fn test_reload_drops_vanished_rows_from_selection() {
        let mut app = app_with(12);
        app.table.toggle_selected(11);
        app.table.toggle_expanded(12);
        app.last_page();

        app.set_products(products(5));
        assert!(app.table.selected().is_empty());
        assert!(app.table.expanded().is_empty());
        assert_eq!(app.table.page_index(), 0);
    }
}
