// Views module - screen-level rendering logic
//
// One screen: title, progress, filter, table, footer. Modals and toasts are
// drawn on top.

mod modal;

use super::app::App;
use crate::catalog::ProductSource;
use crate::tui::components;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

/// Main UI render function - called on every frame
pub fn draw<S: ProductSource>(f: &mut Frame, app: &App<S>) {
    let bg_block = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg_block, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(1), // Progress
            Constraint::Length(3), // Filter
            Constraint::Min(5),    // Table
            Constraint::Length(2), // Footer
        ])
        .split(f.area());

    components::title_bar::render(f, chunks[0], app);
    components::progress_bar::render(f, chunks[1], app);
    components::filter_bar::render(f, chunks[2], app);
    components::product_table::render(f, chunks[3], app);
    components::status_bar::render(f, chunks[4], app);

    if let Some(ref modal_state) = app.modal {
        modal::render(f, modal_state, app);
    }

    // Toast goes on top of modals too
    if let Some(ref toast) = app.toast {
        toast.render(f, f.area(), &app.theme);
    }
}
