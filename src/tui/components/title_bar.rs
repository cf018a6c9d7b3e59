// Title bar component
//
// Renders the app name, a loading spinner and the loaded row count.

use crate::catalog::ProductSource;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the title bar at the top of the screen
pub fn render<S: ProductSource>(f: &mut Frame, area: Rect, app: &App<S>) {
    let status = if app.loader.is_loading() {
        format!(" {} loading", app.spinner_char())
    } else {
        format!(" ── {} loaded", app.products.len())
    };

    let title = Paragraph::new(format!(" 🛍  shopview{}", status))
        .style(
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.title))
                .title_top(Line::from(format!(" {} · ? ", app.theme.kind.name())).right_aligned()),
        );

    f.render_widget(title, area);
}
