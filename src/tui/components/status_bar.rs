// Status bar component
//
// Footer: selection count, page position, page size, and the latest
// warning/error from the log buffer when there is one.

use crate::catalog::ProductSource;
use crate::logging::LogLevel;
use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the footer
///
/// Adapts to terminal width:
/// - Wide: page size, nav hints and last log problem
/// - Narrow: selection and page only
pub fn render<S: ProductSource>(f: &mut Frame, area: Rect, app: &App<S>) {
    let theme = &app.theme;
    let summary = app.table.summary(&app.products);
    let bp = Breakpoint::from_width(area.width);

    let mut spans = vec![
        Span::raw(" "),
        Span::raw(summary.selection_text()),
        Span::raw(" │ "),
        Span::raw(summary.page_text()),
    ];

    if bp.at_least(Breakpoint::Normal) {
        spans.push(Span::raw(format!(
            " │ {} rows/page",
            app.table.page_size()
        )));
        let prev = if app.table.can_previous() { "‹ p" } else { "   " };
        let next = if app.table.can_next(&app.products) {
            "n ›"
        } else {
            "   "
        };
        spans.push(Span::styled(
            format!(" │ {} {}", prev, next),
            Style::default().fg(theme.muted),
        ));
    }

    if bp.at_least(Breakpoint::Wide) {
        if let Some(entry) = app.log_buffer.latest_problem() {
            let color = match entry.level {
                LogLevel::Error => theme.error,
                _ => theme.warning,
            };
            spans.push(Span::styled(
                format!(" │ {}", entry.summary()),
                Style::default().fg(color),
            ));
        }
    }

    let status = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
