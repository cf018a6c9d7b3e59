// Progress bar component
//
// Gauge for the cosmetic load progress. Blank when nothing is loading.

use crate::catalog::ProductSource;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Gauge, Paragraph},
    Frame,
};

/// Render the load progress gauge
pub fn render<S: ProductSource>(f: &mut Frame, area: Rect, app: &App<S>) {
    let Some(percent) = app.loader.progress() else {
        f.render_widget(Paragraph::new(""), area);
        return;
    };

    let label = if percent >= 100 {
        "Loaded".to_string()
    } else {
        format!("Loading products… {}%", percent)
    };

    // Gauge swaps fg/bg in the filled portion of the label
    let gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(app.theme.progress)
                .bg(app.theme.background)
                .add_modifier(Modifier::BOLD),
        )
        .percent(u16::from(percent.min(100)))
        .label(label);

    f.render_widget(gauge, area);
}
