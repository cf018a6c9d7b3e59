// Filter bar component
//
// Shows the title filter. While typing, the border lights up and a cursor
// follows the text.

use crate::catalog::ProductSource;
use crate::tui::app::{App, InputMode};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the filter input line
pub fn render<S: ProductSource>(f: &mut Frame, area: Rect, app: &App<S>) {
    let theme = &app.theme;
    let editing = app.mode == InputMode::Filter;
    let filter = app.table.filter();

    let content = if editing {
        Line::from(vec![
            Span::styled(filter.to_string(), Style::default().fg(theme.foreground)),
            Span::styled("▏", Style::default().fg(theme.highlight)),
        ])
    } else if filter.is_empty() {
        Line::styled("Press / to filter titles…", Style::default().fg(theme.muted))
    } else {
        Line::styled(filter.to_string(), Style::default().fg(theme.foreground))
    };

    let border = if editing { theme.highlight } else { theme.border };
    let hint = if editing {
        " Enter: keep · Esc: clear "
    } else {
        ""
    };

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(border))
            .title(" Filter ")
            .title_bottom(Line::from(hint).right_aligned()),
    );

    f.render_widget(paragraph, area);
}
