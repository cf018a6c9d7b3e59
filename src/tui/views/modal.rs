// Modal overlay rendering
//
// - Help modal: keyboard shortcuts
// - Action menu: per-row actions
// - Column picker: column visibility checkboxes

use crate::catalog::ProductSource;
use crate::table::{ColumnId, RowAction};
use crate::tui::app::App;
use crate::tui::modal::Modal;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render a modal dialog as a centered overlay
pub fn render<S: ProductSource>(f: &mut Frame, modal: &Modal, app: &App<S>) {
    match modal {
        Modal::Help => render_help(f, app),
        Modal::Actions {
            product_id,
            expanded,
            cursor,
        } => render_actions(f, app, *product_id, *expanded, *cursor),
        Modal::Columns { cursor } => render_columns(f, app, *cursor),
    }
}

/// Calculate centered rect for modal dialog
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn render_box<S: ProductSource>(
    f: &mut Frame,
    app: &App<S>,
    content: Text,
    size: (u16, u16),
    title: &str,
    footer: &str,
) {
    let area = centered_rect(size.0, size.1, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(content)
        .style(Style::default().bg(app.theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.highlight))
                .border_type(app.theme.border_type)
                .title(format!(" {} ", title))
                .title_bottom(Line::from(format!(" {} ", footer)).centered()),
        );

    f.render_widget(paragraph, area);
}

/// Render the help modal overlay
fn render_help<S: ProductSource>(f: &mut Frame, app: &App<S>) {
    let key_style = Style::default().fg(app.theme.highlight);
    let desc_style = Style::default().fg(app.theme.foreground);
    let header_style = Style::default()
        .fg(app.theme.header)
        .add_modifier(Modifier::BOLD);

    // "    key         description"
    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<12}", key), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled("  Rows", header_style)),
        kb("↑/↓, j/k", "Move cursor"),
        kb("Space", "Select row"),
        kb("a", "Select / deselect page"),
        kb("x", "Clear selection"),
        kb("Enter", "Expand / collapse details"),
        kb("m, o", "Row actions"),
        kb("y", "Copy product ID"),
        Line::raw(""),
        Line::from(Span::styled("  Pages", header_style)),
        kb("n/→, p/←", "Next / previous page"),
        kb("g, G", "First / last page"),
        kb("+, -", "Page size"),
        Line::raw(""),
        Line::from(Span::styled("  Columns", header_style)),
        kb("Tab", "Next sortable column"),
        kb("s", "Cycle sort"),
        kb("c", "Show / hide columns"),
        kb("/", "Filter titles"),
        Line::raw(""),
        Line::from(Span::styled("  General", header_style)),
        kb("r", "Reload"),
        kb("R", "Load random products"),
        kb("t", "Next theme"),
        kb("?", "Toggle this help"),
        kb("q", "Quit"),
    ];

    let height = lines.len() as u16 + 2;
    render_box(
        f,
        app,
        Text::from(lines),
        (44, height),
        "Help",
        "? or Esc to close",
    );
}

fn menu_line<'a, S: ProductSource>(app: &App<S>, label: String, active: bool, dim: bool) -> Line<'a> {
    let marker = if active { "▶ " } else { "  " };
    let mut style = Style::default().fg(if dim {
        app.theme.muted
    } else {
        app.theme.foreground
    });
    if active {
        style = style
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD);
    }
    Line::from(Span::styled(format!(" {}{}", marker, label), style))
}

/// Render the per-row action menu
fn render_actions<S: ProductSource>(
    f: &mut Frame,
    app: &App<S>,
    product_id: u64,
    expanded: bool,
    cursor: usize,
) {
    let lines: Vec<Line> = RowAction::ALL
        .iter()
        .enumerate()
        .map(|(i, action)| {
            menu_line(
                app,
                action.label(expanded).to_string(),
                i == cursor,
                action.is_placeholder(),
            )
        })
        .collect();

    let height = lines.len() as u16 + 2;
    render_box(
        f,
        app,
        Text::from(lines),
        (30, height),
        &format!("Product #{}", product_id),
        "Enter: run · Esc",
    );
}

/// Render the column visibility picker
fn render_columns<S: ProductSource>(f: &mut Frame, app: &App<S>, cursor: usize) {
    let lines: Vec<Line> = ColumnId::hideable()
        .enumerate()
        .map(|(i, column)| {
            let mark = if app.table.is_hidden(column) {
                "[ ]"
            } else {
                "[x]"
            };
            menu_line(app, format!("{} {}", mark, column.header()), i == cursor, false)
        })
        .collect();

    let height = lines.len() as u16 + 2;
    render_box(
        f,
        app,
        Text::from(lines),
        (30, height),
        "Columns",
        "Space: toggle · Esc",
    );
}
