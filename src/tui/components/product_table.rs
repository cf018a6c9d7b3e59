// Product table component
//
// Renders the current page: header with sort arrows and the page checkbox,
// one row per product, and an extra detail row under each expanded product.

use crate::catalog::{Product, ProductSource};
use crate::table::cell::image_label;
use crate::table::{
    render_cell, CellValue, ColumnId, PageSelection, RatingTier, RowDetail, StockLevel,
};
use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState as WidgetState},
    Frame,
};

/// Columns to draw at this width
pub fn display_columns(visible: &[ColumnId], width: u16) -> Vec<ColumnId> {
    let dropped = Breakpoint::from_width(width).dropped_columns();
    visible
        .iter()
        .copied()
        .filter(|c| !dropped.contains(c))
        .collect()
}

fn width_of(column: ColumnId) -> Constraint {
    match column {
        ColumnId::Select => Constraint::Length(3),
        ColumnId::Thumbnail => Constraint::Length(16),
        ColumnId::Title => Constraint::Min(16),
        ColumnId::Description => Constraint::Length(41),
        ColumnId::Price => Constraint::Length(12),
        ColumnId::Rating => Constraint::Length(8),
        ColumnId::Brand => Constraint::Length(14),
        ColumnId::Category => Constraint::Length(16),
        ColumnId::Actions => Constraint::Length(2),
    }
}

/// Index of the cursor row among rendered rows (detail rows count too)
pub fn display_index(
    page_rows: &[&Product],
    cursor: usize,
    is_expanded: impl Fn(u64) -> bool,
) -> usize {
    page_rows
        .iter()
        .take(cursor)
        .map(|p| if is_expanded(p.id) { 2 } else { 1 })
        .sum()
}

fn checkbox(state: PageSelection) -> &'static str {
    match state {
        PageSelection::None => "[ ]",
        PageSelection::Some => "[-]",
        PageSelection::All => "[x]",
    }
}

fn header_cell<'a, S: ProductSource>(app: &App<S>, column: ColumnId) -> Cell<'a> {
    let theme = &app.theme;
    if column == ColumnId::Select {
        return Cell::from(checkbox(app.page_selection())).style(Style::default().fg(theme.checked));
    }

    let mut label = column.header().to_string();
    if let Some(sort) = app.table.sort().filter(|s| s.column == column) {
        label.push(' ');
        label.push_str(sort.direction.arrow());
    }

    let mut style = Style::default()
        .fg(theme.header)
        .add_modifier(Modifier::BOLD);
    if app.cursor_column() == Some(column) {
        style = style.add_modifier(Modifier::REVERSED);
    }

    let line = Line::from(label);
    let line = if column == ColumnId::Price {
        line.right_aligned()
    } else {
        line
    };
    Cell::from(line).style(style)
}

fn body_cell<'a>(value: CellValue, theme: &Theme) -> Cell<'a> {
    match value {
        CellValue::Checkbox(checked) => {
            let style = if checked {
                Style::default().fg(theme.checked)
            } else {
                Style::default().fg(theme.muted)
            };
            Cell::from(CellValue::Checkbox(checked).plain()).style(style)
        }
        CellValue::Image(url) => {
            Cell::from(image_label(&url).to_string()).style(Style::default().fg(theme.muted))
        }
        CellValue::Text(text) => Cell::from(text),
        CellValue::Truncated { display, .. } => Cell::from(display),
        CellValue::Currency(text) => {
            Cell::from(Line::from(text).right_aligned()).style(Style::default().fg(theme.price))
        }
        CellValue::Rating { text, tier } => match tier {
            RatingTier::Top => Cell::from(format!("★ {}", text)).style(
                Style::default()
                    .fg(theme.rating_top)
                    .add_modifier(Modifier::BOLD),
            ),
            RatingTier::Standard => Cell::from(format!("  {}", text)),
        },
        CellValue::Badge(text) if text.is_empty() => Cell::from(""),
        CellValue::Badge(text) => Cell::from(Line::from(Span::styled(
            format!(" {} ", text),
            Style::default().fg(theme.badge_fg).bg(theme.badge_bg),
        ))),
        CellValue::Actions => Cell::from("⋯").style(Style::default().fg(theme.muted)),
    }
}

/// Detail row under an expanded product
///
/// Discount and stock go under the title, image URLs under the next column.
fn detail_row<'a>(product: &Product, columns: &[ColumnId], theme: &Theme) -> Row<'a> {
    let detail = RowDetail::for_product(product);

    let stock_style = match detail.stock {
        Some((_, StockLevel::Low)) => Style::default().fg(theme.warning),
        _ => Style::default().fg(theme.detail),
    };
    let summary = Text::from(vec![
        Line::styled(detail.discount_text(), Style::default().fg(theme.detail)),
        Line::styled(detail.stock_text(), stock_style),
    ]);

    let images: Vec<Line> = if detail.images.is_empty() {
        vec![Line::styled("No images", Style::default().fg(theme.muted))]
    } else {
        detail
            .images
            .iter()
            .map(|url| Line::styled(url.clone(), Style::default().fg(theme.muted)))
            .collect()
    };
    let height = images.len().max(2) as u16;

    let title_at = columns.iter().position(|&c| c == ColumnId::Title);
    let mut images = Some(Text::from(images));
    let cells: Vec<Cell> = columns
        .iter()
        .enumerate()
        .map(|(i, _)| match title_at {
            Some(t) if i == t => Cell::from(summary.clone()),
            Some(t) if i == t + 1 => Cell::from(images.take().unwrap_or_default()),
            _ => Cell::from(""),
        })
        .collect();

    Row::new(cells).height(height)
}

/// Render the product table
pub fn render<S: ProductSource>(f: &mut Frame, area: Rect, app: &App<S>) {
    let theme = &app.theme;
    let filtered = app.table.filtered_count(&app.products);

    let mut title = format!(" Products ({}) ", filtered);
    if !app.table.filter().is_empty() {
        title = format!(" Products ({} of {}) ", filtered, app.products.len());
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(title);

    let page_rows = app.page_rows();
    if page_rows.is_empty() {
        let message = if app.loader.is_loading() && app.products.is_empty() {
            "Loading products…"
        } else {
            "No results."
        };
        let empty = Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.muted))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let columns = display_columns(&app.table.visible_columns(), area.width);

    let header = Row::new(columns.iter().map(|&c| header_cell(app, c))).bottom_margin(1);

    let mut rows: Vec<Row> = Vec::with_capacity(page_rows.len());
    for product in &page_rows {
        let selected = app.table.is_selected(product.id);
        let cells = columns
            .iter()
            .map(|&c| body_cell(render_cell(product, c, selected), theme));
        rows.push(Row::new(cells));

        if app.table.is_expanded(product.id) {
            rows.push(detail_row(product, &columns, theme));
        }
    }

    let table = Table::new(rows, columns.iter().map(|&c| width_of(c)))
        .header(header)
        .block(block)
        .column_spacing(1)
        .row_highlight_style(
            Style::default()
                .bg(theme.selection_bg)
                .fg(theme.selection_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = WidgetState::default().with_selected(Some(display_index(
        &page_rows,
        app.cursor,
        |id| app.table.is_expanded(id),
    )));
    f.render_stateful_widget(table, area, &mut state);
}
