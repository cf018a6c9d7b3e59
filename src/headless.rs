// Headless mode - one load, one page, printed to stdout
//
// Runs the same loader and table state as the TUI, then writes the page as
// aligned plain-text columns. Notifications go to stderr so the listing can
// be piped.

use crate::catalog::{HttpProductSource, LoadEvent, LoadKind, Loader, LoaderOptions, Product};
use crate::cli::ListArgs;
use crate::config::Config;
use crate::notify::StderrNotifier;
use crate::table::{render_cell, visible_rows, ColumnId, TableState};
use anyhow::{bail, Context, Result};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use unicode_width::UnicodeWidthStr;

/// Widest a headless column may get before its cells are truncated
const MAX_COLUMN_WIDTH: usize = 48;

/// Load the catalog and print one page
pub async fn run_list(config: &Config, args: &ListArgs) -> Result<()> {
    let source = HttpProductSource::new(config).context("Failed to build HTTP client")?;
    let (tx, mut rx) = mpsc::channel(64);
    let mut loader = Loader::new(
        Arc::new(source),
        tx,
        LoaderOptions {
            limit: config.fetch_limit,
            progress_interval: config.progress_interval(),
        },
    );
    let mut notifier = StderrNotifier;

    // Randomizing needs the catalog size, which only a first load reports
    let mut kinds = vec![LoadKind::Reload];
    if args.random {
        kinds.push(LoadKind::Randomize);
    }

    let mut products = Vec::new();
    for kind in kinds {
        loader.start(kind);
        products = loop {
            let Some(event) = rx.recv().await else {
                bail!("Load channel closed before the catalog arrived");
            };
            let finished = matches!(event, LoadEvent::Finished { .. });
            if let Some(catalog) = loader.handle(event, &mut notifier, Instant::now()) {
                break catalog.products;
            }
            if finished && !loader.is_loading() {
                bail!("Could not load products from {}", config.api_url);
            }
        };
    }
    loader.shutdown();

    let state = list_state(config, args, &products);
    print!("{}", format_page(&products, &state));
    Ok(())
}

/// Build table state from the command-line options
///
/// A page past the end clamps to the last page.
fn list_state(config: &Config, args: &ListArgs, products: &[Product]) -> TableState {
    let mut state = TableState::new(args.page_size.unwrap_or(config.page_size));
    if let Some(filter) = &args.filter {
        state.set_filter(filter.as_str());
    }
    state.set_sort(args.sort);

    let page = args.page.max(1);
    if page > 1 && !state.go_to_page(page - 1, products) {
        let pages = state.page_count(state.filtered_count(products));
        tracing::warn!(
            "Page {} is out of range ({} page(s)), showing the last page",
            page,
            pages
        );
        state.last_page(products);
    }
    state
}

/// Plain-text rendering of the current page plus the footer line
pub fn format_page(data: &[Product], state: &TableState) -> String {
    let columns: Vec<ColumnId> = state
        .visible_columns()
        .into_iter()
        .filter(|c| !matches!(c, ColumnId::Select | ColumnId::Actions))
        .collect();

    let header: Vec<String> = columns
        .iter()
        .map(|c| match state.sort() {
            Some(sort) if sort.column == *c => format!("{} {}", c.header(), sort.direction.arrow()),
            _ => c.header().to_string(),
        })
        .collect();

    let rows: Vec<Vec<String>> = visible_rows(data, state)
        .into_iter()
        .map(|p| {
            columns
                .iter()
                .map(|&c| {
                    let text = render_cell(p, c, state.is_selected(p.id)).plain();
                    crate::util::truncate_to_width(&text, MAX_COLUMN_WIDTH)
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..columns.len())
        .map(|i| {
            rows.iter()
                .map(|r| r[i].width())
                .chain(std::iter::once(header[i].width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_line(&mut out, &header, &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    if rows.is_empty() {
        out.push_str("No results.\n");
    }

    let summary = state.summary(data);
    out.push_str(&format!(
        "{} {}\n",
        summary.selection_text(),
        summary.page_text()
    ));
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{}{}", cell, " ".repeat(w.saturating_sub(cell.width()))))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{SortDirection, SortState};

    fn products() -> Vec<Product> {
        vec![
            Product {
                id: 1,
                title: "Lipstick".to_string(),
                price: 12.5,
                rating: 4.6,
                brand: "Glamour".to_string(),
                category: "beauty".to_string(),
                thumbnail: "https://cdn.test/1/thumb.png".to_string(),
                ..Product::default()
            },
            Product {
                id: 2,
                title: "Desk Lamp".to_string(),
                price: 1234.5,
                rating: 3.2,
                brand: "Brightly".to_string(),
                category: "home".to_string(),
                ..Product::default()
            },
        ]
    }

    #[test]
    fn test_format_page_prints_header_rows_and_footer() {
        let data = products();
        let mut state = TableState::new(10);
        state.set_sort(Some(SortState {
            column: ColumnId::Price,
            direction: SortDirection::Descending,
        }));

        let out = format_page(&data, &state);
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].starts_with("Image"));
        assert!(lines[0].contains("Price ↓"));
        assert!(lines[1].contains("Desk Lamp"));
        assert!(lines[1].contains("$1,234.50"));
        assert!(lines[2].contains("Lipstick"));
        assert!(lines[2].contains("thumb.png"));
        assert_eq!(lines[3], "0 of 2 row(s) selected. Page 1 of 1");
    }

    #[test]
    fn test_format_page_with_no_matches() {
        let data = products();
        let mut state = TableState::new(10);
        state.set_filter("nothing like this");

        let out = format_page(&data, &state);
        assert!(out.contains("No results."));
        assert!(out.ends_with("0 of 0 row(s) selected. Page 0 of 0\n"));
    }

    #[test]
    fn test_list_state_clamps_out_of_range_page() {
        let data = products();
        let config = Config::default();
        let args = ListArgs {
            page: 3,
            page_size: Some(1),
            ..ListArgs::default()
        };
        let state = list_state(&config, &args, &data);
        assert_eq!(state.page_index(), 1);
        assert_eq!(state.summary(&data).page_text(), "Page 2 of 2");

        let args = ListArgs {
            page: 1,
            filter: Some("lamp".to_string()),
            ..ListArgs::default()
        };
        let state = list_state(&config, &args, &data);
        assert_eq!(state.filtered_count(&data), 1);
    }
}
