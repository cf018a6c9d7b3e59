//! Client-side table state
//!
//! Holds sort, filter, pagination, selection, expansion and column
//! visibility. The visible rows are a pure derivation of the loaded data and
//! this state: filter, then stable sort, then slice. Nothing here mutates the
//! product records themselves.
//!
//! # Invariants
//!
//! - When rows exist, `page_index * page_size <= filtered_count - 1`;
//!   otherwise `page_index == 0`.
//! - `selected` and `expanded` only hold ids present in the data set
//!   (restored by [`TableState::reconcile`] after every data replacement).
//! - `page_size > 0`.

use super::column::ColumnId;
use crate::catalog::Product;
use std::collections::BTreeSet;

/// Page sizes offered by the page-size selector
pub const PAGE_SIZE_OPTIONS: [usize; 5] = [10, 20, 30, 40, 50];

/// Sort direction for the active sort column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Header arrow for this direction
    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }

    /// Parse `asc`/`desc` (and the long forms)
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Some(SortDirection::Ascending),
            "desc" | "descending" => Some(SortDirection::Descending),
            _ => None,
        }
    }
}

/// Active sort: a column and a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: ColumnId,
    pub direction: SortDirection,
}

/// Header checkbox state for the rows on the current page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSelection {
    None,
    Some,
    All,
}

/// Sort/filter/page/selection/expansion configuration for the product table
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    sort: Option<SortState>,
    filter: String,
    page_index: usize,
    page_size: usize,
    selected: BTreeSet<u64>,
    expanded: BTreeSet<u64>,
    hidden: BTreeSet<ColumnId>,
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(PAGE_SIZE_OPTIONS[0])
    }
}

impl TableState {
    /// Fresh state: first page, no sort, no filter
    ///
    /// A page size of 0 falls back to the smallest offered size.
    pub fn new(page_size: usize) -> Self {
        Self {
            sort: None,
            filter: String::new(),
            page_index: 0,
            page_size: if page_size == 0 {
                PAGE_SIZE_OPTIONS[0]
            } else {
                page_size
            },
            selected: BTreeSet::new(),
            expanded: BTreeSet::new(),
            hidden: BTreeSet::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────

    pub fn sort(&self) -> Option<SortState> {
        self.sort
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn selected(&self) -> &BTreeSet<u64> {
        &self.selected
    }

    pub fn expanded(&self) -> &BTreeSet<u64> {
        &self.expanded
    }

    pub fn is_selected(&self, id: u64) -> bool {
        self.selected.contains(&id)
    }

    pub fn is_expanded(&self, id: u64) -> bool {
        self.expanded.contains(&id)
    }

    pub fn is_hidden(&self, column: ColumnId) -> bool {
        self.hidden.contains(&column)
    }

    /// Columns currently shown, in display order
    pub fn visible_columns(&self) -> Vec<ColumnId> {
        ColumnId::ALL
            .into_iter()
            .filter(|c| !self.hidden.contains(c))
            .collect()
    }

    // ─────────────────────────────────────────────────────────────
    // Derivation
    // ─────────────────────────────────────────────────────────────

    /// Filtered and sorted rows, before pagination
    pub fn filtered_rows<'a>(&self, data: &'a [Product]) -> Vec<&'a Product> {
        let mut rows = self.unsorted_matches(data);

        if let Some(sort) = self.sort {
            // sort_by is stable: ties keep their original order
            rows.sort_by(|a, b| {
                let ord = sort.column.compare(a, b);
                match sort.direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }

        rows
    }

    /// Rows passing the title filter (case-insensitive substring), in data order
    fn unsorted_matches<'a>(&self, data: &'a [Product]) -> Vec<&'a Product> {
        let needle = self.filter.to_lowercase();
        data.iter().filter(|p| title_matches(&needle, p)).collect()
    }

    /// Number of rows passing the filter
    pub fn filtered_count(&self, data: &[Product]) -> usize {
        self.unsorted_matches(data).len()
    }

    /// Rows on the current page
    pub fn visible_rows<'a>(&self, data: &'a [Product]) -> Vec<&'a Product> {
        let rows = self.filtered_rows(data);
        let start = (self.page_index * self.page_size).min(rows.len());
        let end = (start + self.page_size).min(rows.len());
        rows[start..end].to_vec()
    }

    /// Number of pages for `filtered_count` rows (0 when there are none)
    pub fn page_count(&self, filtered_count: usize) -> usize {
        filtered_count.div_ceil(self.page_size)
    }

    // ─────────────────────────────────────────────────────────────
    // Sorting and filtering
    // ─────────────────────────────────────────────────────────────

    /// Cycle the sort on `column`
    ///
    /// Same column: none → ascending → descending → none. A different
    /// column starts at ascending. Unsortable columns are ignored. Any change
    /// returns to the first page.
    pub fn toggle_sort(&mut self, column: ColumnId) -> Option<SortState> {
        if !column.is_sortable() {
            return self.sort;
        }

        self.sort = match self.sort {
            Some(SortState {
                column: current,
                direction,
            }) if current == column => match direction {
                SortDirection::Ascending => Some(SortState {
                    column,
                    direction: SortDirection::Descending,
                }),
                SortDirection::Descending => None,
            },
            _ => Some(SortState {
                column,
                direction: SortDirection::Ascending,
            }),
        };
        self.page_index = 0;
        self.sort
    }

    /// Set (or clear) the sort directly
    pub fn set_sort(&mut self, sort: Option<SortState>) {
        self.sort = sort.filter(|s| s.column.is_sortable());
        self.page_index = 0;
    }

    /// Replace the title filter and return to the first page
    pub fn set_filter(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.filter {
            self.filter = text;
            self.page_index = 0;
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Pagination
    // ─────────────────────────────────────────────────────────────

    /// Jump to page `index`
    ///
    /// Requests outside `[0, page_count - 1]` are no-ops and return false.
    pub fn go_to_page(&mut self, index: usize, data: &[Product]) -> bool {
        let pages = self.page_count(self.filtered_count(data));
        if index >= pages {
            return false;
        }
        self.page_index = index;
        true
    }

    pub fn next_page(&mut self, data: &[Product]) -> bool {
        self.go_to_page(self.page_index + 1, data)
    }

    pub fn previous_page(&mut self, data: &[Product]) -> bool {
        match self.page_index.checked_sub(1) {
            Some(index) => self.go_to_page(index, data),
            None => false,
        }
    }

    pub fn first_page(&mut self, data: &[Product]) -> bool {
        self.go_to_page(0, data)
    }

    pub fn last_page(&mut self, data: &[Product]) -> bool {
        let pages = self.page_count(self.filtered_count(data));
        match pages.checked_sub(1) {
            Some(last) => self.go_to_page(last, data),
            None => false,
        }
    }

    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next(&self, data: &[Product]) -> bool {
        self.page_index + 1 < self.page_count(self.filtered_count(data))
    }

    /// Change the page size, keeping the current page's first row on screen
    ///
    /// Returns false (and changes nothing) for a size of 0.
    pub fn set_page_size(&mut self, page_size: usize, data: &[Product]) -> bool {
        if page_size == 0 {
            return false;
        }
        let first_row = self.page_index * self.page_size;
        self.page_size = page_size;
        self.page_index = first_row / page_size;
        self.clamp_page(data);
        true
    }

    /// Step through [`PAGE_SIZE_OPTIONS`] (wraps around)
    pub fn cycle_page_size(&mut self, forward: bool, data: &[Product]) -> usize {
        let options = PAGE_SIZE_OPTIONS;
        let current = options.iter().position(|&s| s == self.page_size);
        let next = match (current, forward) {
            (Some(i), true) => options[(i + 1) % options.len()],
            (Some(i), false) => options[(i + options.len() - 1) % options.len()],
            // Custom size from config: snap to the first offered size
            (None, _) => options[0],
        };
        self.set_page_size(next, data);
        self.page_size
    }

    fn clamp_page(&mut self, data: &[Product]) {
        let pages = self.page_count(self.filtered_count(data));
        if self.page_index >= pages {
            self.page_index = pages.saturating_sub(1);
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Selection and expansion
    // ─────────────────────────────────────────────────────────────

    /// Flip selection of one row; returns whether it is now selected
    pub fn toggle_selected(&mut self, id: u64) -> bool {
        toggle(&mut self.selected, id)
    }

    /// Select every row on the page, or deselect them all if they already are
    pub fn toggle_page_selection(&mut self, page_rows: &[&Product]) -> PageSelection {
        if self.page_selection(page_rows) == PageSelection::All {
            for p in page_rows {
                self.selected.remove(&p.id);
            }
        } else {
            self.selected.extend(page_rows.iter().map(|p| p.id));
        }
        self.page_selection(page_rows)
    }

    /// Header checkbox state for `page_rows`
    pub fn page_selection(&self, page_rows: &[&Product]) -> PageSelection {
        let count = page_rows
            .iter()
            .filter(|p| self.selected.contains(&p.id))
            .count();
        match count {
            0 => PageSelection::None,
            n if n == page_rows.len() => PageSelection::All,
            _ => PageSelection::Some,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Flip expansion of one row; returns whether it is now expanded
    pub fn toggle_expanded(&mut self, id: u64) -> bool {
        toggle(&mut self.expanded, id)
    }

    // ─────────────────────────────────────────────────────────────
    // Column visibility
    // ─────────────────────────────────────────────────────────────

    /// Hide or show a column; returns whether it is now visible
    ///
    /// Columns that can't be hidden stay visible.
    pub fn toggle_column(&mut self, column: ColumnId) -> bool {
        if !column.is_hideable() {
            return true;
        }
        !toggle(&mut self.hidden, column)
    }

    // ─────────────────────────────────────────────────────────────
    // Data replacement
    // ─────────────────────────────────────────────────────────────

    /// Bring the state back in line with a freshly loaded data set
    ///
    /// Drops selected/expanded ids that no longer exist and clamps the page.
    pub fn reconcile(&mut self, data: &[Product]) {
        let ids: BTreeSet<u64> = data.iter().map(|p| p.id).collect();
        self.selected.retain(|id| ids.contains(id));
        self.expanded.retain(|id| ids.contains(id));
        self.clamp_page(data);
    }
}

/// Footer figures for the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSummary {
    pub selected: usize,
    pub filtered: usize,
    /// 1-based page number (0 when there are no pages)
    pub page_number: usize,
    pub page_count: usize,
}

impl TableSummary {
    /// `2 of 25 row(s) selected.`
    pub fn selection_text(&self) -> String {
        format!("{} of {} row(s) selected.", self.selected, self.filtered)
    }

    /// `Page 1 of 3`
    pub fn page_text(&self) -> String {
        format!("Page {} of {}", self.page_number, self.page_count)
    }
}

impl TableState {
    pub fn summary(&self, data: &[Product]) -> TableSummary {
        let matches = self.unsorted_matches(data);
        let filtered = matches.len();
        let page_count = self.page_count(filtered);
        TableSummary {
            // Rows hidden by the filter stay selected but aren't counted
            selected: matches
                .iter()
                .filter(|p| self.selected.contains(&p.id))
                .count(),
            filtered,
            page_number: if page_count == 0 { 0 } else { self.page_index + 1 },
            page_count,
        }
    }
}

/// Title filter test against an already lowercased needle
fn title_matches(needle: &str, product: &Product) -> bool {
    needle.is_empty() || product.title.to_lowercase().contains(needle)
}

/// Flip membership of `value`; returns whether it is now a member
fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) -> bool {
    if set.remove(&value) {
        false
    } else {
        set.insert(value);
        true
    }
}

/// Rows on the current page for `data` under `state`
pub fn visible_rows<'a>(data: &'a [Product], state: &TableState) -> Vec<&'a Product> {
    state.visible_rows(data)
}
