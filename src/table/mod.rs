// Table module - client-side product table
//
// - column: column descriptors and per-column comparison
// - state: sort/filter/page/selection/expansion state and row derivation
// - cell: per-column cell renderers
// - detail: expanded row content

pub mod cell;
pub mod column;
pub mod detail;
pub mod state;

pub use cell::{render_cell, CellValue, RatingTier, RowAction};
pub use column::ColumnId;
pub use detail::{RowDetail, StockLevel};
pub use state::{visible_rows, PageSelection, SortDirection, SortState, TableState, TableSummary};
