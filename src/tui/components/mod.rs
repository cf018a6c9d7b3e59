// Components module - reusable UI building blocks
//
// - Title bar: app name, loading spinner, row count
// - Progress bar: cosmetic load gauge
// - Filter bar: title filter input
// - Product table: the page of products with detail rows
// - Status bar: selection, page position, last log problem
// - Toast: transient notifications

pub mod filter_bar;
pub mod product_table;
pub mod progress_bar;
pub mod status_bar;
pub mod title_bar;
pub mod toast;

pub use toast::{Toast, ToastNotifier};
