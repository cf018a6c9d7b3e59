// Catalog module - fetching product data
//
// - product: Product record, response envelope, loaded data set
// - client: ProductSource trait and the reqwest-backed HTTP source
// - loader: load orchestration (generations, loading flag, notifications)
// - progress: cosmetic progress timer

pub mod client;
pub mod loader;
pub mod product;
pub mod progress;

pub use client::{FetchError, FetchRequest, HttpProductSource, ProductSource};
pub use loader::{LoadEvent, LoadKind, Loader, LoaderOptions};
pub use product::{Catalog, Product};
