//! Cell renderers
//!
//! A stateless mapping from (product, column) to a [`CellValue`]. The TUI and
//! the headless listing decide how each variant looks; this module only
//! decides what goes in the cell.

use super::column::ColumnId;
use crate::catalog::Product;
use crate::util::truncate_to_width;

/// Display width of the description column before truncation
pub const DESCRIPTION_WIDTH: usize = 40;

/// Ratings at or above this get the highlighted style
pub const TOP_RATING: f64 = 4.5;

/// Visual class of a rating cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingTier {
    Top,
    Standard,
}

/// Rendered value of one cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Row selection checkbox
    Checkbox(bool),
    /// Image URL passthrough
    Image(String),
    Text(String),
    /// Shortened display text with the full text kept alongside
    Truncated { display: String, full: String },
    /// Formatted price
    Currency(String),
    Rating { text: String, tier: RatingTier },
    /// Badge-style label
    Badge(String),
    /// Row action menu trigger
    Actions,
}

impl CellValue {
    /// Plain text for this cell (used by the headless listing and tests)
    pub fn plain(&self) -> String {
        match self {
            CellValue::Checkbox(true) => "[x]".to_string(),
            CellValue::Checkbox(false) => "[ ]".to_string(),
            CellValue::Image(url) => image_label(url).to_string(),
            CellValue::Text(s) | CellValue::Currency(s) | CellValue::Badge(s) => s.clone(),
            CellValue::Truncated { display, .. } => display.clone(),
            CellValue::Rating { text, .. } => text.clone(),
            CellValue::Actions => "⋯".to_string(),
        }
    }
}

/// Entries of the per-row action menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    CopyId,
    ToggleDetails,
    /// Placeholder, no backing behavior
    ViewProduct,
    /// Placeholder, no backing behavior
    EditProduct,
}

impl RowAction {
    pub const ALL: [RowAction; 4] = [
        RowAction::CopyId,
        RowAction::ToggleDetails,
        RowAction::ViewProduct,
        RowAction::EditProduct,
    ];

    /// Menu label; the details entry reflects the row's current state
    pub fn label(&self, expanded: bool) -> &'static str {
        match self {
            RowAction::CopyId => "Copy product ID",
            RowAction::ToggleDetails if expanded => "Hide details",
            RowAction::ToggleDetails => "Show details",
            RowAction::ViewProduct => "View product",
            RowAction::EditProduct => "Edit product",
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, RowAction::ViewProduct | RowAction::EditProduct)
    }
}

/// Locale rules for currency formatting
#[derive(Debug, Clone, Copy)]
pub struct CurrencyFormat {
    pub symbol: &'static str,
    pub code: &'static str,
    pub group_separator: char,
    pub decimal_separator: char,
}

/// en-US / USD, the only format the table uses
pub const USD: CurrencyFormat = CurrencyFormat {
    symbol: "$",
    code: "USD",
    group_separator: ',',
    decimal_separator: '.',
};

/// Format an amount with two decimals and thousands grouping
///
/// `1234.5` → `$1,234.50`. Non-finite amounts render blank.
pub fn format_currency(amount: f64, format: &CurrencyFormat) -> String {
    if !amount.is_finite() {
        return String::new();
    }

    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::new();
    for (count, ch) in whole.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            grouped.insert(0, format.group_separator);
        }
        grouped.insert(0, ch);
    }

    // "-0.00" would look odd, so only sign non-zero results
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!(
        "{}{}{}{}{}",
        sign, format.symbol, grouped, format.decimal_separator, cents
    )
}

/// Rating to one decimal with its tier
pub fn format_rating(rating: f64) -> (String, RatingTier) {
    let tier = if rating >= TOP_RATING {
        RatingTier::Top
    } else {
        RatingTier::Standard
    };
    (format!("{:.1}", rating), tier)
}

/// Short label for an image URL: its last path segment
pub fn image_label(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(url)
}

/// Render one cell
pub fn render_cell(product: &Product, column: ColumnId, selected: bool) -> CellValue {
    match column {
        ColumnId::Select => CellValue::Checkbox(selected),
        ColumnId::Thumbnail => CellValue::Image(product.thumbnail.clone()),
        ColumnId::Title => CellValue::Text(product.title.clone()),
        ColumnId::Description => CellValue::Truncated {
            display: truncate_to_width(&product.description, DESCRIPTION_WIDTH),
            full: product.description.clone(),
        },
        ColumnId::Price => CellValue::Currency(format_currency(product.price, &USD)),
        ColumnId::Rating => {
            let (text, tier) = format_rating(product.rating);
            CellValue::Rating { text, tier }
        }
        ColumnId::Brand => CellValue::Text(product.brand.clone()),
        ColumnId::Category => CellValue::Badge(product.category.clone()),
        ColumnId::Actions => CellValue::Actions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_formatting() {
        assert_eq!(format_currency(1234.5, &USD), "$1,234.50");
        assert_eq!(format_currency(9.99, &USD), "$9.99");
        assert_eq!(format_currency(0.0, &USD), "$0.00");
        assert_eq!(format_currency(1_000_000.0, &USD), "$1,000,000.00");
        assert_eq!(format_currency(-42.129, &USD), "-$42.13");
        assert_eq!(format_currency(-0.001, &USD), "$0.00");
        assert_eq!(format_currency(f64::NAN, &USD), "");
    }

    #[test]
    fn test_rating_tier_threshold() {
        assert_eq!(format_rating(4.5), ("4.5".to_string(), RatingTier::Top));
        assert_eq!(format_rating(4.94), ("4.9".to_string(), RatingTier::Top));
        assert_eq!(
            format_rating(4.49),
            ("4.5".to_string(), RatingTier::Standard)
        );
        assert_eq!(format_rating(2.0).1, RatingTier::Standard);
    }

    #[test]
    fn test_description_keeps_full_text() {
        let product = Product {
            description: "A".repeat(100),
            ..Product::default()
        };
        match render_cell(&product, ColumnId::Description, false) {
            CellValue::Truncated { display, full } => {
                assert!(display.chars().count() <= DESCRIPTION_WIDTH);
                assert!(display.ends_with('…'));
                assert_eq!(full.len(), 100);
            }
            other => panic!("unexpected cell {:?}", other),
        }
    }

    #[test]
    fn test_cells_by_column() {
        let product = Product {
            id: 5,
            title: "Red Lipstick".to_string(),
            category: "beauty".to_string(),
            thumbnail: "https://cdn.example.com/products/5/thumbnail.png?v=2".to_string(),
            price: 12.99,
            ..Product::default()
        };
        assert_eq!(
            render_cell(&product, ColumnId::Select, true),
            CellValue::Checkbox(true)
        );
        assert_eq!(
            render_cell(&product, ColumnId::Category, false),
            CellValue::Badge("beauty".to_string())
        );
        assert_eq!(
            render_cell(&product, ColumnId::Price, false).plain(),
            "$12.99"
        );
        assert_eq!(
            render_cell(&product, ColumnId::Thumbnail, false).plain(),
            "thumbnail.png"
        );
        assert_eq!(render_cell(&product, ColumnId::Actions, false), CellValue::Actions);
    }

    #[test]
    fn test_image_label_fallbacks() {
        assert_eq!(image_label("https://x.test/a/b.jpg"), "b.jpg");
        assert_eq!(image_label("https://x.test/a/"), "a");
        assert_eq!(image_label(""), "");
    }

    #[test]
    fn test_action_labels() {
        assert_eq!(RowAction::ToggleDetails.label(false), "Show details");
        assert_eq!(RowAction::ToggleDetails.label(true), "Hide details");
        assert!(RowAction::EditProduct.is_placeholder());
        assert!(!RowAction::CopyId.is_placeholder());
    }
}
