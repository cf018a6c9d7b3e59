//! Row detail expansion
//!
//! An expanded row shows fields the table columns leave out: up to three
//! images, the discount and the stock level. Everything comes from the
//! already-loaded record.

use crate::catalog::Product;

/// Most images shown for one expanded row
pub const MAX_DETAIL_IMAGES: usize = 3;

/// Stock below this many units is flagged as low
pub const LOW_STOCK_THRESHOLD: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    Low,
    High,
}

impl StockLevel {
    pub fn for_units(units: u64) -> Self {
        if units < LOW_STOCK_THRESHOLD {
            StockLevel::Low
        } else {
            StockLevel::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockLevel::Low => "low",
            StockLevel::High => "in stock",
        }
    }
}

/// Detail panel content for one row
#[derive(Debug, Clone, PartialEq)]
pub struct RowDetail<'a> {
    pub images: &'a [String],
    /// Formatted discount, e.g. `12.96%`
    pub discount: Option<String>,
    pub stock: Option<(u64, StockLevel)>,
}

impl<'a> RowDetail<'a> {
    pub fn for_product(product: &'a Product) -> Self {
        let shown = product.images.len().min(MAX_DETAIL_IMAGES);
        Self {
            images: &product.images[..shown],
            discount: product.discount_percentage.map(|d| format!("{:.2}%", d)),
            stock: product
                .stock
                .map(|units| (units, StockLevel::for_units(units))),
        }
    }

    /// One-line stock summary, e.g. `Stock: 12 (low)`
    pub fn stock_text(&self) -> String {
        match self.stock {
            Some((units, level)) => format!("Stock: {} ({})", units, level.label()),
            None => "Stock: n/a".to_string(),
        }
    }

    pub fn discount_text(&self) -> String {
        match &self.discount {
            Some(d) => format!("Discount: {}", d),
            None => "Discount: none".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_with(images: usize, stock: Option<u64>, discount: Option<f64>) -> Product {
        Product {
            id: 1,
            images: (0..images).map(|i| format!("https://img.test/{}.png", i)).collect(),
            stock,
            discount_percentage: discount,
            ..Product::default()
        }
    }

    #[test]
    fn test_at_most_three_images() {
        let p = product_with(5, None, None);
        assert_eq!(RowDetail::for_product(&p).images.len(), 3);
        let p = product_with(2, None, None);
        assert_eq!(RowDetail::for_product(&p).images.len(), 2);
        let p = product_with(0, None, None);
        assert!(RowDetail::for_product(&p).images.is_empty());
    }

    #[test]
    fn test_stock_threshold_at_50() {
        assert_eq!(StockLevel::for_units(0), StockLevel::Low);
        assert_eq!(StockLevel::for_units(49), StockLevel::Low);
        assert_eq!(StockLevel::for_units(50), StockLevel::High);
        assert_eq!(StockLevel::for_units(120), StockLevel::High);
    }

    #[test]
    fn test_detail_text() {
        let p = product_with(1, Some(12), Some(12.956));
        let detail = RowDetail::for_product(&p);
        assert_eq!(detail.discount_text(), "Discount: 12.96%");
        assert_eq!(detail.stock_text(), "Stock: 12 (low)");

        let bare = product_with(0, None, None);
        let detail = RowDetail::for_product(&bare);
        assert_eq!(detail.discount_text(), "Discount: none");
        assert_eq!(detail.stock_text(), "Stock: n/a");
    }
}
