//! Column descriptors
//!
//! Each column maps a product field to a header label, says whether it can
//! be sorted or hidden, and knows how to compare two products by its value.

use crate::catalog::Product;
use std::cmp::Ordering;

/// Identifier for a table column, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnId {
    Select,
    Thumbnail,
    Title,
    Description,
    Price,
    Rating,
    Brand,
    Category,
    Actions,
}

impl ColumnId {
    /// All columns in display order
    pub const ALL: [ColumnId; 9] = [
        ColumnId::Select,
        ColumnId::Thumbnail,
        ColumnId::Title,
        ColumnId::Description,
        ColumnId::Price,
        ColumnId::Rating,
        ColumnId::Brand,
        ColumnId::Category,
        ColumnId::Actions,
    ];

    /// Header label
    pub fn header(&self) -> &'static str {
        match self {
            ColumnId::Select => "",
            ColumnId::Thumbnail => "Image",
            ColumnId::Title => "Title",
            ColumnId::Description => "Description",
            ColumnId::Price => "Price",
            ColumnId::Rating => "Rating",
            ColumnId::Brand => "Brand",
            ColumnId::Category => "Category",
            ColumnId::Actions => "",
        }
    }

    /// Stable lowercase name, used on the command line
    pub fn key(&self) -> &'static str {
        match self {
            ColumnId::Select => "select",
            ColumnId::Thumbnail => "thumbnail",
            ColumnId::Title => "title",
            ColumnId::Description => "description",
            ColumnId::Price => "price",
            ColumnId::Rating => "rating",
            ColumnId::Brand => "brand",
            ColumnId::Category => "category",
            ColumnId::Actions => "actions",
        }
    }

    /// Parse a column from its key (case-insensitive)
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    pub fn is_sortable(&self) -> bool {
        matches!(
            self,
            ColumnId::Title
                | ColumnId::Price
                | ColumnId::Rating
                | ColumnId::Brand
                | ColumnId::Category
        )
    }

    /// Select, title and actions are always shown
    pub fn is_hideable(&self) -> bool {
        !matches!(
            self,
            ColumnId::Select | ColumnId::Title | ColumnId::Actions
        )
    }

    /// Sortable columns in display order
    pub fn sortable() -> impl Iterator<Item = ColumnId> {
        Self::ALL.into_iter().filter(|c| c.is_sortable())
    }

    /// Hideable columns in display order
    pub fn hideable() -> impl Iterator<Item = ColumnId> {
        Self::ALL.into_iter().filter(|c| c.is_hideable())
    }

    /// Ascending comparison by this column's value
    ///
    /// Numbers compare numerically, strings case-insensitively. Columns that
    /// can't be sorted compare equal so a stable sort leaves them alone.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            ColumnId::Price => a.price.total_cmp(&b.price),
            ColumnId::Rating => a.rating.total_cmp(&b.rating),
            ColumnId::Title => compare_text(&a.title, &b.title),
            ColumnId::Brand => compare_text(&a.brand, &b.brand),
            ColumnId::Category => compare_text(&a.category, &b.category),
            _ => Ordering::Equal,
        }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(title: &str, price: f64) -> Product {
        Product {
            title: title.to_string(),
            price,
            ..Product::default()
        }
    }

    #[test]
    fn test_from_key_roundtrip() {
        for column in ColumnId::ALL {
            assert_eq!(ColumnId::from_key(column.key()), Some(column));
        }
        assert_eq!(ColumnId::from_key(" PRICE "), Some(ColumnId::Price));
        assert_eq!(ColumnId::from_key("stock"), None);
    }

    #[test]
    fn test_numeric_compare_not_lexicographic() {
        let cheap = product("a", 9.99);
        let pricey = product("b", 100.0);
        assert_eq!(ColumnId::Price.compare(&cheap, &pricey), Ordering::Less);
    }

    #[test]
    fn test_text_compare_ignores_case() {
        let lower = product("apple", 0.0);
        let upper = product("Banana", 0.0);
        assert_eq!(ColumnId::Title.compare(&lower, &upper), Ordering::Less);
    }

    #[test]
    fn test_flags() {
        assert!(!ColumnId::Thumbnail.is_sortable());
        assert!(!ColumnId::Title.is_hideable());
        assert_eq!(ColumnId::sortable().count(), 5);
        assert_eq!(ColumnId::hideable().count(), 6);
    }
}
