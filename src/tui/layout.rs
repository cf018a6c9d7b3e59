//! Width breakpoints for the product table
//!
//! The table drops its widest optional columns as the terminal narrows.
//! Thresholds live here so render code never compares raw widths.

use crate::table::ColumnId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    /// < 70 cols: title, price and rating only fit
    Compact,
    /// 70-129 cols: no room for description or thumbnails
    Normal,
    /// 130-159 cols: every column
    Wide,
    /// 160+ cols
    UltraWide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=69 => Breakpoint::Compact,
            70..=129 => Breakpoint::Normal,
            130..=159 => Breakpoint::Wide,
            _ => Breakpoint::UltraWide,
        }
    }

    /// Check if at least this breakpoint (inclusive)
    pub fn at_least(&self, min: Breakpoint) -> bool {
        *self >= min
    }

    /// Columns that don't fit at this width, on top of user-hidden ones
    pub fn dropped_columns(&self) -> &'static [ColumnId] {
        match self {
            Breakpoint::Compact => &[ColumnId::Thumbnail, ColumnId::Description, ColumnId::Brand],
            Breakpoint::Normal => &[ColumnId::Thumbnail, ColumnId::Description],
            Breakpoint::Wide | Breakpoint::UltraWide => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_thresholds() {
        assert_eq!(Breakpoint::from_width(40), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(69), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(70), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(129), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(130), Breakpoint::Wide);
        assert_eq!(Breakpoint::from_width(160), Breakpoint::UltraWide);
    }

    #[test]
    fn narrower_breakpoints_drop_more_columns() {
        let compact = Breakpoint::Compact.dropped_columns();
        for column in Breakpoint::Normal.dropped_columns() {
            assert!(compact.contains(column));
        }
        assert!(Breakpoint::Wide.dropped_columns().is_empty());
        assert!(Breakpoint::Wide.at_least(Breakpoint::Normal));
        assert!(!Breakpoint::Normal.at_least(Breakpoint::Wide));
    }
}
