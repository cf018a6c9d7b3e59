// Theme system for the TUI
//
// A theme is a flat set of colors for every UI element. Themes are picked by
// name from config (`theme = "nord"`); unknown names fall back to dark.

use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
    Nord,
}

impl ThemeKind {
    /// Get all available themes
    pub fn all() -> &'static [ThemeKind] {
        &[ThemeKind::Dark, ThemeKind::Light, ThemeKind::Nord]
    }

    /// Look up a theme by (case-insensitive) name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Get the next theme in the cycle
    pub fn next(self) -> Self {
        let themes = Self::all();
        let current = themes.iter().position(|&t| t == self).unwrap_or(0);
        themes[(current + 1) % themes.len()]
    }

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            ThemeKind::Dark => "Dark",
            ThemeKind::Light => "Light",
            ThemeKind::Nord => "Nord",
        }
    }

    /// Get the theme configuration
    pub fn theme(&self) -> Theme {
        match self {
            ThemeKind::Dark => Theme::dark(),
            ThemeKind::Light => Theme::light(),
            ThemeKind::Nord => Theme::nord(),
        }
    }
}

/// Complete theme definition with all UI colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub kind: ThemeKind,

    // Base colors
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    pub border_type: BorderType,
    /// Focused borders, toasts, column cursor
    pub highlight: Color,

    // Title and status
    pub title: Color,
    pub status_bar: Color,

    // Table
    pub header: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub checked: Color,
    pub price: Color,
    pub rating_top: Color,
    pub badge_fg: Color,
    pub badge_bg: Color,
    pub detail: Color,

    // Feedback
    pub progress: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Theme for a config name (unknown names fall back to dark)
    pub fn by_name(name: &str) -> Self {
        ThemeKind::from_name(name).unwrap_or_default().theme()
    }

    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            kind: ThemeKind::Dark,
            background: Color::Reset,
            foreground: Color::White,
            muted: Color::DarkGray,
            border: Color::Gray,
            border_type: BorderType::Rounded,
            highlight: Color::Cyan,

            title: Color::Cyan,
            status_bar: Color::Green,

            header: Color::Yellow,
            selection_bg: Color::DarkGray,
            selection_fg: Color::White,
            checked: Color::Green,
            price: Color::LightGreen,
            rating_top: Color::Yellow,
            badge_fg: Color::Black,
            badge_bg: Color::Cyan,
            detail: Color::Gray,

            progress: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            kind: ThemeKind::Light,
            background: Color::White,
            foreground: Color::Black,
            muted: Color::Gray,
            border: Color::DarkGray,
            border_type: BorderType::Plain,
            highlight: Color::Blue,

            title: Color::Blue,
            status_bar: Color::DarkGray,

            header: Color::Magenta,
            selection_bg: Color::LightBlue,
            selection_fg: Color::Black,
            checked: Color::Green,
            price: Color::Rgb(0, 110, 60),
            rating_top: Color::Rgb(184, 134, 11), // Dark goldenrod
            badge_fg: Color::White,
            badge_bg: Color::Blue,
            detail: Color::DarkGray,

            progress: Color::Blue,
            success: Color::Green,
            warning: Color::Rgb(184, 134, 11),
            error: Color::Red,
        }
    }

    /// Nord theme
    pub fn nord() -> Self {
        Self {
            kind: ThemeKind::Nord,
            background: Color::Rgb(46, 52, 64),
            foreground: Color::Rgb(236, 239, 244),
            muted: Color::Rgb(76, 86, 106),
            border: Color::Rgb(76, 86, 106),
            border_type: BorderType::Rounded,
            highlight: Color::Rgb(136, 192, 208),

            title: Color::Rgb(136, 192, 208),
            status_bar: Color::Rgb(163, 190, 140),

            header: Color::Rgb(235, 203, 139),
            selection_bg: Color::Rgb(67, 76, 94),
            selection_fg: Color::Rgb(236, 239, 244),
            checked: Color::Rgb(163, 190, 140),
            price: Color::Rgb(163, 190, 140),
            rating_top: Color::Rgb(235, 203, 139),
            badge_fg: Color::Rgb(46, 52, 64),
            badge_bg: Color::Rgb(129, 161, 193),
            detail: Color::Rgb(216, 222, 233),

            progress: Color::Rgb(136, 192, 208),
            success: Color::Rgb(163, 190, 140),
            warning: Color::Rgb(235, 203, 139),
            error: Color::Rgb(191, 97, 106),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_lookup_by_name() {
        assert_eq!(Theme::by_name("nord").kind, ThemeKind::Nord);
        assert_eq!(Theme::by_name(" LIGHT ").kind, ThemeKind::Light);
        assert_eq!(Theme::by_name("solarized").kind, ThemeKind::Dark);
    }

    #[test]
    fn test_theme_cycle_wraps() {
        let mut kind = ThemeKind::Dark;
        for _ in 0..ThemeKind::all().len() {
            kind = kind.next();
        }
        assert_eq!(kind, ThemeKind::Dark);
    }
}
