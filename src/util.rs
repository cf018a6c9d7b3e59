//! Shared utility functions

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate a string to at most `max_width` display columns, appending `…`
/// when anything was cut.
///
/// Uses unicode display width (not byte length) so CJK and emoji titles line
/// up in table cells.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_to_width("hello world", 6), "hello…");
/// assert_eq!(truncate_to_width("hello", 10), "hello");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    // Leave one column for the ellipsis
    let target = max_width - 1;
    let mut current = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if current + w > target {
            break;
        }
        current += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// Pseudo-random number in `0..bound` (returns 0 when `bound` is 0).
///
/// Seeds from `RandomState` so no extra dependency is needed. Good enough for
/// picking a catalog offset or a cosmetic progress step, not for anything
/// that needs real randomness.
pub fn random_below(bound: u64) -> u64 {
    if bound == 0 {
        return 0;
    }
    RandomState::new().build_hasher().finish() % bound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_shorter_than_max() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate_to_width("hello world", 6), "hello…");
    }

    #[test]
    fn test_truncate_wide_characters() {
        // Each CJK character is two columns wide
        let s = "日本語テキスト";
        let out = truncate_to_width(s, 5);
        assert_eq!(out, "日本…");
        assert!(out.width() <= 5);
    }

    #[test]
    fn test_truncate_to_zero() {
        assert_eq!(truncate_to_width("hello", 0), "");
    }

    #[test]
    fn test_random_below_stays_in_bounds() {
        for _ in 0..100 {
            assert!(random_below(7) < 7);
        }
        assert_eq!(random_below(0), 0);
        assert_eq!(random_below(1), 0);
    }
}
