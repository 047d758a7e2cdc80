//! Display-width oracle.
//!
//! All column arithmetic in the crate goes through [`char_width`], so the
//! layout engine and the painters can never disagree about how wide a code
//! point is.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Terminal column width of a single code point (0, 1 or 2).
///
/// Control characters, which `unicode-width` does not measure, count as 0.
#[inline]
pub fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Sum of [`char_width`] over every code point of `s`.
pub fn str_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Whether `c` separates words for wrapping purposes.
#[inline]
pub const fn is_split_char(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Shorten `s` to at most `width` columns, ending it with `tail` when cut.
///
/// Cuts happen between grapheme clusters so that combining sequences are
/// never torn apart.
pub fn truncate(s: &str, width: usize, tail: &str) -> String {
    if str_width(s) <= width {
        return s.to_string();
    }

    let tail_width = UnicodeWidthStr::width(tail);
    let budget = width.saturating_sub(tail_width);
    let mut out = String::with_capacity(s.len());
    let mut used = 0;

    for grapheme in s.graphemes(true) {
        let w = str_width(grapheme);
        if used + w > budget {
            break;
        }
        used += w;
        out.push_str(grapheme);
    }

    if tail_width <= width {
        out.push_str(tail);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_width() {
        assert_eq!(char_width('a'), 1);
        assert_eq!(char_width('日'), 2);
        assert_eq!(char_width('\u{301}'), 0);
        assert_eq!(char_width('\x07'), 0);
    }

    #[test]
    fn test_str_width() {
        assert_eq!(str_width("hello"), 5);
        assert_eq!(str_width("日本"), 4);
        assert_eq!(str_width(""), 0);
    }

    #[test]
    fn test_split_chars() {
        assert!(is_split_char(' '));
        assert!(is_split_char('\t'));
        assert!(!is_split_char('\n'));
        assert!(!is_split_char('a'));
    }

    #[test]
    fn test_truncate_fits() {
        assert_eq!(truncate("short", 10, "\u{2026}"), "short");
        assert_eq!(truncate("exact", 5, "\u{2026}"), "exact");
    }

    #[test]
    fn test_truncate_cuts() {
        assert_eq!(truncate("#rust-lang", 6, "\u{2026}"), "#rust\u{2026}");
        assert_eq!(truncate("日本語", 4, "\u{2026}"), "日\u{2026}");
    }

    #[test]
    fn test_truncate_keeps_clusters() {
        // "e" + combining acute stays together
        assert_eq!(truncate("ae\u{301}bc", 3, "\u{2026}"), "ae\u{301}\u{2026}");
    }
}
