#![forbid(unsafe_code)]

//! Display-width helpers.
//!
//! Widths are terminal columns (via `unicode-width`), and truncation never
//! splits a grapheme cluster.

use std::borrow::Cow;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const ELLIPSIS: char = '\u{2026}';

/// Terminal column width of `s`.
#[must_use]
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Fit `s` into `max` columns, ending in `…` when something was cut.
#[must_use]
pub fn truncate_to_width(s: &str, max: usize) -> Cow<'_, str> {
    if display_width(s) <= max {
        return Cow::Borrowed(s);
    }
    if max == 0 {
        return Cow::Borrowed("");
    }
    let budget = max - 1;
    let mut used = 0;
    let mut out = String::with_capacity(s.len().min(max * 4));
    for grapheme in s.graphemes(true) {
        let w = UnicodeWidthStr::width(grapheme);
        if used + w > budget {
            break;
        }
        used += w;
        out.push_str(grapheme);
    }
    out.push(ELLIPSIS);
    Cow::Owned(out)
}

/// Pad `s` with spaces on the right up to `width` columns.
#[must_use]
pub fn pad_to_width(s: &str, width: usize) -> String {
    let fitted = truncate_to_width(s, width);
    let pad = width.saturating_sub(display_width(&fitted));
    let mut out = String::with_capacity(fitted.len() + pad);
    out.push_str(&fitted);
    out.extend(std::iter::repeat_n(' ', pad));
    out
}

/// Greedy word wrap into lines of at most `width` columns.
///
/// Words wider than `width` are truncated on their own line.
#[must_use]
pub fn wrap(s: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    if width == 0 {
        return lines;
    }
    let mut current = String::new();
    let mut current_w = 0;
    for word in s.split_whitespace() {
        let w = display_width(word);
        if current_w > 0 && current_w + 1 + w > width {
            lines.push(std::mem::take(&mut current));
            current_w = 0;
        }
        if current_w > 0 {
            current.push(' ');
            current_w += 1;
        }
        if w > width {
            current.push_str(&truncate_to_width(word, width));
            current_w = width;
        } else {
            current.push_str(word);
            current_w += w;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_borrowed() {
        assert!(matches!(truncate_to_width("Home", 10), Cow::Borrowed("Home")));
    }

    #[test]
    fn long_text_gets_ellipsis() {
        assert_eq!(truncate_to_width("Technical Skills", 8), "Technic…");
        assert_eq!(display_width(&truncate_to_width("Technical Skills", 8)), 8);
    }

    #[test]
    fn wide_glyphs_do_not_overflow() {
        // Each CJK glyph is two columns wide.
        let cut = truncate_to_width("日本語テキスト", 5);
        assert!(display_width(&cut) <= 5);
        assert!(cut.ends_with(ELLIPSIS));
    }

    #[test]
    fn zero_width_budget() {
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn pad_fills_columns() {
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        assert_eq!(pad_to_width("abcdef", 4), "abc…");
    }

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(
            wrap("the quick brown fox", 10),
            vec!["the quick".to_string(), "brown fox".to_string()]
        );
        assert!(wrap("anything", 0).is_empty());
        assert!(wrap("   ", 5).is_empty());
    }
}
