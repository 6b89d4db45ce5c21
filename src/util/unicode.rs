use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Width of `s` in terminal cells
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Cut `s` down to `max_cells` terminal cells, ending in `…` when shortened.
/// Never splits a grapheme cluster.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }

    let budget = max_cells - 1;
    let mut used = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let w = UnicodeWidthStr::width(g);
        if used + w > budget {
            break;
        }
        used += w;
        out.push_str(g);
    }
    out.push('\u{2026}');
    out
}

/// Byte offset of the grapheme boundary before `offset`, if any
pub fn prev_boundary(s: &str, offset: usize) -> Option<usize> {
    s[..offset].grapheme_indices(true).next_back().map(|(i, _)| i)
}

/// Byte offset of the grapheme boundary after `offset`, if any
pub fn next_boundary(s: &str, offset: usize) -> Option<usize> {
    s[offset..]
        .graphemes(true)
        .next()
        .map(|g| offset + g.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_counts_wide_characters() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("日本"), 4);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn truncate_fits_or_adds_ellipsis() {
        assert_eq!(truncate_to_width("Buy milk", 20), "Buy milk");
        assert_eq!(truncate_to_width("Buy milk", 5), "Buy \u{2026}");
        assert_eq!(truncate_to_width("日本語", 4), "日\u{2026}");
        assert_eq!(truncate_to_width("abc", 1), "\u{2026}");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn boundaries_respect_combining_marks() {
        let s = "ae\u{301}b";
        assert_eq!(next_boundary(s, 0), Some(1));
        assert_eq!(next_boundary(s, 1), Some(4));
        assert_eq!(prev_boundary(s, 4), Some(1));
        assert_eq!(prev_boundary(s, 0), None);
        assert_eq!(next_boundary(s, s.len()), None);
    }
}
