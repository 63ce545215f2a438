use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Wrap `text` to lines of at most `width` columns.
///
/// Breaks at whitespace where possible and hard-breaks words (or scripts
/// without spaces) that do not fit. Explicit newlines are kept. Always
/// returns at least one line.
pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_width = 0;

        for word in paragraph.split_word_bounds() {
            let word_width = word.width();
            let is_space = word.chars().all(char::is_whitespace);

            if line_width + word_width <= width {
                if !(is_space && line.is_empty() && !lines.is_empty()) {
                    line.push_str(word);
                    line_width += word_width;
                }
                continue;
            }
            if is_space {
                lines.push(std::mem::take(&mut line).trim_end().to_string());
                line_width = 0;
                continue;
            }
            if !line.is_empty() && word_width <= width {
                lines.push(std::mem::take(&mut line).trim_end().to_string());
                line_width = 0;
            }
            for grapheme in word.graphemes(true) {
                let grapheme_width = grapheme.width();
                if line_width + grapheme_width > width && !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                line.push_str(grapheme);
                line_width += grapheme_width;
            }
        }
        lines.push(line.trim_end().to_string());
    }

    lines
}

/// Center `text` within `width` columns using spaces.
pub(crate) fn center(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width >= width {
        return text.to_string();
    }
    let left = (width - text_width) / 2;
    let right = width - text_width - left;
    format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
}

/// Pad `text` on the right to exactly `width` columns (no truncation).
pub(crate) fn pad_right(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width >= width {
        return text.to_string();
    }
    format!("{text}{}", " ".repeat(width - text_width))
}

/// Number of filled cells for `value / total` in a bar of `width` cells.
pub(crate) fn bar_fill(value: u32, total: u32, width: usize) -> usize {
    if total == 0 {
        return 0;
    }
    let filled = (u64::from(value) * width as u64 + u64::from(total) / 2) / u64::from(total);
    (filled as usize).min(width)
}

#[cfg(test)]
mod tests {
    use unicode_width::UnicodeWidthStr;

    use super::{bar_fill, center, pad_right, wrap_text};

    #[test]
    fn wrap_breaks_at_spaces() {
        assert_eq!(
            wrap_text("read every single morning", 10),
            vec!["read every", "single", "morning"]
        );
    }

    #[test]
    fn wrap_keeps_explicit_newlines() {
        assert_eq!(wrap_text("a\nb", 10), vec!["a", "b"]);
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn wrap_hard_breaks_long_words() {
        let lines = wrap_text("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_respects_wide_glyphs() {
        let lines = wrap_text("매일아침읽기", 5);
        assert!(lines.iter().all(|line| line.width() <= 5));
        assert_eq!(lines.concat(), "매일아침읽기");
    }

    #[test]
    fn center_and_pad() {
        assert_eq!(center("ab", 6), "  ab  ");
        assert_eq!(center("toolong", 3), "toolong");
        assert_eq!(pad_right("ab", 4), "ab  ");
    }

    #[test]
    fn bar_fill_rounds_and_clamps() {
        assert_eq!(bar_fill(0, 20, 10), 0);
        assert_eq!(bar_fill(12, 20, 10), 6);
        assert_eq!(bar_fill(20, 20, 10), 10);
        assert_eq!(bar_fill(3, 0, 10), 0);
    }
}
