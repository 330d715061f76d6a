//! Text layout helpers for fixed-width terminal views.
//!
//! Widths are measured in terminal cells via `unicode-width`, so wide CJK
//! characters and emoji are accounted for correctly.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '\u{2026}';

/// Truncates `text` to at most `max_width` cells, marking the cut with `…`.
///
/// # Examples
///
/// ```
/// use crawldash::tui::components::truncate_to_width;
///
/// assert_eq!(truncate_to_width("crawler", 4), "cra\u{2026}");
/// assert_eq!(truncate_to_width("crawl", 10), "crawl");
/// ```
#[must_use]
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_owned();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width.saturating_sub(1);
    let mut output = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let char_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used.saturating_add(char_width) > budget {
            break;
        }
        output.push(ch);
        used = used.saturating_add(char_width);
    }
    output.push(ELLIPSIS);
    output
}

/// Wraps prose at word boundaries so no line exceeds `max_width` cells.
///
/// Words longer than the width are hard-split. Blank input lines are kept
/// as paragraph breaks.
#[must_use]
pub fn wrap_words(text: &str, max_width: usize) -> Vec<String> {
    let width = max_width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_width = 0usize;

        for word in paragraph.split_whitespace() {
            for piece in split_long_word(word, width) {
                let piece_width = UnicodeWidthStr::width(piece.as_str());
                let needed = if current.is_empty() {
                    piece_width
                } else {
                    current_width.saturating_add(1).saturating_add(piece_width)
                };
                if needed > width && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                if !current.is_empty() {
                    current.push(' ');
                    current_width = current_width.saturating_add(1);
                }
                current.push_str(&piece);
                current_width = current_width.saturating_add(piece_width);
            }
        }
        lines.push(current);
    }

    lines
}

fn split_long_word(word: &str, width: usize) -> Vec<String> {
    if UnicodeWidthStr::width(word) <= width {
        return vec![word.to_owned()];
    }

    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut used = 0usize;
    for ch in word.chars() {
        let char_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used.saturating_add(char_width) > width && !current.is_empty() {
            pieces.push(std::mem::take(&mut current));
            used = 0;
        }
        current.push(ch);
        used = used.saturating_add(char_width);
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Renders a horizontal bar of `filled` cells followed by `empty` cells.
#[must_use]
pub fn render_bar(filled: usize, empty: usize) -> String {
    let mut bar = "\u{2588}".repeat(filled);
    bar.push_str(&"\u{2591}".repeat(empty));
    bar
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{render_bar, truncate_to_width, wrap_words};

    #[rstest]
    #[case("short", 10, "short")]
    #[case("exactly", 7, "exactly")]
    #[case("truncated", 5, "trun\u{2026}")]
    #[case("anything", 0, "")]
    #[case("日本語テキスト", 5, "日本\u{2026}")]
    fn truncates_by_cell_width(#[case] input: &str, #[case] width: usize, #[case] expected: &str) {
        assert_eq!(truncate_to_width(input, width), expected);
    }

    #[rstest]
    fn wraps_at_word_boundaries() {
        let lines = wrap_words("the quick brown fox jumps", 10);

        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    }

    #[rstest]
    fn splits_words_longer_than_width() {
        let lines = wrap_words("abcdefghij", 4);

        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[rstest]
    fn keeps_paragraph_breaks() {
        let lines = wrap_words("one\n\ntwo", 10);

        assert_eq!(lines, vec!["one", "", "two"]);
    }

    #[rstest]
    fn bar_has_requested_cells() {
        assert_eq!(render_bar(2, 1), "\u{2588}\u{2588}\u{2591}");
    }
}
