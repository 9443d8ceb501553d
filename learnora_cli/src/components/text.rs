/// Word wrapping for panels that need to know their rendered height up front
/// (the chat transcript scrolls from the bottom).
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Wrap `text` to lines of at most `width` terminal cells, breaking on spaces
/// and splitting words that are wider than a line. Explicit newlines are
/// kept. Always yields at least one line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = word.width();

            if current_width > 0 && current_width + 1 + word_width > width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }

            if word_width > width {
                if current_width > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                for c in word.chars() {
                    let char_width = c.width().unwrap_or(0);
                    if current_width > 0 && current_width + char_width > width {
                        lines.push(std::mem::take(&mut current));
                        current_width = 0;
                    }
                    current.push(c);
                    current_width += char_width;
                }
                continue;
            }

            if current_width > 0 {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
        }

        lines.push(current);
    }

    lines
}

/// The longest suffix of `text` that fits in `width` cells.
pub fn tail_to_width(text: &str, width: usize) -> &str {
    let mut used = 0;
    let mut start = text.len();
    for (idx, c) in text.char_indices().rev() {
        let char_width = c.width().unwrap_or(0);
        if used + char_width > width {
            break;
        }
        used += char_width;
        start = idx;
    }
    &text[start..]
}
