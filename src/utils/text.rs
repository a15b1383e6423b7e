use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Count how many terminal rows `text` occupies when wrapped at `max_width` columns.
/// Uses Unicode display width so emoji and CJK characters are measured correctly.
pub fn wrapped_line_count(text: &str, max_width: u16) -> u16 {
    let max_width = max_width as usize;
    if max_width == 0 {
        return 1;
    }
    text.split('\n')
        .map(|line| {
            let w = UnicodeWidthStr::width(line);
            if w == 0 { 1 } else { ((w - 1) / max_width + 1) as u16 }
        })
        .sum()
}

/// Cut `text` to at most `max_width` display columns, ending in `…` when shortened.
pub fn truncate(text: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Keep the tail of `text` that fits, so the cursor end of an input stays visible.
pub fn tail(text: &str, max_width: usize) -> &str {
    let mut used = 0;
    for (idx, c) in text.char_indices().rev() {
        used += UnicodeWidthChar::width(c).unwrap_or(0);
        if used > max_width {
            return &text[idx + c.len_utf8()..];
        }
    }
    text
}
