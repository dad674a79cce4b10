//! Common utility functions shared across the codebase.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Collapse all whitespace runs, newlines included, into single spaces.
///
/// # Examples
///
/// ```
/// use ctxlate::utils::single_line;
///
/// assert_eq!(single_line("function Home() {\n    return 1;\n}"), "function Home() { return 1; }");
/// ```
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate text to a terminal display width, appending `…` when cut.
///
/// Width is measured in terminal columns, so CJK characters count double.
///
/// # Examples
///
/// ```
/// use ctxlate::utils::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Welcome", 10), "Welcome");
/// assert_eq!(truncate_to_width("Welcome home", 8), "Welcome…");
/// assert_eq!(truncate_to_width("欢迎回家", 5), "欢迎…");
/// ```
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(1);
    let mut width = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push('…');
    out
}
