//! Shared rendering utilities.
//!
//! Widths are counted in `char`s; every glyph the UI prints is one column wide.

/// Positions the cursor at a 1-indexed row and column.
///
/// Uses ANSI escape sequence `\u{1b}[{row};{col}H`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Display width of `text`.
#[must_use]
pub fn width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to `max` columns, ending with `…` when something was dropped.
///
/// # Example
///
/// ```rust
/// use licensemap::ui::helpers::truncate;
///
/// assert_eq!(truncate("Cerâmica São José", 8), "Cerâmic…");
/// assert_eq!(truncate("Posto", 8), "Posto");
/// ```
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(max - 1).collect();
    cut.push('…');
    cut
}

/// Truncates to `len` columns and pads with spaces up to exactly `len`.
#[must_use]
pub fn fit(text: &str, len: usize) -> String {
    let cut = truncate(text, len);
    let pad = len.saturating_sub(width(&cut));
    format!("{cut}{}", " ".repeat(pad))
}

/// Hard-wraps `text` into lines of at most `max` columns. Continuation lines
/// start with `indent` spaces. Falls back to [`truncate`] when there is no room
/// past the indent.
#[must_use]
pub fn wrap(text: &str, max: usize, indent: usize) -> Vec<String> {
    if width(text) <= max || max <= indent {
        return vec![truncate(text, max)];
    }

    let chars: Vec<char> = text.chars().collect();
    let pad = " ".repeat(indent);
    let mut lines = vec![chars[..max].iter().collect::<String>()];
    for chunk in chars[max..].chunks(max - indent) {
        lines.push(format!("{pad}{}", chunk.iter().collect::<String>()));
    }
    lines
}
