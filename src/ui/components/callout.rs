//! Detail callout component renderer.

use crate::ui::helpers::{fit, position_cursor, truncate, width, wrap};
use crate::ui::layout::Rect;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::CalloutInfo;

const MAX_WIDTH: usize = 56;

/// Indent of wrapped document link lines.
const LINK_INDENT: usize = 3;

/// Draws the callout as a framed box in the top-left corner of `area`.
///
/// ```text
/// ┌ Posto Boa Vista ─────────────────┐
/// │ Processo: 000.123-4/2024         │
/// │ ...                              │
/// └──────────────────────────────────┘
/// ```
///
/// Document links wrap so the full URL stays readable. Lines that do not fit
/// the area's height are dropped from the bottom.
pub fn render_callout(area: &Rect, callout: &CalloutInfo, theme: &Theme) {
    let box_width = area.width.min(MAX_WIDTH);
    if box_width < 4 || area.height < 3 {
        return;
    }
    let inner = box_width - 2;

    let mut body = body_lines(callout, inner);
    body.truncate(area.height - 2);

    let border = &theme.colors.border;
    let mut row = area.y + 1;

    position_cursor(row, area.x + 1);
    print!("{}", Theme::fg(border));
    print!("┌");
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    let title = truncate(&format!(" {} ", callout.title), inner);
    print!("{title}");
    print!("{}", Theme::reset());
    print!("{}", Theme::fg(border));
    print!("{}┐", "─".repeat(inner.saturating_sub(width(&title))));
    print!("{}", Theme::reset());

    for (text, color) in &body {
        row += 1;
        position_cursor(row, area.x + 1);
        print!("{}│", Theme::fg(border));
        print!("{}", Theme::fg(color.unwrap_or(&theme.colors.text_normal)));
        print!("{}", fit(text, inner));
        print!("{}│", Theme::fg(border));
        print!("{}", Theme::reset());
    }

    position_cursor(row + 1, area.x + 1);
    print!("{}", Theme::fg(border));
    print!("└{}┘", "─".repeat(inner));
    print!("{}", Theme::reset());
}

/// Field lines with their colour, then document links wrapped to `inner`.
fn body_lines(callout: &CalloutInfo, inner: usize) -> Vec<(String, Option<&str>)> {
    let mut body: Vec<(String, Option<&str>)> = callout
        .fields
        .iter()
        .map(|f| (format!(" {}: {}", f.label, f.value), f.color.as_deref()))
        .collect();
    for document in &callout.documents {
        body.extend(
            wrap(&format!(" {document}"), inner, LINK_INDENT)
                .into_iter()
                .map(|line| (line, None)),
        );
    }
    body
}
