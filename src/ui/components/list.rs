//! List panel component renderer.
//!
//! Each entry takes three lines: enterprise, process and status, validity.
//! The selected entry is drawn on the selection background.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::layout::{Rect, LIST_ENTRY_HEIGHT};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ListRow;

/// Renders the visible list rows into `area`, blanking unused lines.
pub fn render_list(area: &Rect, rows: &[ListRow], theme: &Theme) {
    let mut line = 0;

    for row in rows {
        if line + LIST_ENTRY_HEIGHT > area.height {
            break;
        }
        match row {
            ListRow::Entry {
                title,
                detail,
                status_color,
                validity,
                validity_color,
                is_selected,
            } => {
                let lines = [
                    (title.as_str(), theme.colors.text_normal.as_str(), true),
                    (detail.as_str(), status_color.as_str(), false),
                    (validity.as_str(), validity_color.as_str(), false),
                ];
                for (offset, (text, color, bold)) in lines.into_iter().enumerate() {
                    render_line(area, line + offset, text, color, bold, *is_selected, theme);
                }
            }
            ListRow::Placeholder(message) => {
                render_line(area, line, message, &theme.colors.empty_state_fg, false, false, theme);
                render_line(area, line + 1, "", &theme.colors.text_normal, false, false, theme);
                render_line(area, line + 2, "", &theme.colors.text_normal, false, false, theme);
            }
        }
        line += LIST_ENTRY_HEIGHT;
    }

    for blank in line..area.height {
        render_line(area, blank, "", &theme.colors.text_normal, false, false, theme);
    }
}

fn render_line(area: &Rect, line: usize, text: &str, color: &str, bold: bool, selected: bool, theme: &Theme) {
    position_cursor(area.y + line + 1, area.x + 1);

    if selected {
        print!("{}", Theme::bg(&theme.colors.selection_bg));
        print!("{}", Theme::fg(&theme.colors.selection_fg));
    } else {
        print!("{}", Theme::fg(color));
    }
    if bold {
        print!("{}", Theme::bold());
    }

    print!("{}", fit(&format!(" {text}"), area.width));
    print!("{}", Theme::reset());
}
