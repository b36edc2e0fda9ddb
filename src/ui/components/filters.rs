//! Filter bar component renderer: status selector and the two search boxes.

use crate::ui::helpers::{position_cursor, truncate, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FilterBarInfo, SearchBoxInfo};

/// Visible columns of a search box's text.
const QUERY_WIDTH: usize = 18;

const CLEAR_HINT: &str = "   c: limpar filtros";

/// Renders the filter bar at the given 1-indexed row and returns the next row.
///
/// ```text
///  Status: ‹Pendente›   Processo: [123▏              ]   Empreendimento: [                  ]   c: limpar filtros
/// ```
///
/// The clear hint only appears while a filter is active.
pub fn render_filter_bar(row: usize, filters: &FilterBarInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let status = format!(" Status: ‹{}›", filters.status);
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{status}");
    let mut used = width(&status);

    for search in [&filters.process, &filters.enterprise] {
        used += render_search_box(search, theme, cols.saturating_sub(used));
    }

    if filters.active && used + width(CLEAR_HINT) <= cols {
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{CLEAR_HINT}");
        used += width(CLEAR_HINT);
    }

    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{}", " ".repeat(cols.saturating_sub(used)));
    print!("{}", Theme::reset());
    row + 1
}

/// Prints one box within `room` columns and returns the columns used.
fn render_search_box(search: &SearchBoxInfo, theme: &Theme, room: usize) -> usize {
    let label = format!("   {}: ", search.label);
    let needed = width(&label) + QUERY_WIDTH + 2;
    if needed > room {
        return 0;
    }

    let frame = if search.editing {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    // keep the tail of long queries visible while typing
    let query: String = {
        let chars: Vec<char> = search.query.chars().collect();
        let room_for_text = QUERY_WIDTH - usize::from(search.editing);
        chars[chars.len().saturating_sub(room_for_text)..].iter().collect()
    };
    let caret = if search.editing { "▏" } else { "" };
    let text = truncate(&format!("{query}{caret}"), QUERY_WIDTH);

    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{label}");
    print!("{}", Theme::fg(frame));
    print!("[");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{text}{}", " ".repeat(QUERY_WIDTH.saturating_sub(width(&text))));
    print!("{}", Theme::fg(frame));
    print!("]");

    needed
}
