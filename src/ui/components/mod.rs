//! Composable UI component renderers.
//!
//! Each component draws one region of the [`Layout`] and knows nothing about
//! application state.
//!
//! # Components
//!
//! - [`header`]: Title and status counters
//! - [`filters`]: Status selector and search boxes
//! - [`list`]: Filtered entries, three lines each
//! - [`map`]: Canvas, readout, scale, legend and layer toggles
//! - [`callout`]: Detail box drawn over the map
//! - [`footer`]: Keybinding hints
//! - [`empty`]: Loading message
//!
//! # Layout
//!
//! ```text
//! [Header]
//! [Filter bar]
//! [Border]
//! [List] │ [Map canvas + callout]
//!        │ [Map info]
//! [Border]
//! [Footer]
//! ```
//!
//! [`Layout`]: crate::ui::layout::Layout

mod callout;
mod empty;
mod filters;
mod footer;
mod header;
mod list;
mod map;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use callout::render_callout;
use empty::render_empty_state;
use filters::render_filter_bar;
use footer::render_footer;
use header::render_header;
use list::render_list;
use map::render_map;

/// Renders a horizontal border line at the specified 1-indexed row and
/// returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Draws the vertical line between list and map for `height` rows starting
/// at the 0-indexed `top`.
fn render_separator(col: usize, top: usize, height: usize, color: &str) {
    print!("{}", Theme::fg(color));
    for row in top..top + height {
        position_cursor(row + 1, col + 1);
        print!("│");
    }
    print!("{}", Theme::reset());
}

/// Renders the full screen.
///
/// The empty state, when present, replaces the list and map; header, filter
/// bar and footer are always drawn.
pub fn render_main(vm: &UIViewModel, theme: &Theme, cols: usize) {
    let layout = &vm.layout;

    if layout.header.height > 0 {
        render_header(layout.header.y + 1, &vm.header, theme, cols);
    }
    if layout.filters.height > 0 {
        let next = render_filter_bar(layout.filters.y + 1, &vm.filters, theme, cols);
        if layout.footer.height > 0 {
            render_border(next, &theme.colors.border, cols);
        }
    }

    if let Some(empty) = &vm.empty_state {
        let body = &layout.list;
        for row in body.y..body.y + body.height {
            position_cursor(row + 1, 1);
            print!("{}", " ".repeat(cols));
        }
        if body.height >= 2 {
            render_empty_state(body.y + body.height / 2, empty, theme, cols);
        }
    } else {
        render_list(&layout.list, &vm.list, theme);
        if layout.map.width > 0 {
            render_separator(
                layout.separator,
                layout.list.y,
                layout.list.height,
                &theme.colors.border,
            );
            render_map(&layout.map, &layout.map_info, &vm.map, theme);
        }
        if let Some(callout) = &vm.callout {
            render_callout(&layout.map, callout, theme);
        }
    }

    if layout.footer.height > 0 {
        // footer.y is 0-indexed, so it is also the 1-indexed row above it
        render_border(layout.footer.y, &theme.colors.border, cols);
        render_footer(layout.footer.y + 1, &vm.footer, theme, cols);
    }
}
