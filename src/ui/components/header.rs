//! Header component renderer: title on the left, counters on the right.

use crate::ui::helpers::{fit, position_cursor, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header at the given 1-indexed row and returns the next row.
///
/// ```text
///  Pedidos de Licença Ambiental (12)      ● Aprovado 5  ● Em análise 3  ...
/// ```
///
/// Counters that do not fit are dropped from the right.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let counters: Vec<String> = header
        .counters
        .iter()
        .map(|c| format!("● {} {}", c.label, c.value))
        .collect();

    let mut shown = 0;
    let mut counters_width = 0;
    for text in &counters {
        let next = counters_width + width(text) + 2;
        if width(&header.title) + next > cols {
            break;
        }
        counters_width = next;
        shown += 1;
    }

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", fit(&header.title, cols.saturating_sub(counters_width)));

    for (info, text) in header.counters.iter().zip(&counters).take(shown) {
        print!("{}", Theme::fg(&info.color));
        print!("{text}  ");
    }

    print!("{}", Theme::reset());
    row + 1
}
