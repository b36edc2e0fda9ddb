//! Map panel component renderer: canvas, readout, scale, north, legend and
//! layer toggles.

use crate::ui::helpers::{fit, position_cursor, truncate, width};
use crate::ui::layout::Rect;
use crate::ui::map::{Canvas, Cell};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::MapInfo;

const LINE_GLYPH: char = '·';
const MARKER_GLYPH: char = '●';
const SELECTED_GLYPH: char = '◉';
const CURSOR_GLYPH: char = '+';

/// Renders the canvas into `canvas_area` and the three info lines into
/// `info_area`.
pub fn render_map(canvas_area: &Rect, info_area: &Rect, map: &MapInfo, theme: &Theme) {
    render_canvas(canvas_area, &map.canvas, &map.overlay_colors, theme);

    if info_area.height == 0 || info_area.width == 0 {
        return;
    }
    render_status_line(info_area, map, theme);
    if info_area.height > 1 {
        render_legend(info_area, map, theme);
    }
    if info_area.height > 2 {
        render_toggles(info_area, map, theme);
    }
}

fn render_canvas(area: &Rect, canvas: &Canvas, overlay_colors: &[String], theme: &Theme) {
    for (row, cells) in canvas.lines().enumerate().take(area.height) {
        position_cursor(area.y + row + 1, area.x + 1);

        // one escape per colour run rather than per cell
        let mut current: Option<&str> = None;
        for cell in cells.iter().take(area.width) {
            let (glyph, color) = match cell {
                Cell::Blank => (' ', None),
                Cell::Line(idx) => (LINE_GLYPH, overlay_colors.get(*idx).map(String::as_str)),
                Cell::Marker { bucket, selected } => (
                    if *selected { SELECTED_GLYPH } else { MARKER_GLYPH },
                    Some(theme.status_color(*bucket)),
                ),
                Cell::Cursor => (CURSOR_GLYPH, Some(theme.colors.cursor_fg.as_str())),
            };

            if let Some(color) = color {
                if current != Some(color) {
                    print!("{}", Theme::fg(color));
                    current = Some(color);
                }
            }
            print!("{glyph}");
        }
        print!("{}", Theme::reset());
    }
}

/// `Lat: … | Lon: …` on the left, `├──────┤ 500 m   N ↑` on the right.
fn render_status_line(area: &Rect, map: &MapInfo, theme: &Theme) {
    let scale = map
        .scale
        .as_ref()
        .map(|bar| format!("├{}┤ {}", "─".repeat(bar.cells.saturating_sub(2)), bar.label))
        .unwrap_or_default();
    let right = format!("{scale}   {} ", map.north);
    let left_width = area.width.saturating_sub(width(&right));

    position_cursor(area.y + 1, area.x + 1);
    let readout_color = if map.focused {
        &theme.colors.text_normal
    } else {
        &theme.colors.text_dim
    };
    print!("{}", Theme::fg(readout_color));
    print!("{}", fit(&format!(" {}", map.readout), left_width));
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{}", truncate(&right, area.width.saturating_sub(left_width)));
    print!("{}", Theme::reset());
}

fn render_legend(area: &Rect, map: &MapInfo, theme: &Theme) {
    position_cursor(area.y + 2, area.x + 1);
    let mut used = 0;
    for item in &map.legend {
        let text = format!(" ● {}", item.label);
        if used + width(&text) > area.width {
            break;
        }
        print!("{}", Theme::fg(&item.color));
        print!(" ●");
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!(" {}", item.label);
        used += width(&text);
    }
    print!("{}", " ".repeat(area.width.saturating_sub(used)));
    print!("{}", Theme::reset());
}

/// `[0] Pedidos de Licença ☑  [1] Bairros ☐  [2] Hidrografia ☑`
fn render_toggles(area: &Rect, map: &MapInfo, theme: &Theme) {
    position_cursor(area.y + 3, area.x + 1);
    let mut used = 0;
    for toggle in &map.toggles {
        let mark = if toggle.visible { '☑' } else { '☐' };
        let text = format!(" [{}] {} {mark} ", toggle.key, toggle.name);
        if used + width(&text) > area.width {
            break;
        }
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!(" [{}] ", toggle.key);
        print!("{}", Theme::fg(&toggle.color));
        print!("{}", toggle.name);
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!(" {mark} ");
        used += width(&text);
    }
    print!("{}", " ".repeat(area.width.saturating_sub(used)));
    print!("{}", Theme::reset());
}
