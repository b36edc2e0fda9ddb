//! Screen regions and mouse hit testing.
//!
//! ```text
//! row 0        header: title and counters
//! row 1        filter bar: status, process search, enterprise search
//! row 2        border
//! rows 3..     list │ map canvas
//!                   │ map info (readout, legend, layer toggles)
//! rows-2       border
//! rows-1       footer
//! ```
//!
//! All coordinates here are 0-indexed; the renderer adds one when it moves the
//! terminal cursor.

/// Lines taken by one list entry.
pub const LIST_ENTRY_HEIGHT: usize = 3;

/// Lines under the map canvas: readout and scale, legend, layer toggles.
pub const MAP_INFO_ROWS: usize = 3;

pub const MIN_LIST_WIDTH: usize = 30;
pub const MAX_LIST_WIDTH: usize = 56;

const BODY_TOP: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    #[must_use]
    pub const fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.y && row < self.y + self.height && col >= self.x && col < self.x + self.width
    }
}

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Visible list slot, counted from the top of the list panel.
    ListSlot(usize),
    /// Canvas cell.
    Map { col: usize, row: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Layout {
    pub header: Rect,
    pub filters: Rect,
    pub list: Rect,
    /// Column of the vertical line between list and map.
    pub separator: usize,
    pub map: Rect,
    pub map_info: Rect,
    pub footer: Rect,
}

impl Layout {
    /// Splits a `rows` × `cols` screen.
    ///
    /// The list takes two fifths of the width within
    /// [`MIN_LIST_WIDTH`]..=[`MAX_LIST_WIDTH`]; tiny screens degrade to empty
    /// rectangles rather than failing.
    #[must_use]
    pub fn compute(rows: usize, cols: usize) -> Self {
        let body_height = rows.saturating_sub(BODY_TOP + 2);
        let list_width = (cols * 2 / 5).clamp(MIN_LIST_WIDTH, MAX_LIST_WIDTH).min(cols);
        let map_x = (list_width + 1).min(cols);
        let map_width = cols.saturating_sub(map_x);
        let canvas_height = body_height.saturating_sub(MAP_INFO_ROWS);

        Self {
            header: Rect { x: 0, y: 0, width: cols, height: rows.min(1) },
            filters: Rect { x: 0, y: 1, width: cols, height: usize::from(rows > 1) },
            list: Rect { x: 0, y: BODY_TOP, width: list_width, height: body_height },
            separator: list_width,
            map: Rect { x: map_x, y: BODY_TOP, width: map_width, height: canvas_height },
            map_info: Rect {
                x: map_x,
                y: BODY_TOP + canvas_height,
                width: map_width,
                height: body_height - canvas_height,
            },
            footer: Rect { x: 0, y: rows.saturating_sub(1), width: cols, height: usize::from(rows > BODY_TOP) },
        }
    }

    /// How many whole list entries fit.
    #[must_use]
    pub const fn list_capacity(&self) -> usize {
        self.list.height / LIST_ENTRY_HEIGHT
    }

    #[must_use]
    pub const fn hit(&self, row: usize, col: usize) -> Option<Hit> {
        if self.list.contains(row, col) {
            return Some(Hit::ListSlot((row - self.list.y) / LIST_ENTRY_HEIGHT));
        }
        if self.map.contains(row, col) {
            return Some(Hit::Map {
                col: col - self.map.x,
                row: row - self.map.y,
            });
        }
        None
    }
}

/// First visible list index, keeping `selected` near the middle.
#[must_use]
pub fn list_window(selected: usize, total: usize, capacity: usize) -> usize {
    if capacity == 0 || total <= capacity {
        return 0;
    }
    selected.saturating_sub(capacity / 2).min(total - capacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_tile_the_screen() {
        let layout = Layout::compute(30, 100);

        assert_eq!(layout.list, Rect { x: 0, y: 3, width: 40, height: 25 });
        assert_eq!(layout.separator, 40);
        assert_eq!(layout.map, Rect { x: 41, y: 3, width: 59, height: 22 });
        assert_eq!(layout.map_info.y, 25);
        assert_eq!(layout.map_info.height, MAP_INFO_ROWS);
        assert_eq!(layout.footer.y, 29);
        assert_eq!(layout.list_capacity(), 8);
    }

    #[test]
    fn list_width_is_clamped() {
        assert_eq!(Layout::compute(30, 60).list.width, MIN_LIST_WIDTH);
        assert_eq!(Layout::compute(30, 200).list.width, MAX_LIST_WIDTH);
        assert_eq!(Layout::compute(30, 20).list.width, 20);
        assert_eq!(Layout::compute(30, 20).map.width, 0);
    }

    #[test]
    fn tiny_screens_do_not_underflow() {
        let layout = Layout::compute(2, 10);
        assert_eq!(layout.list.height, 0);
        assert_eq!(layout.map.height, 0);
        assert_eq!(layout.list_capacity(), 0);
        assert_eq!(layout.hit(1, 1), None);
    }

    #[test]
    fn hits() {
        let layout = Layout::compute(30, 100);
        assert_eq!(layout.hit(3, 5), Some(Hit::ListSlot(0)));
        assert_eq!(layout.hit(8, 5), Some(Hit::ListSlot(1)));
        assert_eq!(layout.hit(3, 41), Some(Hit::Map { col: 0, row: 0 }));
        assert_eq!(layout.hit(10, 50), Some(Hit::Map { col: 9, row: 7 }));
        assert_eq!(layout.hit(3, 40), None);
        assert_eq!(layout.hit(0, 5), None);
        assert_eq!(layout.hit(26, 50), None);
    }

    #[test]
    fn window_follows_selection() {
        assert_eq!(list_window(0, 5, 8), 0);
        assert_eq!(list_window(0, 20, 8), 0);
        assert_eq!(list_window(10, 20, 8), 6);
        assert_eq!(list_window(19, 20, 8), 12);
        assert_eq!(list_window(3, 20, 0), 0);
    }
}
