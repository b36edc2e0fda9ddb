//! Terminal map: Web Mercator viewport, scale, pointer readout and a cell
//! canvas for overlays and markers.
//!
//! The projection is spherical Web Mercator with 256-pixel tiles. One terminal
//! cell stands for 8 × 16 pixels, which keeps the map roughly isotropic on
//! common terminal fonts.

use std::f64::consts::PI;

use crate::domain::{GeoBounds, GeoPoint, StatusBucket};
use crate::store::Marker;

pub const TILE_SIZE: f64 = 256.0;
pub const CELL_WIDTH_PX: f64 = 8.0;
pub const CELL_HEIGHT_PX: f64 = 16.0;

pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 20;

/// Initial view: central Goiânia.
pub const DEFAULT_CENTER: GeoPoint = GeoPoint::new(-16.681_253, -49.256_044);
pub const DEFAULT_ZOOM: u8 = 12;

/// Zoom used when a list entry is selected.
pub const FOCUS_ZOOM: u8 = 16;

/// Widest scale bar, in cells.
pub const SCALE_MAX_CELLS: usize = 12;

pub const NORTH_INDICATOR: &str = "N ↑";

/// Shown instead of the readout while the map does not have focus.
pub const POINTER_HINT: &str = "Passe o cursor sobre o mapa para ver as coordenadas";

const MAX_LATITUDE: f64 = 85.051_128_78;
const EARTH_CIRCUMFERENCE_M: f64 = 40_075_016.686;

fn world_px(zoom: u8) -> f64 {
    TILE_SIZE * f64::from(1_u32 << zoom.min(MAX_ZOOM))
}

/// Projects to global pixel coordinates at `zoom`.
#[must_use]
pub fn project(point: GeoPoint, zoom: u8) -> (f64, f64) {
    let size = world_px(zoom);
    let lat = point.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (point.lon + 180.0) / 360.0 * size;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * size;
    (x, y)
}

/// Inverse of [`project`].
#[must_use]
pub fn unproject(x: f64, y: f64, zoom: u8) -> GeoPoint {
    let size = world_px(zoom);
    let lon = x / size * 360.0 - 180.0;
    let n = PI * (1.0 - 2.0 * y / size);
    GeoPoint::new(n.sinh().atan().to_degrees(), lon)
}

/// `Lat: x | Lon: y` with six decimals.
///
/// # Examples
///
/// ```
/// use licensemap::domain::GeoPoint;
/// use licensemap::ui::map::format_readout;
///
/// assert_eq!(
///     format_readout(GeoPoint::new(-16.681253, -49.256044)),
///     "Lat: -16.681253 | Lon: -49.256044"
/// );
/// ```
#[must_use]
pub fn format_readout(point: GeoPoint) -> String {
    format!("Lat: {:.6} | Lon: {:.6}", point.lat, point.lon)
}

/// A metric scale bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleBar {
    pub meters: f64,
    /// Bar length in cells.
    pub cells: usize,
    pub label: String,
}

impl ScaleBar {
    /// The longest 1, 2 or 5 × 10ⁿ metres that fits in `max_cells`.
    #[must_use]
    pub fn fit(meters_per_cell: f64, max_cells: usize) -> Option<Self> {
        #[allow(clippy::cast_precision_loss)]
        let max_meters = meters_per_cell * max_cells as f64;
        if !max_meters.is_finite() || max_meters <= 0.0 {
            return None;
        }

        let magnitude = 10_f64.powf(max_meters.log10().floor());
        let leading = max_meters / magnitude;
        let step = if leading >= 5.0 {
            5.0
        } else if leading >= 2.0 {
            2.0
        } else {
            1.0
        };
        let meters = step * magnitude;

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let cells = ((meters / meters_per_cell).round() as usize).clamp(1, max_cells);

        let label = if meters >= 1000.0 {
            format!("{} km", meters / 1000.0)
        } else {
            format!("{meters} m")
        };

        Some(Self { meters, cells, label })
    }
}

/// What the map panel shows: a center, a zoom and a size in cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    center: GeoPoint,
    zoom: u8,
    cols: usize,
    rows: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_CENTER, DEFAULT_ZOOM)
    }
}

#[allow(clippy::cast_precision_loss)]
impl Viewport {
    #[must_use]
    pub fn new(center: GeoPoint, zoom: u8) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            cols: 0,
            rows: 0,
        }
    }

    #[must_use]
    pub const fn center(&self) -> GeoPoint {
        self.center
    }

    #[must_use]
    pub const fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Size in cells as `(cols, rows)`.
    #[must_use]
    pub const fn size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    #[must_use]
    pub const fn has_area(&self) -> bool {
        self.cols > 0 && self.rows > 0
    }

    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.cols = cols;
        self.rows = rows;
    }

    fn origin_px(&self) -> (f64, f64) {
        let (cx, cy) = project(self.center, self.zoom);
        (
            cx - self.cols as f64 * CELL_WIDTH_PX / 2.0,
            cy - self.rows as f64 * CELL_HEIGHT_PX / 2.0,
        )
    }

    /// Fractional cell coordinates of `point`; may lie outside the viewport.
    #[must_use]
    pub fn to_cell(&self, point: GeoPoint) -> (f64, f64) {
        let (x, y) = project(point, self.zoom);
        let (ox, oy) = self.origin_px();
        ((x - ox) / CELL_WIDTH_PX, (y - oy) / CELL_HEIGHT_PX)
    }

    /// The cell holding `point`, if it is on screen.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn cell_of(&self, point: GeoPoint) -> Option<(usize, usize)> {
        let (col, row) = self.to_cell(point);
        let inside = col >= 0.0 && row >= 0.0 && col < self.cols as f64 && row < self.rows as f64;
        inside.then(|| (col.floor() as usize, row.floor() as usize))
    }

    /// Geographic position at the middle of a cell.
    #[must_use]
    pub fn point_at(&self, col: usize, row: usize) -> GeoPoint {
        let (ox, oy) = self.origin_px();
        unproject(
            ox + (col as f64 + 0.5) * CELL_WIDTH_PX,
            oy + (row as f64 + 0.5) * CELL_HEIGHT_PX,
            self.zoom,
        )
    }

    /// Returns `false` when already at the maximum zoom.
    pub fn zoom_in(&mut self) -> bool {
        if self.zoom >= MAX_ZOOM {
            return false;
        }
        self.zoom += 1;
        true
    }

    /// Returns `false` when already at the minimum zoom.
    pub fn zoom_out(&mut self) -> bool {
        if self.zoom <= MIN_ZOOM {
            return false;
        }
        self.zoom -= 1;
        true
    }

    pub fn focus(&mut self, center: GeoPoint, zoom: u8) {
        self.center = center;
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Moves the center by whole cells.
    pub fn pan(&mut self, cols: i32, rows: i32) {
        let size = world_px(self.zoom);
        let (cx, cy) = project(self.center, self.zoom);
        let x = (cx + f64::from(cols) * CELL_WIDTH_PX).rem_euclid(size);
        let y = (cy + f64::from(rows) * CELL_HEIGHT_PX).clamp(0.0, size);
        self.center = unproject(x, y, self.zoom);
    }

    /// Largest zoom at which `bounds` fits, centered on it.
    ///
    /// A viewport without area keeps its zoom and only recenters.
    pub fn fit(&mut self, bounds: &GeoBounds) {
        if !self.has_area() {
            self.center = bounds.center();
            return;
        }

        let width = self.cols as f64 * CELL_WIDTH_PX;
        let height = self.rows as f64 * CELL_HEIGHT_PX;

        let zoom = (MIN_ZOOM..=MAX_ZOOM)
            .rev()
            .find(|z| {
                let (x0, y0) = project(bounds.south_west, *z);
                let (x1, y1) = project(bounds.north_east, *z);
                (x1 - x0).abs() <= width && (y0 - y1).abs() <= height
            })
            .unwrap_or(MIN_ZOOM);

        let (x0, y0) = project(bounds.south_west, zoom);
        let (x1, y1) = project(bounds.north_east, zoom);
        self.zoom = zoom;
        self.center = unproject((x0 + x1) / 2.0, (y0 + y1) / 2.0, zoom);
    }

    /// Ground distance covered by one cell at the center latitude.
    #[must_use]
    pub fn meters_per_cell(&self) -> f64 {
        EARTH_CIRCUMFERENCE_M * self.center.lat.to_radians().cos() / world_px(self.zoom) * CELL_WIDTH_PX
    }

    #[must_use]
    pub fn scale_bar(&self) -> Option<ScaleBar> {
        ScaleBar::fit(self.meters_per_cell(), SCALE_MAX_CELLS)
    }
}

/// Content of one canvas cell. Later draws win.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Blank,
    /// Part of an overlay line, by overlay index.
    Line(usize),
    Marker { bucket: StatusBucket, selected: bool },
    Cursor,
}

/// Character grid the map panel is drawn into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    #[must_use]
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::Blank; cols * rows],
        }
    }

    #[must_use]
    pub fn get(&self, col: usize, row: usize) -> Option<Cell> {
        (col < self.cols && row < self.rows).then(|| self.cells[row * self.cols + col])
    }

    fn set(&mut self, col: i64, row: i64, cell: Cell) {
        let (Ok(col), Ok(row)) = (usize::try_from(col), usize::try_from(row)) else {
            return;
        };
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col] = cell;
        }
    }

    /// Rows top to bottom.
    pub fn lines(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols.max(1)).take(self.rows)
    }

    /// Draws a polyline, clipped to the canvas.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn draw_path(&mut self, viewport: &Viewport, path: &[GeoPoint], overlay: usize) {
        let (w, h) = (self.cols as f64, self.rows as f64);
        for pair in path.windows(2) {
            let a = viewport.to_cell(pair[0]);
            let b = viewport.to_cell(pair[1]);
            let Some((a, b)) = clip_segment(a, b, w, h) else {
                continue;
            };
            for (col, row) in bresenham(
                (a.0.floor() as i64, a.1.floor() as i64),
                (b.0.floor() as i64, b.1.floor() as i64),
            ) {
                self.set(col, row, Cell::Line(overlay));
            }
        }
    }

    /// Draws a marker if it is on screen. Returns whether it was drawn.
    pub fn draw_marker(&mut self, viewport: &Viewport, marker: &Marker, selected: bool) -> bool {
        let Some((col, row)) = viewport.cell_of(marker.position) else {
            return false;
        };
        self.cells[row * self.cols + col] = Cell::Marker {
            bucket: marker.bucket,
            selected,
        };
        true
    }

    pub fn draw_cursor(&mut self, col: usize, row: usize) {
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col] = Cell::Cursor;
        }
    }
}

/// Liang–Barsky clipping of a segment to `[0, w] × [0, h]`.
fn clip_segment(a: (f64, f64), b: (f64, f64), w: f64, h: f64) -> Option<((f64, f64), (f64, f64))> {
    if ![a.0, a.1, b.0, b.1].iter().all(|v| v.is_finite()) {
        return None;
    }

    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);

    for (p, q) in [(-dx, a.0), (dx, w - a.0), (-dy, a.1), (dy, h - a.1)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some(((a.0 + t0 * dx, a.1 + t0 * dy), (a.0 + t1 * dx, a.1 + t1 * dy)))
}

fn bresenham(from: (i64, i64), to: (i64, i64)) -> Vec<(i64, i64)> {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;
    let mut points = Vec::new();

    loop {
        points.push((x, y));
        if (x, y) == to {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FeatureId;

    fn close(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn projection_round_trips_near_goiania() {
        let (x, y) = project(DEFAULT_CENTER, DEFAULT_ZOOM);
        let back = unproject(x, y, DEFAULT_ZOOM);
        assert!(close(back.lat, DEFAULT_CENTER.lat, 1e-9));
        assert!(close(back.lon, DEFAULT_CENTER.lon, 1e-9));
    }

    #[test]
    fn zero_zero_is_the_world_center() {
        let (x, y) = project(GeoPoint::new(0.0, 0.0), 0);
        assert!(close(x, 128.0, 1e-9));
        assert!(close(y, 128.0, 1e-9));
    }

    #[test]
    fn center_cell_reads_back_the_center() {
        let mut vp = Viewport::default();
        vp.resize(41, 21);
        assert_eq!(vp.cell_of(DEFAULT_CENTER), Some((20, 10)));

        let p = vp.point_at(20, 10);
        assert!(close(p.lat, DEFAULT_CENTER.lat, 1e-3));
        assert!(close(p.lon, DEFAULT_CENTER.lon, 1e-3));
    }

    #[test]
    fn zoom_is_clamped() {
        let mut vp = Viewport::new(DEFAULT_CENTER, 30);
        assert_eq!(vp.zoom(), MAX_ZOOM);
        assert!(!vp.zoom_in());
        vp.focus(DEFAULT_CENTER, 0);
        assert!(!vp.zoom_out());
        assert!(vp.zoom_in());
        assert_eq!(vp.zoom(), 1);
    }

    #[test]
    fn pan_moves_by_cells() {
        let mut vp = Viewport::default();
        vp.resize(40, 20);
        let east = vp.point_at(25, 10);
        vp.pan(5, 0);
        let (col, row) = vp.cell_of(east).unwrap();
        assert!((19..=20).contains(&col));
        assert_eq!(row, 10);
    }

    #[test]
    fn fit_contains_every_point() {
        let bounds = GeoBounds::from_points([
            GeoPoint::new(-16.75, -49.35),
            GeoPoint::new(-16.60, -49.15),
        ])
        .unwrap();

        let mut vp = Viewport::default();
        vp.resize(60, 20);
        vp.fit(&bounds);

        assert!(vp.cell_of(GeoPoint::new(-16.74, -49.34)).is_some());
        assert!(vp.cell_of(GeoPoint::new(-16.61, -49.16)).is_some());

        let tighter_zoom = vp.zoom() + 1;
        let (x0, _) = project(bounds.south_west, tighter_zoom);
        let (x1, _) = project(bounds.north_east, tighter_zoom);
        let (_, y1) = project(bounds.north_east, tighter_zoom);
        let (_, y0) = project(bounds.south_west, tighter_zoom);
        assert!(x1 - x0 > 60.0 * CELL_WIDTH_PX || y0 - y1 > 20.0 * CELL_HEIGHT_PX);
    }

    #[test]
    fn fit_single_point_goes_to_max_zoom() {
        let p = GeoPoint::new(-16.7, -49.2);
        let bounds = GeoBounds::from_points([p]).unwrap();
        let mut vp = Viewport::default();
        vp.resize(40, 20);
        vp.fit(&bounds);
        assert_eq!(vp.zoom(), MAX_ZOOM);
        assert!(close(vp.center().lat, p.lat, 1e-9));
    }

    #[test]
    fn scale_bar_picks_round_lengths() {
        let bar = ScaleBar::fit(100.0, 12).unwrap();
        assert_eq!(bar.meters, 1000.0);
        assert_eq!(bar.cells, 10);
        assert_eq!(bar.label, "1 km");

        let bar = ScaleBar::fit(30.0, 12).unwrap();
        assert_eq!(bar.meters, 200.0);
        assert_eq!(bar.label, "200 m");
        assert_eq!(bar.cells, 7);

        let bar = ScaleBar::fit(500.0, 12).unwrap();
        assert_eq!(bar.meters, 5000.0);
        assert_eq!(bar.label, "5 km");

        assert!(ScaleBar::fit(0.0, 12).is_none());
    }

    #[test]
    fn viewport_scale_shrinks_when_zooming_in() {
        let mut vp = Viewport::default();
        let far = vp.scale_bar().unwrap();
        vp.zoom_in();
        vp.zoom_in();
        let near = vp.scale_bar().unwrap();
        assert!(near.meters < far.meters);
    }

    #[test]
    fn lines_are_clipped_to_the_canvas() {
        let mut vp = Viewport::default();
        vp.resize(20, 10);
        let mut canvas = Canvas::new(20, 10);

        // a horizontal line crossing the whole view and far beyond it
        let west = vp.point_at(0, 5);
        let path = [
            GeoPoint::new(west.lat, west.lon - 1.0),
            GeoPoint::new(west.lat, west.lon + 1.0),
        ];
        canvas.draw_path(&vp, &path, 2);

        for col in 0..20 {
            assert_eq!(canvas.get(col, 5), Some(Cell::Line(2)));
        }
        assert_eq!(canvas.get(0, 4), Some(Cell::Blank));
        assert_eq!(canvas.get(20, 5), None);
    }

    #[test]
    fn off_screen_segments_draw_nothing() {
        let mut vp = Viewport::default();
        vp.resize(20, 10);
        let mut canvas = Canvas::new(20, 10);
        let path = [GeoPoint::new(10.0, 10.0), GeoPoint::new(11.0, 11.0)];
        canvas.draw_path(&vp, &path, 0);
        assert!(canvas.lines().flatten().all(|c| *c == Cell::Blank));
    }

    #[test]
    fn markers_and_cursor() {
        let mut vp = Viewport::default();
        vp.resize(20, 10);
        let mut canvas = Canvas::new(20, 10);

        let marker = Marker {
            feature: FeatureId(0),
            position: vp.point_at(3, 4),
            bucket: StatusBucket::Pending,
        };
        assert!(canvas.draw_marker(&vp, &marker, true));
        assert_eq!(
            canvas.get(3, 4),
            Some(Cell::Marker { bucket: StatusBucket::Pending, selected: true })
        );

        let away = Marker { position: GeoPoint::new(40.0, 10.0), ..marker };
        assert!(!canvas.draw_marker(&vp, &away, false));

        canvas.draw_cursor(3, 4);
        assert_eq!(canvas.get(3, 4), Some(Cell::Cursor));
        assert_eq!(canvas.lines().count(), 10);
    }

    #[test]
    fn bresenham_endpoints() {
        let pts = bresenham((0, 0), (4, 2));
        assert_eq!(pts.first(), Some(&(0, 0)));
        assert_eq!(pts.last(), Some(&(4, 2)));
        assert_eq!(pts.len(), 5);
    }
}
