//! Application state: the loaded features, the filter inputs, the synchronized
//! views and the map viewport.
//!
//! `AppState` is the application context. It is built once from the
//! configuration, receives the dataset and overlays from the worker, and is
//! then mutated only by the event handler.
//!
//! # Example
//!
//! ```rust
//! use licensemap::app::AppState;
//! use licensemap::domain::{GeoPoint, Record};
//! use licensemap::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! state.replace_records(vec![Record::at(GeoPoint::new(-16.68, -49.25))]);
//! assert_eq!(state.outcome.included.len(), 1);
//! ```

use chrono::NaiveDate;

use super::modes::{Focus, InputMode, SearchField};
use crate::domain::filter::{self, FilterCriteria, FilterOutcome};
use crate::domain::{GeoPoint, Record, StatusBucket};
use crate::store::{FeatureId, FeatureStore, Overlay, OverlaySpec};
use crate::ui::layout::{list_window, Layout};
use crate::ui::map::{Viewport, DEFAULT_CENTER, DEFAULT_ZOOM, FOCUS_ZOOM};
use crate::ui::sync::{self, ListEntry, ViewLayers};
use crate::ui::theme::Theme;
use crate::worker::WorkerMessage;

/// Progress of the primary dataset load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
    /// Logged; the map stays empty.
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayState {
    Pending,
    Loaded(Overlay),
    /// Logged; never offered as a toggle.
    Failed,
}

/// One configured overlay, kept in configuration order.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySlot {
    pub spec: OverlaySpec,
    pub state: OverlayState,
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Every loaded record with its marker. Empty until the dataset arrives.
    pub store: FeatureStore,

    pub criteria: FilterCriteria,

    /// Result of the last filter pass.
    pub outcome: FilterOutcome,

    /// Markers, list and counters as last synchronized from `outcome`.
    pub layers: ViewLayers,

    pub load_state: LoadState,

    pub overlays: Vec<OverlaySlot>,

    /// Whether the application markers are drawn and clickable.
    pub markers_visible: bool,

    /// Resolved path of the primary dataset.
    pub dataset_path: String,

    pub viewport: Viewport,

    /// Map cursor, in canvas cells.
    pub cursor: (usize, usize),

    pub focus: Focus,

    pub input_mode: InputMode,

    /// Index into the list panel.
    pub selected_index: usize,

    /// Feature whose detail callout is open.
    pub callout: Option<FeatureId>,

    pub theme: Theme,

    today: Option<NaiveDate>,
    pending_fit: bool,
    screen: (usize, usize),
}

impl AppState {
    /// Creates an empty state showing all four counters and the default view.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            store: FeatureStore::default(),
            criteria: FilterCriteria::default(),
            outcome: FilterOutcome::default(),
            layers: ViewLayers::new(&StatusBucket::COUNTED),
            load_state: LoadState::Loading,
            overlays: Vec::new(),
            markers_visible: true,
            dataset_path: String::new(),
            viewport: Viewport::new(DEFAULT_CENTER, DEFAULT_ZOOM),
            cursor: (0, 0),
            focus: Focus::List,
            input_mode: InputMode::Normal,
            selected_index: 0,
            callout: None,
            theme,
            today: None,
            pending_fit: false,
            screen: (0, 0),
        }
    }

    #[must_use]
    pub fn with_dataset(mut self, path: impl Into<String>) -> Self {
        self.dataset_path = path.into();
        self
    }

    /// Registers overlays; each waits for its own load.
    #[must_use]
    pub fn with_overlays(mut self, specs: Vec<OverlaySpec>) -> Self {
        self.overlays = specs
            .into_iter()
            .map(|spec| OverlaySlot {
                spec,
                state: OverlayState::Pending,
            })
            .collect();
        self
    }

    /// Limits which counters exist on screen.
    #[must_use]
    pub fn with_counters(mut self, counters: &[StatusBucket]) -> Self {
        self.layers = ViewLayers::new(counters);
        self
    }

    #[must_use]
    pub fn with_initial_view(mut self, center: GeoPoint, zoom: u8) -> Self {
        let (cols, rows) = self.viewport.size();
        self.viewport = Viewport::new(center, zoom);
        self.viewport.resize(cols, rows);
        self
    }

    /// Pins the reference date used for validity classes.
    #[must_use]
    pub const fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// One dataset load plus one load per configured overlay.
    #[must_use]
    pub fn load_requests(&self) -> Vec<WorkerMessage> {
        std::iter::once(WorkerMessage::load_dataset(self.dataset_path.clone()))
            .chain(
                self.overlays
                    .iter()
                    .enumerate()
                    .map(|(idx, slot)| WorkerMessage::load_overlay(idx, slot.spec.clone())),
            )
            .collect()
    }

    #[must_use]
    pub fn layout(&self) -> Layout {
        Layout::compute(self.screen.0, self.screen.1)
    }

    /// Records the plugin pane size and resizes the map to its panel.
    pub fn set_screen(&mut self, rows: usize, cols: usize) {
        self.screen = (rows, cols);
        let map = self.layout().map;

        if self.viewport.size() != (map.width, map.height) {
            self.viewport.resize(map.width, map.height);
            self.cursor = (map.width / 2, map.height / 2);
        }

        if self.pending_fit && self.viewport.has_area() {
            self.fit_to_data();
        }
    }

    /// Re-evaluates the filter and resynchronizes markers, list and counters.
    pub fn refilter(&mut self) {
        self.outcome = filter::apply(&self.criteria, &self.store);
        sync::synchronize(&self.store, &self.outcome, self.today(), &mut self.layers);

        let entries = self.outcome.included.len();
        self.selected_index = self.selected_index.min(entries.saturating_sub(1));

        if let Some(feature) = self.callout {
            if !self.outcome.included.contains(&feature) {
                tracing::debug!(feature = feature.0, "callout target filtered out");
                self.callout = None;
            }
        }

        tracing::debug!(included = entries, "filter applied");
    }

    /// Installs a freshly loaded dataset and fits the map to it.
    pub fn replace_records(&mut self, records: Vec<Record>) {
        self.store = FeatureStore::from_records(records);
        self.load_state = LoadState::Loaded;
        self.selected_index = 0;
        self.callout = None;
        self.refilter();

        self.pending_fit = true;
        if self.viewport.has_area() {
            self.fit_to_data();
        }
    }

    /// Leaves the map empty after a failed primary load.
    pub fn dataset_failed(&mut self) {
        self.store = FeatureStore::default();
        self.load_state = LoadState::Failed;
        self.callout = None;
        self.refilter();
    }

    /// Fits the viewport to every loaded record.
    ///
    /// Returns `false`, keeping the current view, when there is nothing to fit.
    pub fn fit_to_data(&mut self) -> bool {
        self.pending_fit = false;
        match self.store.bounds() {
            Ok(bounds) => {
                self.viewport.fit(&bounds);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot fit map to data, keeping current view");
                false
            }
        }
    }

    /// Number of list entries (placeholders excluded).
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.outcome.included.len()
    }

    pub fn move_selection_down(&mut self) {
        let count = self.entry_count();
        if count == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % count;
    }

    pub fn move_selection_up(&mut self) {
        let count = self.entry_count();
        if count == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = count - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    #[must_use]
    pub fn selected_entry(&self) -> Option<&ListEntry> {
        self.layers.entry(self.selected_index)
    }

    /// Selects a list entry: centers the map on it at focus zoom and opens its
    /// callout. Returns `false` if `index` is not an entry.
    pub fn select_index(&mut self, index: usize) -> bool {
        let Some((feature, target)) = self.layers.entry(index).map(|e| (e.feature, e.target)) else {
            return false;
        };

        tracing::debug!(feature = feature.0, lat = target.lat, lon = target.lon, "entry selected");
        self.selected_index = index;
        self.viewport.focus(target, FOCUS_ZOOM);
        let (cols, rows) = self.viewport.size();
        self.cursor = (cols / 2, rows / 2);
        self.callout = Some(feature);
        true
    }

    /// Opens the callout for a marker and selects its list entry.
    pub fn open_callout(&mut self, feature: FeatureId) {
        self.callout = Some(feature);
        if let Some(position) = self.layers.position_of(feature) {
            self.selected_index = position;
        }
    }

    /// Returns whether a callout was open.
    pub fn close_callout(&mut self) -> bool {
        self.callout.take().is_some()
    }

    /// Topmost marker drawn in the cell, or failing that in a neighbouring one.
    #[must_use]
    pub fn marker_near(&self, col: usize, row: usize) -> Option<FeatureId> {
        if !self.markers_visible {
            return None;
        }
        let within = |radius: usize| {
            self.layers
                .markers()
                .iter()
                .rev()
                .find(|marker| {
                    self.viewport
                        .cell_of(marker.position)
                        .is_some_and(|(c, r)| c.abs_diff(col) <= radius && r.abs_diff(row) <= radius)
                })
                .map(|marker| marker.feature)
        };
        within(0).or_else(|| within(1))
    }

    /// Moves the map cursor; movement past the edge pans the map instead.
    pub fn move_cursor(&mut self, dx: i32, dy: i32) {
        let (cols, rows) = self.viewport.size();
        if cols == 0 || rows == 0 {
            return;
        }

        let (col, pan_x) = step(self.cursor.0, dx, cols);
        let (row, pan_y) = step(self.cursor.1, dy, rows);
        self.cursor = (col, row);
        if pan_x != 0 || pan_y != 0 {
            self.viewport.pan(pan_x, pan_y);
        }
    }

    /// Places the cursor on a canvas cell, clamped to the canvas.
    pub fn place_cursor(&mut self, col: usize, row: usize) {
        let (cols, rows) = self.viewport.size();
        self.cursor = (col.min(cols.saturating_sub(1)), row.min(rows.saturating_sub(1)));
    }

    /// Geographic position under the map cursor.
    #[must_use]
    pub fn cursor_position(&self) -> Option<GeoPoint> {
        self.viewport
            .has_area()
            .then(|| self.viewport.point_at(self.cursor.0, self.cursor.1))
    }

    /// Loaded overlays in configuration order; the layer toggle list.
    pub fn toggles(&self) -> impl Iterator<Item = &Overlay> {
        self.overlays.iter().filter_map(|slot| match &slot.state {
            OverlayState::Loaded(overlay) => Some(overlay),
            OverlayState::Pending | OverlayState::Failed => None,
        })
    }

    /// Shows or hides the application markers. Hiding them closes the callout;
    /// the list and counters are unaffected.
    pub fn toggle_markers(&mut self) {
        self.markers_visible = !self.markers_visible;
        if !self.markers_visible {
            self.callout = None;
        }
        tracing::debug!(visible = self.markers_visible, "marker layer toggled");
    }

    /// Flips the visibility of the `n`th toggle (0-based).
    pub fn toggle_overlay(&mut self, n: usize) -> bool {
        let Some(overlay) = self
            .overlays
            .iter_mut()
            .filter_map(|slot| match &mut slot.state {
                OverlayState::Loaded(overlay) => Some(overlay),
                OverlayState::Pending | OverlayState::Failed => None,
            })
            .nth(n)
        else {
            return false;
        };

        overlay.visible = !overlay.visible;
        tracing::debug!(overlay = %overlay.name, visible = overlay.visible, "overlay toggled");
        true
    }

    /// Stores a loaded overlay in configuration slot `slot`.
    ///
    /// Slots are addressed by position, so overlays sharing a name load
    /// independently.
    pub fn overlay_loaded(&mut self, slot: usize, overlay: Overlay) -> bool {
        match self.overlays.get_mut(slot) {
            Some(target) => {
                target.state = OverlayState::Loaded(overlay);
                true
            }
            None => {
                tracing::debug!(slot, overlay = %overlay.name, "ignoring unconfigured overlay");
                false
            }
        }
    }

    pub fn overlay_failed(&mut self, slot: usize) {
        if let Some(target) = self.overlays.get_mut(slot) {
            target.state = OverlayState::Failed;
        }
    }

    /// First list index currently on screen.
    #[must_use]
    pub fn list_offset(&self) -> usize {
        list_window(
            self.selected_index,
            self.layers.list().len(),
            self.layout().list_capacity(),
        )
    }

    pub fn query_mut(&mut self, field: SearchField) -> &mut String {
        match field {
            SearchField::Process => &mut self.criteria.process_query,
            SearchField::Enterprise => &mut self.criteria.enterprise_query,
        }
    }
}

/// Moves `pos` by `delta` within `0..len`; returns the new position and the
/// part of the move that did not fit.
#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn step(pos: usize, delta: i32, len: usize) -> (usize, i32) {
    let target = pos as i64 + i64::from(delta);
    let clamped = target.clamp(0, len as i64 - 1);
    (clamped as usize, (target - clamped) as i32)
}
