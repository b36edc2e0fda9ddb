//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point for user input, permission
//! results and worker responses. It mutates [`AppState`] and returns whether
//! the UI should re-render plus the side effects to run.
//!
//! # Example
//!
//! ```rust
//! use licensemap::app::{handle_event, AppState, Event};
//! use licensemap::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::CycleStatus { forward: true })?;
//! assert!(render);
//! assert!(actions.is_empty());
//! # Ok::<(), licensemap::LicenseMapError>(())
//! ```

use crate::app::modes::{Focus, InputMode, SearchField};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::FilterCriteria;
use crate::ui::layout::Hit;
use crate::worker::WorkerResponse;

/// Events triggered by user input, system changes, or worker responses.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Next list entry (wraps).
    KeyDown,
    /// Previous list entry (wraps).
    KeyUp,
    /// Shows the selected list entry on the map.
    SelectEntry,
    /// Opens the callout of the marker under the map cursor.
    SelectAtCursor,
    CloseCallout,
    /// Hides the plugin pane.
    CloseFocus,

    /// Steps the status selector.
    CycleStatus { forward: bool },
    /// Starts editing a search field.
    EditSearch(SearchField),
    /// Appends to the search field being edited.
    Char(char),
    Backspace,
    /// Stops editing; the query stays applied.
    ExitSearch,
    /// Resets status and both searches.
    ClearFilters,

    /// Switches navigation between list and map.
    ToggleFocus,
    MoveCursor { dx: i32, dy: i32 },
    Pan { dx: i32, dy: i32 },
    ZoomIn,
    ZoomOut,
    FitToData,
    /// Flips the `n`th overlay toggle (0-based).
    ToggleOverlay(usize),
    /// Shows or hides the application markers.
    ToggleMarkers,

    /// Left click at a pane position (0-indexed).
    MouseClick { row: usize, col: usize },
    Scroll { up: bool },

    /// Answer to the filesystem permission request.
    PermissionsResult { granted: bool },

    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Errors
///
/// Reserved for failures while processing; every current event degrades to
/// logging instead.
#[allow(clippy::cognitive_complexity, clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = %event_name(event)).entered();

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::SelectEntry => {
            let index = state.selected_index;
            if state.select_index(index) {
                Ok((true, vec![]))
            } else {
                tracing::debug!("no entry selected");
                Ok((false, vec![]))
            }
        }
        Event::SelectAtCursor => {
            let (col, row) = state.cursor;
            match state.marker_near(col, row) {
                Some(feature) => {
                    state.open_callout(feature);
                    Ok((true, vec![]))
                }
                None => Ok((state.close_callout(), vec![])),
            }
        }
        Event::CloseCallout => Ok((state.close_callout(), vec![])),
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),

        Event::CycleStatus { forward } => {
            state.criteria.status = if *forward {
                state.criteria.status.next()
            } else {
                state.criteria.status.previous()
            };
            tracing::debug!(status = state.criteria.status.label(), "status filter changed");
            state.refilter();
            Ok((true, vec![]))
        }
        Event::EditSearch(field) => {
            state.input_mode = InputMode::Search(*field);
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            let InputMode::Search(field) = state.input_mode else {
                return Ok((false, vec![]));
            };
            state.query_mut(field).push(*c);
            tracing::trace!(field = ?field, char = %c, "search query updated");
            state.refilter();
            Ok((true, vec![]))
        }
        Event::Backspace => {
            let InputMode::Search(field) = state.input_mode else {
                return Ok((false, vec![]));
            };
            if state.query_mut(field).pop().is_none() {
                return Ok((false, vec![]));
            }
            state.refilter();
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::ClearFilters => {
            if state.criteria == FilterCriteria::default() {
                return Ok((false, vec![]));
            }
            state.criteria = FilterCriteria::default();
            state.input_mode = InputMode::Normal;
            state.refilter();
            Ok((true, vec![]))
        }

        Event::ToggleFocus => {
            state.focus = state.focus.toggled();
            Ok((true, vec![]))
        }
        Event::MoveCursor { dx, dy } => {
            state.focus = Focus::Map;
            state.move_cursor(*dx, *dy);
            Ok((true, vec![]))
        }
        Event::Pan { dx, dy } => {
            state.viewport.pan(*dx, *dy);
            Ok((true, vec![]))
        }
        Event::ZoomIn => Ok((state.viewport.zoom_in(), vec![])),
        Event::ZoomOut => Ok((state.viewport.zoom_out(), vec![])),
        Event::FitToData => Ok((state.fit_to_data(), vec![])),
        Event::ToggleOverlay(n) => Ok((state.toggle_overlay(*n), vec![])),
        Event::ToggleMarkers => {
            state.toggle_markers();
            Ok((true, vec![]))
        }

        Event::MouseClick { row, col } => match state.layout().hit(*row, *col) {
            Some(Hit::ListSlot(slot)) => {
                state.focus = Focus::List;
                let index = state.list_offset() + slot;
                Ok((state.select_index(index), vec![]))
            }
            Some(Hit::Map { col, row }) => {
                state.focus = Focus::Map;
                state.place_cursor(col, row);
                match state.marker_near(col, row) {
                    Some(feature) => {
                        tracing::debug!(feature = feature.0, "marker clicked");
                        state.open_callout(feature);
                    }
                    None => {
                        state.close_callout();
                    }
                }
                Ok((true, vec![]))
            }
            None => Ok((false, vec![])),
        },
        Event::Scroll { up } => {
            match (state.focus, *up) {
                (Focus::List, true) => state.move_selection_up(),
                (Focus::List, false) => state.move_selection_down(),
                (Focus::Map, true) => {
                    state.viewport.zoom_in();
                }
                (Focus::Map, false) => {
                    state.viewport.zoom_out();
                }
            }
            Ok((true, vec![]))
        }

        Event::PermissionsResult { granted } => {
            if *granted {
                tracing::debug!(overlays = state.overlays.len(), "permissions granted, requesting loads");
                let actions = state
                    .load_requests()
                    .into_iter()
                    .map(Action::PostToWorker)
                    .collect();
                Ok((false, actions))
            } else {
                tracing::warn!("permissions denied, dataset cannot be read");
                Ok((false, vec![]))
            }
        }

        Event::WorkerResponse(response) => match response {
            WorkerResponse::DatasetLoaded { records } => {
                tracing::debug!(records = records.len(), "dataset loaded");
                state.replace_records(records.clone());
                Ok((true, vec![]))
            }
            WorkerResponse::DatasetFailed { message } => {
                tracing::error!(error = %message, path = %state.dataset_path, "failed to load dataset");
                state.dataset_failed();
                Ok((true, vec![]))
            }
            WorkerResponse::OverlayLoaded { slot, overlay } => {
                tracing::debug!(slot, overlay = %overlay.name, paths = overlay.paths.len(), "overlay loaded");
                Ok((state.overlay_loaded(*slot, overlay.clone()), vec![]))
            }
            WorkerResponse::OverlayFailed { slot, name, message } => {
                tracing::error!(slot, overlay = %name, error = %message, "failed to load overlay");
                state.overlay_failed(*slot);
                Ok((false, vec![]))
            }
        },
    }
}

/// Variant name without payload, for span fields.
const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::KeyDown => "KeyDown",
        Event::KeyUp => "KeyUp",
        Event::SelectEntry => "SelectEntry",
        Event::SelectAtCursor => "SelectAtCursor",
        Event::CloseCallout => "CloseCallout",
        Event::CloseFocus => "CloseFocus",
        Event::CycleStatus { .. } => "CycleStatus",
        Event::EditSearch(_) => "EditSearch",
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::ExitSearch => "ExitSearch",
        Event::ClearFilters => "ClearFilters",
        Event::ToggleFocus => "ToggleFocus",
        Event::MoveCursor { .. } => "MoveCursor",
        Event::Pan { .. } => "Pan",
        Event::ZoomIn => "ZoomIn",
        Event::ZoomOut => "ZoomOut",
        Event::FitToData => "FitToData",
        Event::ToggleOverlay(_) => "ToggleOverlay",
        Event::ToggleMarkers => "ToggleMarkers",
        Event::MouseClick { .. } => "MouseClick",
        Event::Scroll { .. } => "Scroll",
        Event::PermissionsResult { .. } => "PermissionsResult",
        Event::WorkerResponse(_) => "WorkerResponse",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::LoadState;
    use crate::domain::{GeoPoint, Record, StatusBucket, StatusFilter};
    use crate::store::{FeatureId, Overlay, OverlaySpec};
    use crate::ui::sync::{ListItem, NOT_FOUND_MESSAGE};
    use crate::ui::Theme;
    use crate::worker::WorkerMessage;
    use chrono::NaiveDate;

    fn record(process: &str, enterprise: &str, status: &str, lat: f64) -> Record {
        let mut record = Record::at(GeoPoint::new(lat, -49.25));
        record.process = Some(process.to_string());
        record.enterprise = Some(enterprise.to_string());
        record.status = Some(status.to_string());
        record
    }

    fn state() -> AppState {
        let mut state = AppState::new(Theme::default())
            .with_dataset("/host/dados/pedidos_licenca.geojson")
            .with_overlays(vec![OverlaySpec::parse("Bairros|/host/dados/bairros.geojson").unwrap()])
            .with_today(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        state.set_screen(30, 100);
        handle(
            &mut state,
            Event::WorkerResponse(WorkerResponse::DatasetLoaded {
                records: vec![
                    record("000.123-4/2024", "Posto Boa Vista", "Pendente de documentação", -16.60),
                    record("111.222-3/2023", "Cerâmica São José", "Aprovado", -16.68),
                    record("555.666-7/2024", "Frigorífico Goiás", "Em análise", -16.75),
                ],
            }),
        );
        state
    }

    fn handle(state: &mut AppState, event: Event) -> (bool, Vec<Action>) {
        handle_event(state, &event).unwrap()
    }

    fn type_text(state: &mut AppState, field: SearchField, text: &str) {
        handle(state, Event::EditSearch(field));
        for c in text.chars() {
            handle(state, Event::Char(c));
        }
        handle(state, Event::ExitSearch);
    }

    #[test]
    fn permission_grant_requests_every_load() {
        let mut state = AppState::new(Theme::default())
            .with_dataset("/host/dados/pedidos_licenca.geojson")
            .with_overlays(vec![OverlaySpec::parse("Bairros|/host/dados/bairros.geojson").unwrap()]);

        let (render, actions) = handle(&mut state, Event::PermissionsResult { granted: true });
        assert!(!render);
        assert_eq!(actions.len(), 2);
        assert!(matches!(
            &actions[0],
            Action::PostToWorker(WorkerMessage::LoadDataset { path, .. }) if path.ends_with("pedidos_licenca.geojson")
        ));

        let (_, actions) = handle(&mut state, Event::PermissionsResult { granted: false });
        assert!(actions.is_empty());
    }

    #[test]
    fn dataset_arrival_shows_everything() {
        let state = state();
        assert_eq!(state.load_state, LoadState::Loaded);
        assert_eq!(state.layers.markers().len(), 3);
        assert_eq!(state.layers.counter(StatusBucket::Approved), Some(1));
        assert_eq!(state.layers.counter(StatusBucket::Pending), Some(1));
    }

    #[test]
    fn dataset_failure_leaves_an_empty_map() {
        let mut state = AppState::new(Theme::default());
        let (render, _) = handle(
            &mut state,
            Event::WorkerResponse(WorkerResponse::DatasetFailed {
                message: "No such file".to_string(),
            }),
        );
        assert!(render);
        assert_eq!(state.load_state, LoadState::Failed);
        assert!(state.layers.markers().is_empty());
    }

    #[test]
    fn pending_status_with_process_fragment() {
        let mut state = state();
        handle(&mut state, Event::CycleStatus { forward: false });
        handle(&mut state, Event::CycleStatus { forward: false });
        assert_eq!(state.criteria.status, StatusFilter::Only(StatusBucket::Pending));

        type_text(&mut state, SearchField::Process, "123");

        assert_eq!(state.outcome.included, vec![FeatureId(0)]);
        assert_eq!(state.layers.counter(StatusBucket::Pending), Some(1));
        assert_eq!(state.layers.counter(StatusBucket::Approved), Some(0));
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn enterprise_search_ignores_case_and_spacing() {
        let mut state = state();
        type_text(&mut state, SearchField::Enterprise, "SÃO  JOSÉ");
        assert_eq!(state.outcome.included, vec![FeatureId(1)]);

        type_text(&mut state, SearchField::Enterprise, "x");
        assert_eq!(
            state.layers.list(),
            &[ListItem::Placeholder(NOT_FOUND_MESSAGE.to_string())]
        );
        assert!(state.layers.counters().all(|(_, v)| v == 0));

        let (render, _) = handle(&mut state, Event::ClearFilters);
        assert!(render);
        assert_eq!(state.entry_count(), 3);
        let (render, _) = handle(&mut state, Event::ClearFilters);
        assert!(!render);
    }

    #[test]
    fn backspace_refilters() {
        let mut state = state();
        handle(&mut state, Event::EditSearch(SearchField::Process));
        handle(&mut state, Event::Char('9'));
        assert_eq!(state.entry_count(), 0);
        handle(&mut state, Event::Backspace);
        assert_eq!(state.entry_count(), 3);
        let (render, _) = handle(&mut state, Event::Backspace);
        assert!(!render);
    }

    #[test]
    fn typing_outside_search_is_ignored() {
        let mut state = state();
        let (render, _) = handle(&mut state, Event::Char('a'));
        assert!(!render);
        assert_eq!(state.criteria, FilterCriteria::default());
    }

    #[test]
    fn select_entry_opens_callout_and_escape_closes_it() {
        let mut state = state();
        handle(&mut state, Event::KeyDown);
        handle(&mut state, Event::SelectEntry);
        assert_eq!(state.callout, Some(FeatureId(1)));
        assert_eq!(state.viewport.zoom(), crate::ui::map::FOCUS_ZOOM);

        let (render, _) = handle(&mut state, Event::CloseCallout);
        assert!(render);
        let (render, _) = handle(&mut state, Event::CloseCallout);
        assert!(!render);
    }

    #[test]
    fn clicking_a_marker_opens_its_callout() {
        let mut state = state();
        let layout = state.layout();
        let (col, row) = state.viewport.cell_of(GeoPoint::new(-16.75, -49.25)).unwrap();

        handle(
            &mut state,
            Event::MouseClick {
                row: layout.map.y + row,
                col: layout.map.x + col,
            },
        );
        assert_eq!(state.focus, Focus::Map);
        assert_eq!(state.callout, Some(FeatureId(2)));
        assert_eq!(state.selected_index, 2);
        assert_eq!(state.cursor, (col, row));
    }

    #[test]
    fn clicking_the_list_selects_the_entry() {
        let mut state = state();
        let layout = state.layout();
        handle(&mut state, Event::MouseClick { row: layout.list.y + 4, col: 2 });
        assert_eq!(state.selected_index, 1);
        assert_eq!(state.callout, Some(FeatureId(1)));

        let (render, _) = handle(&mut state, Event::MouseClick { row: 0, col: 0 });
        assert!(!render);
    }

    #[test]
    fn zoom_scroll_and_fit() {
        let mut state = state();
        let fitted = state.viewport.zoom();

        handle(&mut state, Event::ToggleFocus);
        handle(&mut state, Event::Scroll { up: true });
        assert_eq!(state.viewport.zoom(), fitted + 1);
        handle(&mut state, Event::ZoomOut);
        handle(&mut state, Event::ZoomOut);
        assert_eq!(state.viewport.zoom(), fitted - 1);

        let (render, _) = handle(&mut state, Event::FitToData);
        assert!(render);
        assert_eq!(state.viewport.zoom(), fitted);
    }

    #[test]
    fn overlay_responses_and_toggles() {
        let mut state = state();
        let (render, _) = handle(
            &mut state,
            Event::WorkerResponse(WorkerResponse::OverlayFailed {
                slot: 0,
                name: "Bairros".to_string(),
                message: "parse error".to_string(),
            }),
        );
        assert!(!render);
        assert_eq!(state.toggles().count(), 0);
        let (render, _) = handle(&mut state, Event::ToggleOverlay(0));
        assert!(!render);

        handle(
            &mut state,
            Event::WorkerResponse(WorkerResponse::OverlayLoaded {
                slot: 0,
                overlay: Overlay {
                    name: "Bairros".to_string(),
                    color: "#FFA500".to_string(),
                    visible: false,
                    paths: vec![],
                },
            }),
        );
        let (render, _) = handle(&mut state, Event::ToggleOverlay(0));
        assert!(render);
        assert!(state.toggles().next().unwrap().visible);
    }

    #[test]
    fn marker_layer_toggle_hides_markers_but_keeps_the_list() {
        let mut state = state();
        handle(&mut state, Event::SelectEntry);
        assert!(state.callout.is_some());

        let (render, _) = handle(&mut state, Event::ToggleMarkers);
        assert!(render);
        assert!(!state.markers_visible);
        assert_eq!(state.callout, None);
        assert_eq!(state.layers.list().len(), state.entry_count());

        let (col, row) = state.cursor;
        let (render, _) = handle(&mut state, Event::SelectAtCursor);
        assert!(!render);
        assert!(state.marker_near(col, row).is_none());

        handle(&mut state, Event::ToggleMarkers);
        assert!(state.markers_visible);
    }

    #[test]
    fn close_focus_hides_the_plugin() {
        let mut state = state();
        assert_eq!(handle(&mut state, Event::CloseFocus), (false, vec![Action::CloseFocus]));
    }
}
