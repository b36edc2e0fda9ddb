//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the licensemap library and the Zellij
//! plugin system: it implements `ZellijPlugin` and registers the loading
//! worker.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← UI state, filtering, rendering
//! │  └──────────────────┘   │
//! │          │              │
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │ LicenseMapWorker │   │  ← GeoJSON reads and decoding
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Once `FullHdAccess` is granted, post one load per
//!    dataset and overlay to the worker
//! 3. **Update**: Translate Zellij events, delegate to the library
//! 4. **Render**: Record the pane size, call the library render function
//!
//! # Keybindings
//!
//! List focus:
//! - `j`/`Down`, `k`/`Up`: Move selection
//! - `Enter`: Show the selected entry on the map
//!
//! Map focus:
//! - Arrows, `h`/`j`/`k`/`l`: Move the map cursor
//! - `Enter`: Open the callout under the cursor
//!
//! Both:
//! - `s`/`S`: Next/previous status
//! - `p`, `/`: Search by process; `e`: search by enterprise
//! - `c`: Clear filters
//! - `Tab`: Switch list/map focus
//! - `H`/`J`/`K`/`L`: Pan the map
//! - `+`/`-`: Zoom; `f`: Fit to data
//! - `0`: Toggle the application markers; `1`-`9`: toggle overlays
//! - `Esc`: Close the callout
//! - `q`: Hide the plugin
//!
//! Search mode:
//! - Characters and `Backspace` edit the query
//! - `Tab`: Other search field
//! - `Enter`/`Esc`: Stop editing

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use licensemap::app::{Focus, InputMode, SearchField};
use licensemap::worker::{LicenseMapWorker, WorkerMessage, WorkerResponse};
use licensemap::{handle_event, Action, Config, Event};

// Register plugin and worker with Zellij
register_plugin!(State);
register_worker!(LicenseMapWorker, licensemap_worker, LICENSEMAP_WORKER);

/// Plugin state wrapper.
struct State {
    /// Core application state from library layer.
    app: licensemap::app::AppState,

    /// Worker thread identifier for IPC messaging.
    worker_name: String,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: licensemap::initialize(&Config::default()),
            worker_name: "licensemap".to_string(),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, builds the application state, requests
    /// filesystem access and subscribes to input and worker events.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        licensemap::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            dataset = %config.dataset,
            overlays = config.overlays.len(),
            "parsed configuration"
        );
        self.app = licensemap::initialize(&config);

        request_permission(&[PermissionType::FullHdAccess]);
        subscribe(&[
            EventType::Key,
            EventType::Mouse,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates a Zellij event, delegates to `handle_event` and executes
    /// the resulting actions. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Mouse(mouse) => match Self::map_mouse_event(mouse) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match self.map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                let granted = matches!(permissions, PermissionStatus::Granted);
                if !granted {
                    tracing::warn!("permissions denied - datasets cannot be read");
                }
                Event::PermissionsResult { granted }
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    self.execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Records the pane size so clicks and the map viewport match what is
    /// drawn, then delegates to the library's rendering layer.
    fn render(&mut self, rows: usize, cols: usize) {
        self.app.set_screen(rows, cols);
        licensemap::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Mouse(_) => "Mouse".to_string(),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        // leave Ctrl/Alt chords to Zellij
        if key.has_modifiers(&[KeyModifier::Ctrl]) || key.has_modifiers(&[KeyModifier::Alt]) {
            return None;
        }

        if let InputMode::Search(field) = self.app.input_mode {
            return match key.bare_key {
                BareKey::Enter | BareKey::Esc => Some(Event::ExitSearch),
                BareKey::Tab => Some(Event::EditSearch(field.other())),
                BareKey::Backspace => Some(Event::Backspace),
                BareKey::Down => Some(Event::KeyDown),
                BareKey::Up => Some(Event::KeyUp),
                BareKey::Char(c) => Some(Event::Char(c)),
                _ => None,
            };
        }

        if self.app.focus == Focus::Map {
            let on_map = match key.bare_key {
                BareKey::Left | BareKey::Char('h') => Some(Event::MoveCursor { dx: -1, dy: 0 }),
                BareKey::Right | BareKey::Char('l') => Some(Event::MoveCursor { dx: 1, dy: 0 }),
                BareKey::Up | BareKey::Char('k') => Some(Event::MoveCursor { dx: 0, dy: -1 }),
                BareKey::Down | BareKey::Char('j') => Some(Event::MoveCursor { dx: 0, dy: 1 }),
                BareKey::Enter => Some(Event::SelectAtCursor),
                _ => None,
            };
            if on_map.is_some() {
                return on_map;
            }
        }

        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Enter => Event::SelectEntry,
            BareKey::Esc => Event::CloseCallout,
            BareKey::Tab => Event::ToggleFocus,
            BareKey::Char('s') => Event::CycleStatus { forward: true },
            BareKey::Char('S') => Event::CycleStatus { forward: false },
            BareKey::Char('p' | '/') => Event::EditSearch(SearchField::Process),
            BareKey::Char('e') => Event::EditSearch(SearchField::Enterprise),
            BareKey::Char('c') => Event::ClearFilters,
            BareKey::Char('H') => Event::Pan { dx: -1, dy: 0 },
            BareKey::Char('L') => Event::Pan { dx: 1, dy: 0 },
            BareKey::Char('K') => Event::Pan { dx: 0, dy: -1 },
            BareKey::Char('J') => Event::Pan { dx: 0, dy: 1 },
            BareKey::Char('+' | '=') => Event::ZoomIn,
            BareKey::Char('-') => Event::ZoomOut,
            BareKey::Char('f') => Event::FitToData,
            BareKey::Char('0') => Event::ToggleMarkers,
            BareKey::Char(c @ '1'..='9') => Event::ToggleOverlay(c as usize - '1' as usize),
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Maps mouse events to application events.
    ///
    /// Zellij reports clicks as a 0-indexed line (signed, for scrollback) and
    /// column.
    fn map_mouse_event(mouse: Mouse) -> Option<Event> {
        match mouse {
            Mouse::LeftClick(line, col) => {
                let row = usize::try_from(line).ok()?;
                Some(Event::MouseClick { row, col })
            }
            Mouse::ScrollUp(_) => Some(Event::Scroll { up: true }),
            Mouse::ScrollDown(_) => Some(Event::Scroll { up: false }),
            _ => None,
        }
    }

    /// Maps custom message events to application events.
    fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
        tracing::debug!(message_name = %message, payload_len = payload.len(), "custom message event");

        if message == self.worker_name {
            match WorkerResponse::from_json(payload) {
                Ok(response) => Some(Event::WorkerResponse(response)),
                Err(e) => {
                    tracing::error!(error = %e, "dropping worker response");
                    None
                }
            }
        } else {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            None
        }
    }

    /// Serializes the message as JSON and posts it to the worker thread.
    fn post_worker_message(&self, message: &WorkerMessage) {
        match serde_json::to_string(&message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(self.worker_name.clone()),
                    name: self.worker_name.clone(),
                    payload,
                });
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize worker message");
            }
        }
    }

    /// Executes an action returned from event handling.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::PostToWorker(ref message) => {
                self.post_worker_message(message);
            }
        }
    }
}
