//! Licensemap: a Zellij plugin that maps environmental license applications.
//!
//! The plugin loads a GeoJSON collection of license applications, draws each
//! one as a marker on a terminal map, and keeps a list panel, four status
//! counters and the marker layer in sync with a status selector and two text
//! searches. Auxiliary GeoJSON overlays (boundaries, neighbourhoods,
//! hydrography) can be toggled on the map.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling, filter recompute                 │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Store Layer   │   │ Worker Layer  │
//! │ (ui/)         │   │ (store/)      │   │ (worker/)     │
//! │ - View sync   │   │ - Features    │   │ - GeoJSON I/O │
//! │ - Map canvas  │   │ - Overlays    │   │ - IPC bridge  │
//! │ - Components  │   │ - GeoJSON     │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/): status, validity, text, filter   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/licensemap.wasm" {
//!         data_dir "dados"
//!         dataset "pedidos_licenca.geojson"
//!         overlays "Bairros|bairros.geojson|#FFA500|off,Hidrografia|hidrografia.geojson|#7ecbff|on"
//!         counters "aprovado,em-analise,pendente,a-iniciar"
//!         initial_center "-16.681253,-49.256044"
//!         initial_zoom "12"
//!         theme "escuro"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. `main.rs` parses [`Config`], initializes tracing and builds the
//!    [`AppState`] with [`initialize`].
//! 2. Once permissions are granted, one load message per dataset and overlay
//!    goes to the worker.
//! 3. The worker answers with records or overlay paths; the state rebuilds its
//!    feature store, fits the map and runs the first filter pass.
//! 4. Every input event refilters and re-renders.
//!
//! # Example
//!
//! ```rust
//! use licensemap::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_render, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true })?;
//! assert_eq!(actions.len(), 4);
//! # Ok::<(), licensemap::LicenseMapError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod store;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event};
pub use domain::{LicenseMapError, Result};
pub use ui::Theme;

use std::collections::BTreeMap;

use domain::{GeoPoint, StatusBucket};
use infrastructure::resolve_data_path;
use store::OverlaySpec;
use ui::map::{DEFAULT_CENTER, DEFAULT_ZOOM, MAX_ZOOM};

/// Default data directory, relative to the host root.
pub const DEFAULT_DATA_DIR: &str = "dados";

/// Default primary dataset file.
pub const DEFAULT_DATASET: &str = "pedidos_licenca.geojson";

/// Default overlays, in `name|path|#color|on` form.
pub const DEFAULT_OVERLAYS: &str = "Bairros|bairros.geojson|#FFA500|off,\
Limite Municipal|limite_municipal.geojson|#000000|on,\
Hidrografia|hidrografia.geojson|#7ecbff|on";

/// Plugin configuration parsed from Zellij's configuration system.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the dataset and overlay paths are relative to.
    ///
    /// Relative to `/host` unless absolute. Default: `dados`
    pub data_dir: String,

    /// Primary point dataset. Default: `pedidos_licenca.geojson`
    pub dataset: String,

    /// Auxiliary overlays in toggle order.
    pub overlays: Vec<OverlaySpec>,

    /// Counters present in the header.
    pub counters: Vec<StatusBucket>,

    pub initial_center: GeoPoint,

    pub initial_zoom: u8,

    /// Built-in theme name: `escuro` or `claro`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    pub theme_file: Option<String>,

    /// Tracing filter directive. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            dataset: DEFAULT_DATASET.to_string(),
            overlays: parse_overlays(DEFAULT_OVERLAYS),
            counters: StatusBucket::COUNTED.to_vec(),
            initial_center: DEFAULT_CENTER,
            initial_zoom: DEFAULT_ZOOM,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Every key is optional and falls back to its default when missing or
    /// unparsable. Invalid overlay and counter entries are skipped with a
    /// warning; an explicitly empty `overlays` value disables overlays.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use licensemap::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("dataset".to_string(), "teste.geojson".to_string());
    /// map.insert("initial_zoom".to_string(), "14".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.dataset, "teste.geojson");
    /// assert_eq!(config.initial_zoom, 14);
    /// assert_eq!(config.overlays.len(), 3);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let text = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let overlays = config
            .get("overlays")
            .map_or(defaults.overlays, |v| parse_overlays(v));

        let counters = config
            .get("counters")
            .map(|v| parse_counters(v))
            .filter(|c| !c.is_empty())
            .unwrap_or(defaults.counters);

        let initial_center = config
            .get("initial_center")
            .and_then(|v| parse_center(v))
            .unwrap_or(defaults.initial_center);

        let initial_zoom = config
            .get("initial_zoom")
            .and_then(|v| v.trim().parse::<u8>().ok())
            .map_or(defaults.initial_zoom, |z| z.min(MAX_ZOOM));

        Self {
            data_dir: text("data_dir").unwrap_or(defaults.data_dir),
            dataset: text("dataset").unwrap_or(defaults.dataset),
            overlays,
            counters,
            initial_center,
            initial_zoom,
            theme_name: text("theme"),
            theme_file: text("theme_file"),
            trace_level: text("trace_level"),
        }
    }
}

fn parse_overlays(value: &str) -> Vec<OverlaySpec> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| match OverlaySpec::parse(entry) {
            Ok(spec) => Some(spec),
            Err(e) => {
                tracing::warn!(error = %e, "skipping overlay entry");
                None
            }
        })
        .collect()
}

fn parse_counters(value: &str) -> Vec<StatusBucket> {
    let mut counters = Vec::new();
    for key in value.split(',').map(str::trim).filter(|k| !k.is_empty()) {
        match StatusBucket::from_key(key) {
            Some(bucket) if !counters.contains(&bucket) => counters.push(bucket),
            Some(_) => {}
            None => tracing::warn!(counter = %key, "unknown counter"),
        }
    }
    counters
}

/// `lat,lon` within the valid coordinate ranges.
fn parse_center(value: &str) -> Option<GeoPoint> {
    let (lat, lon) = value.split_once(',')?;
    let lat = lat.trim().parse::<f64>().ok()?;
    let lon = lon.trim().parse::<f64>().ok()?;
    ((-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)).then(|| GeoPoint::new(lat, lon))
}

/// Initializes the plugin state from configuration.
///
/// Resolves the theme (file, then name, then default), resolves every data
/// path against `data_dir`, and returns a state waiting for its loads.
///
/// # Example
///
/// ```rust
/// use licensemap::{initialize, Config};
///
/// let state = initialize(&Config::default());
/// assert_eq!(state.dataset_path, "/host/dados/pedidos_licenca.geojson");
/// assert_eq!(state.overlays.len(), 3);
/// ```
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing licensemap plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    let overlays = config
        .overlays
        .iter()
        .map(|spec| OverlaySpec {
            path: resolve_data_path(&config.data_dir, &spec.path),
            ..spec.clone()
        })
        .collect();

    AppState::new(theme)
        .with_dataset(resolve_data_path(&config.data_dir, &config.dataset))
        .with_overlays(overlays)
        .with_counters(&config.counters)
        .with_initial_view(config.initial_center, config.initial_zoom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_to_empty_config() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config.data_dir, "dados");
        assert_eq!(config.dataset, "pedidos_licenca.geojson");
        assert_eq!(config.counters, StatusBucket::COUNTED.to_vec());
        assert_eq!(config.initial_center, DEFAULT_CENTER);
        assert_eq!(config.initial_zoom, 12);

        let names: Vec<_> = config.overlays.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["Bairros", "Limite Municipal", "Hidrografia"]);
        assert!(!config.overlays[0].visible);
        assert!(config.overlays[2].visible);
    }

    #[test]
    fn invalid_entries_fall_back_or_are_skipped() {
        let config = Config::from_zellij(&map(&[
            ("overlays", "Rios|rios.geojson|#0000ff|on,|sem-nome.geojson"),
            ("counters", "pendente,desconhecido,pendente"),
            ("initial_center", "-100,10"),
            ("initial_zoom", "99"),
        ]));
        assert_eq!(config.overlays.len(), 1);
        assert_eq!(config.overlays[0].name, "Rios");
        assert_eq!(config.counters, vec![StatusBucket::Pending]);
        assert_eq!(config.initial_center, DEFAULT_CENTER);
        assert_eq!(config.initial_zoom, MAX_ZOOM);
    }

    #[test]
    fn empty_overlay_list_disables_overlays() {
        let config = Config::from_zellij(&map(&[("overlays", "")]));
        assert!(config.overlays.is_empty());
    }

    #[test]
    fn initialize_resolves_paths_and_view() {
        let config = Config::from_zellij(&map(&[
            ("data_dir", "/srv/gis"),
            ("initial_center", "-15.79, -47.88"),
            ("initial_zoom", "10"),
            ("counters", "aprovado"),
            ("theme", "claro"),
        ]));
        let state = initialize(&config);

        assert_eq!(state.dataset_path, "/srv/gis/pedidos_licenca.geojson");
        assert_eq!(state.overlays[1].spec.path, "/srv/gis/limite_municipal.geojson");
        assert_eq!(state.viewport.center(), GeoPoint::new(-15.79, -47.88));
        assert_eq!(state.viewport.zoom(), 10);
        assert_eq!(state.layers.counters().count(), 1);
        assert_eq!(state.theme.name, "claro");
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let state = initialize(&Config {
            theme_name: Some("neon".to_string()),
            ..Config::default()
        });
        assert_eq!(state.theme.name, Theme::default().name);
    }
}
