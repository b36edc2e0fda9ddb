//! View model types representing renderable UI state.
//!
//! View models are computed from `AppState` by `AppState::compute_viewmodel`
//! and hold display-ready data only: resolved texts, hex colours and a
//! rasterized map canvas. Components never look at application state.

use crate::ui::layout::Layout;
use crate::ui::map::{Canvas, ScaleBar};

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub layout: Layout,

    pub header: HeaderInfo,

    pub filters: FilterBarInfo,

    /// Visible slice of the list panel.
    pub list: Vec<ListRow>,

    pub map: MapInfo,

    /// Detail callout, drawn over the map.
    pub callout: Option<CalloutInfo>,

    pub footer: FooterInfo,

    /// Replaces everything but the header and footer while the dataset loads.
    pub empty_state: Option<EmptyState>,
}

/// Title and counters.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
    pub counters: Vec<CounterInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterInfo {
    pub label: String,
    pub value: usize,
    pub color: String,
}

/// Status selector and the two search boxes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBarInfo {
    pub status: String,
    pub process: SearchBoxInfo,
    pub enterprise: SearchBoxInfo,
    /// Whether any input currently restricts the result.
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBoxInfo {
    pub label: String,
    pub query: String,
    /// Whether keystrokes currently go to this box.
    pub editing: bool,
}

/// One list panel item, three lines tall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRow {
    Entry {
        title: String,
        /// `Processo: … | Status: …`
        detail: String,
        status_color: String,
        /// `Validade: …`
        validity: String,
        validity_color: String,
        is_selected: bool,
    },
    Placeholder(String),
}

/// Everything the map panel draws.
#[derive(Debug, Clone)]
pub struct MapInfo {
    pub canvas: Canvas,
    /// Line colour per overlay index used in [`Canvas`] cells.
    pub overlay_colors: Vec<String>,
    /// Position readout, or the pointer hint when the map lacks focus.
    pub readout: String,
    pub scale: Option<ScaleBar>,
    pub north: String,
    pub legend: Vec<LegendItem>,
    pub toggles: Vec<ToggleInfo>,
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendItem {
    pub label: String,
    pub color: String,
}

/// One layer toggle, bound to a digit key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleInfo {
    pub key: usize,
    pub name: String,
    pub color: String,
    pub visible: bool,
}

/// Detail callout content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalloutInfo {
    pub title: String,
    pub fields: Vec<CalloutField>,
    /// Document link lines, e.g. `Baixar licença (PDF): …`.
    pub documents: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalloutField {
    pub label: String,
    pub value: String,
    /// Overrides the text colour (validity classes).
    pub color: Option<String>,
}

/// Footer keybinding hints.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Shown while the primary dataset is loading.
#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}
