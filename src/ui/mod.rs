//! User interface rendering layer with component-based architecture.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`sync`]: Marker/list/counter synchronization from a filter outcome
//! - [`map`]: Viewport projection and the character canvas
//! - [`layout`]: Screen regions and hit testing
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Cursor positioning and width-aware text fitting
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod layout;
pub mod map;
pub mod renderer;
pub mod sync;
pub mod theme;
pub mod viewmodel;

pub use layout::{Hit, Layout, Rect};
pub use map::{Canvas, Cell, Viewport};
pub use renderer::render;
pub use sync::{synchronize, ListEntry, ListItem, ViewLayers, ViewSurface};
pub use theme::Theme;
pub use viewmodel::{CalloutInfo, EmptyState, FooterInfo, HeaderInfo, ListRow, MapInfo, UIViewModel};
