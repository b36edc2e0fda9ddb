//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process:
//!
//! 1. **View Model Computation**: `AppState` becomes a [`UIViewModel`]
//! 2. **Component Rendering**: components print the view model as ANSI text
//!
//! [`UIViewModel`]: crate::ui::viewmodel::UIViewModel

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout.
///
/// Does not clear the screen; every region is padded to its full width so
/// the previous frame is overwritten.
///
/// # Example
///
/// ```rust
/// use licensemap::app::AppState;
/// use licensemap::ui::{render, Theme};
///
/// let state = AppState::new(Theme::default());
/// render(&state, 24, 80);
/// ```
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    tracing::trace!(
        rows,
        cols,
        list_rows = viewmodel.list.len(),
        callout = viewmodel.callout.is_some(),
        "render"
    );
    components::render_main(&viewmodel, &state.theme, cols);
}
