//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! plugin shim executes them in order; everything else the handler does is a
//! pure state change.
//!
//! # Example
//!
//! ```rust
//! use licensemap::app::Action;
//! use licensemap::worker::WorkerMessage;
//!
//! let actions = vec![
//!     Action::PostToWorker(WorkerMessage::load_dataset("/host/dados/pedidos_licenca.geojson".to_string())),
//! ];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Posts a load request to the background worker.
    PostToWorker(WorkerMessage),
}
