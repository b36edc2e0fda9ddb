//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin shim (`main.rs`) and the domain, store, UI and
//! worker layers.
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Worker Responses ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Input mode and panel focus
//! - [`state`]: The application context
//! - `present`: View model computation
//!
//! # Example
//!
//! ```rust
//! use licensemap::app::{handle_event, AppState, Event};
//! use licensemap::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let (_render, _actions) = handle_event(&mut state, &Event::KeyDown)?;
//! # Ok::<(), licensemap::LicenseMapError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
mod present;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{Focus, InputMode, SearchField};
pub use present::TITLE;
pub use state::{AppState, LoadState, OverlayState};
