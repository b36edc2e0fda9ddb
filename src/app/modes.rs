//! Input and focus state types for the application.
//!
//! The application is either in normal mode, where keys are commands, or
//! editing one of the two search fields, where keys are text. Independently,
//! either the list or the map has focus; that decides what arrows do.
//!
//! # Example
//!
//! ```rust
//! use licensemap::app::modes::{Focus, InputMode, SearchField};
//!
//! let input_mode = InputMode::Search(SearchField::Process);
//! let focus = Focus::List;
//! assert_ne!(input_mode, InputMode::Normal);
//! assert_eq!(focus.toggled(), Focus::Map);
//! ```

/// The two free-text filter inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    /// Process identifier search.
    Process,
    /// Enterprise name search.
    Enterprise,
}

impl SearchField {
    /// The other field, for Tab while editing.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Process => Self::Enterprise,
            Self::Enterprise => Self::Process,
        }
    }
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys are commands.
    Normal,

    /// Keys edit the given search field; every keystroke refilters.
    Search(SearchField),
}

/// Which panel receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    List,
    /// Arrows move the map cursor and the position readout is live.
    Map,
}

impl Focus {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::List => Self::Map,
            Self::Map => Self::List,
        }
    }
}
