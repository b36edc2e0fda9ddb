//! Error types for the license map plugin.
//!
//! This module defines the centralized error type [`LicenseMapError`] and a type
//! alias [`Result`] used across the crate. Errors are built with `thiserror`.
//! None of them reach the user as UI chrome: the plugin shim and the worker log
//! them and fall back to placeholder content.

use thiserror::Error;

/// The main error type for license map operations.
///
/// # Examples
///
/// ```
/// use licensemap::domain::LicenseMapError;
///
/// fn read_dataset() -> Result<(), LicenseMapError> {
///     Err(LicenseMapError::Parse("expected a FeatureCollection".to_string()))
/// }
/// assert!(read_dataset().is_err());
/// ```
#[derive(Debug, Error)]
pub enum LicenseMapError {
    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from reading dataset files, theme files or trace files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A GeoJSON document could not be decoded.
    ///
    /// Raised for invalid JSON as well as for valid JSON that is not a
    /// `FeatureCollection`.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The dataset holds no records, so no bounds can be computed.
    #[error("dataset is empty, no bounds to fit")]
    EmptyDataset,
}

/// A specialized `Result` type for license map operations.
pub type Result<T> = std::result::Result<T, LicenseMapError>;
