//! Dataset source abstraction.
//!
//! The worker reads GeoJSON documents through [`DatasetSource`] so loading can
//! be exercised without the plugin sandbox.

use std::path::PathBuf;

use crate::domain::error::{LicenseMapError, Result};
use crate::domain::Record;
use crate::store::geojson;
use crate::store::overlay::{Overlay, OverlaySpec};

/// Where GeoJSON documents come from.
///
/// # Implementations
///
/// - [`FsSource`]: reads files from the (sandboxed) filesystem
pub trait DatasetSource: Send {
    /// Returns the full text of the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read.
    fn read(&self, path: &str) -> Result<String>;

    /// Loads the primary point dataset.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or is not a
    /// `FeatureCollection`.
    fn load_records(&self, path: &str) -> Result<Vec<Record>> {
        let _span = tracing::debug_span!("load_records", path = %path).entered();
        geojson::parse_records(&self.read(path)?)
    }

    /// Loads one overlay described by `spec`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or is not a
    /// `FeatureCollection`.
    fn load_overlay(&self, spec: &OverlaySpec) -> Result<Overlay> {
        let _span = tracing::debug_span!("load_overlay", name = %spec.name, path = %spec.path).entered();
        let paths = geojson::parse_overlay_paths(&self.read(&spec.path)?)?;
        tracing::debug!(paths = paths.len(), "overlay decoded");
        Ok(Overlay::from_spec(spec, paths))
    }
}

/// Reads documents from the filesystem.
///
/// Relative paths are joined to `root` when one is set.
#[derive(Debug, Clone, Default)]
pub struct FsSource {
    root: Option<PathBuf>,
}

impl FsSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(path),
            None => PathBuf::from(path),
        }
    }
}

impl DatasetSource for FsSource {
    fn read(&self, path: &str) -> Result<String> {
        let full = self.resolve(path);
        std::fs::read_to_string(&full).map_err(|e| {
            tracing::debug!(path = %full.display(), error = %e, "failed to read dataset");
            LicenseMapError::Io(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn reads_relative_to_root() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("pedidos.geojson"),
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","properties":{"processo":"1"},
                 "geometry":{"type":"Point","coordinates":[-49.2,-16.6]}}
            ]}"#,
        )
        .unwrap();

        let source = FsSource::with_root(dir.path());
        let records = source.load_records("pedidos.geojson").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].process.as_deref(), Some("1"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let source = FsSource::with_root(dir.path());
        assert!(matches!(source.load_records("nada.geojson"), Err(LicenseMapError::Io(_))));
    }

    #[test]
    fn overlay_keeps_spec_styling() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rios.geojson");
        fs::write(
            &path,
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","properties":{},
                 "geometry":{"type":"LineString","coordinates":[[-49.3,-16.7],[-49.2,-16.6]]}}
            ]}"#,
        )
        .unwrap();

        let spec = OverlaySpec {
            name: "Hidrografia".to_string(),
            path: path.to_string_lossy().into_owned(),
            color: "#7ecbff".to_string(),
            visible: true,
        };
        let overlay = FsSource::new().load_overlay(&spec).unwrap();
        assert_eq!(overlay.name, "Hidrografia");
        assert_eq!(overlay.color, "#7ecbff");
        assert!(overlay.visible);
        assert_eq!(overlay.paths.len(), 1);
    }
}
