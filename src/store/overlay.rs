//! Auxiliary map overlays (boundaries, neighbourhoods, hydrography).
//!
//! Overlays are visual context only: they never take part in filtering and
//! each one loads, fails and toggles on its own.

use serde::{Deserialize, Serialize};

use crate::domain::error::{LicenseMapError, Result};
use crate::domain::GeoPoint;

/// Where an overlay comes from and how it is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlaySpec {
    /// Name shown in the layer toggles.
    pub name: String,
    /// Path of the GeoJSON file, relative to the data directory.
    pub path: String,
    /// Hex line colour.
    pub color: String,
    /// Whether the overlay is drawn as soon as it loads.
    pub visible: bool,
}

impl OverlaySpec {
    /// Parses `name|path|#color|on` (the last two fields are optional).
    ///
    /// # Errors
    ///
    /// Returns [`LicenseMapError::Config`] when the name or path is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use licensemap::store::OverlaySpec;
    ///
    /// let spec = OverlaySpec::parse("Hidrografia|hidrografia.geojson|#7ecbff|on").unwrap();
    /// assert_eq!(spec.name, "Hidrografia");
    /// assert!(spec.visible);
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let mut fields = text.split('|').map(str::trim);
        let name = fields.next().unwrap_or_default();
        let path = fields.next().unwrap_or_default();
        if name.is_empty() || path.is_empty() {
            return Err(LicenseMapError::Config(format!("invalid overlay: {text}")));
        }

        let color = fields
            .next()
            .filter(|c| !c.is_empty())
            .unwrap_or("#808080")
            .to_string();
        let visible = fields
            .next()
            .is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "on" | "true" | "sim"));

        Ok(Self {
            name: name.to_string(),
            path: path.to_string(),
            color,
            visible,
        })
    }
}

/// A loaded overlay ready for drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    pub name: String,
    pub color: String,
    pub visible: bool,
    /// Polylines; polygon rings are stored closed.
    pub paths: Vec<Vec<GeoPoint>>,
}

impl Overlay {
    #[must_use]
    pub fn from_spec(spec: &OverlaySpec, paths: Vec<Vec<GeoPoint>>) -> Self {
        Self {
            name: spec.name.clone(),
            color: spec.color.clone(),
            visible: spec.visible,
            paths,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_default() {
        let spec = OverlaySpec::parse("Bairros|bairros.geojson").unwrap();
        assert_eq!(spec.color, "#808080");
        assert!(!spec.visible);
    }

    #[test]
    fn visibility_flags() {
        assert!(!OverlaySpec::parse("A|a.geojson|#000000|off").unwrap().visible);
        assert!(OverlaySpec::parse("A|a.geojson|#000000|ON").unwrap().visible);
    }

    #[test]
    fn name_and_path_are_required() {
        assert!(OverlaySpec::parse("").is_err());
        assert!(OverlaySpec::parse("Bairros").is_err());
        assert!(OverlaySpec::parse("|x.geojson").is_err());
    }
}
