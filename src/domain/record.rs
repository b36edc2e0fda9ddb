//! License-application records and geographic primitives.

use serde::{Deserialize, Serialize};

use super::error::{LicenseMapError, Result};
use super::status::StatusBucket;

/// Placeholder shown for missing masculine fields (processo, tipo, status).
pub const NOT_INFORMED: &str = "Não informado";

/// Placeholder shown for missing feminine fields (finalidade, localização, validade).
pub const NOT_INFORMED_F: &str = "Não informada";

/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Parses `"lat,lon"`.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseMapError::Config`] if either component is missing or
    /// not a number.
    pub fn parse(text: &str) -> Result<Self> {
        let mut parts = text.split(',').map(str::trim);
        let lat = parts.next().and_then(|s| s.parse::<f64>().ok());
        let lon = parts.next().and_then(|s| s.parse::<f64>().ok());
        match (lat, lon, parts.next()) {
            (Some(lat), Some(lon), None) => Ok(Self { lat, lon }),
            _ => Err(LicenseMapError::Config(format!("invalid coordinate: {text}"))),
        }
    }
}

/// An axis-aligned geographic bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

impl GeoBounds {
    /// Smallest box holding every point.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseMapError::EmptyDataset`] for an empty iterator.
    pub fn from_points<I>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        let mut points = points.into_iter();
        let first = points.next().ok_or(LicenseMapError::EmptyDataset)?;

        Ok(points.fold(
            Self { south_west: first, north_east: first },
            |mut bounds, p| {
                bounds.south_west.lat = bounds.south_west.lat.min(p.lat);
                bounds.south_west.lon = bounds.south_west.lon.min(p.lon);
                bounds.north_east.lat = bounds.north_east.lat.max(p.lat);
                bounds.north_east.lon = bounds.north_east.lon.max(p.lon);
                bounds
            },
        ))
    }

    #[must_use]
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lon + self.north_east.lon) / 2.0,
        )
    }
}

/// One license application, as loaded from the point dataset.
///
/// Every text attribute is optional: the dataset is maintained by hand and
/// any of them may be blank. Records never change after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub process: Option<String>,
    pub enterprise: Option<String>,
    pub kind: Option<String>,
    pub purpose: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    /// Validity date as typed, expected `dd/mm/yyyy`.
    pub validity: Option<String>,
    pub license_pdf: Option<String>,
    pub opinion_pdf: Option<String>,
    pub position: GeoPoint,
}

impl Record {
    /// A record at `position` with every attribute absent.
    #[must_use]
    pub const fn at(position: GeoPoint) -> Self {
        Self {
            process: None,
            enterprise: None,
            kind: None,
            purpose: None,
            location: None,
            status: None,
            validity: None,
            license_pdf: None,
            opinion_pdf: None,
            position,
        }
    }

    #[must_use]
    pub fn bucket(&self) -> StatusBucket {
        StatusBucket::classify(self.status.as_deref())
    }

    #[must_use]
    pub fn process_or_default(&self) -> &str {
        self.process.as_deref().unwrap_or(NOT_INFORMED)
    }

    #[must_use]
    pub fn enterprise_or_default(&self) -> &str {
        self.enterprise.as_deref().unwrap_or(NOT_INFORMED)
    }

    #[must_use]
    pub fn kind_or_default(&self) -> &str {
        self.kind.as_deref().unwrap_or(NOT_INFORMED)
    }

    #[must_use]
    pub fn purpose_or_default(&self) -> &str {
        self.purpose.as_deref().unwrap_or(NOT_INFORMED_F)
    }

    #[must_use]
    pub fn location_or_default(&self) -> &str {
        self.location.as_deref().unwrap_or(NOT_INFORMED_F)
    }

    #[must_use]
    pub fn status_or_default(&self) -> &str {
        self.status.as_deref().unwrap_or(NOT_INFORMED)
    }

    #[must_use]
    pub fn validity_or_default(&self) -> &str {
        self.validity.as_deref().unwrap_or(NOT_INFORMED_F)
    }
}
