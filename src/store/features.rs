//! In-memory feature store.
//!
//! Holds every record of the primary dataset next to its marker and the
//! precomputed keys the filter pass compares against. The store is rebuilt as a
//! whole when a dataset arrives and is read-only afterwards.

use serde::{Deserialize, Serialize};

use crate::domain::error::Result;
use crate::domain::text::normalize_opt;
use crate::domain::{GeoBounds, GeoPoint, Record, StatusBucket};

/// Position of a feature in load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FeatureId(pub usize);

/// Renderable proxy of a record's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub feature: FeatureId,
    pub position: GeoPoint,
    /// Drives the marker colour.
    pub bucket: StatusBucket,
}

/// A record with its marker and search keys.
#[derive(Debug, Clone)]
pub struct Feature {
    pub record: Record,
    pub bucket: StatusBucket,
    /// Normalized process identifier.
    pub process_key: String,
    /// Normalized enterprise name.
    pub enterprise_key: String,
    pub marker: Marker,
}

/// All loaded features, in load order.
#[derive(Debug, Clone, Default)]
pub struct FeatureStore {
    features: Vec<Feature>,
}

impl FeatureStore {
    /// Builds the store, creating one marker per record.
    #[must_use]
    pub fn from_records(records: Vec<Record>) -> Self {
        let features = records
            .into_iter()
            .enumerate()
            .map(|(idx, record)| {
                let bucket = record.bucket();
                let id = FeatureId(idx);
                Feature {
                    process_key: normalize_opt(record.process.as_deref()),
                    enterprise_key: normalize_opt(record.enterprise.as_deref()),
                    marker: Marker {
                        feature: id,
                        position: record.position,
                        bucket,
                    },
                    bucket,
                    record,
                }
            })
            .collect();

        Self { features }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: FeatureId) -> Option<&Feature> {
        self.features.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureId, &Feature)> {
        self.features
            .iter()
            .enumerate()
            .map(|(idx, feature)| (FeatureId(idx), feature))
    }

    /// Bounds of every record position.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::LicenseMapError::EmptyDataset`] when the store
    /// is empty.
    pub fn bounds(&self) -> Result<GeoBounds> {
        GeoBounds::from_points(self.features.iter().map(|f| f.record.position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_follow_records() {
        let mut a = Record::at(GeoPoint::new(-16.6, -49.2));
        a.status = Some("Aprovado".to_string());
        a.process = Some("12.34-5".to_string());
        let b = Record::at(GeoPoint::new(-16.7, -49.3));

        let store = FeatureStore::from_records(vec![a, b]);
        assert_eq!(store.len(), 2);

        let first = store.get(FeatureId(0)).unwrap();
        assert_eq!(first.marker.feature, FeatureId(0));
        assert_eq!(first.marker.bucket, StatusBucket::Approved);
        assert_eq!(first.process_key, "12345");

        let second = store.get(FeatureId(1)).unwrap();
        assert_eq!(second.marker.position, GeoPoint::new(-16.7, -49.3));
        assert_eq!(second.enterprise_key, "");
        assert!(store.get(FeatureId(2)).is_none());
    }

    #[test]
    fn empty_store_has_no_bounds() {
        assert!(FeatureStore::default().bounds().is_err());
    }
}
