//! Data layer: the in-memory feature store, overlays and GeoJSON loading.
//!
//! # Organization
//!
//! - [`features`]: Feature store and markers
//! - [`overlay`]: Overlay configuration and loaded overlays
//! - [`geojson`]: GeoJSON decoding
//! - [`source`]: Where documents are read from

pub mod features;
pub mod geojson;
pub mod overlay;
pub mod source;

pub use features::{Feature, FeatureId, FeatureStore, Marker};
pub use overlay::{Overlay, OverlaySpec};
pub use source::{DatasetSource, FsSource};
