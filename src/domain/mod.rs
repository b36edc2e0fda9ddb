//! Domain layer for the license map plugin.
//!
//! Pure types and rules with no Zellij or filesystem dependency: records and
//! coordinates, status buckets, validity classification, search text
//! normalization and the filter pass.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`record`]: Record, point and bounds types
//! - [`status`]: Status bucket classification and the status selector
//! - [`validity`]: Validity date classification
//! - [`text`]: Search text normalization
//! - [`filter`]: Filter criteria, counts and the filter pass

pub mod error;
pub mod filter;
pub mod record;
pub mod status;
pub mod text;
pub mod validity;

pub use error::{LicenseMapError, Result};
pub use filter::{BucketCounts, FilterCriteria, FilterOutcome};
pub use record::{GeoBounds, GeoPoint, Record, NOT_INFORMED, NOT_INFORMED_F};
pub use status::{StatusBucket, StatusFilter};
pub use validity::ValidityClass;
