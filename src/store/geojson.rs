//! GeoJSON decoding for the point dataset and the overlays.
//!
//! Only the parts of RFC 7946 the plugin draws are modelled. Coordinates are
//! `[lon, lat]` with an optional altitude that is ignored.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::error::{LicenseMapError, Result};
use crate::domain::{GeoPoint, Record};

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Document {
    FeatureCollection {
        #[serde(default)]
        features: Vec<RawFeature>,
    },
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

type Position = Vec<f64>;

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    GeometryCollection { geometries: Vec<Geometry> },
}

fn parse_document(text: &str) -> Result<Vec<RawFeature>> {
    let Document::FeatureCollection { features } = serde_json::from_str(text)
        .map_err(|e| LicenseMapError::Parse(format!("invalid FeatureCollection: {e}")))?;
    Ok(features)
}

fn to_point(position: &[f64]) -> Option<GeoPoint> {
    match position {
        [lon, lat, ..] if lat.is_finite() && lon.is_finite() => Some(GeoPoint::new(*lat, *lon)),
        _ => None,
    }
}

fn to_path(positions: &[Position]) -> Vec<GeoPoint> {
    positions.iter().filter_map(|p| to_point(p)).collect()
}

/// Reads a property as text.
///
/// Strings are kept as-is, numbers and booleans are stringified, and null,
/// empty strings, arrays and objects are treated as absent.
fn text_property(properties: &Map<String, Value>, key: &str) -> Option<String> {
    match properties.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Decodes the primary dataset into records, in document order.
///
/// Features whose geometry is not a `Point` are skipped with a warning.
///
/// # Errors
///
/// Returns [`LicenseMapError::Parse`] if `text` is not a GeoJSON
/// `FeatureCollection`.
pub fn parse_records(text: &str) -> Result<Vec<Record>> {
    let features = parse_document(text)?;
    let total = features.len();

    let records: Vec<Record> = features
        .into_iter()
        .enumerate()
        .filter_map(|(idx, feature)| {
            let position = match feature.geometry {
                Some(Geometry::Point { coordinates }) => to_point(&coordinates),
                _ => None,
            };
            let Some(position) = position else {
                tracing::warn!(feature_index = idx, "skipping feature without a point geometry");
                return None;
            };

            let props = feature.properties.unwrap_or_default();
            Some(Record {
                process: text_property(&props, "processo"),
                enterprise: text_property(&props, "empreendimento"),
                kind: text_property(&props, "tipo"),
                purpose: text_property(&props, "finalidade"),
                location: text_property(&props, "localizacao"),
                status: text_property(&props, "status"),
                validity: text_property(&props, "validade"),
                license_pdf: text_property(&props, "pdf_licenca"),
                opinion_pdf: text_property(&props, "pdf_parecer"),
                position,
            })
        })
        .collect();

    tracing::debug!(total_features = total, records = records.len(), "dataset decoded");
    Ok(records)
}

fn collect_paths(geometry: Geometry, out: &mut Vec<Vec<GeoPoint>>) {
    match geometry {
        Geometry::Point { .. } | Geometry::MultiPoint { .. } => {}
        Geometry::LineString { coordinates } => out.push(to_path(&coordinates)),
        Geometry::MultiLineString { coordinates } | Geometry::Polygon { coordinates } => {
            out.extend(coordinates.iter().map(|line| to_path(line)));
        }
        Geometry::MultiPolygon { coordinates } => {
            for polygon in &coordinates {
                out.extend(polygon.iter().map(|ring| to_path(ring)));
            }
        }
        Geometry::GeometryCollection { geometries } => {
            for g in geometries {
                collect_paths(g, out);
            }
        }
    }
}

/// Decodes an overlay document into drawable paths.
///
/// Points are ignored; paths with fewer than two vertices are dropped.
///
/// # Errors
///
/// Returns [`LicenseMapError::Parse`] if `text` is not a GeoJSON
/// `FeatureCollection`.
pub fn parse_overlay_paths(text: &str) -> Result<Vec<Vec<GeoPoint>>> {
    let mut paths = Vec::new();
    for feature in parse_document(text)? {
        if let Some(geometry) = feature.geometry {
            collect_paths(geometry, &mut paths);
        }
    }
    paths.retain(|p| p.len() >= 2);
    Ok(paths)
}
