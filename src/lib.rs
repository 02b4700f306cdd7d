//! # Map Composer
//!
//! Layer composition and aggregation for small tabular city datasets.
//!
//! This library provides:
//! - Schema validation that turns raw CSV rows into typed entities
//! - Viewport centering over heterogeneous coordinate sets
//! - Ordered route reconstruction from unordered route samples
//! - Category/kind marker grouping and route color resolution
//! - Clustered synthetic heatmap sampling with an injectable RNG
//! - Summary count tables for an accompanying HTML report
//!
//! ## Features
//!
//! - **`cli`** - Build the `map-composer` binary (enabled by default)
//!
//! ## Quick Start
//!
//! ```rust
//! use map_composer::{compose, BuildMode, Dataset, LocationPoint, MapConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let dataset = Dataset {
//!     points: vec![
//!         LocationPoint::new("Library", "civic", 45.518, -122.678),
//!         LocationPoint::new("Market", "food", 45.513, -122.671),
//!     ],
//!     ..Dataset::default()
//! };
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! let doc = compose(&dataset, &MapConfig::default(), BuildMode::Base, &mut rng).unwrap();
//! assert_eq!(doc.layers().len(), 2);
//! ```

use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{ComposeError, Result};

pub mod schema;
pub use schema::{RawTable, TableSchema, LANDMARKS_SCHEMA, POINTS_SCHEMA, ROUTES_SCHEMA};

pub mod loader;

pub mod geo_utils;
pub use geo_utils::viewport_center;

pub mod routes;
pub use routes::reconstruct_routes;

pub mod layers;
pub use layers::{
    group_landmarks, group_locations, Layer, MapDocument, Marker, MarkerGroupLayer,
    MarkerStyle, HeatmapLayer, PolylineLayer, Popup,
};

pub mod color;
pub use color::ColorPalette;

// Synthetic activity samples for the heatmap layer
pub mod heatmap;
pub use heatmap::{sample_heatmap, HeatmapConfig, SyntheticSampler};

pub mod summary;
pub use summary::{summarize, Summary, SummaryTable};

pub mod mode;
pub use mode::BuildMode;

pub mod compose;
pub use compose::{compose, Dataset, HeatStyle, MapConfig, PolylineStyle, TileLayer, TileStyle};

pub mod render;
pub use render::{LeafletRenderer, MapRenderer};

pub mod report;
pub use report::build_report;

pub mod sample;

// ============================================================================
// Core Types
// ============================================================================

/// A WGS84 coordinate with latitude and longitude in degrees.
///
/// # Example
/// ```
/// use map_composer::GeoPoint;
/// let point = GeoPoint::new(45.515, -122.679); // Portland
/// assert!(point.is_finite());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new point.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Check that both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// A named location row from the points dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationPoint {
    pub name: String,
    /// Grouping key, compared verbatim (no case or whitespace folding)
    pub category: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: Option<String>,
}

impl LocationPoint {
    pub fn new(name: &str, category: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            latitude,
            longitude,
            description: None,
        }
    }

    /// Attach a free-text description shown in the marker popup.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// A landmark: a point grouped by its `kind` rather than its category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub name: String,
    pub kind: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Landmark {
    pub fn new(name: &str, kind: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
            latitude,
            longitude,
        }
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// One raw row of a multi-point route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSample {
    pub route_name: String,
    pub route_type: String,
    /// Ordering key within `route_name`.
    /// `None` when the row's `seq` cell was blank or unparseable; such
    /// samples sort after every numbered sample of the same route.
    pub sequence: Option<f64>,
    pub latitude: f64,
    pub longitude: f64,
}

impl RouteSample {
    pub fn new(route_name: &str, route_type: &str, sequence: f64, latitude: f64, longitude: f64) -> Self {
        Self {
            route_name: route_name.to_string(),
            route_type: route_type.to_string(),
            sequence: Some(sequence),
            latitude,
            longitude,
        }
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// A route rebuilt from its samples, points in travel order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub name: String,
    /// Type of the first sample after ordering
    pub route_type: String,
    pub points: Vec<GeoPoint>,
}

impl Route {
    /// Total length along the polyline in meters.
    pub fn length_meters(&self) -> f64 {
        geo_utils::polyline_length(&self.points)
    }

    pub fn start(&self) -> Option<GeoPoint> {
        self.points.first().copied()
    }
}

/// A synthetic weighted sample for the heatmap layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatSample {
    pub latitude: f64,
    pub longitude: f64,
    /// Intensity in `[0, 1]`
    pub weight: f64,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_finite() {
        assert!(GeoPoint::new(45.5, -122.6).is_finite());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_finite());
        assert!(!GeoPoint::new(0.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_location_with_description() {
        let p = LocationPoint::new("Library", "civic", 45.5, -122.6).with_description("Open late");
        assert_eq!(p.description.as_deref(), Some("Open late"));
        assert_eq!(p.position(), GeoPoint::new(45.5, -122.6));
    }

    #[test]
    fn test_route_start_and_length() {
        let route = Route {
            name: "R1".to_string(),
            route_type: "bus".to_string(),
            points: vec![GeoPoint::new(45.520, -122.680), GeoPoint::new(45.521, -122.680)],
        };
        assert_eq!(route.start(), Some(GeoPoint::new(45.520, -122.680)));
        // 0.001 degrees of latitude is roughly 111m
        assert!((route.length_meters() - 111.0).abs() < 2.0);
    }

    #[test]
    fn test_empty_route_has_no_start() {
        let route = Route {
            name: "R".to_string(),
            route_type: "walk".to_string(),
            points: vec![],
        };
        assert!(route.start().is_none());
        assert_eq!(route.length_meters(), 0.0);
    }
}
