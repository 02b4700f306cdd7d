//! # Geographic Utilities
//!
//! Viewport centering and distance helpers.
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`viewport_center`] | Unweighted centroid over several coordinate sets |
//! | [`haversine_distance`] | Great-circle distance between two points |
//! | [`polyline_length`] | Total length of a polyline in meters |
//!
//! ## Example
//!
//! ```rust
//! use map_composer::{GeoPoint, geo_utils};
//!
//! let stops = vec![GeoPoint::new(45.50, -122.60), GeoPoint::new(45.52, -122.62)];
//! let sights = vec![GeoPoint::new(45.54, -122.64)];
//!
//! let center = geo_utils::viewport_center(&[&stops, &sights]).unwrap();
//! assert!((center.latitude - 45.52).abs() < 1e-9);
//! ```
//!
//! ## Coordinate System
//!
//! All functions expect WGS84 coordinates (latitude/longitude in degrees).
//! The centroid is a plain arithmetic mean, which is fine at city scale but
//! misbehaves across the antimeridian.

use geo::{Centroid, Distance, Haversine, MultiPoint, Point};

use crate::error::{ComposeError, Result};
use crate::GeoPoint;

// =============================================================================
// Center/Centroid Functions
// =============================================================================

/// Compute the map viewport center from one or more coordinate collections.
///
/// Returns the arithmetic mean of every latitude and every longitude across
/// the union of `collections`. Each point counts once regardless of which
/// collection it came from; empty collections contribute nothing.
///
/// # Errors
///
/// [`ComposeError::EmptyViewport`] when every collection is empty. The caller
/// decides on a fallback center.
pub fn viewport_center(collections: &[&[GeoPoint]]) -> Result<GeoPoint> {
    let points: MultiPoint<f64> = collections
        .iter()
        .flat_map(|c| c.iter())
        .map(|p| Point::new(p.longitude, p.latitude))
        .collect::<Vec<_>>()
        .into();

    points
        .centroid()
        .map(|c| GeoPoint::new(c.y(), c.x()))
        .ok_or(ComposeError::EmptyViewport)
}

// =============================================================================
// Distance Functions
// =============================================================================

/// Great-circle distance between two points in meters (spherical Earth).
///
/// ```rust
/// use map_composer::{GeoPoint, geo_utils};
///
/// let london = GeoPoint::new(51.5074, -0.1278);
/// let paris = GeoPoint::new(48.8566, 2.3522);
///
/// let distance = geo_utils::haversine_distance(&london, &paris);
/// assert!((distance - 343_560.0).abs() < 1000.0); // ~344 km
/// ```
#[inline]
pub fn haversine_distance(p1: &GeoPoint, p2: &GeoPoint) -> f64 {
    let point1 = Point::new(p1.longitude, p1.latitude);
    let point2 = Point::new(p2.longitude, p2.latitude);
    Haversine::distance(point1, point2)
}

/// Sum of haversine distances between consecutive points.
/// Empty or single-point polylines have length 0.
pub fn polyline_length(points: &[GeoPoint]) -> f64 {
    points
        .windows(2)
        .map(|w| haversine_distance(&w[0], &w[1]))
        .sum()
}

// =============================================================================
// Unit Tests
// =============================================================================
