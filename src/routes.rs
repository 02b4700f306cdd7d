//! Route reconstruction from unordered route samples.
//!
//! Samples are partitioned by route name, ordered by sequence within each
//! partition (stable, so equal sequences keep input order) and turned into
//! one [`Route`] per name. The route type is the type of the first sample
//! after ordering; later samples with a different type do not change it.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use log::{debug, warn};

use crate::{Route, RouteSample};

/// Build one route per distinct `route_name`, ordered by name.
///
/// # Example
/// ```
/// use map_composer::{reconstruct_routes, RouteSample};
///
/// let samples = vec![
///     RouteSample::new("R1", "bus", 3.0, 45.3, -122.3),
///     RouteSample::new("R1", "bus", 1.0, 45.1, -122.1),
///     RouteSample::new("R1", "bus", 2.0, 45.2, -122.2),
/// ];
/// let routes = reconstruct_routes(&samples);
/// assert_eq!(routes.len(), 1);
/// assert_eq!(routes[0].points[0].latitude, 45.1);
/// ```
pub fn reconstruct_routes(samples: &[RouteSample]) -> Vec<Route> {
    let mut by_name: BTreeMap<&str, Vec<&RouteSample>> = BTreeMap::new();
    for sample in samples {
        by_name.entry(sample.route_name.as_str()).or_default().push(sample);
    }

    let routes: Vec<Route> = by_name
        .into_iter()
        .map(|(name, mut group)| {
            // Vec::sort_by is stable
            group.sort_by(|a, b| compare_sequence(a.sequence, b.sequence));

            let route_type = group[0].route_type.clone();
            if let Some(other) = group.iter().find(|s| s.route_type != route_type) {
                warn!(
                    "[routes] route {:?} mixes types {:?} and {:?}; keeping {:?}",
                    name, route_type, other.route_type, route_type
                );
            }

            Route {
                name: name.to_string(),
                route_type,
                points: group.iter().map(|s| s.position()).collect(),
            }
        })
        .collect();

    debug!("[routes] rebuilt {} routes from {} samples", routes.len(), samples.len());
    routes
}

/// Numbered samples first in ascending order, unnumbered ones after.
/// Numerically equal sequences (including `0` and `-0`) compare equal.
fn compare_sequence(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeoPoint;

    fn unordered(route_name: &str, route_type: &str, lat: f64) -> RouteSample {
        RouteSample {
            route_name: route_name.to_string(),
            route_type: route_type.to_string(),
            sequence: None,
            latitude: lat,
            longitude: -122.0,
        }
    }

    #[test]
    fn test_empty_input_gives_no_routes() {
        assert!(reconstruct_routes(&[]).is_empty());
    }

    #[test]
    fn test_points_ordered_by_sequence() {
        let a = GeoPoint::new(1.0, 1.0);
        let b = GeoPoint::new(2.0, 2.0);
        let c = GeoPoint::new(3.0, 3.0);
        let samples = vec![
            RouteSample::new("R1", "bus", 3.0, a.latitude, a.longitude),
            RouteSample::new("R1", "bus", 1.0, b.latitude, b.longitude),
            RouteSample::new("R1", "bus", 2.0, c.latitude, c.longitude),
        ];
        let routes = reconstruct_routes(&samples);
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].points, vec![b, c, a]);
    }

    #[test]
    fn test_equal_sequences_keep_row_order() {
        let samples = vec![
            RouteSample::new("R1", "walk", 0.0, 45.3, -122.0),
            RouteSample::new("R1", "walk", 0.0, 45.1, -122.0),
            RouteSample::new("R1", "walk", 0.0, 45.2, -122.0),
        ];
        let routes = reconstruct_routes(&samples);
        let lats: Vec<f64> = routes[0].points.iter().map(|p| p.latitude).collect();
        assert_eq!(lats, vec![45.3, 45.1, 45.2]);
    }

    #[test]
    fn test_one_route_per_distinct_name() {
        let samples = vec![
            RouteSample::new("Tram", "tram", 1.0, 45.1, -122.1),
            RouteSample::new("Bus", "bus", 1.0, 45.2, -122.2),
            RouteSample::new("Tram", "tram", 2.0, 45.3, -122.3),
            RouteSample::new("Ferry", "ferry", 1.0, 45.4, -122.4),
        ];
        let routes = reconstruct_routes(&samples);
        let names: Vec<&str> = routes.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Bus", "Ferry", "Tram"]);
        assert_eq!(routes[2].points.len(), 2);
    }

    #[test]
    fn test_first_type_after_sorting_wins() {
        let samples = vec![
            RouteSample::new("R1", "walk", 2.0, 45.2, -122.2),
            RouteSample::new("R1", "bike", 1.0, 45.1, -122.1),
        ];
        let routes = reconstruct_routes(&samples);
        assert_eq!(routes[0].route_type, "bike");
    }

    #[test]
    fn test_unnumbered_samples_sort_last() {
        let samples = vec![
            unordered("R1", "bus", 45.9),
            RouteSample::new("R1", "bus", 5.0, 45.5, -122.0),
            unordered("R1", "bus", 45.8),
            RouteSample::new("R1", "bus", 1.0, 45.1, -122.0),
        ];
        let routes = reconstruct_routes(&samples);
        let lats: Vec<f64> = routes[0].points.iter().map(|p| p.latitude).collect();
        assert_eq!(lats, vec![45.1, 45.5, 45.9, 45.8]);
    }

    #[test]
    fn test_signed_zero_sequences_keep_row_order() {
        let samples = vec![
            RouteSample::new("R1", "bus", 0.0, 45.1, -122.0),
            RouteSample::new("R1", "bus", -0.0, 45.2, -122.0),
        ];
        let routes = reconstruct_routes(&samples);
        let lats: Vec<f64> = routes[0].points.iter().map(|p| p.latitude).collect();
        assert_eq!(lats, vec![45.1, 45.2]);
    }

    #[test]
    fn test_negative_and_fractional_sequences() {
        let samples = vec![
            RouteSample::new("R1", "bus", 0.5, 45.2, -122.0),
            RouteSample::new("R1", "bus", -1.0, 45.1, -122.0),
            RouteSample::new("R1", "bus", 0.75, 45.3, -122.0),
        ];
        let routes = reconstruct_routes(&samples);
        let lats: Vec<f64> = routes[0].points.iter().map(|p| p.latitude).collect();
        assert_eq!(lats, vec![45.1, 45.2, 45.3]);
    }
}
