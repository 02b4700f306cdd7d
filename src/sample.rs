//! Built-in city dataset used by `--demo` and the story map demo.

use crate::compose::{Dataset, MapConfig};
use crate::{GeoPoint, Landmark, RouteSample};

/// Downtown center of the sample city.
pub const CITY_CENTER: GeoPoint = GeoPoint {
    latitude: 45.515,
    longitude: -122.679,
};

const TRAM_LINE: [(f64, f64); 5] = [
    (45.523, -122.676),
    (45.521, -122.681),
    (45.518, -122.683),
    (45.515, -122.682),
    (45.511, -122.678),
];

const BUS_ROUTE: [(f64, f64); 5] = [
    (45.528, -122.675),
    (45.525, -122.672),
    (45.521, -122.670),
    (45.517, -122.673),
    (45.514, -122.677),
];

fn ordered_samples(name: &str, route_type: &str, coords: &[(f64, f64)]) -> Vec<RouteSample> {
    coords
        .iter()
        .enumerate()
        .map(|(i, &(lat, lon))| RouteSample::new(name, route_type, (i + 1) as f64, lat, lon))
        .collect()
}

impl Dataset {
    /// Two transit routes and five landmarks around downtown. No location
    /// points, so base-mode builds of the sample contain no layers.
    pub fn sample() -> Self {
        let mut route_samples = ordered_samples("Tram Line", "tram", &TRAM_LINE);
        route_samples.extend(ordered_samples("Bus Route", "bus", &BUS_ROUTE));

        Self {
            points: Vec::new(),
            landmarks: vec![
                Landmark::new("City Library", "library", 45.518, -122.678),
                Landmark::new("Central Park", "park", 45.521, -122.685),
                Landmark::new("Art Museum", "museum", 45.522, -122.680),
                Landmark::new("Historic Square", "square", 45.516, -122.676),
                Landmark::new("Riverside Market", "market", 45.513, -122.671),
            ],
            route_samples,
        }
    }
}

/// Config for sample builds: default styling, viewport and heatmap fixed
/// on the city center.
pub fn demo_config() -> MapConfig {
    MapConfig {
        center: Some(CITY_CENTER),
        fallback_center: Some(CITY_CENTER),
        ..MapConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::compose;
    use crate::layers::Layer;
    use crate::mode::BuildMode;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_sample_routes() {
        let routes = Dataset::sample().routes();
        let names: Vec<&str> = routes.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Bus Route", "Tram Line"]);
        assert!(routes.iter().all(|r| r.points.len() == 5));
        assert_eq!(routes[1].start(), Some(GeoPoint::new(45.523, -122.676)));
    }

    #[test]
    fn test_sample_full_build() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let doc = compose(&Dataset::sample(), &demo_config(), BuildMode::Full, &mut rng).unwrap();
        assert_eq!(doc.layers().iter().filter(|l| l.is_polyline()).count(), 2);
        assert_eq!(doc.layers().iter().filter(|l| l.is_marker_group()).count(), 5);
        assert!(doc.layers().iter().any(Layer::is_heatmap));
        assert_eq!(doc.center(), CITY_CENTER);

        let Some(Layer::Polyline(tram)) = doc.layer("Tram Line") else {
            panic!("missing tram layer");
        };
        assert_eq!(tram.color, "blue");
    }

    #[test]
    fn test_sample_summary_counts_routes() {
        let summary = Dataset::sample().summary();
        assert_eq!(summary.total_locations, 0);
        let route_types = summary.route_types.unwrap();
        assert_eq!(route_types.total(), 2);
    }
}
