//! Layer model and marker grouping.
//!
//! A [`MapDocument`] is a viewport plus an ordered list of [`Layer`]s. Each
//! layer is one toggleable unit on the rendered map: a route polyline, a
//! group of markers or a heatmap.
//!
//! Marker groups are keyed by exact string match. `"Park"`, `"park"` and
//! `"park "` produce three distinct layers.

use std::collections::HashMap;

use serde::Serialize;

use crate::compose::{HeatStyle, TileLayer};
use crate::{GeoPoint, HeatSample, Landmark, LocationPoint};

/// Label prefix of location category layers.
pub const LOCATIONS_LABEL: &str = "Locations";
/// Label prefix of landmark kind layers.
pub const LANDMARKS_LABEL: &str = "Landmarks";
/// Name of the synthetic activity layer.
pub const HEATMAP_LAYER_NAME: &str = "Activity heatmap";

/// Popup content: a bold title plus optional plain lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    pub title: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MarkerStyle {
    /// Default map pin
    Pin,
    /// Filled circle with a pixel radius
    Circle { radius: u32, fill_opacity: f64 },
    /// Colored pin with a named icon glyph
    Icon { color: String, icon: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub position: GeoPoint,
    pub tooltip: Option<String>,
    pub popup: Option<Popup>,
    pub style: MarkerStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolylineLayer {
    pub name: String,
    pub points: Vec<GeoPoint>,
    pub color: String,
    pub weight: u32,
    pub opacity: f64,
    pub tooltip: Option<String>,
    /// Marker placed on the first point
    pub start_marker: Option<Marker>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerGroupLayer {
    pub name: String,
    pub markers: Vec<Marker>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapLayer {
    pub name: String,
    pub samples: Vec<HeatSample>,
    pub style: HeatStyle,
}

/// One toggleable unit of the composed map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Layer {
    Polyline(PolylineLayer),
    MarkerGroup(MarkerGroupLayer),
    Heatmap(HeatmapLayer),
}

impl Layer {
    pub fn name(&self) -> &str {
        match self {
            Layer::Polyline(l) => &l.name,
            Layer::MarkerGroup(l) => &l.name,
            Layer::Heatmap(l) => &l.name,
        }
    }

    pub fn is_polyline(&self) -> bool {
        matches!(self, Layer::Polyline(_))
    }

    pub fn is_marker_group(&self) -> bool {
        matches!(self, Layer::MarkerGroup(_))
    }

    pub fn is_heatmap(&self) -> bool {
        matches!(self, Layer::Heatmap(_))
    }
}

/// The composed map: center, base tiles and ordered layers.
///
/// Built once by [`crate::compose`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapDocument {
    center: GeoPoint,
    zoom_start: u8,
    tiles: TileLayer,
    layers: Vec<Layer>,
}

impl MapDocument {
    pub(crate) fn new(center: GeoPoint, zoom_start: u8, tiles: TileLayer, layers: Vec<Layer>) -> Self {
        Self {
            center,
            zoom_start,
            tiles,
            layers,
        }
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn zoom_start(&self) -> u8 {
        self.zoom_start
    }

    pub fn tiles(&self) -> &TileLayer {
        &self.tiles
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Look a layer up by its display name.
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name() == name)
    }

    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(Layer::name).collect()
    }
}

/// Partition `items` by `key`, one marker group per distinct key named
/// `"<label>: <key>"`, in order of first appearance.
pub fn group_markers<T>(
    items: &[T],
    label: &str,
    key: impl Fn(&T) -> &str,
    marker: impl Fn(&T) -> Marker,
) -> Vec<MarkerGroupLayer> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<MarkerGroupLayer> = Vec::new();

    for item in items {
        let k = key(item);
        let slot = match slots.get(k) {
            Some(&i) => i,
            None => {
                slots.insert(k.to_string(), groups.len());
                groups.push(MarkerGroupLayer {
                    name: format!("{}: {}", label, k),
                    markers: Vec::new(),
                });
                groups.len() - 1
            }
        };
        groups[slot].markers.push(marker(item));
    }

    groups
}

/// One circle-marker layer per location category.
///
/// ```
/// use map_composer::{group_locations, LocationPoint};
///
/// let points = vec![
///     LocationPoint::new("Rose Garden", "park", 45.519, -122.705),
///     LocationPoint::new("Art Museum", "museum", 45.516, -122.683),
///     LocationPoint::new("Laurelhurst", "park", 45.521, -122.625),
/// ];
/// let layers = group_locations(&points);
/// assert_eq!(layers[0].name, "Locations: park");
/// assert_eq!(layers[0].markers.len(), 2);
/// ```
pub fn group_locations(points: &[LocationPoint]) -> Vec<MarkerGroupLayer> {
    group_markers(points, LOCATIONS_LABEL, |p| p.category.as_str(), location_marker)
}

/// One pin-marker layer per landmark kind.
pub fn group_landmarks(landmarks: &[Landmark]) -> Vec<MarkerGroupLayer> {
    group_markers(landmarks, LANDMARKS_LABEL, |l| l.kind.as_str(), landmark_marker)
}

fn location_marker(point: &LocationPoint) -> Marker {
    let lines = point
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|d| vec![d.to_string()])
        .unwrap_or_default();

    Marker {
        position: point.position(),
        tooltip: Some(point.name.clone()),
        popup: Some(Popup {
            title: point.name.clone(),
            lines,
        }),
        style: MarkerStyle::Circle {
            radius: 6,
            fill_opacity: 0.85,
        },
    }
}

fn landmark_marker(landmark: &Landmark) -> Marker {
    Marker {
        position: landmark.position(),
        tooltip: Some(landmark.name.clone()),
        popup: Some(Popup {
            title: format!("{} ({})", landmark.name, landmark.kind),
            lines: Vec::new(),
        }),
        style: MarkerStyle::Pin,
    }
}
