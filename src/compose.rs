//! Map composition: typed datasets in, one [`MapDocument`] out.
//!
//! All defaults (center, zoom, tiles, palette, sampling) live in an explicit
//! [`MapConfig`] so independent builds never share state.

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::color::{self, ColorPalette};
use crate::error::{ComposeError, Result};
use crate::geo_utils::viewport_center;
use crate::heatmap::{sample_heatmap, HeatmapConfig};
use crate::layers::{
    group_landmarks, group_locations, HeatmapLayer, Layer, MapDocument, Marker, MarkerStyle,
    PolylineLayer, Popup, HEATMAP_LAYER_NAME,
};
use crate::mode::BuildMode;
use crate::routes::reconstruct_routes;
use crate::summary::{summarize, Summary};
use crate::{GeoPoint, Landmark, LocationPoint, Route, RouteSample};

/// Base tile providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TileStyle {
    OpenStreetMap,
    CartoDbPositron,
    CartoDbDarkMatter,
}

impl TileStyle {
    pub fn url_template(&self) -> &'static str {
        match self {
            TileStyle::OpenStreetMap => "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
            TileStyle::CartoDbPositron => {
                "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png"
            }
            TileStyle::CartoDbDarkMatter => {
                "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png"
            }
        }
    }

    pub fn attribution(&self) -> &'static str {
        match self {
            TileStyle::OpenStreetMap => {
                "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
            }
            TileStyle::CartoDbPositron | TileStyle::CartoDbDarkMatter => {
                "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>"
            }
        }
    }

    /// Accepts `osm`/`openstreetmap`, `positron`/`light` and
    /// `darkmatter`/`dark`, ignoring case, spaces and hyphens.
    pub fn parse(value: &str) -> Option<Self> {
        let key: String = value
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "osm" | "openstreetmap" => Some(TileStyle::OpenStreetMap),
            "positron" | "cartodbpositron" | "light" => Some(TileStyle::CartoDbPositron),
            "darkmatter" | "cartodbdarkmatter" | "dark" => Some(TileStyle::CartoDbDarkMatter),
            _ => None,
        }
    }
}

/// Base tile layer with its name in the layer control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileLayer {
    pub style: TileStyle,
    pub name: String,
    pub url: String,
    pub attribution: String,
}

impl TileLayer {
    pub fn new(style: TileStyle, name: &str) -> Self {
        Self {
            style,
            name: name.to_string(),
            url: style.url_template().to_string(),
            attribution: style.attribution().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolylineStyle {
    pub weight: u32,
    pub opacity: f64,
}

impl Default for PolylineStyle {
    fn default() -> Self {
        Self { weight: 4, opacity: 0.8 }
    }
}

/// Rendering parameters of the heatmap layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatStyle {
    pub radius: u32,
    pub blur: u32,
    pub max_zoom: u8,
}

impl Default for HeatStyle {
    fn default() -> Self {
        Self {
            radius: 18,
            blur: 15,
            max_zoom: 16,
        }
    }
}

/// Everything a build needs besides its data.
#[derive(Debug, Clone)]
pub struct MapConfig {
    /// Fixed viewport center; when set, the dataset centroid is not computed
    pub center: Option<GeoPoint>,
    /// Used only when no dataset has any coordinate
    pub fallback_center: Option<GeoPoint>,
    pub zoom_start: u8,
    pub tiles: TileLayer,
    pub palette: ColorPalette,
    pub heatmap: HeatmapConfig,
    pub route_style: PolylineStyle,
    pub heat_style: HeatStyle,
    /// `Some` for reproducible heatmap samples
    pub seed: Option<u64>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: None,
            fallback_center: None,
            zoom_start: 13,
            tiles: TileLayer::new(TileStyle::CartoDbPositron, "City Map"),
            palette: ColorPalette::default(),
            heatmap: HeatmapConfig::default(),
            route_style: PolylineStyle::default(),
            heat_style: HeatStyle::default(),
            seed: None,
        }
    }
}

impl MapConfig {
    /// Random source for synthetic sampling: seeded when `seed` is set,
    /// entropy-seeded otherwise.
    pub fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}

/// Validated input entities of one build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub points: Vec<LocationPoint>,
    pub landmarks: Vec<Landmark>,
    pub route_samples: Vec<RouteSample>,
}

impl Dataset {
    pub fn routes(&self) -> Vec<Route> {
        reconstruct_routes(&self.route_samples)
    }

    /// Count tables for the report.
    pub fn summary(&self) -> Summary {
        summarize(&self.points, &self.routes())
    }

    /// Unweighted centroid of every loaded coordinate.
    pub fn center(&self) -> Result<GeoPoint> {
        let points: Vec<GeoPoint> = self.points.iter().map(LocationPoint::position).collect();
        let landmarks: Vec<GeoPoint> = self.landmarks.iter().map(Landmark::position).collect();
        let samples: Vec<GeoPoint> = self.route_samples.iter().map(RouteSample::position).collect();
        viewport_center(&[&points, &landmarks, &samples])
    }
}

/// Compose the layered map for `mode`.
///
/// Layer order: location categories, then (per mode) routes, landmark kinds
/// and the heatmap. Unless `config.center` fixes it, the center comes from
/// every loaded coordinate, so all modes of one dataset share a viewport.
///
/// # Errors
///
/// - [`ComposeError::EmptyViewport`] when the dataset has no coordinates and
///   `config.fallback_center` is `None`
/// - [`ComposeError::InvalidConfig`] when the heatmap config is out of range
///   and the heatmap is requested
pub fn compose<R: Rng + ?Sized>(
    dataset: &Dataset,
    config: &MapConfig,
    mode: BuildMode,
    rng: &mut R,
) -> Result<MapDocument> {
    let center = match config.center {
        Some(center) => Ok(center),
        None => dataset.center(),
    };
    let center = match (center, config.fallback_center) {
        (Ok(center), _) => center,
        (Err(ComposeError::EmptyViewport), Some(fallback)) => {
            info!("[compose] no coordinates loaded, using fallback center {:?}", fallback);
            fallback
        }
        (Err(e), _) => return Err(e),
    };

    let mut layers: Vec<Layer> = group_locations(&dataset.points)
        .into_iter()
        .map(Layer::MarkerGroup)
        .collect();

    if mode.includes_routes() {
        let routes = dataset.routes();
        layers.extend(routes.iter().map(|r| Layer::Polyline(route_layer(r, config))));
    }

    if mode.includes_landmarks() {
        layers.extend(group_landmarks(&dataset.landmarks).into_iter().map(Layer::MarkerGroup));
    }

    if mode.includes_heatmap() {
        let samples = sample_heatmap(center, &config.heatmap, rng)?.collect();
        layers.push(Layer::Heatmap(HeatmapLayer {
            name: HEATMAP_LAYER_NAME.to_string(),
            samples,
            style: config.heat_style,
        }));
    }

    debug!(
        "[compose] mode {} -> {} layers centered at ({:.5}, {:.5})",
        mode,
        layers.len(),
        center.latitude,
        center.longitude
    );

    Ok(MapDocument::new(center, config.zoom_start, config.tiles.clone(), layers))
}

fn route_layer(route: &Route, config: &MapConfig) -> PolylineLayer {
    let start_marker = route.start().map(|position| Marker {
        position,
        tooltip: None,
        popup: Some(Popup {
            title: format!("{} start", route.name),
            lines: Vec::new(),
        }),
        style: MarkerStyle::Icon {
            color: "gray".to_string(),
            icon: "bus".to_string(),
        },
    });

    PolylineLayer {
        name: route.name.clone(),
        points: route.points.clone(),
        color: config.palette.resolve(&route.route_type).to_string(),
        weight: config.route_style.weight,
        opacity: config.route_style.opacity,
        tooltip: Some(format!("{} ({})", route.name, color::normalize(&route.route_type))),
        start_marker,
    }
}
