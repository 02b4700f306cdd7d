use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use map_composer::compose::{compose, Dataset, MapConfig, TileLayer, TileStyle};
use map_composer::loader::{load_landmarks, load_points, load_routes};
use map_composer::mode::BuildMode;
use map_composer::render::{write_map, LeafletRenderer};
use map_composer::report::write_report;
use map_composer::sample::demo_config;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Build mode: base, routes, landmarks, heatmap or full.
    /// Unknown values build the full map.
    mode: Option<String>,

    /// Locations CSV (name, category, latitude, longitude[, description])
    #[arg(long, default_value = "locations.csv")]
    points: PathBuf,

    /// Route samples CSV (route_name, route_type, latitude, longitude[, seq]).
    /// Skipped when the file does not exist.
    #[arg(long, default_value = "routes.csv")]
    routes: PathBuf,

    /// Landmarks CSV (name, kind, latitude, longitude).
    /// Skipped when the file does not exist.
    #[arg(long, default_value = "landmarks.csv")]
    landmarks: PathBuf,

    /// Directory for the map and report files
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Base tiles: osm, positron or darkmatter
    #[arg(long)]
    tiles: Option<String>,

    /// Seed for reproducible heatmap samples
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value = "City Story Map")]
    title: String,

    /// Use the built-in city sample instead of CSV input
    #[arg(long)]
    demo: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mode = BuildMode::from_arg(args.mode.as_deref());

    let (dataset, mut config) = if args.demo {
        (Dataset::sample(), demo_config())
    } else {
        (load_dataset(&args)?, MapConfig::default())
    };

    if let Some(tiles) = &args.tiles {
        let Some(style) = TileStyle::parse(tiles) else {
            bail!("unknown tile style {tiles:?} (expected osm, positron or darkmatter)");
        };
        config.tiles = TileLayer::new(style, &config.tiles.name);
    }
    config.seed = args.seed;

    info!(
        "Building {} map: {} locations, {} landmarks, {} route samples",
        mode,
        dataset.points.len(),
        dataset.landmarks.len(),
        dataset.route_samples.len()
    );

    let doc = compose(&dataset, &config, mode, &mut config.rng())
        .context("failed to compose map")?;

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create {}", args.out_dir.display()))?;

    let map_file = format!("city_map_{mode}.html");
    let renderer = LeafletRenderer {
        title: args.title.clone(),
    };
    write_map(&renderer, &doc, &args.out_dir.join(&map_file)).context("failed to write map")?;

    let report_path = args.out_dir.join(format!("city_report_{mode}.html"));
    write_report(&dataset.summary(), &map_file, &args.title, &report_path)
        .context("failed to write report")?;

    println!("Map:    {}", args.out_dir.join(&map_file).display());
    println!("Report: {}", report_path.display());
    Ok(())
}

fn load_dataset(args: &Args) -> Result<Dataset> {
    let points = load_points(&args.points)
        .with_context(|| format!("failed to load locations from {}", args.points.display()))?;
    let route_samples = load_routes(&args.routes)
        .with_context(|| format!("failed to load routes from {}", args.routes.display()))?;
    let landmarks = load_landmarks(&args.landmarks)
        .with_context(|| format!("failed to load landmarks from {}", args.landmarks.display()))?;

    Ok(Dataset {
        points,
        landmarks,
        route_samples,
    })
}
