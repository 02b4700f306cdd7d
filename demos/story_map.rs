//! Builds every mode of the built-in city sample into `target/story_map/`.
//!
//! ```sh
//! cargo run --example story_map
//! ```

use std::fs;
use std::path::PathBuf;

use map_composer::compose::{compose, Dataset};
use map_composer::mode::BuildMode;
use map_composer::render::{write_map, LeafletRenderer};
use map_composer::report::write_report;
use map_composer::sample::demo_config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let out_dir = PathBuf::from("target").join("story_map");
    fs::create_dir_all(&out_dir)?;

    let dataset = Dataset::sample();
    let config = demo_config();
    let summary = dataset.summary();
    let renderer = LeafletRenderer {
        title: "City Story Map".to_string(),
    };

    for mode in BuildMode::ALL {
        let doc = compose(&dataset, &config, mode, &mut config.rng())?;
        let map_file = format!("city_map_{mode}.html");
        write_map(&renderer, &doc, &out_dir.join(&map_file))?;
        write_report(
            &summary,
            &map_file,
            &renderer.title,
            &out_dir.join(format!("city_report_{mode}.html")),
        )?;
        println!("{:<10} {} layers: {}", mode, doc.layers().len(), doc.layer_names().join(", "));
    }

    Ok(())
}
