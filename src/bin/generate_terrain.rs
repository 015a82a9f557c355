//! Headless terrain generator: runs the generation pipeline and prints statistics.
//!
//! Usage: cargo run --release --bin generate_terrain -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>   Scene configuration JSON (default: built-in defaults)
//!   --seed <SEED>     Grass scatter seed (default: random, printed)
//!   --grass <N>       Number of grass blades
//!   --rows <N>        Terrain subdivisions along z
//!   --cols <N>        Terrain subdivisions along x
//!   --json <PATH>     Also write the statistics as JSON

use std::path::PathBuf;
use std::time::Instant;

use serde_json::json;

use meadow::core::{Error, logging};
use meadow::generation::GenerationPipeline;
use meadow::scene::{SceneConfig, flag_str, parse_flag};

fn main() {
    logging::init();

    let args: Vec<String> = std::env::args().collect();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    let json_path = flag_str(&args, "--json").map(PathBuf::from);

    let generation = config.generation();
    println!("=== Meadow Terrain Generator ===");
    println!("Footprint: {}m x {}m", generation.terrain.width, generation.terrain.depth);
    println!("Grid:      {} x {} cells", generation.terrain.rows, generation.terrain.cols);
    println!(
        "Noise:     {:?} seed={} amplitude={} frequency={}",
        generation.noise.kind, generation.noise.seed, generation.noise.amplitude, generation.noise.frequency
    );
    println!("Grass:     {} blades", generation.grass_count);
    println!();

    let pipeline = match GenerationPipeline::new(&generation) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let start = Instant::now();
    let world = pipeline.generate();
    let elapsed = start.elapsed();

    let stats = world.mesh.stats();
    let (min_blade, max_blade) = world
        .grass
        .iter()
        .map(|g| g.position[1])
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), y| (lo.min(y), hi.max(y)));

    println!("=== Generation Complete ===");
    println!("Vertices:  {}", stats.vertex_count);
    println!("Triangles: {} ({} indices)", stats.triangle_count, stats.index_count);
    println!("Height:    {:.3} .. {:.3}", stats.min_height, stats.max_height);
    println!("Normals:   {} substituted", stats.substituted_normals);
    if world.grass.is_empty() {
        println!("Grass:     none");
    } else {
        println!("Grass:     {} blades, y {:.3} .. {:.3}", world.grass.len(), min_blade, max_blade);
    }
    println!("Seed:      {}", world.grass_seed);
    println!("Time:      {:.1}ms", elapsed.as_secs_f64() * 1000.0);

    if let Some(path) = json_path {
        let summary = json!({
            "footprint": { "width": generation.terrain.width, "depth": generation.terrain.depth },
            "grid": { "rows": generation.terrain.rows, "cols": generation.terrain.cols },
            "noise": generation.noise,
            "mesh": {
                "vertices": stats.vertex_count,
                "indices": stats.index_count,
                "triangles": stats.triangle_count,
                "min_height": stats.min_height,
                "max_height": stats.max_height,
                "substituted_normals": stats.substituted_normals,
            },
            "grass": { "count": world.grass.len(), "seed": world.grass_seed },
            "elapsed_ms": elapsed.as_secs_f64() * 1000.0,
        });

        let written = serde_json::to_string_pretty(&summary)
            .map_err(|e| e.to_string())
            .and_then(|text| std::fs::write(&path, text).map_err(|e| e.to_string()));
        match written {
            Ok(()) => println!("Stats:     {}", path.display()),
            Err(e) => {
                eprintln!("Failed to write {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
    }
}

/// Scene configuration from `--config` with the command-line overrides applied.
/// Values that do not parse are errors rather than silently ignored.
fn load_config(args: &[String]) -> Result<SceneConfig, Error> {
    let mut config = match flag_str(args, "--config") {
        Some(path) => SceneConfig::load(&PathBuf::from(path))
            .map_err(|e| Error::Config(format!("failed to load {}: {}", path, e)))?,
        None => SceneConfig::default(),
    };
    if let Some(seed) = parse_flag(args, "--seed")? {
        config.grass.seed = Some(seed);
    }
    if let Some(count) = parse_flag(args, "--grass")? {
        config.grass.count = count;
    }
    if let Some(rows) = parse_flag(args, "--rows")? {
        config.terrain.rows = rows;
    }
    if let Some(cols) = parse_flag(args, "--cols")? {
        config.terrain.cols = cols;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_overrides_applied() {
        let config = load_config(&args(&[
            "generate_terrain", "--rows", "16", "--cols", "8", "--grass", "100", "--seed", "3",
        ]))
        .unwrap();
        assert_eq!((config.terrain.rows, config.terrain.cols), (16, 8));
        assert_eq!(config.grass.count, 100);
        assert_eq!(config.grass.seed, Some(3));
    }

    #[test]
    fn test_unparseable_override_is_an_error() {
        assert!(matches!(load_config(&args(&["generate_terrain", "--rows", "abc"])), Err(Error::Config(_))));
        assert!(matches!(load_config(&args(&["generate_terrain", "--cols", "-1"])), Err(Error::Config(_))));
        assert!(matches!(load_config(&args(&["generate_terrain", "--grass", "lots"])), Err(Error::Config(_))));
        assert!(matches!(load_config(&args(&["generate_terrain", "--seed", "0x10"])), Err(Error::Config(_))));
    }
}
