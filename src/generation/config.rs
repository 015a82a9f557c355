//! Generation configuration extracted from SceneConfig

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::grass::GrassInstance;
use crate::terrain::{Footprint, NoiseParams, TerrainVertex};

/// Largest vertex, index, or instance buffer a configuration may ask for.
/// Matches wgpu's default `max_buffer_size`, so every adapter can hold it.
pub const MAX_BUFFER_BYTES: u64 = 256 << 20;

/// Upper bound on scattered grass blades
pub const MAX_GRASS_COUNT: usize = 4_000_000;

const _: () = assert!(MAX_GRASS_COUNT as u64 * std::mem::size_of::<GrassInstance>() as u64 <= MAX_BUFFER_BYTES);

/// Terrain extent and grid resolution
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Size along x in meters
    pub width: f32,
    /// Size along z in meters
    pub depth: f32,
    /// Subdivisions along z
    pub rows: u32,
    /// Subdivisions along x
    pub cols: u32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 20.0,
            depth: 20.0,
            rows: 50,
            cols: 50,
        }
    }
}

impl TerrainConfig {
    /// Validated footprint for these settings
    pub fn footprint(&self) -> Result<Footprint> {
        Footprint::new(self.width, self.depth, self.rows, self.cols)
    }
}

/// Everything the generation pipeline reads
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationConfig {
    pub terrain: TerrainConfig,
    pub noise: NoiseParams,
    /// Number of grass blades to scatter
    pub grass_count: usize,
    /// Scatter seed, or `None` for a fresh one per run
    pub grass_seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            terrain: TerrainConfig::default(),
            noise: NoiseParams::default(),
            grass_count: 50_000,
            grass_seed: None,
        }
    }
}

impl GenerationConfig {
    /// Fail fast on settings that cannot produce a mesh
    pub fn validate(&self) -> Result<()> {
        let footprint = self.terrain.footprint()?;
        self.noise.validate()?;

        let vertex_bytes = footprint.vertex_count() as u64 * std::mem::size_of::<TerrainVertex>() as u64;
        let index_bytes = footprint.index_count() as u64 * std::mem::size_of::<u32>() as u64;
        for (what, bytes) in [("vertex", vertex_bytes), ("index", index_bytes)] {
            if bytes > MAX_BUFFER_BYTES {
                return Err(Error::Config(format!(
                    "{}x{} subdivisions need a {} MB terrain {} buffer, limit is {} MB",
                    footprint.rows(),
                    footprint.cols(),
                    bytes >> 20,
                    what,
                    MAX_BUFFER_BYTES >> 20,
                )));
            }
        }

        if self.grass_count > MAX_GRASS_COUNT {
            return Err(Error::Config(format!(
                "grass count {} exceeds the limit of {}",
                self.grass_count, MAX_GRASS_COUNT
            )));
        }
        Ok(())
    }
}
