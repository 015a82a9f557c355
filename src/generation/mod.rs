//! Generation pipeline: terrain mesh and grass scatter.
//!
//! The pipeline orchestrates, once at startup:
//! 1. Footprint and noise validation
//! 2. Terrain mesh build (positions, indices, smoothed normals)
//! 3. Grass scatter over the same height field

pub mod config;

pub use config::{GenerationConfig, MAX_BUFFER_BYTES, MAX_GRASS_COUNT, TerrainConfig};

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::Result;
use crate::grass::{GrassInstance, scatter};
use crate::terrain::{Footprint, HeightField, TerrainMesh};

/// Output of one generation run. Immutable once built.
pub struct GeneratedWorld {
    pub mesh: TerrainMesh,
    pub grass: Vec<GrassInstance>,
    /// Seed the grass scatter actually used
    pub grass_seed: u64,
}

/// Validated generation inputs with the shared height field
pub struct GenerationPipeline {
    footprint: Footprint,
    field: HeightField,
    grass_count: usize,
    grass_seed: Option<u64>,
}

impl GenerationPipeline {
    /// Validate `config` and build the height field. No buffers are built on error.
    pub fn new(config: &GenerationConfig) -> Result<Self> {
        config.validate()?;
        let footprint = config.terrain.footprint()?;
        let field = HeightField::new(&config.noise)?;

        Ok(Self {
            footprint,
            field,
            grass_count: config.grass_count,
            grass_seed: config.grass_seed,
        })
    }

    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    pub fn height_field(&self) -> &HeightField {
        &self.field
    }

    /// Build the mesh, then scatter grass with a `StdRng` seeded from the
    /// configured seed (or a fresh one)
    pub fn generate(&self) -> GeneratedWorld {
        let seed = self.grass_seed.unwrap_or_else(|| {
            let seed = rand::rng().random::<u64>();
            log::info!("Grass: no seed configured, using {}", seed);
            seed
        });
        self.generate_with_rng(&mut StdRng::seed_from_u64(seed), seed)
    }

    /// Same as [`generate`](Self::generate) with a caller-supplied randomness source.
    /// `seed` is only recorded in the result.
    pub fn generate_with_rng<R: Rng + ?Sized>(&self, rng: &mut R, seed: u64) -> GeneratedWorld {
        log::info!(
            "Generating terrain: {}m x {}m, {}x{} cells, {:?} noise seed={} amplitude={} frequency={}",
            self.footprint.width(),
            self.footprint.depth(),
            self.footprint.rows(),
            self.footprint.cols(),
            self.field.noise().kind(),
            self.field.noise().seed(),
            self.field.amplitude(),
            self.field.frequency(),
        );

        let start = Instant::now();
        let mesh = TerrainMesh::build(&self.footprint, &self.field);
        let mesh_time = start.elapsed();

        let stats = mesh.stats();
        log::info!(
            "Terrain: {} vertices, {} triangles, height {:.2}..{:.2} in {:.1}ms",
            stats.vertex_count,
            stats.triangle_count,
            stats.min_height,
            stats.max_height,
            mesh_time.as_secs_f64() * 1000.0,
        );
        if stats.substituted_normals > 0 {
            log::debug!("Terrain: {} default normals substituted", stats.substituted_normals);
        }

        let start = Instant::now();
        let grass = scatter(&self.footprint, &self.field, self.grass_count, rng);
        log::info!(
            "Grass: {} blades scattered in {:.1}ms",
            grass.len(),
            start.elapsed().as_secs_f64() * 1000.0,
        );

        GeneratedWorld { mesh, grass, grass_seed: seed }
    }
}
