//! Render pipelines

pub mod terrain;
pub mod grass;

pub use terrain::{TerrainPipeline, terrain_vertex_layout};
pub use grass::{GrassPipeline, instance_layout, quad_vertex_layout};
