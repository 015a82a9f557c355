//! Procedural heightfield terrain

pub mod noise_field;
pub mod footprint;
pub mod mesh;

pub use noise_field::{HeightField, NoiseField, NoiseKind, NoiseParams};
pub use footprint::Footprint;
pub use mesh::{MeshStats, TerrainMesh, TerrainVertex};
