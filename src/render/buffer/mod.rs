//! GPU buffer management

pub mod scene_buffer;
pub mod mesh_buffer;

pub use scene_buffer::{SceneBuffer, SceneLighting, SceneUniform};
pub use mesh_buffer::{GrassBuffers, TerrainBuffers};
