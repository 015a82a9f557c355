//! Instanced grass billboards.
//!
//! Blade origins are scattered once over the terrain footprint; the renderer
//! draws one textured quad per origin with a single instanced draw.

pub mod config;
pub mod quad;
pub mod scatter;

pub use config::GrassConfig;
pub use quad::{GrassQuadVertex, QUAD_INDICES, QUAD_VERTICES};
pub use scatter::{GrassInstance, scatter};
