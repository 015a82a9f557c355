//! Meadow - procedural heightfield terrain with an instanced grass field

pub mod core;
pub mod terrain;
pub mod grass;
pub mod generation;
pub mod scene;
pub mod render;
