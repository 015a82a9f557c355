//! Grass field configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// User-facing grass settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrassConfig {
    /// Number of blades scattered over the footprint. Zero disables the grass draw.
    pub count: usize,
    /// Scatter seed. `None` draws a fresh seed per run (logged so it can be replayed).
    pub seed: Option<u64>,
    /// RGBA blade texture. A missing or undecodable file falls back to a flat color.
    pub texture: PathBuf,
}

impl Default for GrassConfig {
    fn default() -> Self {
        Self {
            count: 50_000,
            seed: None,
            texture: PathBuf::from("resources/grass.png"),
        }
    }
}
