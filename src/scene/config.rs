//! Scene configuration: generation inputs plus window, camera, and lighting

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::generation::{GenerationConfig, TerrainConfig};
use crate::grass::GrassConfig;
use crate::terrain::NoiseParams;

/// Window configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Meadow".to_string(),
            width: 1920,
            height: 1080,
        }
    }
}

/// Initial camera placement and controls
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    /// Point the camera initially looks at
    pub target: [f32; 3],
    /// Vertical field of view in degrees (also the zoom-out limit)
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Movement speed in units per second
    pub speed: f32,
    pub sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [-7.78218, 6.11892, -7.79],
            target: [0.0, 0.0, 0.0],
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
            speed: 2.5,
            sensitivity: 1.0,
        }
    }
}

/// Light and material colors passed to the terrain shader (linear RGB)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub light_position: [f32; 3],
    pub light_color: [f32; 3],
    /// Terrain base color
    pub object_color: [f32; 3],
    pub clear_color: [f32; 3],
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            light_position: [1.2, 10.0, 2.0],
            light_color: [1.0, 1.0, 1.0],
            object_color: [0.76, 0.69, 0.04],
            clear_color: [0.1, 0.1, 0.1],
        }
    }
}

/// WGSL sources read at startup. Unreadable files fall back to the built-in copies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderPaths {
    pub terrain: PathBuf,
    pub grass: PathBuf,
}

impl Default for ShaderPaths {
    fn default() -> Self {
        Self {
            terrain: PathBuf::from("shaders/terrain.wgsl"),
            grass: PathBuf::from("shaders/grass.wgsl"),
        }
    }
}

/// Complete scene description. Every field has a default, so a JSON file
/// only needs the values it overrides.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub window: WindowConfig,
    pub terrain: TerrainConfig,
    pub noise: NoiseParams,
    pub grass: GrassConfig,
    pub camera: CameraConfig,
    pub lighting: LightingConfig,
    pub shaders: ShaderPaths,
}

impl SceneConfig {
    /// Parse a JSON scene description and validate it
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON scene file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Inputs for the generation pipeline
    pub fn generation(&self) -> GenerationConfig {
        GenerationConfig {
            terrain: self.terrain.clone(),
            noise: self.noise.clone(),
            grass_count: self.grass.count,
            grass_seed: self.grass.seed,
        }
    }

    pub fn camera_position(&self) -> Vec3 {
        Vec3::from_array(self.camera.position)
    }

    pub fn camera_target(&self) -> Vec3 {
        Vec3::from_array(self.camera.target)
    }

    /// Check everything that would otherwise fail later at generation or
    /// window creation
    pub fn validate(&self) -> Result<()> {
        self.generation().validate()?;

        if self.window.width == 0 || self.window.height == 0 {
            return Err(Error::Config(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }

        let camera = &self.camera;
        if !(camera.near > 0.0 && camera.far > camera.near) {
            return Err(Error::Config(format!(
                "camera clip planes must satisfy 0 < near < far, got near={} far={}",
                camera.near, camera.far
            )));
        }
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(Error::Config(format!(
                "camera fov must be within (0, 180) degrees, got {}",
                camera.fov_degrees
            )));
        }
        if self.camera_position() == self.camera_target() {
            return Err(Error::Config("camera position and target must differ".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SceneConfig::default();
        assert_eq!(config.terrain.width, 20.0);
        assert_eq!(config.terrain.depth, 20.0);
        assert_eq!(config.terrain.rows, 50);
        assert_eq!(config.terrain.cols, 50);
        assert_eq!(config.noise.amplitude, 2.0);
        assert_eq!(config.noise.frequency, 2.0);
        assert_eq!(config.grass.count, 50_000);
        assert_eq!((config.window.width, config.window.height), (1920, 1080));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SceneConfig::from_json(
            r#"{ "terrain": { "rows": 10 }, "grass": { "count": 0, "seed": 9 }, "noise": { "kind": "open_simplex" } }"#,
        )
        .unwrap();

        assert_eq!(config.terrain.rows, 10);
        assert_eq!(config.terrain.cols, 50);
        assert_eq!(config.grass.count, 0);
        assert_eq!(config.grass.seed, Some(9));
        assert_eq!(config.noise.kind, crate::terrain::NoiseKind::OpenSimplex);
        assert_eq!(config.lighting, LightingConfig::default());
    }

    #[test]
    fn test_generation_view() {
        let mut config = SceneConfig::default();
        config.grass.count = 12;
        config.grass.seed = Some(4);

        let generation = config.generation();
        assert_eq!(generation.grass_count, 12);
        assert_eq!(generation.grass_seed, Some(4));
        assert_eq!(generation.terrain, config.terrain);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            SceneConfig::from_json(r#"{ "terrain": { "cols": 0 } }"#),
            Err(Error::Config(_))
        ));
        assert!(SceneConfig::from_json(r#"{ "terrain": { "width": -1.0 } }"#).is_err());
        assert!(SceneConfig::from_json(r#"{ "terrain": { "rows": -3 } }"#).is_err());
        assert!(SceneConfig::from_json(r#"{ "window": { "width": 0 } }"#).is_err());
        assert!(SceneConfig::from_json(r#"{ "camera": { "near": 10.0, "far": 1.0 } }"#).is_err());
        assert!(SceneConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_buffer_limits_rejected() {
        assert!(matches!(
            SceneConfig::from_json(r#"{ "terrain": { "rows": 4000, "cols": 4000 } }"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            SceneConfig::from_json(r#"{ "grass": { "count": 4000001 } }"#),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "noise": {{ "amplitude": 3.5, "seed": 7 }} }}"#).unwrap();

        let config = SceneConfig::load(file.path()).unwrap();
        assert_eq!(config.noise.amplitude, 3.5);
        assert_eq!(config.noise.seed, 7);
        assert_eq!(config.noise.frequency, 2.0);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = SceneConfig::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_json_round_trip() {
        let config = SceneConfig::default();
        let text = serde_json::to_string(&config).unwrap();
        assert_eq!(SceneConfig::from_json(&text).unwrap(), config);
    }
}
