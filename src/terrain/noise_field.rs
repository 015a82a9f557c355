//! Seeded coherent-noise height sampling
//!
//! Both the terrain mesh and the grass scatter read elevations through the
//! same [`HeightField`], so a blade placed at `(x, z)` lands exactly on the
//! surface the mesh was built from.

use noise::{Fbm, MultiFractal, NoiseFn, OpenSimplex, Perlin, Value};
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Upper bound on fractal octaves accepted from configuration
pub const MAX_FBM_OCTAVES: u32 = 16;

/// Coherent noise family used for elevation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseKind {
    /// Single-octave gradient noise
    #[default]
    Perlin,
    /// Fractal Brownian motion over Perlin octaves
    Fbm,
    OpenSimplex,
    /// Interpolated lattice values, blockier than gradient noise
    Value,
}

/// Noise parameters for a generation run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    pub kind: NoiseKind,
    pub seed: u32,
    /// Coordinate scale applied on top of `frequency`. The default keeps the
    /// default frequency of 2.0 producing a few hills across a 20m footprint.
    pub base_scale: f64,
    /// Octaves for [`NoiseKind::Fbm`], ignored otherwise
    pub octaves: u32,
    /// Vertical scale of the [-1, 1] noise output
    pub amplitude: f32,
    /// Horizontal frequency multiplier
    pub frequency: f32,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            kind: NoiseKind::Perlin,
            seed: 1337,
            base_scale: 0.01,
            octaves: 3,
            amplitude: 2.0,
            frequency: 2.0,
        }
    }
}

impl NoiseParams {
    /// Reject parameters that could produce non-finite elevations
    pub fn validate(&self) -> Result<()> {
        if !self.amplitude.is_finite() {
            return Err(Error::Config(format!("noise amplitude must be finite, got {}", self.amplitude)));
        }
        if !self.frequency.is_finite() {
            return Err(Error::Config(format!("noise frequency must be finite, got {}", self.frequency)));
        }
        if !self.base_scale.is_finite() || self.base_scale <= 0.0 {
            return Err(Error::Config(format!("noise base_scale must be positive, got {}", self.base_scale)));
        }
        if self.kind == NoiseKind::Fbm && !(1..=MAX_FBM_OCTAVES).contains(&self.octaves) {
            return Err(Error::Config(format!(
                "fbm octaves must be within 1..={}, got {}",
                MAX_FBM_OCTAVES, self.octaves
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
enum Source {
    Perlin(Perlin),
    Fbm(Fbm<Perlin>),
    OpenSimplex(OpenSimplex),
    Value(Value),
}

/// A seeded 2D coherent noise function. Sampling is pure: no interior
/// mutability, no hidden state.
#[derive(Clone, Debug)]
pub struct NoiseField {
    source: Source,
    kind: NoiseKind,
    seed: u32,
    base_scale: f64,
}

impl NoiseField {
    /// Build the noise generator described by `params`
    pub fn new(params: &NoiseParams) -> Self {
        let seed = params.seed;
        let source = match params.kind {
            NoiseKind::Perlin => Source::Perlin(Perlin::new(seed)),
            NoiseKind::Fbm => Source::Fbm(
                Fbm::<Perlin>::new(seed)
                    .set_octaves(params.octaves.clamp(1, MAX_FBM_OCTAVES) as usize),
            ),
            NoiseKind::OpenSimplex => Source::OpenSimplex(OpenSimplex::new(seed)),
            NoiseKind::Value => Source::Value(Value::new(seed)),
        };

        Self {
            source,
            kind: params.kind,
            seed,
            base_scale: params.base_scale,
        }
    }

    pub fn kind(&self) -> NoiseKind {
        self.kind
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Raw noise at `(x * frequency, z * frequency)`, nominally in [-1, 1]
    pub fn sample(&self, x: f32, z: f32, frequency: f32) -> f32 {
        let scale = frequency as f64 * self.base_scale;
        let point = [x as f64 * scale, z as f64 * scale];

        let value = match &self.source {
            Source::Perlin(n) => n.get(point),
            Source::Fbm(n) => n.get(point),
            Source::OpenSimplex(n) => n.get(point),
            Source::Value(n) => n.get(point),
        };

        if value.is_finite() { value as f32 } else { 0.0 }
    }

    /// Terrain elevation at world position `(x, z)`
    pub fn height(&self, x: f32, z: f32, amplitude: f32, frequency: f32) -> f32 {
        self.sample(x, z, frequency) * amplitude
    }
}

/// A noise field bound to the amplitude and frequency of one generation run
#[derive(Clone, Debug)]
pub struct HeightField {
    noise: NoiseField,
    amplitude: f32,
    frequency: f32,
}

impl HeightField {
    /// Validate `params` and build the field
    pub fn new(params: &NoiseParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            noise: NoiseField::new(params),
            amplitude: params.amplitude,
            frequency: params.frequency,
        })
    }

    /// Elevation at world position `(x, z)`
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        self.noise.height(x, z, self.amplitude, self.frequency)
    }

    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROBES: [(f32, f32); 5] = [
        (0.0, 0.0),
        (3.7, -5.2),
        (-9.99, 9.99),
        (123.4, 56.7),
        (-1000.5, 250.25),
    ];

    #[test]
    fn test_noise_params_default() {
        let params = NoiseParams::default();
        assert_eq!(params.kind, NoiseKind::Perlin);
        assert_eq!(params.seed, 1337);
        assert_eq!(params.amplitude, 2.0);
        assert_eq!(params.frequency, 2.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_height_is_deterministic() {
        for kind in [NoiseKind::Perlin, NoiseKind::Fbm, NoiseKind::OpenSimplex, NoiseKind::Value] {
            let params = NoiseParams { kind, ..Default::default() };
            let a = NoiseField::new(&params);
            let b = NoiseField::new(&params);

            for (x, z) in PROBES {
                let h1 = a.height(x, z, 2.0, 2.0);
                let h2 = a.height(x, z, 2.0, 2.0);
                let h3 = b.height(x, z, 2.0, 2.0);
                assert_eq!(h1.to_bits(), h2.to_bits(), "{:?} at ({}, {})", kind, x, z);
                assert_eq!(h1.to_bits(), h3.to_bits(), "{:?} at ({}, {})", kind, x, z);
            }
        }
    }

    #[test]
    fn test_height_scales_with_amplitude() {
        let field = NoiseField::new(&NoiseParams::default());
        for (x, z) in PROBES {
            assert_eq!(field.height(x, z, 0.0, 2.0), 0.0);
            assert_eq!(field.height(x, z, 4.0, 2.0), 2.0 * field.height(x, z, 2.0, 2.0));
        }
    }

    #[test]
    fn test_height_is_bounded_and_finite() {
        let field = NoiseField::new(&NoiseParams::default());
        for ix in -20..=20 {
            for iz in -20..=20 {
                let h = field.height(ix as f32 * 7.3, iz as f32 * 4.1, 2.0, 2.0);
                assert!(h.is_finite());
                assert!(h.abs() <= 3.0, "height {} out of range", h);
            }
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = NoiseField::new(&NoiseParams { seed: 1, ..Default::default() });
        let b = NoiseField::new(&NoiseParams { seed: 2, ..Default::default() });
        assert_ne!(a.height(123.4, 56.7, 2.0, 2.0), b.height(123.4, 56.7, 2.0, 2.0));
    }

    #[test]
    fn test_height_field_matches_noise_field() {
        let params = NoiseParams { amplitude: 3.5, frequency: 1.25, ..Default::default() };
        let field = HeightField::new(&params).unwrap();
        let noise = NoiseField::new(&params);
        for (x, z) in PROBES {
            assert_eq!(field.height_at(x, z), noise.height(x, z, 3.5, 1.25));
        }
    }

    #[test]
    fn test_invalid_params_rejected() {
        let nan_amp = NoiseParams { amplitude: f32::NAN, ..Default::default() };
        assert!(matches!(HeightField::new(&nan_amp), Err(Error::Config(_))));

        let inf_freq = NoiseParams { frequency: f32::INFINITY, ..Default::default() };
        assert!(inf_freq.validate().is_err());

        let zero_scale = NoiseParams { base_scale: 0.0, ..Default::default() };
        assert!(zero_scale.validate().is_err());

        let no_octaves = NoiseParams { kind: NoiseKind::Fbm, octaves: 0, ..Default::default() };
        assert!(no_octaves.validate().is_err());
    }
}
