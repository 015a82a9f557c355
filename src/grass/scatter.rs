//! Uniform grass placement over the terrain footprint

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rand::Rng;

use crate::terrain::{Footprint, HeightField};

/// World-space origin of one grass blade, uploaded as a per-instance attribute
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct GrassInstance {
    pub position: [f32; 3],
}

impl GrassInstance {
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// Draw `count` blade positions uniformly over `footprint`, each resting on
/// the surface described by `field`.
///
/// Positions are independent draws: no minimum spacing, no slope or density
/// rules, so blades can overlap. `count == 0` returns an empty vector.
pub fn scatter<R: Rng + ?Sized>(
    footprint: &Footprint,
    field: &HeightField,
    count: usize,
    rng: &mut R,
) -> Vec<GrassInstance> {
    let width = footprint.width();
    let depth = footprint.depth();

    (0..count)
        .map(|_| {
            let x = rng.random_range(0.0..width) - width / 2.0;
            let z = rng.random_range(0.0..depth) - depth / 2.0;
            GrassInstance {
                position: [x, field.height_at(x, z), z],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::NoiseParams;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn setup() -> (Footprint, HeightField) {
        (
            Footprint::new(20.0, 20.0, 50, 50).unwrap(),
            HeightField::new(&NoiseParams::default()).unwrap(),
        )
    }

    #[test]
    fn test_count() {
        let (fp, field) = setup();
        let mut rng = StdRng::seed_from_u64(7);

        assert!(scatter(&fp, &field, 0, &mut rng).is_empty());
        assert_eq!(scatter(&fp, &field, 1, &mut rng).len(), 1);
        assert_eq!(scatter(&fp, &field, 5000, &mut rng).len(), 5000);
    }

    #[test]
    fn test_blades_sit_on_terrain() {
        let (fp, field) = setup();
        let mut rng = StdRng::seed_from_u64(42);

        for blade in scatter(&fp, &field, 10_000, &mut rng) {
            let [x, y, z] = blade.position;
            assert_eq!(y, field.height_at(x, z));
        }
    }

    #[test]
    fn test_blades_stay_inside_footprint() {
        let fp = Footprint::new(12.0, 30.0, 4, 4).unwrap();
        let field = HeightField::new(&NoiseParams::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        for blade in scatter(&fp, &field, 10_000, &mut rng) {
            let p = blade.position();
            assert!((-6.0..=6.0).contains(&p.x), "x = {}", p.x);
            assert!((-15.0..=15.0).contains(&p.z), "z = {}", p.z);
        }
    }

    #[test]
    fn test_scatter_covers_all_quadrants() {
        let (fp, field) = setup();
        let mut rng = StdRng::seed_from_u64(11);
        let mut quadrants = [0usize; 4];

        for blade in scatter(&fp, &field, 4000, &mut rng) {
            let p = blade.position();
            let q = (p.x >= 0.0) as usize + 2 * (p.z >= 0.0) as usize;
            quadrants[q] += 1;
        }
        // Expected ~1000 each
        assert!(quadrants.iter().all(|&n| n > 800), "{:?}", quadrants);
    }

    #[test]
    fn test_seeded_scatter_is_reproducible() {
        let (fp, field) = setup();
        let a = scatter(&fp, &field, 256, &mut StdRng::seed_from_u64(99));
        let b = scatter(&fp, &field, 256, &mut StdRng::seed_from_u64(99));
        let c = scatter(&fp, &field, 256, &mut StdRng::seed_from_u64(100));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
