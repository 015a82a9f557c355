//! Heightfield mesh construction
//!
//! The grid is triangulated two triangles per cell as
//! `(top_left, bottom_left, top_right)` and `(top_right, bottom_left, bottom_right)`,
//! where "top" is the lower z row. Seen from above (+y, right-handed) that
//! order is counter-clockwise, so face normals point up and the terrain
//! pipeline culls back faces with `FrontFace::Ccw`.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use super::footprint::Footprint;
use super::noise_field::HeightField;

/// Normal used when a vertex has no usable face contributions
pub const DEFAULT_NORMAL: Vec3 = Vec3::Y;

/// Squared length below which an accumulated normal is treated as zero
const DEGENERATE_NORMAL_EPSILON: f32 = 1e-12;

/// Interleaved terrain vertex: `[x, y, z, nx, ny, nz]`
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Summary numbers for logging
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshStats {
    pub vertex_count: usize,
    pub index_count: usize,
    pub triangle_count: usize,
    pub min_height: f32,
    pub max_height: f32,
    /// Vertices that received [`DEFAULT_NORMAL`]
    pub substituted_normals: usize,
}

/// Immutable terrain mesh over a [`Footprint`]
pub struct TerrainMesh {
    footprint: Footprint,
    vertices: Vec<TerrainVertex>,
    indices: Vec<u32>,
    substituted_normals: usize,
}

impl TerrainMesh {
    /// Sample `field` at every grid point and build the indexed, smooth-shaded mesh
    pub fn build(footprint: &Footprint, field: &HeightField) -> Self {
        let indices = build_indices(footprint);
        let positions = build_positions(footprint, field);
        let (normals, substituted_normals) = accumulate_normals(&positions, &indices);

        Self {
            footprint: *footprint,
            vertices: interleave(&positions, &normals),
            indices,
            substituted_normals,
        }
    }

    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    /// Interleaved records in vertex-index order
    pub fn vertices(&self) -> &[TerrainVertex] {
        &self.vertices
    }

    /// Triangle list, three indices per triangle
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices.iter().map(|v| Vec3::from_array(v.position))
    }

    pub fn normals(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices.iter().map(|v| Vec3::from_array(v.normal))
    }

    /// The vertex buffer as flat floats, six per vertex
    pub fn vertex_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn stats(&self) -> MeshStats {
        let (min_height, max_height) = self.vertices.iter().fold(
            (f32::INFINITY, f32::NEG_INFINITY),
            |(lo, hi), v| (lo.min(v.position[1]), hi.max(v.position[1])),
        );

        MeshStats {
            vertex_count: self.vertices.len(),
            index_count: self.indices.len(),
            triangle_count: self.indices.len() / 3,
            min_height,
            max_height,
            substituted_normals: self.substituted_normals,
        }
    }
}

/// Two triangles per grid cell, cells in row-major order
pub fn build_indices(footprint: &Footprint) -> Vec<u32> {
    let mut indices = Vec::with_capacity(footprint.index_count());

    for i in 0..footprint.rows() {
        for j in 0..footprint.cols() {
            let top_left = footprint.vertex_index(i, j);
            let top_right = top_left + 1;
            let bottom_left = footprint.vertex_index(i + 1, j);
            let bottom_right = bottom_left + 1;

            indices.extend_from_slice(&[top_left, bottom_left, top_right]);
            indices.extend_from_slice(&[top_right, bottom_left, bottom_right]);
        }
    }

    indices
}

/// Grid positions in row-major order, elevation taken from `field`
pub fn build_positions(footprint: &Footprint, field: &HeightField) -> Vec<Vec3> {
    let mut positions = Vec::with_capacity(footprint.vertex_count());

    for i in 0..=footprint.rows() {
        for j in 0..=footprint.cols() {
            let (x, z) = footprint.grid_xz(i, j);
            positions.push(Vec3::new(x, field.height_at(x, z), z));
        }
    }

    positions
}

/// Per-vertex normals by summing unit face normals of every incident triangle,
/// then renormalizing.
///
/// Returns the normals and how many vertices fell back to [`DEFAULT_NORMAL`]
/// (unreferenced, or only touched by degenerate triangles).
///
/// # Panics
/// If an index is out of range for `positions`.
pub fn accumulate_normals(positions: &[Vec3], indices: &[u32]) -> (Vec<Vec3>, usize) {
    let mut sums = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let v0 = positions[i0];
        let edge1 = positions[i1] - v0;
        let edge2 = positions[i2] - v0;

        // Zero for collinear triangles, so they add nothing
        let face = edge1.cross(edge2).normalize_or_zero();

        sums[i0] += face;
        sums[i1] += face;
        sums[i2] += face;
    }

    let mut substituted = 0;
    let normals = sums
        .into_iter()
        .map(|sum| {
            if sum.length_squared() > DEGENERATE_NORMAL_EPSILON {
                sum.normalize()
            } else {
                substituted += 1;
                DEFAULT_NORMAL
            }
        })
        .collect();

    (normals, substituted)
}

/// Zip positions and normals into interleaved records
pub fn interleave(positions: &[Vec3], normals: &[Vec3]) -> Vec<TerrainVertex> {
    positions
        .iter()
        .zip(normals)
        .map(|(p, n)| TerrainVertex {
            position: p.to_array(),
            normal: n.to_array(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::noise_field::NoiseParams;

    fn default_field() -> HeightField {
        HeightField::new(&NoiseParams::default()).unwrap()
    }

    fn flat_field() -> HeightField {
        HeightField::new(&NoiseParams { amplitude: 0.0, ..Default::default() }).unwrap()
    }

    #[test]
    fn test_two_by_two_grid() {
        let fp = Footprint::new(20.0, 20.0, 2, 2).unwrap();
        let mesh = TerrainMesh::build(&fp, &default_field());

        assert_eq!(mesh.vertices().len(), 9);
        assert_eq!(mesh.indices().len(), 24);
        assert_eq!(&mesh.indices()[0..3], &[0, 3, 1]);
        assert_eq!(&mesh.indices()[3..6], &[1, 3, 4]);
        // Last cell (1, 1)
        assert_eq!(&mesh.indices()[18..24], &[4, 7, 5, 5, 7, 8]);
    }

    #[test]
    fn test_topology_counts_and_bounds() {
        for (rows, cols) in [(1, 1), (1, 5), (3, 7), (50, 50), (16, 2)] {
            let fp = Footprint::new(20.0, 20.0, rows, cols).unwrap();
            let indices = build_indices(&fp);
            let vertex_count = ((rows + 1) * (cols + 1)) as u32;

            assert_eq!(indices.len(), (rows * cols * 6) as usize);
            assert!(indices.iter().all(|&i| i < vertex_count));
        }
    }

    #[test]
    fn test_every_vertex_is_referenced() {
        let fp = Footprint::new(20.0, 20.0, 4, 6).unwrap();
        let indices = build_indices(&fp);
        let mut seen = vec![false; fp.vertex_count()];
        for &i in &indices {
            seen[i as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_normals_are_unit_length() {
        let fp = Footprint::new(20.0, 20.0, 50, 50).unwrap();
        let mesh = TerrainMesh::build(&fp, &default_field());

        assert_eq!(mesh.normals().count(), mesh.vertices().len());
        for n in mesh.normals() {
            assert!((n.length() - 1.0).abs() < 1e-5, "normal {:?} is not unit length", n);
        }
        assert_eq!(mesh.stats().substituted_normals, 0);
    }

    #[test]
    fn test_flat_terrain_faces_point_up() {
        let fp = Footprint::new(20.0, 20.0, 3, 3).unwrap();
        let mesh = TerrainMesh::build(&fp, &flat_field());
        let positions: Vec<Vec3> = mesh.positions().collect();

        for tri in mesh.indices().chunks_exact(3) {
            let v0 = positions[tri[0] as usize];
            let face = (positions[tri[1] as usize] - v0).cross(positions[tri[2] as usize] - v0);
            assert!(face.y > 0.0, "triangle {:?} faces down", tri);
        }
        for n in mesh.normals() {
            assert!(n.abs_diff_eq(Vec3::Y, 1e-6));
        }
    }

    #[test]
    fn test_footprint_is_centered() {
        let fp = Footprint::new(20.0, 12.0, 7, 9).unwrap();
        let mesh = TerrainMesh::build(&fp, &default_field());

        let (min, max) = mesh.positions().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(lo, hi), p| (lo.min(p), hi.max(p)),
        );
        assert_eq!(min.x, -10.0);
        assert_eq!(max.x, 10.0);
        assert_eq!(min.z, -6.0);
        assert_eq!(max.z, 6.0);
    }

    #[test]
    fn test_positions_follow_height_field() {
        let fp = Footprint::new(20.0, 20.0, 10, 10).unwrap();
        let field = default_field();
        let mesh = TerrainMesh::build(&fp, &field);

        for p in mesh.positions() {
            assert_eq!(p.y, field.height_at(p.x, p.z));
        }
        let stats = mesh.stats();
        assert!(stats.min_height <= stats.max_height);
        assert_eq!(stats.triangle_count, 10 * 10 * 2);
    }

    #[test]
    fn test_build_is_deterministic() {
        let fp = Footprint::new(20.0, 20.0, 12, 12).unwrap();
        let a = TerrainMesh::build(&fp, &default_field());
        let b = TerrainMesh::build(&fp, &default_field());
        assert_eq!(a.vertices(), b.vertices());
        assert_eq!(a.indices(), b.indices());
    }

    #[test]
    fn test_interleaved_layout() {
        let fp = Footprint::new(20.0, 20.0, 2, 3).unwrap();
        let mesh = TerrainMesh::build(&fp, &default_field());
        let floats = mesh.vertex_floats();

        assert_eq!(std::mem::size_of::<TerrainVertex>(), 24);
        assert_eq!(floats.len(), mesh.vertices().len() * 6);
        for (k, v) in mesh.vertices().iter().enumerate() {
            assert_eq!(&floats[k * 6..k * 6 + 3], &v.position);
            assert_eq!(&floats[k * 6 + 3..k * 6 + 6], &v.normal);
        }
    }

    #[test]
    fn test_unreferenced_vertex_gets_default_normal() {
        let positions = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(5.0, 5.0, 5.0),
        ];
        let (normals, substituted) = accumulate_normals(&positions, &[0, 1, 2]);

        assert_eq!(substituted, 1);
        assert_eq!(normals[3], DEFAULT_NORMAL);
        assert!(normals[0].abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn test_degenerate_triangle_does_not_produce_nan() {
        let positions = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        ];
        let (normals, substituted) = accumulate_normals(&positions, &[0, 1, 2]);

        assert_eq!(substituted, 3);
        assert!(normals.iter().all(|n| *n == DEFAULT_NORMAL));
    }
}
