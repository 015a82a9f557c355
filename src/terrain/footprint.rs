//! Rectangular, origin-centered terrain extent and its grid resolution

use crate::core::{Error, Result};

/// World-space rectangle covered by terrain and grass, subdivided into a
/// `rows x cols` grid of cells.
///
/// Covers `x in [-width/2, width/2]` and `z in [-depth/2, depth/2]`. Rows run
/// along z, columns along x.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
    width: f32,
    depth: f32,
    rows: u32,
    cols: u32,
}

impl Footprint {
    /// Validate dimensions and resolution.
    ///
    /// Fails when a size is not a positive finite number, when either
    /// subdivision count is zero, or when the vertex grid would not be
    /// addressable by 32-bit indices.
    pub fn new(width: f32, depth: f32, rows: u32, cols: u32) -> Result<Self> {
        if !width.is_finite() || width <= 0.0 {
            return Err(Error::Config(format!("terrain width must be positive, got {}", width)));
        }
        if !depth.is_finite() || depth <= 0.0 {
            return Err(Error::Config(format!("terrain depth must be positive, got {}", depth)));
        }
        if rows == 0 || cols == 0 {
            return Err(Error::Config(format!(
                "terrain needs at least one subdivision per axis, got {}x{}",
                rows, cols
            )));
        }

        let vertices = (rows as u64 + 1) * (cols as u64 + 1);
        if vertices > u32::MAX as u64 {
            return Err(Error::Config(format!(
                "{}x{} subdivisions need {} vertices, more than 32-bit indices can address",
                rows, cols, vertices
            )));
        }

        Ok(Self { width, depth, rows, cols })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Number of grid vertices, `(rows + 1) * (cols + 1)`
    pub fn vertex_count(&self) -> usize {
        (self.rows as usize + 1) * (self.cols as usize + 1)
    }

    /// Number of triangle indices, six per cell
    pub fn index_count(&self) -> usize {
        self.rows as usize * self.cols as usize * 6
    }

    /// Row-major vertex index of grid point `(i, j)`
    #[inline]
    pub fn vertex_index(&self, i: u32, j: u32) -> u32 {
        i * (self.cols + 1) + j
    }

    /// World-space `(x, z)` of grid point `(i, j)`
    #[inline]
    pub fn grid_xz(&self, i: u32, j: u32) -> (f32, f32) {
        let x = j as f32 / self.cols as f32 * self.width - self.width / 2.0;
        let z = i as f32 / self.rows as f32 * self.depth - self.depth / 2.0;
        (x, z)
    }
}
