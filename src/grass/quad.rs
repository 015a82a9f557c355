//! Billboard template shared by every grass instance

use bytemuck::{Pod, Zeroable};

/// Local-space billboard corner: `position.x` runs along the camera's right
/// vector, `position.y` along world up.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct GrassQuadVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

/// Unit quad standing on its bottom edge, centered on x. Texture rows start
/// at the top (v = 0), matching the image decoder's row order.
pub const QUAD_VERTICES: [GrassQuadVertex; 4] = [
    GrassQuadVertex { position: [-0.5, 0.0], uv: [0.0, 1.0] },
    GrassQuadVertex { position: [0.5, 0.0], uv: [1.0, 1.0] },
    GrassQuadVertex { position: [0.5, 1.0], uv: [1.0, 0.0] },
    GrassQuadVertex { position: [-0.5, 1.0], uv: [0.0, 0.0] },
];

/// Two counter-clockwise triangles
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];
