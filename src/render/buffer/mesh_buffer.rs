//! Vertex, index, and instance buffers uploaded once after generation

use wgpu::util::DeviceExt;

use crate::core::error::Error;
use crate::grass::{GrassInstance, QUAD_INDICES, QUAD_VERTICES};
use crate::terrain::TerrainMesh;

/// Fail with a config error when `contents` would exceed the device's buffer limit
pub fn check_buffer_size(label: &str, contents: &[u8], max_buffer_size: u64) -> Result<(), Error> {
    let bytes = contents.len() as u64;
    if bytes > max_buffer_size {
        return Err(Error::Config(format!(
            "{} needs {} bytes, device allows at most {}",
            label, bytes, max_buffer_size
        )));
    }
    Ok(())
}

/// Element count as the `u32` a draw call takes
fn draw_count(label: &str, len: usize) -> Result<u32, Error> {
    u32::try_from(len).map_err(|_| Error::Config(format!("{} has {} elements, too many to draw", label, len)))
}

/// Interleaved terrain vertices and 32-bit triangle indices
pub struct TerrainBuffers {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl TerrainBuffers {
    pub fn new(device: &wgpu::Device, mesh: &TerrainMesh) -> Result<Self, Error> {
        let max_buffer_size = device.limits().max_buffer_size;
        let vertices: &[u8] = bytemuck::cast_slice(mesh.vertices());
        let indices: &[u8] = bytemuck::cast_slice(mesh.indices());
        check_buffer_size("terrain_vertices", vertices, max_buffer_size)?;
        check_buffer_size("terrain_indices", indices, max_buffer_size)?;
        let index_count = draw_count("terrain_indices", mesh.indices().len())?;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("terrain_vertices"),
            contents: vertices,
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("terrain_indices"),
            contents: indices,
            usage: wgpu::BufferUsages::INDEX,
        });

        Ok(Self {
            vertex_buffer,
            index_buffer,
            index_count,
        })
    }
}

/// The shared billboard quad plus one instance record per blade
pub struct GrassBuffers {
    pub quad_vertex_buffer: wgpu::Buffer,
    pub quad_index_buffer: wgpu::Buffer,
    /// `None` when there are no blades; the grass draw is skipped
    pub instance_buffer: Option<wgpu::Buffer>,
    pub instance_count: u32,
}

impl GrassBuffers {
    pub fn new(device: &wgpu::Device, instances: &[GrassInstance]) -> Result<Self, Error> {
        let instance_bytes: &[u8] = bytemuck::cast_slice(instances);
        check_buffer_size("grass_instances", instance_bytes, device.limits().max_buffer_size)?;
        let instance_count = draw_count("grass_instances", instances.len())?;

        let quad_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("grass_quad_vertices"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let quad_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("grass_quad_indices"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        // Zero-sized vertex buffers cannot be bound
        let instance_buffer = (!instances.is_empty()).then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("grass_instances"),
                contents: instance_bytes,
                usage: wgpu::BufferUsages::VERTEX,
            })
        });

        Ok(Self {
            quad_vertex_buffer,
            quad_index_buffer,
            instance_buffer,
            instance_count,
        })
    }

    pub fn quad_index_count(&self) -> u32 {
        QUAD_INDICES.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::{Footprint, HeightField, NoiseParams};

    #[test]
    fn test_buffer_size_check() {
        let bytes = [0u8; 64];
        assert!(check_buffer_size("small", &bytes, 64).is_ok());
        assert!(matches!(check_buffer_size("big", &bytes, 63), Err(Error::Config(_))));
    }

    #[test]
    fn test_terrain_over_default_limit_is_config_error() {
        // 256 MB is wgpu's default max_buffer_size
        let default_limit = 256u64 << 20;
        let fp = Footprint::new(20.0, 20.0, 64, 64).unwrap();
        let mesh = TerrainMesh::build(&fp, &HeightField::new(&NoiseParams::default()).unwrap());
        let vertices: &[u8] = bytemuck::cast_slice(mesh.vertices());

        assert_eq!(vertices.len(), 65 * 65 * 24);
        assert!(check_buffer_size("terrain_vertices", vertices, default_limit).is_ok());
        assert!(matches!(
            check_buffer_size("terrain_vertices", vertices, vertices.len() as u64 - 1),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_draw_count() {
        assert_eq!(draw_count("grass", 50_000).unwrap(), 50_000);
        assert!(draw_count("grass", u32::MAX as usize + 1).is_err());
    }
}
