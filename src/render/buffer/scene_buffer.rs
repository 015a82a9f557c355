//! GPU uniform buffer for per-frame scene data

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::core::camera::Camera;

/// Scene uniform data for GPU (must match the `Scene` struct in the shaders)
/// WGSL vec3 has 16-byte alignment, so each one carries explicit padding
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SceneUniform {
    /// Model matrix (64 bytes, offset 0)
    pub model: [[f32; 4]; 4],
    /// View matrix (64 bytes, offset 64)
    pub view: [[f32; 4]; 4],
    /// Projection matrix (64 bytes, offset 128)
    pub projection: [[f32; 4]; 4],
    /// Light position in world space (offset 192)
    pub light_pos: [f32; 3],
    pub _pad0: f32,
    /// Camera position in world space (offset 208)
    pub view_pos: [f32; 3],
    pub _pad1: f32,
    /// Light color (offset 224)
    pub light_color: [f32; 3],
    pub _pad2: f32,
    /// Terrain base color (offset 240)
    pub object_color: [f32; 3],
    pub _pad3: f32,
}

/// Lighting inputs that stay fixed for the whole run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneLighting {
    pub light_pos: Vec3,
    pub light_color: Vec3,
    pub object_color: Vec3,
}

impl SceneUniform {
    /// Uniform data for `camera` with an identity model matrix
    pub fn new(camera: &Camera, lighting: &SceneLighting) -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            view: camera.view_matrix().to_cols_array_2d(),
            projection: camera.projection_matrix().to_cols_array_2d(),
            light_pos: lighting.light_pos.to_array(),
            _pad0: 0.0,
            view_pos: camera.position.to_array(),
            _pad1: 0.0,
            light_color: lighting.light_color.to_array(),
            _pad2: 0.0,
            object_color: lighting.object_color.to_array(),
            _pad3: 0.0,
        }
    }
}

/// GPU buffer for the scene uniform, bound at group 0 by both pipelines
pub struct SceneBuffer {
    buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    lighting: SceneLighting,
}

impl SceneBuffer {
    pub fn new(device: &wgpu::Device, lighting: SceneLighting) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniform"),
            size: std::mem::size_of::<SceneUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            buffer,
            bind_group_layout,
            bind_group,
            lighting,
        }
    }

    /// Write this frame's camera matrices and position
    pub fn update(&self, queue: &wgpu::Queue, camera: &Camera) {
        let uniform = SceneUniform::new(camera, &self.lighting);
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&uniform));
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}
