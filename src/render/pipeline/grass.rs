//! Instanced grass billboard pipeline

use std::mem::size_of;

use crate::grass::{GrassInstance, GrassQuadVertex};
use crate::render::buffer::GrassBuffers;
use crate::render::shader::{self, ShaderDesc};
use crate::render::texture::{DepthTexture, GrassTexture};

/// Per-vertex quad corner and texture coordinate (slot 0)
pub fn quad_vertex_layout<'a>() -> wgpu::VertexBufferLayout<'a> {
    const ATTRS: &[wgpu::VertexAttribute] = &wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];
    wgpu::VertexBufferLayout {
        array_stride: size_of::<GrassQuadVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: ATTRS,
    }
}

/// Per-instance blade origin (slot 1), advanced once per instance
pub fn instance_layout<'a>() -> wgpu::VertexBufferLayout<'a> {
    const ATTRS: &[wgpu::VertexAttribute] = &wgpu::vertex_attr_array![2 => Float32x3];
    wgpu::VertexBufferLayout {
        array_stride: size_of::<GrassInstance>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: ATTRS,
    }
}

/// Grass render pipeline. Quads are double sided; transparent texels are
/// discarded in the fragment shader so depth writes stay correct.
pub struct GrassPipeline {
    pipeline: wgpu::RenderPipeline,
}

impl GrassPipeline {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        scene_layout: &wgpu::BindGroupLayout,
        texture_layout: &wgpu::BindGroupLayout,
        shader_desc: &ShaderDesc,
    ) -> Self {
        let shader = shader::create_module(device, shader_desc);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("grass_pipeline_layout"),
            bind_group_layouts: &[scene_layout, texture_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("grass_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[quad_vertex_layout(), instance_layout()],
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DepthTexture::FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        Self { pipeline }
    }

    /// Draw every blade with one instanced draw. Nothing is recorded when
    /// there are no instances.
    pub fn draw(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        scene_bind_group: &wgpu::BindGroup,
        texture: &GrassTexture,
        buffers: &GrassBuffers,
    ) {
        let Some(instance_buffer) = &buffers.instance_buffer else {
            return;
        };

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, scene_bind_group, &[]);
        pass.set_bind_group(1, texture.bind_group(), &[]);
        pass.set_vertex_buffer(0, buffers.quad_vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, instance_buffer.slice(..));
        pass.set_index_buffer(buffers.quad_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..buffers.quad_index_count(), 0, 0..buffers.instance_count);
    }
}
