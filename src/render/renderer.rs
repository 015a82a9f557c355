//! Forward renderer for the terrain and grass field

use glam::Vec3;

use crate::core::camera::Camera;
use crate::core::error::Error;
use crate::generation::GeneratedWorld;
use crate::render::buffer::{GrassBuffers, SceneBuffer, SceneLighting, TerrainBuffers};
use crate::render::context::GpuContext;
use crate::render::pipeline::{GrassPipeline, TerrainPipeline};
use crate::render::shader::ShaderDesc;
use crate::render::texture::{DepthTexture, GrassTexture};
use crate::scene::SceneConfig;

/// Owns every GPU resource built from a [`GeneratedWorld`]. Buffers are
/// uploaded once; each frame only rewrites the scene uniform.
pub struct SceneRenderer {
    scene_buffer: SceneBuffer,
    terrain_buffers: TerrainBuffers,
    grass_buffers: GrassBuffers,
    grass_texture: GrassTexture,
    depth: DepthTexture,
    terrain_pipeline: TerrainPipeline,
    grass_pipeline: GrassPipeline,
    clear_color: wgpu::Color,
}

impl SceneRenderer {
    pub fn new(ctx: &GpuContext, world: &GeneratedWorld, config: &SceneConfig) -> Result<Self, Error> {
        let device = &ctx.device;
        let lighting = &config.lighting;

        let scene_buffer = SceneBuffer::new(
            device,
            SceneLighting {
                light_pos: Vec3::from_array(lighting.light_position),
                light_color: Vec3::from_array(lighting.light_color),
                object_color: Vec3::from_array(lighting.object_color),
            },
        );

        let terrain_buffers = TerrainBuffers::new(device, &world.mesh)?;
        let grass_buffers = GrassBuffers::new(device, &world.grass)?;
        let grass_texture = GrassTexture::load(device, &ctx.queue, &config.grass.texture);

        let (width, height) = ctx.size();
        let depth = DepthTexture::new(device, width, height);

        let terrain_pipeline = TerrainPipeline::new(
            device,
            ctx.format(),
            scene_buffer.bind_group_layout(),
            &ShaderDesc::terrain(&config.shaders.terrain),
        );
        let grass_pipeline = GrassPipeline::new(
            device,
            ctx.format(),
            scene_buffer.bind_group_layout(),
            grass_texture.bind_group_layout(),
            &ShaderDesc::grass(&config.shaders.grass),
        );

        log::info!(
            "Renderer ready: {} terrain indices, {} grass instances{}",
            terrain_buffers.index_count,
            grass_buffers.instance_count,
            if grass_texture.is_loaded() { "" } else { " (placeholder texture)" },
        );

        let [r, g, b] = lighting.clear_color.map(f64::from);
        Ok(Self {
            scene_buffer,
            terrain_buffers,
            grass_buffers,
            grass_texture,
            depth,
            terrain_pipeline,
            grass_pipeline,
            clear_color: wgpu::Color { r, g, b, a: 1.0 },
        })
    }

    /// Recreate size-dependent targets
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.depth.resize(device, width, height);
        }
    }

    /// Render one frame: terrain, then grass if there is any.
    ///
    /// A surface that cannot provide a texture is reconfigured and the frame
    /// is skipped.
    pub fn render(&self, ctx: &mut GpuContext, camera: &Camera) {
        let frame = match ctx.get_current_texture() {
            Ok(frame) => frame,
            Err(e) => {
                log::warn!("Skipping frame: {}", e);
                ctx.reconfigure();
                return;
            }
        };
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

        self.scene_buffer.update(&ctx.queue, camera);

        let mut encoder = ctx.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: self.depth.view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            let scene = self.scene_buffer.bind_group();
            self.terrain_pipeline.draw(&mut pass, scene, &self.terrain_buffers);
            self.grass_pipeline.draw(&mut pass, scene, &self.grass_texture, &self.grass_buffers);
        }

        ctx.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
    }
}
