//! Grass billboard texture and its sampler, bound as one texture unit

use wgpu::util::DeviceExt;

use super::image::{DecodedImage, decode_image, placeholder_image};
use std::path::Path;

/// Sampled grass texture with its bind group (group 1 of the grass pipeline)
pub struct GrassTexture {
    #[allow(dead_code)]
    texture: wgpu::Texture,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    /// False when the placeholder stands in for a missing file
    loaded: bool,
}

impl GrassTexture {
    /// Load `path`, falling back to a 1x1 placeholder if it cannot be decoded
    /// or is larger than the device can sample
    pub fn load(device: &wgpu::Device, queue: &wgpu::Queue, path: &Path) -> Self {
        match usable_image(path, device.limits().max_texture_dimension_2d) {
            Some(image) => Self::from_image(device, queue, &image, true),
            None => {
                log::warn!("Using placeholder grass texture");
                Self::from_image(device, queue, &placeholder_image(), false)
            }
        }
    }

    fn from_image(device: &wgpu::Device, queue: &wgpu::Queue, image: &DecodedImage, loaded: bool) -> Self {
        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some("grass_texture"),
                size: wgpu::Extent3d {
                    width: image.width,
                    height: image.height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            &image.pixels,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Clamp so the transparent border does not bleed across quad edges
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("grass_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let bind_group_layout = Self::create_bind_group_layout(device);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("grass_texture_bind_group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Self {
            texture,
            bind_group_layout,
            bind_group,
            loaded,
        }
    }

    fn create_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("grass_texture_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        })
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

/// Decoded image at `path` if it fits within `max_dimension` on both sides
fn usable_image(path: &Path, max_dimension: u32) -> Option<DecodedImage> {
    let image = decode_image(path)?;
    match image.check_size(max_dimension) {
        Ok(()) => Some(image),
        Err(e) => {
            log::warn!("Rejecting texture {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oversized_texture_is_not_usable() {
        let dir = tempfile::tempdir().unwrap();
        let wide = dir.path().join("wide.png");
        ::image::RgbaImage::new(9000, 1).save(&wide).unwrap();
        let small = dir.path().join("small.png");
        ::image::RgbaImage::new(4, 4).save(&small).unwrap();

        assert!(usable_image(&wide, 8192).is_none());
        assert!(usable_image(&wide, 16384).is_some());
        assert!(usable_image(&small, 8192).is_some());
        assert!(usable_image(&dir.path().join("missing.png"), 8192).is_none());
    }
}
