//! Image decoding for sampled textures

use std::path::Path;

use crate::core::error::Error;

/// Decoded image with pixels expanded to RGBA8, rows top to bottom
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Channel count of the source file before expansion to RGBA
    pub channels: u8,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Bytes per row of `pixels`
    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }

    /// Fail when either side exceeds the device's 2D texture limit
    pub fn check_size(&self, max_dimension: u32) -> Result<(), Error> {
        if self.width > max_dimension || self.height > max_dimension {
            return Err(Error::Texture(format!(
                "{}x{} exceeds the device limit of {} texels per side",
                self.width, self.height, max_dimension
            )));
        }
        Ok(())
    }
}

/// Decode the image at `path`, or `None` (with a warning) if it cannot be
/// read or decoded
pub fn decode_image(path: &Path) -> Option<DecodedImage> {
    let decoded = match ::image::open(path) {
        Ok(decoded) => decoded,
        Err(e) => {
            log::warn!("Failed to load texture {}: {}", path.display(), e);
            return None;
        }
    };

    let channels = decoded.color().channel_count();
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        log::warn!("Texture {} is empty", path.display());
        return None;
    }

    log::info!("Loaded texture {} ({}x{}, {} channels)", path.display(), width, height, channels);
    Some(DecodedImage {
        width,
        height,
        channels,
        pixels: rgba.into_raw(),
    })
}

/// Opaque 1x1 stand-in used when the real texture is unavailable
pub fn placeholder_image() -> DecodedImage {
    DecodedImage {
        width: 1,
        height: 1,
        channels: 4,
        pixels: vec![76, 140, 40, 255],
    }
}
