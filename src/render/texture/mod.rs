//! Texture resources: decoded images, the grass texture unit, and the depth buffer

pub mod image;
pub mod grass_texture;
pub mod depth;

pub use self::image::{DecodedImage, decode_image, placeholder_image};
pub use grass_texture::GrassTexture;
pub use depth::DepthTexture;
