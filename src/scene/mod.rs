//! Scene description loaded at startup

pub mod args;
pub mod config;

pub use args::{flag_str, parse_flag};
pub use config::{CameraConfig, LightingConfig, SceneConfig, ShaderPaths, WindowConfig};
