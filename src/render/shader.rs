//! WGSL shader loading with built-in fallbacks
//!
//! Shaders are read from disk at startup so they can be tweaked without a
//! rebuild. Every shader also ships compiled into the binary; when the file
//! cannot be used the problem is logged and the built-in copy takes over.

use std::path::{Path, PathBuf};

use crate::core::error::Error;

/// Entry points every render shader must define
pub const REQUIRED_ENTRY_POINTS: [&str; 2] = ["vs_main", "fs_main"];

/// A shader to load: where to read it and what to use if that fails
#[derive(Clone, Debug)]
pub struct ShaderDesc {
    pub label: &'static str,
    pub path: PathBuf,
    pub builtin: &'static str,
}

impl ShaderDesc {
    pub fn terrain(path: impl Into<PathBuf>) -> Self {
        Self {
            label: "terrain_shader",
            path: path.into(),
            builtin: include_str!("../../shaders/terrain.wgsl"),
        }
    }

    pub fn grass(path: impl Into<PathBuf>) -> Self {
        Self {
            label: "grass_shader",
            path: path.into(),
            builtin: include_str!("../../shaders/grass.wgsl"),
        }
    }
}

/// Read WGSL from `path` and check that it defines the render entry points
pub fn read_source(path: &Path) -> Result<String, Error> {
    let source = std::fs::read_to_string(path).map_err(|e| Error::Shader {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    for entry in REQUIRED_ENTRY_POINTS {
        if !source.contains(&format!("fn {}", entry)) {
            return Err(Error::Shader {
                path: path.to_path_buf(),
                message: format!("missing entry point `{}`", entry),
            });
        }
    }

    Ok(source)
}

/// Source text for `desc`: the file on disk, or the built-in copy on error
pub fn resolve_source(desc: &ShaderDesc) -> String {
    match read_source(&desc.path) {
        Ok(source) => {
            log::debug!("Loaded {} from {}", desc.label, desc.path.display());
            source
        }
        Err(e) => {
            log::warn!("{}; using built-in {}", e, desc.label);
            desc.builtin.to_string()
        }
    }
}

/// Create the shader module for `desc`
pub fn create_module(device: &wgpu::Device, desc: &ShaderDesc) -> wgpu::ShaderModule {
    let source = resolve_source(desc);
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(desc.label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtins_define_entry_points() {
        for desc in [ShaderDesc::terrain("unused"), ShaderDesc::grass("unused")] {
            for entry in REQUIRED_ENTRY_POINTS {
                assert!(desc.builtin.contains(&format!("fn {}", entry)), "{} lacks {}", desc.label, entry);
            }
        }
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let desc = ShaderDesc::terrain(dir.path().join("nope.wgsl"));

        assert!(matches!(read_source(&desc.path), Err(Error::Shader { .. })));
        assert_eq!(resolve_source(&desc), desc.builtin);
    }

    #[test]
    fn test_missing_entry_point_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "@vertex fn vs_main() -> @builtin(position) vec4<f32> {{ return vec4<f32>(); }}").unwrap();

        let err = read_source(file.path()).unwrap_err();
        assert!(err.to_string().contains("fs_main"));

        let desc = ShaderDesc::grass(file.path());
        assert_eq!(resolve_source(&desc), desc.builtin);
    }

    #[test]
    fn test_valid_file_is_used() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "fn vs_main() {{}}\nfn fs_main() {{}}\n").unwrap();

        let desc = ShaderDesc::terrain(file.path());
        assert_eq!(resolve_source(&desc), "fn vs_main() {}\nfn fs_main() {}\n");
    }
}
