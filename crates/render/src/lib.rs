//! Rendering boundary: the shading contract the scene writes into.
//!
//! # Invariants
//! - The scene never talks to a graphics API directly; it only sees
//!   [`ShaderState`], [`TextureDevice`] and [`MeshLibrary`].
//! - Uniform values persist until overwritten.
//! - Texture uploads are validated before any device allocation.
//!
//! A [`RecordingBackend`] stands in for the GPU. The traits are stable; a
//! real graphics implementation plugs in without changing consumers.

mod backend;
mod light;
mod recorder;
pub mod uniforms;

pub use backend::{
    Backend, FilterMode, MeshLibrary, PixelFormat, RenderError, SamplerSettings, ShaderState,
    TextureDevice, TextureHandle, TextureUpload, UniformValue, WrapMode,
};
pub use light::{DirectionalLight, LightRig, MAX_POINT_LIGHTS, PointLight};
pub use recorder::{Command, RecordingBackend};

pub fn crate_info() -> &'static str {
    "stilllife-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
