use glam::{Mat4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use std::fmt;
use stilllife_common::PrimitiveKind;

/// Errors raised at the backend boundary.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("texture {label:?} has invalid dimensions {width}x{height}")]
    InvalidDimensions {
        label: String,
        width: u32,
        height: u32,
    },
    #[error("texture {label:?} expects {expected} bytes of pixel data, got {actual}")]
    PixelDataMismatch {
        label: String,
        expected: usize,
        actual: usize,
    },
    #[error("{count} point lights configured, the shader supports at most {max}")]
    TooManyPointLights { count: usize, max: usize },
}

/// Opaque handle to a texture owned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextureHandle(pub u32);

/// Pixel layout of an uploaded bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelFormat {
    Rgb8,
    Rgba8,
}

impl PixelFormat {
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterMode {
    Linear,
    Nearest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WrapMode {
    Repeat,
    ClampToEdge,
}

/// Sampling configuration applied when a texture is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplerSettings {
    pub filter: FilterMode,
    pub wrap: WrapMode,
    pub mipmaps: bool,
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self {
            filter: FilterMode::Linear,
            wrap: WrapMode::Repeat,
            mipmaps: true,
        }
    }
}

/// A decoded bitmap ready to be handed to a [`TextureDevice`].
#[derive(Debug, Clone, Copy)]
pub struct TextureUpload<'a> {
    pub label: &'a str,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub pixels: &'a [u8],
    pub sampler: SamplerSettings,
}

impl TextureUpload<'_> {
    /// Check that the dimensions are non-zero and the pixel buffer is exactly
    /// `width * height * channels` bytes.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidDimensions {
                label: self.label.to_string(),
                width: self.width,
                height: self.height,
            });
        }
        let expected = self.width as usize * self.height as usize * self.format.channels();
        if self.pixels.len() != expected {
            return Err(RenderError::PixelDataMismatch {
                label: self.label.to_string(),
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }
}

/// A value written into a named shader uniform slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Mat4(Mat4),
    Vec4(Vec4),
    Vec3(Vec3),
    Vec2(Vec2),
    Float(f32),
    Int(i32),
    Bool(bool),
    /// Index of the texture unit a sampler reads from.
    Sampler(u32),
}

impl fmt::Display for UniformValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniformValue::Mat4(m) => {
                let c = m.to_cols_array();
                write!(f, "mat4[")?;
                for (i, v) in c.iter().enumerate() {
                    if i > 0 {
                        f.write_str(if i % 4 == 0 { " | " } else { ", " })?;
                    }
                    write!(f, "{v:.3}")?;
                }
                write!(f, "]")
            }
            UniformValue::Vec4(v) => write!(f, "({:.3}, {:.3}, {:.3}, {:.3})", v.x, v.y, v.z, v.w),
            UniformValue::Vec3(v) => write!(f, "({:.3}, {:.3}, {:.3})", v.x, v.y, v.z),
            UniformValue::Vec2(v) => write!(f, "({:.3}, {:.3})", v.x, v.y),
            UniformValue::Float(v) => write!(f, "{v:.3}"),
            UniformValue::Int(v) => write!(f, "{v}"),
            UniformValue::Bool(v) => write!(f, "{v}"),
            UniformValue::Sampler(unit) => write!(f, "unit {unit}"),
        }
    }
}

/// The shading state the scene writes into before each draw.
///
/// Implementations forward values to the active shader program. Every value
/// persists until overwritten, so callers must set everything a draw needs.
pub trait ShaderState {
    fn set_uniform(&mut self, name: &str, value: UniformValue);

    fn set_mat4(&mut self, name: &str, value: Mat4) {
        self.set_uniform(name, UniformValue::Mat4(value));
    }

    fn set_vec4(&mut self, name: &str, value: Vec4) {
        self.set_uniform(name, UniformValue::Vec4(value));
    }

    fn set_vec3(&mut self, name: &str, value: Vec3) {
        self.set_uniform(name, UniformValue::Vec3(value));
    }

    fn set_vec2(&mut self, name: &str, value: Vec2) {
        self.set_uniform(name, UniformValue::Vec2(value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.set_uniform(name, UniformValue::Float(value));
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.set_uniform(name, UniformValue::Bool(value));
    }

    fn set_sampler(&mut self, name: &str, unit: u32) {
        self.set_uniform(name, UniformValue::Sampler(unit));
    }
}

/// GPU texture allocation and unit binding.
pub trait TextureDevice {
    /// Allocate and fill a 2D texture. Mip-maps are generated when the
    /// sampler settings ask for them.
    fn create_texture(&mut self, upload: &TextureUpload<'_>) -> Result<TextureHandle, RenderError>;

    /// Attach a texture to a hardware texture unit.
    fn bind_texture(&mut self, unit: u32, handle: TextureHandle);

    /// Free the texture. The handle must not be used afterwards.
    fn release_texture(&mut self, handle: TextureHandle);
}

/// The external primitive-mesh provider: load once, draw many times.
pub trait MeshLibrary {
    fn load_mesh(&mut self, kind: PrimitiveKind);

    /// Draw with whatever shading state is current.
    fn draw_mesh(&mut self, kind: PrimitiveKind);
}

/// Everything the scene needs from a rendering backend.
pub trait Backend: ShaderState + TextureDevice + MeshLibrary {}

impl<T: ShaderState + TextureDevice + MeshLibrary> Backend for T {}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(width: u32, height: u32, format: PixelFormat, pixels: &[u8]) -> TextureUpload<'_> {
        TextureUpload {
            label: "test",
            width,
            height,
            format,
            pixels,
            sampler: SamplerSettings::default(),
        }
    }

    #[test]
    fn default_sampler_is_linear_repeat_mipmapped() {
        let s = SamplerSettings::default();
        assert_eq!(s.filter, FilterMode::Linear);
        assert_eq!(s.wrap, WrapMode::Repeat);
        assert!(s.mipmaps);
    }

    #[test]
    fn upload_with_matching_bytes_is_valid() {
        let rgb = vec![0u8; 2 * 3 * 3];
        assert!(upload(2, 3, PixelFormat::Rgb8, &rgb).validate().is_ok());
        let rgba = vec![0u8; 2 * 3 * 4];
        assert!(upload(2, 3, PixelFormat::Rgba8, &rgba).validate().is_ok());
    }

    #[test]
    fn upload_with_wrong_byte_count_is_rejected() {
        let pixels = vec![0u8; 10];
        let err = upload(2, 2, PixelFormat::Rgba8, &pixels).validate().unwrap_err();
        assert!(matches!(
            err,
            RenderError::PixelDataMismatch {
                expected: 16,
                actual: 10,
                ..
            }
        ));
    }

    #[test]
    fn zero_sized_upload_is_rejected() {
        let err = upload(0, 4, PixelFormat::Rgb8, &[]).validate().unwrap_err();
        assert!(matches!(err, RenderError::InvalidDimensions { width: 0, .. }));
    }

    #[test]
    fn uniform_display_is_compact() {
        assert_eq!(UniformValue::Sampler(3).to_string(), "unit 3");
        assert_eq!(UniformValue::Bool(true).to_string(), "true");
        assert_eq!(
            UniformValue::Vec2(Vec2::new(5.0, 1.0)).to_string(),
            "(5.000, 1.000)"
        );
        let identity = UniformValue::Mat4(Mat4::IDENTITY).to_string();
        assert!(identity.starts_with("mat4[1.000, 0.000"));
        assert_eq!(identity.matches(" | ").count(), 3);
    }
}
