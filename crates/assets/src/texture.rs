use std::path::{Path, PathBuf};

use stilllife_render::{PixelFormat, SamplerSettings, TextureDevice, TextureHandle, TextureUpload};

use crate::AssetError;

/// Hardware texture units available to the fragment shader.
pub const DEFAULT_TEXTURE_UNITS: usize = 16;

/// A decoded bitmap, flipped so row 0 is the bottom of the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTexture {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub pixels: Vec<u8>,
}

/// Decode an image file into tightly packed RGB or RGBA bytes.
///
/// Only 3- and 4-channel images are accepted. The image is flipped
/// vertically to match the bottom-left texture origin of the shader.
pub fn decode_texture(path: &Path) -> Result<DecodedTexture, AssetError> {
    let img = image::open(path).map_err(|source| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let channels = img.color().channel_count();
    let flipped = img.flipv();
    let (format, pixels) = match channels {
        3 => (PixelFormat::Rgb8, flipped.to_rgb8().into_raw()),
        4 => (PixelFormat::Rgba8, flipped.to_rgba8().into_raw()),
        _ => {
            return Err(AssetError::UnsupportedFormat {
                path: path.to_path_buf(),
                channels,
            });
        }
    };

    Ok(DecodedTexture {
        width: flipped.width(),
        height: flipped.height(),
        format,
        pixels,
    })
}

/// A texture that has been uploaded to the device.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureEntry {
    pub tag: String,
    pub path: PathBuf,
    pub handle: TextureHandle,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
}

/// Tag-keyed list of uploaded textures.
///
/// The slot of a texture is its position in insertion order, and also the
/// texture unit it is bound to by [`TextureRegistry::bind_all`].
#[derive(Debug)]
pub struct TextureRegistry {
    entries: Vec<TextureEntry>,
    capacity: usize,
    sampler: SamplerSettings,
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_TEXTURE_UNITS)
    }

    /// Registry limited to `capacity` texture units, never more than
    /// [`DEFAULT_TEXTURE_UNITS`].
    pub fn with_capacity(capacity: usize) -> Self {
        if capacity > DEFAULT_TEXTURE_UNITS {
            tracing::warn!(
                requested = capacity,
                max = DEFAULT_TEXTURE_UNITS,
                "texture capacity clamped to hardware units"
            );
        }
        Self {
            entries: Vec::new(),
            capacity: capacity.min(DEFAULT_TEXTURE_UNITS),
            sampler: SamplerSettings::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[TextureEntry] {
        &self.entries
    }

    /// Decode `path`, upload it and append it under `tag`.
    ///
    /// Returns the slot index. Duplicate tags and a full registry are
    /// rejected before the file is touched.
    pub fn register<D: TextureDevice + ?Sized>(
        &mut self,
        device: &mut D,
        tag: &str,
        path: impl AsRef<Path>,
    ) -> Result<usize, AssetError> {
        let path = path.as_ref();
        if self.find_slot(tag).is_some() {
            return Err(AssetError::DuplicateTag {
                kind: "texture",
                tag: tag.to_string(),
            });
        }
        if self.entries.len() >= self.capacity {
            return Err(AssetError::CapacityExceeded {
                tag: tag.to_string(),
                capacity: self.capacity,
            });
        }

        let decoded = decode_texture(path)?;
        let handle = device.create_texture(&TextureUpload {
            label: tag,
            width: decoded.width,
            height: decoded.height,
            format: decoded.format,
            pixels: &decoded.pixels,
            sampler: self.sampler,
        })?;

        tracing::info!(
            tag,
            path = %path.display(),
            width = decoded.width,
            height = decoded.height,
            channels = decoded.format.channels(),
            "texture loaded"
        );

        self.entries.push(TextureEntry {
            tag: tag.to_string(),
            path: path.to_path_buf(),
            handle,
            width: decoded.width,
            height: decoded.height,
            format: decoded.format,
        });
        Ok(self.entries.len() - 1)
    }

    /// Slot (and texture unit) of `tag`.
    pub fn find_slot(&self, tag: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.tag == tag)
    }

    pub fn find_handle(&self, tag: &str) -> Option<TextureHandle> {
        self.entries.iter().find(|e| e.tag == tag).map(|e| e.handle)
    }

    /// Bind every texture to the unit matching its slot. Returns the number
    /// of units bound.
    pub fn bind_all<D: TextureDevice + ?Sized>(&self, device: &mut D) -> usize {
        for (unit, entry) in self.entries.iter().enumerate() {
            device.bind_texture(unit as u32, entry.handle);
        }
        self.entries.len()
    }

    /// Release every uploaded texture and empty the registry.
    pub fn release_all<D: TextureDevice + ?Sized>(&mut self, device: &mut D) {
        for entry in self.entries.drain(..) {
            device.release_texture(entry.handle);
        }
    }
}
