//! Asset registries: textures and materials looked up by short string tag.
//!
//! Textures are decoded from disk, uploaded through a
//! [`stilllife_render::TextureDevice`] and then referenced by tag. The
//! renderer sees slots and handles, never file paths.
//!
//! # Invariants
//! - Tags are unique within a registry; the first registration keeps its slot.
//! - Slot order is insertion order and never changes until release.
//! - A failed registration leaves the registry untouched.
//! - Lookups return `None` on a miss; they never fail.

mod material;
mod texture;

use std::path::PathBuf;

pub use material::{Material, MaterialRegistry};
pub use texture::{
    DEFAULT_TEXTURE_UNITS, DecodedTexture, TextureEntry, TextureRegistry, decode_texture,
};

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to decode image {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("image {path:?} has {channels} channels, expected 3 (RGB) or 4 (RGBA)")]
    UnsupportedFormat { path: PathBuf, channels: u8 },
    #[error("cannot register texture {tag:?}: all {capacity} texture units are in use")]
    CapacityExceeded { tag: String, capacity: usize },
    #[error("{kind} tag {tag:?} is already registered")]
    DuplicateTag { kind: &'static str, tag: String },
    #[error("texture upload failed: {0}")]
    Upload(#[from] stilllife_render::RenderError),
}

pub fn crate_info() -> &'static str {
    "stilllife-assets v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("assets"));
    }

    #[test]
    fn duplicate_error_names_kind_and_tag() {
        let err = AssetError::DuplicateTag {
            kind: "material",
            tag: "wood".into(),
        };
        assert_eq!(err.to_string(), "material tag \"wood\" is already registered");
    }
}
