//! Scene composition: a declarative list of objects drawn against a backend.
//!
//! # Invariants
//! - Objects are drawn in document order.
//! - Each draw sets its own transform, surface, UV scale and material; no
//!   shading state leaks from one object to the next.
//! - Missing textures and materials degrade to flat white and the neutral
//!   material with a warning; they never abort a frame.

mod descriptor;
mod document;
mod manager;
mod still_life;

pub use descriptor::{SceneObject, Surface};
pub use document::{MaterialSpec, SCENE_SCHEMA_VERSION, SceneDocument, TextureSource};
pub use manager::{PrepareReport, RenderStats, SceneManager};

/// Errors from scene loading and rendering.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("schema version mismatch: file has v{file_version}, expected v{expected_version}")]
    SchemaMismatch {
        file_version: u32,
        expected_version: u32,
    },
    #[error("asset error: {0}")]
    Asset(#[from] stilllife_assets::AssetError),
    #[error("render error: {0}")]
    Render(#[from] stilllife_render::RenderError),
    #[error("scene rendered before prepare")]
    NotPrepared,
}

pub fn crate_info() -> &'static str {
    "stilllife-scene v0.1.0"
}
