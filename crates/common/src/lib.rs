//! Shared value types for the still-life scene.
//!
//! # Invariants
//! - Transforms are plain values; nothing here touches shader or GPU state.
//! - Model matrices are always composed in the same axis order.

mod types;

pub use types::{PrimitiveKind, Transform, WHITE, compute_model_matrix};

pub fn crate_info() -> &'static str {
    "stilllife-common v0.1.0"
}
