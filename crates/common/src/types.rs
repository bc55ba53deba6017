use glam::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque white, used for flat-colour surfaces and as the texture fallback.
pub const WHITE: Vec4 = Vec4::ONE;

/// The basic meshes the external geometry service can load and draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Plane,
    Box,
    Cylinder,
    Cone,
    Sphere,
    Torus,
    TaperedCylinder,
}

impl PrimitiveKind {
    /// Every kind, in the order meshes are loaded during scene preparation.
    pub const ALL: [PrimitiveKind; 7] = [
        PrimitiveKind::Plane,
        PrimitiveKind::Cylinder,
        PrimitiveKind::Torus,
        PrimitiveKind::Box,
        PrimitiveKind::Cone,
        PrimitiveKind::Sphere,
        PrimitiveKind::TaperedCylinder,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Plane => "plane",
            PrimitiveKind::Box => "box",
            PrimitiveKind::Cylinder => "cylinder",
            PrimitiveKind::Cone => "cone",
            PrimitiveKind::Sphere => "sphere",
            PrimitiveKind::Torus => "torus",
            PrimitiveKind::TaperedCylinder => "tapered_cylinder",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Spatial transform: scale, per-axis rotation in degrees, position.
///
/// Rotations are Euler angles applied X first, then Y, then Z. The transform
/// holds no GPU state; it is turned into a model matrix per draw call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub scale: Vec3,
    pub rotation_degrees: Vec3,
    pub position: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: Vec3::ONE,
            rotation_degrees: Vec3::ZERO,
            position: Vec3::ZERO,
        }
    }
}

impl Transform {
    pub fn new(scale: Vec3, rotation_degrees: Vec3, position: Vec3) -> Self {
        Self {
            scale,
            rotation_degrees,
            position,
        }
    }

    /// Model matrix for this transform. See [`compute_model_matrix`].
    pub fn model_matrix(&self) -> Mat4 {
        compute_model_matrix(self.scale, self.rotation_degrees, self.position)
    }
}

/// Compose `translation * rotZ * rotY * rotX * scale`.
///
/// The axis order is fixed: X is innermost, so a vertex is scaled, rotated
/// about X, then Y, then Z, and finally translated. Changing the order changes
/// the result for any rotation that touches more than one axis.
pub fn compute_model_matrix(scale: Vec3, rotation_degrees: Vec3, position: Vec3) -> Mat4 {
    Mat4::from_translation(position)
        * Mat4::from_rotation_z(rotation_degrees.z.to_radians())
        * Mat4::from_rotation_y(rotation_degrees.y.to_radians())
        * Mat4::from_rotation_x(rotation_degrees.x.to_radians())
        * Mat4::from_scale(scale)
}
