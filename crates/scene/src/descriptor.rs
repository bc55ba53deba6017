use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};
use stilllife_common::{PrimitiveKind, Transform};

fn unit_uv() -> Vec2 {
    Vec2::ONE
}

/// How an object is coloured: a flat colour or a tiled texture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    Color(Vec4),
    Texture {
        tag: String,
        #[serde(default = "unit_uv")]
        uv_scale: Vec2,
    },
}

impl Surface {
    pub fn texture(tag: impl Into<String>) -> Self {
        Surface::Texture {
            tag: tag.into(),
            uv_scale: Vec2::ONE,
        }
    }

    pub fn tiled(tag: impl Into<String>, u: f32, v: f32) -> Self {
        Surface::Texture {
            tag: tag.into(),
            uv_scale: Vec2::new(u, v),
        }
    }

    pub fn texture_tag(&self) -> Option<&str> {
        match self {
            Surface::Texture { tag, .. } => Some(tag),
            Surface::Color(_) => None,
        }
    }
}

/// Everything one draw call needs, applied as a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    #[serde(default)]
    pub transform: Transform,
    pub surface: Surface,
    /// Material tag. `None` draws with the neutral material.
    #[serde(default)]
    pub material: Option<String>,
    pub primitive: PrimitiveKind,
}

impl SceneObject {
    pub fn new(
        name: impl Into<String>,
        transform: Transform,
        surface: Surface,
        material: Option<&str>,
        primitive: PrimitiveKind,
    ) -> Self {
        Self {
            name: name.into(),
            transform,
            surface,
            material: material.map(str::to_string),
            primitive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_surface_defaults_to_unit_uv() {
        let s: Surface = serde_json::from_str(r#"{"texture":{"tag":"wood"}}"#).unwrap();
        assert_eq!(s, Surface::texture("wood"));
        assert_eq!(s.texture_tag(), Some("wood"));
    }

    #[test]
    fn color_surface_parses() {
        let s: Surface = serde_json::from_str(r#"{"color":[1.0,0.5,0.0,1.0]}"#).unwrap();
        assert_eq!(s, Surface::Color(Vec4::new(1.0, 0.5, 0.0, 1.0)));
        assert_eq!(s.texture_tag(), None);
    }

    #[test]
    fn object_defaults_fill_in() {
        let json = r#"{"name":"block","surface":{"color":[1,1,1,1]},"primitive":"box"}"#;
        let obj: SceneObject = serde_json::from_str(json).unwrap();
        assert_eq!(obj.transform, Transform::default());
        assert_eq!(obj.material, None);
        assert_eq!(obj.primitive, PrimitiveKind::Box);
    }
}
