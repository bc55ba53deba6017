use glam::Vec3;
use serde::{Deserialize, Serialize};
use stilllife_render::{ShaderState, uniforms};

use crate::AssetError;

/// Phong surface response: diffuse and specular colour plus shininess.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl Material {
    /// Used for objects that name no material, or an unknown one.
    pub const NEUTRAL: Material = Material {
        diffuse: Vec3::splat(0.8),
        specular: Vec3::splat(0.2),
        shininess: 32.0,
    };

    pub fn new(diffuse: Vec3, specular: Vec3, shininess: f32) -> Self {
        Self {
            diffuse,
            specular,
            shininess,
        }
    }

    /// Write this material into the shader's material block.
    pub fn apply<S: ShaderState + ?Sized>(&self, shader: &mut S) {
        shader.set_vec3(uniforms::MATERIAL_DIFFUSE, self.diffuse);
        shader.set_vec3(uniforms::MATERIAL_SPECULAR, self.specular);
        shader.set_float(uniforms::MATERIAL_SHININESS, self.shininess);
    }

    /// The five surfaces of the desk still life.
    pub fn presets() -> [(&'static str, Material); 5] {
        [
            (
                "wood",
                Material::new(Vec3::new(0.6, 0.5, 0.4), Vec3::splat(0.5), 64.0),
            ),
            (
                "glass",
                Material::new(Vec3::new(0.7, 0.7, 0.8), Vec3::ONE, 128.0),
            ),
            (
                "metal",
                Material::new(Vec3::splat(0.4), Vec3::new(0.7, 0.7, 0.6), 52.0),
            ),
            (
                "leather",
                Material::new(Vec3::new(0.5, 0.4, 0.3), Vec3::splat(0.01), 0.001),
            ),
            (
                "canvas",
                Material::new(Vec3::new(0.7, 0.6, 0.5), Vec3::splat(0.02), 0.001),
            ),
        ]
    }
}

/// Tag-keyed material table, kept in definition order.
#[derive(Debug, Clone, Default)]
pub struct MaterialRegistry {
    entries: Vec<(String, Material)>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every entry of [`Material::presets`].
    pub fn with_presets() -> Self {
        Self {
            entries: Material::presets()
                .into_iter()
                .map(|(tag, m)| (tag.to_string(), m))
                .collect(),
        }
    }

    /// Add a material. A tag that is already defined is rejected and the
    /// existing values are kept.
    pub fn define(&mut self, tag: &str, material: Material) -> Result<(), AssetError> {
        if self.find(tag).is_some() {
            return Err(AssetError::DuplicateTag {
                kind: "material",
                tag: tag.to_string(),
            });
        }
        self.entries.push((tag.to_string(), material));
        Ok(())
    }

    pub fn find(&self, tag: &str) -> Option<&Material> {
        self.entries.iter().find(|(t, _)| t == tag).map(|(_, m)| m)
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(t, _)| t.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stilllife_render::{RecordingBackend, UniformValue};

    #[test]
    fn define_then_find() {
        let mut reg = MaterialRegistry::new();
        let wood = Material::new(Vec3::new(0.6, 0.5, 0.4), Vec3::splat(0.5), 64.0);
        reg.define("wood", wood).unwrap();
        assert_eq!(reg.find("wood"), Some(&wood));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn unknown_tag_is_none() {
        let reg = MaterialRegistry::with_presets();
        assert!(reg.find("velvet").is_none());
    }

    #[test]
    fn duplicate_keeps_first_definition() {
        let mut reg = MaterialRegistry::new();
        let first = Material::new(Vec3::ONE, Vec3::ONE, 64.0);
        let second = Material::new(Vec3::ONE, Vec3::ONE, 8.0);
        reg.define("wood", first).unwrap();

        let err = reg.define("wood", second).unwrap_err();
        assert!(matches!(err, AssetError::DuplicateTag { kind: "material", .. }));
        assert_eq!(reg.find("wood").map(|m| m.shininess), Some(64.0));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn presets_cover_the_desk() {
        let reg = MaterialRegistry::with_presets();
        let tags: Vec<_> = reg.tags().collect();
        assert_eq!(tags, ["wood", "glass", "metal", "leather", "canvas"]);
        assert_eq!(reg.find("glass").map(|m| m.shininess), Some(128.0));
        assert_eq!(
            reg.find("metal").map(|m| m.specular),
            Some(Vec3::new(0.7, 0.7, 0.6))
        );
    }

    #[test]
    fn apply_writes_material_block() {
        let mut rec = RecordingBackend::new();
        let (_, metal) = Material::presets()[2];
        metal.apply(&mut rec);

        assert_eq!(
            rec.uniform("material.diffuseColor"),
            Some(&UniformValue::Vec3(Vec3::splat(0.4)))
        );
        assert_eq!(
            rec.uniform("material.specularColor"),
            Some(&UniformValue::Vec3(Vec3::new(0.7, 0.7, 0.6)))
        );
        assert_eq!(
            rec.uniform("material.shininess"),
            Some(&UniformValue::Float(52.0))
        );
        assert_eq!(rec.commands().len(), 3);
    }

    #[test]
    fn material_json_round_trips() {
        let json = serde_json::to_string(&Material::NEUTRAL).unwrap();
        let back: Material = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Material::NEUTRAL);
    }
}
