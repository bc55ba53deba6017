use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use stilllife_assets::Material;
use stilllife_render::LightRig;

use crate::SceneError;
use crate::descriptor::SceneObject;

/// Current scene document schema version.
pub const SCENE_SCHEMA_VERSION: u32 = 1;

fn schema_version() -> u32 {
    SCENE_SCHEMA_VERSION
}

/// A texture to register: tag plus path relative to the asset root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureSource {
    pub tag: String,
    pub path: PathBuf,
}

impl TextureSource {
    pub fn new(tag: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            tag: tag.into(),
            path: path.into(),
        }
    }
}

/// A material definition as written in a scene document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    pub tag: String,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

impl MaterialSpec {
    pub fn new(tag: impl Into<String>, material: Material) -> Self {
        Self {
            tag: tag.into(),
            diffuse: material.diffuse,
            specular: material.specular,
            shininess: material.shininess,
        }
    }

    pub fn material(&self) -> Material {
        Material::new(self.diffuse, self.specular, self.shininess)
    }
}

/// A complete scene: what to load and what to draw, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    #[serde(default = "schema_version")]
    pub version: u32,
    #[serde(default)]
    pub textures: Vec<TextureSource>,
    #[serde(default)]
    pub materials: Vec<MaterialSpec>,
    #[serde(default)]
    pub lights: LightRig,
    #[serde(default)]
    pub objects: Vec<SceneObject>,
}

impl Default for SceneDocument {
    fn default() -> Self {
        Self {
            version: SCENE_SCHEMA_VERSION,
            textures: Vec::new(),
            materials: Vec::new(),
            lights: LightRig::default(),
            objects: Vec::new(),
        }
    }
}

impl SceneDocument {
    /// Save the document as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load a document from JSON, rejecting unknown schema versions.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let file = std::fs::File::open(path)?;
        let doc: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        if doc.version != SCENE_SCHEMA_VERSION {
            return Err(SceneError::SchemaMismatch {
                file_version: doc.version,
                expected_version: SCENE_SCHEMA_VERSION,
            });
        }
        Ok(doc)
    }

    /// Texture tags referenced by objects but not declared in `textures`.
    pub fn undeclared_textures(&self) -> Vec<&str> {
        let mut missing: Vec<&str> = self
            .objects
            .iter()
            .filter_map(|o| o.surface.texture_tag())
            .filter(|tag| !self.textures.iter().any(|t| t.tag == *tag))
            .collect();
        missing.sort_unstable();
        missing.dedup();
        missing
    }

    /// Material tags referenced by objects but not declared in `materials`.
    pub fn undeclared_materials(&self) -> Vec<&str> {
        let mut missing: Vec<&str> = self
            .objects
            .iter()
            .filter_map(|o| o.material.as_deref())
            .filter(|tag| !self.materials.iter().any(|m| m.tag == *tag))
            .collect();
        missing.sort_unstable();
        missing.dedup();
        missing
    }
}
