use std::path::{Path, PathBuf};

use glam::Vec2;
use stilllife_assets::{Material, MaterialRegistry, TextureRegistry};
use stilllife_common::{PrimitiveKind, WHITE};
use stilllife_render::{Backend, uniforms};

use crate::SceneError;
use crate::descriptor::{SceneObject, Surface};
use crate::document::SceneDocument;

/// Outcome of [`SceneManager::prepare`]. Texture failures are collected here
/// rather than aborting preparation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrepareReport {
    pub loaded: Vec<String>,
    /// `(tag, error)` for every texture that could not be registered.
    pub failed: Vec<(String, String)>,
    pub units_bound: usize,
    pub materials: usize,
    pub skipped_materials: Vec<String>,
    pub meshes: usize,
}

impl PrepareReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.skipped_materials.is_empty()
    }
}

/// Counters from one [`SceneManager::render`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub draws: usize,
    /// Objects whose texture was missing and were drawn flat white.
    pub texture_fallbacks: usize,
    /// Objects whose named material was missing and used the neutral one.
    pub material_fallbacks: usize,
}

/// Owns the registries for one scene document and drives the backend.
///
/// Lifecycle is `prepare` once, `render` any number of times, then `destroy`.
#[derive(Debug)]
pub struct SceneManager {
    document: SceneDocument,
    asset_root: PathBuf,
    textures: TextureRegistry,
    materials: MaterialRegistry,
    prepared: bool,
}

impl SceneManager {
    /// Texture paths in `document` are resolved against `asset_root`.
    pub fn new(document: SceneDocument, asset_root: impl Into<PathBuf>) -> Self {
        Self {
            document,
            asset_root: asset_root.into(),
            textures: TextureRegistry::new(),
            materials: MaterialRegistry::new(),
            prepared: false,
        }
    }

    pub fn document(&self) -> &SceneDocument {
        &self.document
    }

    /// Edits take effect on the next [`SceneManager::prepare`].
    pub fn document_mut(&mut self) -> &mut SceneDocument {
        &mut self.document
    }

    pub fn asset_root(&self) -> &Path {
        &self.asset_root
    }

    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Load textures, define materials, emit the light rig and load every
    /// primitive mesh.
    ///
    /// Texture and material problems are logged and reported; only an
    /// invalid light rig fails the call, and it does so before anything is
    /// uploaded. Preparing again releases the previous textures first.
    pub fn prepare<B: Backend + ?Sized>(
        &mut self,
        backend: &mut B,
    ) -> Result<PrepareReport, SceneError> {
        let _span = tracing::info_span!("scene_prepare").entered();
        if self.prepared || !self.textures.is_empty() || !self.materials.is_empty() {
            self.destroy(backend);
        }
        self.document.lights.validate()?;

        let mut report = PrepareReport::default();

        for source in &self.document.textures {
            let path = self.asset_root.join(&source.path);
            match self.textures.register(backend, &source.tag, &path) {
                Ok(_) => report.loaded.push(source.tag.clone()),
                Err(e) => {
                    tracing::warn!(tag = %source.tag, "texture not registered: {e}");
                    report.failed.push((source.tag.clone(), e.to_string()));
                }
            }
        }
        report.units_bound = self.textures.bind_all(backend);

        for spec in &self.document.materials {
            if let Err(e) = self.materials.define(&spec.tag, spec.material()) {
                tracing::warn!(tag = %spec.tag, "material not defined: {e}");
                report.skipped_materials.push(spec.tag.clone());
            }
        }
        report.materials = self.materials.len();

        self.document.lights.apply(backend)?;

        for kind in PrimitiveKind::ALL {
            backend.load_mesh(kind);
        }
        report.meshes = PrimitiveKind::ALL.len();

        self.prepared = true;
        tracing::info!(
            loaded = report.loaded.len(),
            failed = report.failed.len(),
            materials = report.materials,
            "scene prepared"
        );
        Ok(report)
    }

    /// Draw every object in document order.
    pub fn render<B: Backend + ?Sized>(&self, backend: &mut B) -> Result<RenderStats, SceneError> {
        if !self.prepared {
            return Err(SceneError::NotPrepared);
        }
        let _span = tracing::info_span!("scene_render").entered();

        let mut stats = RenderStats::default();
        for object in &self.document.objects {
            self.draw_object(backend, object, &mut stats);
        }
        tracing::debug!(draws = stats.draws, "frame rendered");
        Ok(stats)
    }

    /// Release every texture and forget the materials.
    pub fn destroy<B: Backend + ?Sized>(&mut self, backend: &mut B) {
        self.textures.release_all(backend);
        self.materials.clear();
        self.prepared = false;
    }

    /// Set every uniform a draw reads, then draw. Nothing carries over from
    /// the previous object.
    fn draw_object<B: Backend + ?Sized>(
        &self,
        backend: &mut B,
        object: &SceneObject,
        stats: &mut RenderStats,
    ) {
        backend.set_mat4(uniforms::MODEL, object.transform.model_matrix());

        let uv_scale = match &object.surface {
            Surface::Color(color) => {
                backend.set_bool(uniforms::USE_TEXTURE, false);
                backend.set_vec4(uniforms::OBJECT_COLOR, *color);
                Vec2::ONE
            }
            Surface::Texture { tag, uv_scale } => match self.textures.find_slot(tag) {
                Some(slot) => {
                    backend.set_bool(uniforms::USE_TEXTURE, true);
                    backend.set_sampler(uniforms::OBJECT_TEXTURE, slot as u32);
                    *uv_scale
                }
                None => {
                    tracing::warn!(object = %object.name, tag = %tag, "unknown texture, drawing white");
                    stats.texture_fallbacks += 1;
                    backend.set_bool(uniforms::USE_TEXTURE, false);
                    backend.set_vec4(uniforms::OBJECT_COLOR, WHITE);
                    Vec2::ONE
                }
            },
        };
        backend.set_vec2(uniforms::UV_SCALE, uv_scale);

        let material = match object.material.as_deref() {
            None => Material::NEUTRAL,
            Some(tag) => match self.materials.find(tag) {
                Some(m) => *m,
                None => {
                    tracing::warn!(object = %object.name, tag, "unknown material, using neutral");
                    stats.material_fallbacks += 1;
                    Material::NEUTRAL
                }
            },
        };
        material.apply(backend);

        tracing::debug!(object = %object.name, primitive = %object.primitive, "draw");
        backend.draw_mesh(object.primitive);
        stats.draws += 1;
    }
}
