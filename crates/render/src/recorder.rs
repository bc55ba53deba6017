use std::collections::{BTreeMap, BTreeSet};

use stilllife_common::PrimitiveKind;

use crate::backend::{
    MeshLibrary, RenderError, ShaderState, TextureDevice, TextureHandle, TextureUpload,
    UniformValue,
};

/// One call received by a [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetUniform { name: String, value: UniformValue },
    CreateTexture {
        handle: TextureHandle,
        label: String,
        width: u32,
        height: u32,
        channels: usize,
    },
    BindTexture { unit: u32, handle: TextureHandle },
    ReleaseTexture { handle: TextureHandle },
    LoadMesh(PrimitiveKind),
    DrawMesh(PrimitiveKind),
}

/// Headless backend that records every call instead of touching a GPU.
///
/// Keeps the current value of each uniform, the set of live textures, and
/// which texture sits on each unit, so callers can inspect the state a draw
/// would have seen. Useful for CLI output, logging, and tests.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    commands: Vec<Command>,
    uniforms: BTreeMap<String, UniformValue>,
    live: BTreeSet<TextureHandle>,
    labels: BTreeMap<TextureHandle, String>,
    units: BTreeMap<u32, TextureHandle>,
    meshes: BTreeSet<PrimitiveKind>,
    next_handle: u32,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            ..Self::default()
        }
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Current value of a uniform slot, if it was ever written.
    pub fn uniform(&self, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(name)
    }

    pub fn live_textures(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, handle: TextureHandle) -> bool {
        self.live.contains(&handle)
    }

    pub fn bound_texture(&self, unit: u32) -> Option<TextureHandle> {
        self.units.get(&unit).copied()
    }

    pub fn texture_label(&self, handle: TextureHandle) -> Option<&str> {
        self.labels.get(&handle).map(String::as_str)
    }

    pub fn is_mesh_loaded(&self, kind: PrimitiveKind) -> bool {
        self.meshes.contains(&kind)
    }

    pub fn draw_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::DrawMesh(_)))
            .count()
    }

    /// Forget recorded commands but keep the live state.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Human-readable listing of every recorded command, one per line.
    pub fn to_transcript(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Recorded Frame (commands={}, draws={}, textures={}) ===\n",
            self.commands.len(),
            self.draw_count(),
            self.live.len()
        ));
        for cmd in &self.commands {
            let line = match cmd {
                Command::SetUniform { name, value } => format!("uniform {name} = {value}"),
                Command::CreateTexture {
                    handle,
                    label,
                    width,
                    height,
                    channels,
                } => format!(
                    "create texture #{} {label:?} {width}x{height}x{channels}",
                    handle.0
                ),
                Command::BindTexture { unit, handle } => {
                    format!("bind texture #{} -> unit {unit}", handle.0)
                }
                Command::ReleaseTexture { handle } => format!("release texture #{}", handle.0),
                Command::LoadMesh(kind) => format!("load mesh {kind}"),
                Command::DrawMesh(kind) => format!("draw {kind}"),
            };
            out.push_str(&format!("  {line}\n"));
        }
        out
    }
}

impl ShaderState for RecordingBackend {
    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        self.uniforms.insert(name.to_string(), value);
        self.commands.push(Command::SetUniform {
            name: name.to_string(),
            value,
        });
    }
}

impl TextureDevice for RecordingBackend {
    fn create_texture(&mut self, upload: &TextureUpload<'_>) -> Result<TextureHandle, RenderError> {
        upload.validate()?;
        let handle = TextureHandle(self.next_handle.max(1));
        self.next_handle = handle.0 + 1;
        self.live.insert(handle);
        self.labels.insert(handle, upload.label.to_string());
        self.commands.push(Command::CreateTexture {
            handle,
            label: upload.label.to_string(),
            width: upload.width,
            height: upload.height,
            channels: upload.format.channels(),
        });
        Ok(handle)
    }

    fn bind_texture(&mut self, unit: u32, handle: TextureHandle) {
        if !self.live.contains(&handle) {
            tracing::warn!(unit, handle = handle.0, "binding a texture that is not live");
        }
        self.units.insert(unit, handle);
        self.commands.push(Command::BindTexture { unit, handle });
    }

    fn release_texture(&mut self, handle: TextureHandle) {
        if !self.live.remove(&handle) {
            tracing::warn!(handle = handle.0, "releasing a texture that is not live");
        }
        self.labels.remove(&handle);
        self.units.retain(|_, bound| *bound != handle);
        self.commands.push(Command::ReleaseTexture { handle });
    }
}

impl MeshLibrary for RecordingBackend {
    fn load_mesh(&mut self, kind: PrimitiveKind) {
        self.meshes.insert(kind);
        self.commands.push(Command::LoadMesh(kind));
    }

    fn draw_mesh(&mut self, kind: PrimitiveKind) {
        if !self.meshes.contains(&kind) {
            tracing::warn!(%kind, "drawing a mesh that was never loaded");
        }
        self.commands.push(Command::DrawMesh(kind));
    }
}
