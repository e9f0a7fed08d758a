use glam::{Mat3, Mat4, Vec3};

use super::Uniform;

/// Handle to a mesh registered with the [`MeshRenderer`](super::MeshRenderer).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MeshId(pub(crate) u32);

/// Handle to a texture registered with the [`MeshRenderer`](super::MeshRenderer).
///
/// A texture is usable as soon as it is registered; until its image arrives
/// it samples as opaque black.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureId(pub(crate) u32);

impl MeshId {
    /// Creates a handle from a raw index. Intended for tests and tooling.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }
}

impl TextureId {
    /// Creates a handle from a raw index. Intended for tests and tooling.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }
}

/// How a draw call colors its fragments.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Fill {
    /// Vertex colors, textured and lit according to the current uniforms.
    Shaded,
    /// A single color; texture and lighting uniforms are ignored.
    Flat(Vec3),
}

/// Capability interface used by frame renderers.
///
/// Uniform values persist between calls (and between frames) until they are
/// overwritten, like uniforms of a bound shader program. Every draw captures
/// the values current at the time of the call.
pub trait RenderContext {
    /// Requests a color + depth clear before this frame's draws.
    fn clear(&mut self);

    /// Width over height of the drawing surface.
    fn aspect_ratio(&self) -> f32;

    fn set_mat4(&mut self, slot: Uniform, value: Mat4);
    fn set_mat3(&mut self, slot: Uniform, value: Mat3);
    fn set_vec3(&mut self, slot: Uniform, value: Vec3);
    fn set_int(&mut self, slot: Uniform, value: i32);

    /// Binds `texture` to texture unit 0.
    fn bind_texture(&mut self, texture: TextureId);

    fn draw_mesh(&mut self, mesh: MeshId, fill: Fill);
}
