use glam::{Mat3, Mat4, Vec3};

use super::uniforms::SlotTypeMismatch;
use super::{Fill, MeshId, ProgramBindings, RenderContext, TextureId, Uniform, UniformState};

/// One recorded draw call with the uniform values it captured.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawRecord {
    pub mesh: MeshId,
    pub fill: Fill,
    pub state: UniformState,
}

impl DrawRecord {
    /// Texture sampled by this draw, if any.
    pub fn texture(&self) -> Option<TextureId> {
        self.state.bound_texture
    }
}

/// CPU implementation of [`RenderContext`].
///
/// Uniform state outlives frames; the draw list and clear request are reset by
/// [`begin_frame`](Self::begin_frame).
#[derive(Debug)]
pub struct DrawRecorder {
    bindings: ProgramBindings,
    state: UniformState,
    aspect_ratio: f32,
    cleared: bool,
    draws: Vec<DrawRecord>,
    uniform_writes: u32,
}

impl DrawRecorder {
    pub fn new(bindings: ProgramBindings) -> Self {
        Self {
            bindings,
            state: UniformState::default(),
            aspect_ratio: 1.0,
            cleared: false,
            draws: Vec::new(),
            uniform_writes: 0,
        }
    }

    /// Starts a new frame. Keeps allocated capacity and current uniform values.
    pub fn begin_frame(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
        self.cleared = false;
        self.draws.clear();
        self.uniform_writes = 0;
    }

    /// Draws recorded since the last `begin_frame`, in call order.
    pub fn draws(&self) -> &[DrawRecord] {
        &self.draws
    }

    pub fn cleared(&self) -> bool {
        self.cleared
    }

    pub fn state(&self) -> &UniformState {
        &self.state
    }

    /// Number of accepted uniform writes since the last `begin_frame`.
    pub fn uniform_writes(&self) -> u32 {
        self.uniform_writes
    }

    fn write(&mut self, slot: Uniform, apply: impl FnOnce(&mut UniformState) -> Result<(), SlotTypeMismatch>) {
        if !self.bindings.has_uniform(slot) {
            log::trace!("write to unbound uniform `{}` ignored", slot.name());
            return;
        }
        match apply(&mut self.state) {
            Ok(()) => self.uniform_writes += 1,
            Err(SlotTypeMismatch) => {
                log::warn!("value type does not match uniform `{}`; ignored", slot.name());
            }
        }
    }
}

impl RenderContext for DrawRecorder {
    fn clear(&mut self) {
        self.cleared = true;
    }

    fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    fn set_mat4(&mut self, slot: Uniform, value: Mat4) {
        self.write(slot, |s| s.set_mat4(slot, value));
    }

    fn set_mat3(&mut self, slot: Uniform, value: Mat3) {
        self.write(slot, |s| s.set_mat3(slot, value));
    }

    fn set_vec3(&mut self, slot: Uniform, value: Vec3) {
        self.write(slot, |s| s.set_vec3(slot, value));
    }

    fn set_int(&mut self, slot: Uniform, value: i32) {
        self.write(slot, |s| s.set_int(slot, value));
    }

    fn bind_texture(&mut self, texture: TextureId) {
        self.state.bound_texture = Some(texture);
    }

    fn draw_mesh(&mut self, mesh: MeshId, fill: Fill) {
        self.draws.push(DrawRecord {
            mesh,
            fill,
            state: self.state,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{ProgramInterface, MESH_PROGRAM};

    fn recorder() -> DrawRecorder {
        DrawRecorder::new(ProgramBindings::resolve(&MESH_PROGRAM))
    }

    #[test]
    fn draws_capture_state_at_call_time() {
        let mut r = recorder();
        r.begin_frame(1.5);

        r.set_vec3(Uniform::LightColor, Vec3::X);
        r.draw_mesh(MeshId(0), Fill::Shaded);
        r.set_vec3(Uniform::LightColor, Vec3::Y);
        r.draw_mesh(MeshId(1), Fill::Shaded);

        assert_eq!(r.draws()[0].state.light_color, Vec3::X);
        assert_eq!(r.draws()[1].state.light_color, Vec3::Y);
        assert_eq!(r.aspect_ratio(), 1.5);
    }

    #[test]
    fn bound_texture_follows_draws() {
        let mut r = recorder();
        r.draw_mesh(MeshId(0), Fill::Shaded);
        r.bind_texture(TextureId(3));
        r.draw_mesh(MeshId(0), Fill::Shaded);

        assert_eq!(r.draws()[0].texture(), None);
        assert_eq!(r.draws()[1].texture(), Some(TextureId(3)));
    }

    #[test]
    fn begin_frame_keeps_uniforms_and_drops_draws() {
        let mut r = recorder();
        r.clear();
        r.set_int(Uniform::EnableLighting, 1);
        r.draw_mesh(MeshId(0), Fill::Shaded);

        r.begin_frame(1.0);
        assert!(r.draws().is_empty());
        assert!(!r.cleared());
        assert!(r.state().enable_lighting);
    }

    #[test]
    fn unbound_and_mistyped_writes_are_ignored() {
        let program = ProgramInterface {
            label: "no lights",
            attributes: &[],
            uniforms: &["modelViewMatrix"],
        };
        let mut r = DrawRecorder::new(ProgramBindings::resolve(&program));

        r.set_vec3(Uniform::LightPosition, Vec3::ONE);
        r.set_int(Uniform::ModelViewMatrix, 1);
        assert_eq!(r.state().light_position, Vec3::ZERO);
        assert_eq!(r.uniform_writes(), 0);

        r.set_mat4(Uniform::ModelViewMatrix, Mat4::from_scale(Vec3::splat(2.0)));
        assert_eq!(r.uniform_writes(), 1);
    }
}
