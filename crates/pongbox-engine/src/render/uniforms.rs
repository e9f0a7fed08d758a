use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3};

use super::{TextureId, Uniform};

/// Current value of every uniform slot, plus the texture bound to unit 0.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct UniformState {
    pub model_view: Mat4,
    pub projection: Mat4,
    pub normal_matrix: Mat3,
    pub texture_matrix: Mat3,
    pub sampler: i32,
    pub enable_texture: bool,
    pub light_position: Vec3,
    pub light_color: Vec3,
    pub enable_lighting: bool,
    pub bound_texture: Option<TextureId>,
}

impl Default for UniformState {
    fn default() -> Self {
        Self {
            model_view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            normal_matrix: Mat3::IDENTITY,
            texture_matrix: Mat3::IDENTITY,
            sampler: 0,
            enable_texture: false,
            light_position: Vec3::ZERO,
            light_color: Vec3::ZERO,
            enable_lighting: false,
            bound_texture: None,
        }
    }
}

/// Returned when a value's type does not match the slot it is written to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct SlotTypeMismatch;

impl UniformState {
    pub(crate) fn set_mat4(&mut self, slot: Uniform, value: Mat4) -> Result<(), SlotTypeMismatch> {
        match slot {
            Uniform::ModelViewMatrix => self.model_view = value,
            Uniform::ProjectionMatrix => self.projection = value,
            _ => return Err(SlotTypeMismatch),
        }
        Ok(())
    }

    pub(crate) fn set_mat3(&mut self, slot: Uniform, value: Mat3) -> Result<(), SlotTypeMismatch> {
        match slot {
            Uniform::NormalMatrix => self.normal_matrix = value,
            Uniform::TextureMatrix => self.texture_matrix = value,
            _ => return Err(SlotTypeMismatch),
        }
        Ok(())
    }

    pub(crate) fn set_vec3(&mut self, slot: Uniform, value: Vec3) -> Result<(), SlotTypeMismatch> {
        match slot {
            Uniform::LightPosition => self.light_position = value,
            Uniform::LightColor => self.light_color = value,
            _ => return Err(SlotTypeMismatch),
        }
        Ok(())
    }

    /// Integer slots; the two switches follow GL's "non-zero is true".
    pub(crate) fn set_int(&mut self, slot: Uniform, value: i32) -> Result<(), SlotTypeMismatch> {
        match slot {
            Uniform::Sampler => self.sampler = value,
            Uniform::EnableTexture => self.enable_texture = value != 0,
            Uniform::EnableLighting => self.enable_lighting = value != 0,
            _ => return Err(SlotTypeMismatch),
        }
        Ok(())
    }

    /// Packs the state into the shader's uniform block.
    pub fn to_gpu(&self, flat_color: Option<Vec3>) -> DrawUniforms {
        let flat = flat_color.unwrap_or(Vec3::ONE);
        DrawUniforms {
            model_view: self.model_view.to_cols_array_2d(),
            projection: self.projection.to_cols_array_2d(),
            normal_matrix: pad_mat3(self.normal_matrix),
            texture_matrix: pad_mat3(self.texture_matrix),
            light_position: self.light_position.extend(1.0).to_array(),
            light_color: self.light_color.extend(1.0).to_array(),
            flat_color: flat.extend(1.0).to_array(),
            flags: [
                self.enable_texture as u32,
                self.enable_lighting as u32,
                flat_color.is_some() as u32,
                0,
            ],
        }
    }
}

/// `mat3x3<f32>` in a WGSL uniform block has 16-byte column stride.
fn pad_mat3(m: Mat3) -> [[f32; 4]; 3] {
    [
        m.x_axis.extend(0.0).to_array(),
        m.y_axis.extend(0.0).to_array(),
        m.z_axis.extend(0.0).to_array(),
    ]
}

/// Uniform block layout (288 bytes), must match `DrawUniforms` in mesh.wgsl.
///
///  offset   0  model_view      mat4x4
///  offset  64  projection      mat4x4
///  offset 128  normal_matrix   mat3x3 (padded)
///  offset 176  texture_matrix  mat3x3 (padded)
///  offset 224  light_position  vec4
///  offset 240  light_color     vec4
///  offset 256  flat_color      vec4
///  offset 272  flags           vec4<u32>  (texture, lighting, flat, unused)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct DrawUniforms {
    pub model_view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 3],
    pub texture_matrix: [[f32; 4]; 3],
    pub light_position: [f32; 4],
    pub light_color: [f32; 4],
    pub flat_color: [f32; 4],
    pub flags: [u32; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_size_matches_shader_layout() {
        assert_eq!(std::mem::size_of::<DrawUniforms>(), 288);
    }

    #[test]
    fn slot_type_is_checked() {
        let mut s = UniformState::default();
        assert!(s.set_mat4(Uniform::ModelViewMatrix, Mat4::IDENTITY).is_ok());
        assert_eq!(s.set_mat4(Uniform::LightColor, Mat4::IDENTITY), Err(SlotTypeMismatch));
        assert_eq!(s.set_int(Uniform::NormalMatrix, 1), Err(SlotTypeMismatch));
    }

    #[test]
    fn int_switches_follow_non_zero_rule() {
        let mut s = UniformState::default();
        s.set_int(Uniform::EnableTexture, 7).unwrap();
        s.set_int(Uniform::EnableLighting, 0).unwrap();
        assert!(s.enable_texture);
        assert!(!s.enable_lighting);
    }

    #[test]
    fn flat_fill_sets_flag_and_color() {
        let s = UniformState {
            enable_texture: true,
            ..UniformState::default()
        };
        let shaded = s.to_gpu(None);
        assert_eq!(shaded.flags, [1, 0, 0, 0]);

        let flat = s.to_gpu(Some(Vec3::new(0.25, 0.5, 1.0)));
        assert_eq!(flat.flags[2], 1);
        assert_eq!(flat.flat_color, [0.25, 0.5, 1.0, 1.0]);
    }

    #[test]
    fn mat3_columns_are_padded() {
        let m = Mat3::from_cols_array(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(
            pad_mat3(m),
            [[1.0, 2.0, 3.0, 0.0], [4.0, 5.0, 6.0, 0.0], [7.0, 8.0, 9.0, 0.0]]
        );
    }
}
