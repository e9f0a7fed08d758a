//! Mesh builders for the primitive shapes used by the game.
//!
//! Builders are pure: they produce [`MeshData`] on the CPU. Registering the
//! data with a [`MeshRenderer`] yields a [`Geometry`] handle that frame code
//! draws through any [`RenderContext`].

mod cube;
mod rectangle;
mod sphere;
mod wireframe;

pub use cube::solid_cube;
pub use rectangle::solid_rectangle;
pub use sphere::solid_sphere;
pub use wireframe::wire_frame;

use glam::Vec3;

use crate::render::{Fill, MeshData, MeshId, MeshRenderer, RenderContext};

/// A registered mesh plus the way it is normally filled.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Geometry {
    mesh: MeshId,
    style: Fill,
}

impl Geometry {
    /// Registers `data` and keeps the handle. Drawn with the current texture
    /// and lighting uniforms.
    pub fn shaded(renderer: &mut MeshRenderer, data: MeshData) -> Self {
        Self {
            mesh: renderer.add_mesh(data),
            style: Fill::Shaded,
        }
    }

    /// Registers `data`; every draw uses `color` regardless of uniforms.
    pub fn flat(renderer: &mut MeshRenderer, data: MeshData, color: Vec3) -> Self {
        Self {
            mesh: renderer.add_mesh(data),
            style: Fill::Flat(color),
        }
    }

    /// Wraps an already registered mesh.
    pub fn from_parts(mesh: MeshId, style: Fill) -> Self {
        Self { mesh, style }
    }

    pub fn mesh(&self) -> MeshId {
        self.mesh
    }

    pub fn style(&self) -> Fill {
        self.style
    }

    /// Draws with the current model-view, normal and texture state.
    pub fn draw(&self, ctx: &mut dyn RenderContext) {
        ctx.draw_mesh(self.mesh, self.style);
    }

    /// Draws in a single color, ignoring texture and lighting.
    pub fn draw_with_color(&self, ctx: &mut dyn RenderContext, color: Vec3) {
        ctx.draw_mesh(self.mesh, Fill::Flat(color));
    }
}

/// Unit box shared by the cube and rectangle builders.
///
/// Faces in order: front (+z), back (-z), top (+y), bottom (-y), right (+x),
/// left (-x). Each face has its own four vertices so colors, normals and
/// texture coordinates stay per face.
pub(crate) fn faced_box(label: &'static str, face_colors: [Vec3; 6], half: Vec3) -> MeshData {
    use crate::render::{Topology, Vertex};

    // (normal, u axis, v axis)
    const FACES: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    ];
    const CORNERS: [(f32, f32); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

    let mut mesh = MeshData::new(label, Topology::Triangles);
    for ((normal, u, v), color) in FACES.into_iter().zip(face_colors) {
        let mut corner_index = [0u16; 4];
        for (slot, (cu, cv)) in corner_index.iter_mut().zip(CORNERS) {
            let position = (normal + u * cu + v * cv) * half;
            *slot = mesh.push_vertex(Vertex {
                position: position.to_array(),
                color: color.extend(1.0).to_array(),
                normal: normal.to_array(),
                tex_coord: [(cu + 1.0) * 0.5, (cv + 1.0) * 0.5],
            });
        }
        let [a, b, c, d] = corner_index;
        mesh.indices.extend_from_slice(&[a, b, c, a, c, d]);
    }
    mesh
}

#[cfg(test)]
pub(crate) mod test_support {
    use glam::Vec3;

    use crate::render::MeshData;

    pub fn positions(mesh: &MeshData) -> impl Iterator<Item = Vec3> + '_ {
        mesh.vertices.iter().map(|v| Vec3::from_array(v.position))
    }

    pub fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawRecorder, ProgramBindings, TextureId, MESH_PROGRAM};

    #[test]
    fn draw_uses_registered_style() {
        let mut renderer = MeshRenderer::new();
        let cube = Geometry::shaded(&mut renderer, solid_cube([Vec3::ONE; 6]));
        let frame = Geometry::flat(&mut renderer, wire_frame(glam::Vec4::ONE), Vec3::ONE);

        let mut rec = DrawRecorder::new(ProgramBindings::resolve(&MESH_PROGRAM));
        rec.bind_texture(TextureId::from_raw(0));
        cube.draw(&mut rec);
        frame.draw(&mut rec);
        cube.draw_with_color(&mut rec, Vec3::X);

        let draws = rec.draws();
        assert_eq!(draws[0].mesh, cube.mesh());
        assert_eq!(draws[0].fill, Fill::Shaded);
        assert_eq!(draws[1].fill, Fill::Flat(Vec3::ONE));
        assert_eq!(draws[2].fill, Fill::Flat(Vec3::X));
    }

    #[test]
    fn faced_box_scales_by_half_extent() {
        let mesh = faced_box("box", [Vec3::ZERO; 6], Vec3::new(1.0, 2.0, 3.0));
        let max = test_support::positions(&mesh).fold(Vec3::ZERO, |m, p| m.max(p.abs()));
        assert_eq!(max, Vec3::new(1.0, 2.0, 3.0));
    }
}
