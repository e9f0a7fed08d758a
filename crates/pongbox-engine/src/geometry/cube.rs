use glam::Vec3;

use crate::render::MeshData;

use super::faced_box;

/// Unit cube centered at the origin (edge length 1), one color per face.
///
/// Face order: front, back, top, bottom, right, left.
pub fn solid_cube(face_colors: [Vec3; 6]) -> MeshData {
    faced_box("solid cube", face_colors, Vec3::splat(0.5))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::test_support::{approx_eq, positions};
    use crate::render::Topology;

    fn palette() -> [Vec3; 6] {
        [Vec3::X, Vec3::Y, Vec3::Z, Vec3::new(1.0, 1.0, 0.0), Vec3::new(0.0, 1.0, 1.0), Vec3::new(1.0, 0.0, 1.0)]
    }

    #[test]
    fn twelve_triangles_over_twenty_four_vertices() {
        let cube = solid_cube(palette());
        assert_eq!(cube.topology, Topology::Triangles);
        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.indices.len(), 36);
        assert!(cube.is_well_formed());
    }

    #[test]
    fn corners_sit_on_half_unit() {
        let cube = solid_cube(palette());
        for p in positions(&cube) {
            for c in p.to_array() {
                assert!(approx_eq(c.abs(), 0.5), "{p:?}");
            }
        }
    }

    #[test]
    fn each_face_keeps_its_color_and_normal() {
        let colors = palette();
        let cube = solid_cube(colors);
        for (face, chunk) in cube.vertices.chunks(4).enumerate() {
            let normal = Vec3::from_array(chunk[0].normal);
            for v in chunk {
                assert_eq!(v.color, colors[face].extend(1.0).to_array());
                assert_eq!(Vec3::from_array(v.normal), normal);
                // Vertices lie on the face their normal points to.
                assert!(approx_eq(Vec3::from_array(v.position).dot(normal), 0.5));
            }
        }
    }

    #[test]
    fn texture_coordinates_span_each_face() {
        let cube = solid_cube(palette());
        for chunk in cube.vertices.chunks(4) {
            let uv: Vec<[f32; 2]> = chunk.iter().map(|v| v.tex_coord).collect();
            assert_eq!(uv, vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        }
    }
}
