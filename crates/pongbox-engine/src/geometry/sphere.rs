use std::f32::consts::PI;

use glam::Vec3;

use crate::render::{MeshData, Topology, Vertex};

const MIN_ROWS: u16 = 2;
const MIN_COLUMNS: u16 = 3;

/// UV sphere of radius 1 centered at the origin.
///
/// `rows` splits latitude, `columns` splits longitude. Counts below 2 rows or
/// 3 columns are raised to that minimum. Vertex colors are white; normals
/// point outward.
pub fn solid_sphere(rows: u16, columns: u16) -> MeshData {
    let rows = rows.max(MIN_ROWS);
    let columns = columns.max(MIN_COLUMNS);
    debug_assert!(
        (rows as u32 + 1) * (columns as u32 + 1) <= u16::MAX as u32,
        "sphere tessellation exceeds 16-bit indices"
    );

    let mut mesh = MeshData::new("solid sphere", Topology::Triangles);

    for row in 0..=rows {
        let theta = row as f32 * PI / rows as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for col in 0..=columns {
            let phi = col as f32 * 2.0 * PI / columns as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let n = Vec3::new(cos_phi * sin_theta, cos_theta, sin_phi * sin_theta);
            mesh.push_vertex(Vertex {
                position: n.to_array(),
                color: [1.0, 1.0, 1.0, 1.0],
                normal: n.to_array(),
                tex_coord: [
                    1.0 - col as f32 / columns as f32,
                    1.0 - row as f32 / rows as f32,
                ],
            });
        }
    }

    let stride = columns + 1;
    for row in 0..rows {
        for col in 0..columns {
            let first = row * stride + col;
            let second = first + stride;
            mesh.indices
                .extend_from_slice(&[first, second, first + 1, second, second + 1, first + 1]);
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::test_support::{approx_eq, positions};

    #[test]
    fn counts_follow_tessellation() {
        let s = solid_sphere(50, 50);
        assert_eq!(s.vertices.len(), 51 * 51);
        assert_eq!(s.indices.len(), 50 * 50 * 6);
        assert!(s.is_well_formed());
    }

    #[test]
    fn vertices_lie_on_unit_sphere() {
        let s = solid_sphere(8, 12);
        for p in positions(&s) {
            assert!(approx_eq(p.length(), 1.0), "{p:?}");
        }
    }

    #[test]
    fn normals_point_outward() {
        let s = solid_sphere(6, 6);
        for v in &s.vertices {
            assert_eq!(v.normal, v.position);
        }
    }

    #[test]
    fn degenerate_tessellation_is_raised() {
        let s = solid_sphere(0, 1);
        assert_eq!(s.vertices.len(), 3 * 4);
        assert!(s.is_well_formed());
    }
}
