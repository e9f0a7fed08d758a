use glam::{Vec3, Vec4};

use crate::render::{MeshData, Topology, Vertex};

/// Box corners, bit 0 → x, bit 1 → y, bit 2 → z (0 = -1, 1 = +1).
const EDGES: [(u16, u16); 12] = [
    (0, 1), (2, 3), (4, 5), (6, 7), // along x
    (0, 2), (1, 3), (4, 6), (5, 7), // along y
    (0, 4), (1, 5), (2, 6), (3, 7), // along z
];

/// Outline of the cube spanning `[-1, 1]` on every axis, as a line list.
pub fn wire_frame(color: Vec4) -> MeshData {
    let mut mesh = MeshData::new("wire frame", Topology::Lines);

    for corner in 0..8u16 {
        let sign = |bit: u16| if corner & bit != 0 { 1.0 } else { -1.0 };
        let position = Vec3::new(sign(1), sign(2), sign(4));
        mesh.push_vertex(Vertex {
            position: position.to_array(),
            color: color.to_array(),
            normal: position.normalize().to_array(),
            tex_coord: [0.0, 0.0],
        });
    }

    for (a, b) in EDGES {
        mesh.indices.extend_from_slice(&[a, b]);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_unit_edges() {
        let w = wire_frame(Vec4::ONE);
        assert_eq!(w.topology, Topology::Lines);
        assert_eq!(w.indices.len(), 24);
        assert!(w.is_well_formed());

        for pair in w.indices.chunks(2) {
            let a = Vec3::from_array(w.vertices[pair[0] as usize].position);
            let b = Vec3::from_array(w.vertices[pair[1] as usize].position);
            // Edges connect corners differing on exactly one axis.
            let differing = (a - b).to_array().iter().filter(|c| **c != 0.0).count();
            assert_eq!(differing, 1);
            assert_eq!((a - b).length(), 2.0);
        }
    }

    #[test]
    fn carries_line_color() {
        let color = Vec4::new(1.0, 1.0, 1.0, 0.5);
        let w = wire_frame(color);
        assert!(w.vertices.iter().all(|v| v.color == color.to_array()));
    }

    #[test]
    fn depth_scale_zero_gives_a_square_outline() {
        let w = wire_frame(Vec4::ONE);
        let scale = Vec3::new(2.4, 2.4, 0.0);
        for v in &w.vertices {
            let p = Vec3::from_array(v.position) * scale;
            assert_eq!(p.z, 0.0);
            assert_eq!(p.x.abs(), 2.4);
            assert_eq!(p.y.abs(), 2.4);
        }
    }
}
