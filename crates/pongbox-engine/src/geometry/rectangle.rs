use glam::Vec3;

use crate::render::MeshData;

use super::faced_box;

/// Axis-aligned rectangular block with unit extents, one color per face.
///
/// Meant to be scaled by the model matrix; a zero depth scale flattens it
/// into a textured quad.
pub fn solid_rectangle(face_colors: [Vec3; 6]) -> MeshData {
    faced_box("solid rectangle", face_colors, Vec3::splat(0.5))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::test_support::positions;

    #[test]
    fn flattens_under_zero_depth_scale() {
        let rect = solid_rectangle([Vec3::ZERO; 6]);
        let scale = Vec3::new(3.0, 2.0, 0.0);
        let (min, max) = positions(&rect)
            .map(|p| p * scale)
            .fold((Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)), |(lo, hi), p| (lo.min(p), hi.max(p)));

        assert_eq!(min, Vec3::new(-1.5, -1.0, 0.0));
        assert_eq!(max, Vec3::new(1.5, 1.0, 0.0));
    }

    #[test]
    fn black_faces_stay_black() {
        let rect = solid_rectangle([Vec3::ZERO; 6]);
        assert!(rect.vertices.iter().all(|v| v.color == [0.0, 0.0, 0.0, 1.0]));
        assert!(rect.is_well_formed());
    }
}
