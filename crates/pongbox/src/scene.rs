//! Camera, lights and the animation angle.

use std::f32::consts::TAU;

use anyhow::Result;
use glam::Vec3;

/// Background gray.
pub const CLEAR_COLOR: [f64; 4] = [0.5, 0.5, 0.5, 1.0];

/// Radians per millisecond (0.025 degrees per ms).
pub const ANGULAR_SPEED: f32 = 0.025 * TAU / 360.0;

/// One box of the arena, drawn as the unit cube translated then scaled.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ArenaPanel {
    pub name: &'static str,
    pub offset: Vec3,
    pub scale: Vec3,
}

/// Draw order matters for the recorded frame.
pub const ARENA_PANELS: [ArenaPanel; 5] = [
    ArenaPanel { name: "left", offset: Vec3::new(-3.0, 0.0, -2.0), scale: Vec3::new(1.0, 5.0, 10.0) },
    ArenaPanel { name: "right", offset: Vec3::new(3.0, 0.0, -2.0), scale: Vec3::new(1.0, 5.0, 10.0) },
    ArenaPanel { name: "top", offset: Vec3::new(0.0, 3.0, -2.0), scale: Vec3::new(5.0, 1.0, 10.0) },
    ArenaPanel { name: "bottom", offset: Vec3::new(0.0, -3.0, -2.0), scale: Vec3::new(5.0, 1.0, 10.0) },
    ArenaPanel { name: "back", offset: Vec3::new(0.0, 0.0, -7.0), scale: Vec3::new(5.0, 5.0, 0.1) },
];

#[derive(Debug, Clone, PartialEq)]
pub struct CameraParameters {
    pub eye_position: Vec3,
    pub look_at_position: Vec3,
    pub up_vector: Vec3,
    pub near_plane: f32,
    pub far_plane: f32,
    pub field_of_view_deg: f32,
}

impl CameraParameters {
    /// Requires `0 < near_plane < far_plane`.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.near_plane > 0.0 && self.near_plane < self.far_plane,
            "invalid clip planes: near {} far {}",
            self.near_plane,
            self.far_plane
        );
        Ok(())
    }
}

impl Default for CameraParameters {
    fn default() -> Self {
        Self {
            eye_position: Vec3::new(0.0, 0.0, 5.0),
            look_at_position: Vec3::ZERO,
            up_vector: Vec3::Y,
            near_plane: 0.1,
            far_plane: 30.0,
            field_of_view_deg: 65.0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LightSource {
    pub position: Vec3,
    pub color: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    pub camera: CameraParameters,
    pub lights: Vec<LightSource>,
    pub rotate_objects: bool,
    /// Advanced every frame but not applied to any transform.
    pub rotation_angle: f32,
    pub angular_speed: f32,
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            camera: CameraParameters::default(),
            lights: vec![LightSource {
                position: Vec3::new(0.0, 0.0, -10.0),
                color: Vec3::ONE,
            }],
            rotate_objects: true,
            rotation_angle: 0.0,
            angular_speed: ANGULAR_SPEED,
        }
    }
}

impl SceneState {
    /// Advances the rotation angle and wraps it into `[0, 2π)`.
    pub fn advance_rotation(&mut self, elapsed_ms: f32) {
        let angle = (self.rotation_angle + elapsed_ms * self.angular_speed).rem_euclid(TAU);
        // rem_euclid may round up to exactly TAU.
        self.rotation_angle = if angle >= TAU { 0.0 } else { angle };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    // ── camera ────────────────────────────────────────────────────────────

    #[test]
    fn default_camera_is_valid() {
        assert!(CameraParameters::default().validate().is_ok());
    }

    #[test]
    fn clip_planes_are_checked() {
        let mut camera = CameraParameters::default();
        camera.near_plane = 30.0;
        assert!(camera.validate().is_err());

        camera.near_plane = 0.0;
        assert!(camera.validate().is_err());
    }

    // ── rotation ──────────────────────────────────────────────────────────

    #[test]
    fn first_tick_leaves_angle() {
        let mut scene = SceneState::default();
        scene.advance_rotation(0.0);
        assert_eq!(scene.rotation_angle, 0.0);
    }

    #[test]
    fn angle_advances_by_elapsed_time() {
        let mut scene = SceneState::default();
        scene.advance_rotation(1000.0);
        // 25 degrees per second.
        assert!(approx_eq(scene.rotation_angle, 25f32.to_radians()));
    }

    #[test]
    fn angle_stays_in_range() {
        let mut scene = SceneState::default();
        for elapsed in [16.7, 14_400.0, 1.0e9, 3.3, 0.0, 123_456.0] {
            scene.advance_rotation(elapsed);
            assert!((0.0..TAU).contains(&scene.rotation_angle), "{}", scene.rotation_angle);
        }
    }

    #[test]
    fn one_light_at_the_back() {
        let scene = SceneState::default();
        assert_eq!(scene.lights.len(), 1);
        assert_eq!(scene.lights[0].position, Vec3::new(0.0, 0.0, -10.0));
    }
}
