//! Builds one frame of the scene through a [`RenderContext`].
//!
//! The renderer also steps the simulation at fixed points of the draw order:
//! the ball right before it is drawn, then the player paddle, then the bot.

use glam::{Mat3, Mat4, Vec3, Vec4};

use pongbox_engine::geometry::{self, Geometry};
use pongbox_engine::render::{MeshRenderer, RenderContext, TextureId, Uniform};

use crate::motion::{advance_ball, advance_player_paddle, track_bot};
use crate::scene::{SceneState, ARENA_PANELS};
use crate::sim::SimulationState;

const WHITE: Vec3 = Vec3::ONE;
const BALL_DRAW_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -1.0);
const BALL_DRAW_SCALE: Vec3 = Vec3::splat(0.5);
const FRAME_SCALE: Vec3 = Vec3::new(2.4, 2.4, 0.0);
const PADDLE_SCALE: Vec3 = Vec3::new(3.0, 2.0, 0.0);

const SPHERE_ROWS: u16 = 50;
const SPHERE_COLUMNS: u16 = 50;

/// Face colors of the arena cube (front, back, top, bottom, right, left).
const CUBE_FACE_COLORS: [Vec3; 6] = [
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(0.0, 1.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(1.0, 1.0, 0.0),
    Vec3::new(0.0, 1.0, 1.0),
    Vec3::new(1.0, 0.0, 1.0),
];

/// Meshes drawn each frame.
#[derive(Debug, Clone)]
pub struct SceneObjects {
    pub cube: Geometry,
    pub sphere: Geometry,
    pub wire_frame: Geometry,
    pub player_paddle: Geometry,
    pub bot_paddle: Geometry,
}

impl SceneObjects {
    pub fn register(renderer: &mut MeshRenderer) -> Self {
        Self {
            cube: Geometry::shaded(renderer, geometry::solid_cube(CUBE_FACE_COLORS)),
            sphere: Geometry::shaded(renderer, geometry::solid_sphere(SPHERE_ROWS, SPHERE_COLUMNS)),
            wire_frame: Geometry::flat(renderer, geometry::wire_frame(Vec4::ONE), WHITE),
            player_paddle: Geometry::shaded(renderer, geometry::solid_rectangle([Vec3::ZERO; 6])),
            bot_paddle: Geometry::shaded(renderer, geometry::solid_rectangle([Vec3::ZERO; 6])),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SceneTextures {
    pub walls: TextureId,
    pub paddles: TextureId,
}

impl SceneTextures {
    pub fn register(renderer: &mut MeshRenderer) -> Self {
        Self {
            walls: renderer.add_texture("walls"),
            paddles: renderer.add_texture("paddle"),
        }
    }

    /// Name used in diagnostics.
    pub fn name(&self, id: TextureId) -> &'static str {
        if id == self.walls {
            "walls"
        } else if id == self.paddles {
            "paddle"
        } else {
            "unknown"
        }
    }
}

/// Inverse-transpose of the upper 3x3 of `model_view`, or `None` when that
/// block is singular.
pub fn normal_matrix(model_view: &Mat4) -> Option<Mat3> {
    let upper = Mat3::from_mat4(*model_view);
    let det = upper.determinant();
    if det == 0.0 || !det.is_finite() {
        return None;
    }
    Some(upper.inverse().transpose())
}

/// Issues the frame's draw calls.
///
/// Remembers the last normal matrix it uploaded so that objects with a
/// singular model-view reuse it.
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    normal_matrix: Mat3,
}

impl Default for FrameRenderer {
    fn default() -> Self {
        Self {
            normal_matrix: Mat3::IDENTITY,
        }
    }
}

impl FrameRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render_frame(
        &mut self,
        scene: &SceneState,
        sim: &mut SimulationState,
        objects: &SceneObjects,
        textures: &SceneTextures,
        ctx: &mut dyn RenderContext,
    ) {
        let camera = &scene.camera;

        ctx.clear();

        let view = Mat4::look_at_rh(camera.eye_position, camera.look_at_position, camera.up_vector);
        let projection = Mat4::perspective_rh(
            camera.field_of_view_deg.to_radians(),
            ctx.aspect_ratio(),
            camera.near_plane,
            camera.far_plane,
        );

        bind_texture(ctx, textures.walls);
        ctx.set_int(Uniform::EnableTexture, 1);
        ctx.set_int(Uniform::EnableLighting, 1);
        for light in &scene.lights {
            ctx.set_vec3(Uniform::LightPosition, light.position);
            ctx.set_vec3(Uniform::LightColor, light.color);
        }

        ctx.set_mat4(Uniform::ProjectionMatrix, projection);

        for panel in &ARENA_PANELS {
            self.set_model_view(ctx, view * Mat4::from_translation(panel.offset) * Mat4::from_scale(panel.scale));
            objects.cube.draw(ctx);
        }

        advance_ball(&mut sim.ball);
        self.set_model_view(
            ctx,
            view * Mat4::from_translation(BALL_DRAW_OFFSET) * Mat4::from_scale(BALL_DRAW_SCALE),
        );
        objects.sphere.draw_with_color(ctx, WHITE);

        let frame_offset = Vec3::new(0.0, 0.0, sim.ball.position.z);
        self.set_model_view(ctx, view * Mat4::from_translation(frame_offset) * Mat4::from_scale(FRAME_SCALE));
        objects.wire_frame.draw(ctx);

        bind_texture(ctx, textures.paddles);

        advance_player_paddle(&mut sim.player_paddle);
        self.set_model_view(
            ctx,
            view * Mat4::from_translation(sim.player_paddle.position) * Mat4::from_scale(PADDLE_SCALE),
        );
        objects.player_paddle.draw(ctx);

        track_bot(&mut sim.bot_paddle, &sim.ball);
        self.set_model_view(
            ctx,
            view * Mat4::from_translation(sim.bot_paddle.position) * Mat4::from_scale(PADDLE_SCALE),
        );
        objects.bot_paddle.draw(ctx);
    }

    fn set_model_view(&mut self, ctx: &mut dyn RenderContext, model_view: Mat4) {
        ctx.set_mat4(Uniform::ModelViewMatrix, model_view);
        match normal_matrix(&model_view) {
            Some(n) => self.normal_matrix = n,
            None => log::trace!("singular model-view; keeping previous normal matrix"),
        }
        ctx.set_mat3(Uniform::NormalMatrix, self.normal_matrix);
    }
}

/// Binds `texture` to unit 0 with an identity texture transform.
fn bind_texture(ctx: &mut dyn RenderContext, texture: TextureId) {
    ctx.bind_texture(texture);
    ctx.set_int(Uniform::Sampler, 0);
    ctx.set_mat3(Uniform::TextureMatrix, Mat3::IDENTITY);
}
