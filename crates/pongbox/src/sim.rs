//! Simulation state: the ball and the two paddles.

use glam::{Vec2, Vec3};

/// Ball reflects on x and y once `|position| >= BALL_BOUND_XY`.
pub const BALL_BOUND_XY: f32 = 2.4;
/// Front (player side) depth limit of the ball.
pub const BALL_BOUND_FRONT: f32 = 2.0;
/// Back (bot side) depth limit of the ball.
pub const BALL_BOUND_BACK: f32 = -6.5;

pub const PLAYER_BOUND_X: f32 = 2.2;
pub const PLAYER_BOUND_Y: f32 = 1.7;

/// Fixed depth of the bot paddle.
pub const BOT_DEPTH: f32 = -6.5;

/// A body moving by a constant per-frame step. `V` is `Vec3` for the ball and
/// `Vec2` for the paddles, which never move in depth.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MovingBody<V> {
    pub position: Vec3,
    pub velocity: V,
}

pub type Ball = MovingBody<Vec3>;
pub type Paddle = MovingBody<Vec2>;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub ball: Ball,
    pub player_paddle: Paddle,
    /// Its velocity is carried but never drives motion; the bot follows the ball.
    pub bot_paddle: Paddle,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            ball: Ball {
                position: Vec3::ZERO,
                velocity: Vec3::new(0.08, 0.09, 0.07),
            },
            player_paddle: Paddle {
                position: Vec3::new(0.0, 0.0, 2.0),
                velocity: Vec2::new(0.04, 0.04),
            },
            bot_paddle: Paddle {
                position: Vec3::new(0.0, 0.0, BOT_DEPTH),
                velocity: Vec2::new(0.08, 0.09),
            },
        }
    }
}
