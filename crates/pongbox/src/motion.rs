//! Per-frame motion and wall reflection.
//!
//! Reflection only flips velocity signs; positions are never clamped, so a
//! body may overshoot a boundary by up to one step.

use glam::{Vec2, Vec3};

use crate::sim::{
    Ball, Paddle, BALL_BOUND_BACK, BALL_BOUND_FRONT, BALL_BOUND_XY, PLAYER_BOUND_X,
    PLAYER_BOUND_Y,
};

fn reflect_symmetric(position: f32, velocity: &mut f32, bound: f32) {
    if position.abs() >= bound {
        *velocity = -*velocity;
    }
}

/// Checks every boundary against the current position, then steps once.
pub fn advance_ball(ball: &mut Ball) {
    let p = ball.position;
    let v = &mut ball.velocity;

    reflect_symmetric(p.x, &mut v.x, BALL_BOUND_XY);
    reflect_symmetric(p.y, &mut v.y, BALL_BOUND_XY);
    // The two depth limits are tested independently.
    if p.z >= BALL_BOUND_FRONT {
        v.z = -v.z;
    }
    if p.z <= BALL_BOUND_BACK {
        v.z = -v.z;
    }

    ball.position += ball.velocity;
}

/// Moves the player paddle in its plane; depth is untouched.
pub fn advance_player_paddle(paddle: &mut Paddle) {
    let p = paddle.position;
    reflect_symmetric(p.x, &mut paddle.velocity.x, PLAYER_BOUND_X);
    reflect_symmetric(p.y, &mut paddle.velocity.y, PLAYER_BOUND_Y);

    paddle.position += paddle.velocity.extend(0.0);
}

/// Puts the bot paddle right behind the ball.
pub fn track_bot(bot: &mut Paddle, ball: &Ball) {
    let Vec2 { x, y } = ball.position.truncate();
    bot.position = Vec3::new(x, y, bot.position.z);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{SimulationState, BOT_DEPTH};

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    fn assert_vec3(actual: Vec3, expected: Vec3) {
        assert!(
            approx_eq(actual.x, expected.x)
                && approx_eq(actual.y, expected.y)
                && approx_eq(actual.z, expected.z),
            "{actual:?} != {expected:?}"
        );
    }

    fn ball_at(position: Vec3) -> Ball {
        Ball {
            position,
            velocity: Vec3::new(0.08, 0.09, 0.07),
        }
    }

    // ── ball ──────────────────────────────────────────────────────────────

    #[test]
    fn ball_reflects_at_front() {
        let mut ball = ball_at(Vec3::new(0.0, 0.0, 2.0));
        advance_ball(&mut ball);

        assert_vec3(ball.velocity, Vec3::new(0.08, 0.09, -0.07));
        assert_vec3(ball.position, Vec3::new(0.08, 0.09, 1.93));
    }

    #[test]
    fn ball_reflects_on_x_from_outside() {
        let mut ball = ball_at(Vec3::new(2.5, 0.0, 0.0));
        advance_ball(&mut ball);
        assert_eq!(ball.velocity.x, -0.08);
        assert_eq!(ball.velocity.y, 0.09);
    }

    #[test]
    fn ball_reflects_at_back() {
        let mut ball = ball_at(Vec3::new(0.0, 0.0, -6.5));
        ball.velocity.z = -0.07;
        advance_ball(&mut ball);
        assert_eq!(ball.velocity.z, 0.07);
    }

    #[test]
    fn ball_bounces_back_and_forth_between_walls() {
        let mut ball = ball_at(Vec3::ZERO);
        let mut last_sign = ball.velocity.x.signum();
        let mut flips = 0;

        for _ in 0..1_000 {
            let before = ball.position.x;
            advance_ball(&mut ball);
            let sign = ball.velocity.x.signum();
            if sign != last_sign {
                assert!(before.abs() >= BALL_BOUND_XY, "flipped inside the arena at {before}");
                flips += 1;
            }
            last_sign = sign;
        }
        assert!(flips > 10);
    }

    #[test]
    fn speed_is_invariant() {
        let mut sim = SimulationState::default();
        let speed = sim.ball.velocity.abs();
        let paddle_speed = sim.player_paddle.velocity.abs();

        for _ in 0..500 {
            advance_ball(&mut sim.ball);
            advance_player_paddle(&mut sim.player_paddle);
            assert_eq!(sim.ball.velocity.abs(), speed);
            assert_eq!(sim.player_paddle.velocity.abs(), paddle_speed);
        }
    }

    // ── paddles ───────────────────────────────────────────────────────────

    #[test]
    fn player_paddle_reflects_and_keeps_depth() {
        let mut paddle = Paddle {
            position: Vec3::new(2.2, -1.7, 2.0),
            velocity: Vec2::new(0.04, -0.04),
        };
        advance_player_paddle(&mut paddle);

        assert_eq!(paddle.velocity, Vec2::new(-0.04, 0.04));
        assert_vec3(paddle.position, Vec3::new(2.16, -1.66, 2.0));
    }

    #[test]
    fn player_paddle_inside_bounds_just_moves() {
        let mut paddle = SimulationState::default().player_paddle;
        advance_player_paddle(&mut paddle);
        assert_eq!(paddle.velocity, Vec2::new(0.04, 0.04));
        assert_vec3(paddle.position, Vec3::new(0.04, 0.04, 2.0));
    }

    #[test]
    fn bot_copies_ball_plane_position() {
        let mut sim = SimulationState::default();
        sim.ball.position = Vec3::new(1.0, 1.0, 1.0);
        track_bot(&mut sim.bot_paddle, &sim.ball);

        assert_eq!(sim.bot_paddle.position, Vec3::new(1.0, 1.0, BOT_DEPTH));
        // Velocity is not consulted.
        assert_eq!(sim.bot_paddle.velocity, Vec2::new(0.08, 0.09));
    }
}
