//! Keyboard steering of the player paddle.

use pongbox_engine::input::{Key, KeyEvent};

use crate::sim::Paddle;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Direction {
    Left,
    Right,
    Forward,
    Backward,
}

impl Direction {
    /// Physical `A`/`D`/`W`/`S`.
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::A => Some(Direction::Left),
            Key::D => Some(Direction::Right),
            Key::W => Some(Direction::Forward),
            Key::S => Some(Direction::Backward),
            _ => None,
        }
    }
}

/// Points the paddle's velocity towards `direction`. Speed is unchanged and
/// steering in the current direction is a no-op.
pub fn steer(paddle: &mut Paddle, direction: Direction) {
    let v = &mut paddle.velocity;
    match direction {
        Direction::Left if v.x > 0.0 => v.x = -v.x,
        Direction::Right if v.x < 0.0 => v.x = -v.x,
        Direction::Forward if v.y < 0.0 => v.y = -v.y,
        Direction::Backward if v.y > 0.0 => v.y = -v.y,
        _ => {}
    }
}

/// Applies a key event. Presses and auto-repeats steer, releases do not.
///
/// Returns the direction applied, if any.
pub fn handle_key(paddle: &mut Paddle, event: &KeyEvent) -> Option<Direction> {
    if !event.is_press() {
        return None;
    }
    let direction = Direction::from_key(event.key)?;
    steer(paddle, direction);
    Some(direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};
    use pongbox_engine::input::KeyState;

    fn paddle(velocity: Vec2) -> Paddle {
        Paddle {
            position: Vec3::new(0.0, 0.0, 2.0),
            velocity,
        }
    }

    fn key(key: Key, state: KeyState, repeat: bool) -> KeyEvent {
        KeyEvent {
            key,
            state,
            code: 0,
            repeat,
        }
    }

    fn press(k: Key) -> KeyEvent {
        key(k, KeyState::Pressed, false)
    }

    // ── steering ──────────────────────────────────────────────────────────

    #[test]
    fn left_twice_stays_left() {
        let mut p = paddle(Vec2::new(0.04, 0.04));
        handle_key(&mut p, &press(Key::A));
        assert_eq!(p.velocity.x, -0.04);
        handle_key(&mut p, &press(Key::A));
        assert_eq!(p.velocity.x, -0.04);
    }

    #[test]
    fn each_key_sets_its_sign() {
        let mut p = paddle(Vec2::new(-0.04, 0.04));
        handle_key(&mut p, &press(Key::D));
        assert_eq!(p.velocity, Vec2::new(0.04, 0.04));
        handle_key(&mut p, &press(Key::S));
        assert_eq!(p.velocity, Vec2::new(0.04, -0.04));
        handle_key(&mut p, &press(Key::W));
        assert_eq!(p.velocity, Vec2::new(0.04, 0.04));
    }

    #[test]
    fn steering_never_touches_position() {
        let mut p = paddle(Vec2::new(0.04, 0.04));
        steer(&mut p, Direction::Left);
        steer(&mut p, Direction::Backward);
        assert_eq!(p.position, Vec3::new(0.0, 0.0, 2.0));
    }

    // ── event filtering ───────────────────────────────────────────────────

    #[test]
    fn releases_are_ignored() {
        let mut p = paddle(Vec2::new(0.04, 0.04));
        assert_eq!(handle_key(&mut p, &key(Key::A, KeyState::Released, false)), None);
        assert_eq!(p.velocity.x, 0.04);
    }

    #[test]
    fn repeats_steer_like_presses() {
        let mut p = paddle(Vec2::new(0.04, 0.04));
        assert_eq!(
            handle_key(&mut p, &key(Key::S, KeyState::Pressed, true)),
            Some(Direction::Backward)
        );
        assert_eq!(p.velocity.y, -0.04);
    }

    #[test]
    fn other_keys_do_nothing() {
        let mut p = paddle(Vec2::new(0.04, 0.04));
        for k in [Key::Q, Key::ArrowLeft, Key::Space, Key::Unknown(42)] {
            assert_eq!(handle_key(&mut p, &press(k)), None);
        }
        assert_eq!(p.velocity, Vec2::new(0.04, 0.04));
    }
}
