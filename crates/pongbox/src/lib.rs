//! Pong in a box.
//!
//! A ball bounces inside a textured arena. The player steers a paddle at the
//! front with `A`/`D`/`W`/`S`; a bot paddle at the back mirrors the ball.

pub mod app;
pub mod controls;
pub mod motion;
pub mod renderer;
pub mod scene;
pub mod sim;

pub use app::PongApp;
