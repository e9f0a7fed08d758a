//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The runtime translates platform events into `KeyEvent`s through
//! `platform::winit` and hands them to the application as they arrive.

pub(crate) mod platform;
mod types;

pub use types::{Key, KeyEvent, KeyState};
