//! Pongbox engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the game layer:
//! window and event loop, wgpu device/surface, frame timing, input
//! translation, mesh builders, texture loading and the uniform-driven mesh
//! renderer.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod assets;
pub mod geometry;
pub mod render;
