//! Time subsystem.
//!
//! One `FrameClock` per render loop; call `tick()` once per redraw callback to
//! obtain the `FrameTime` for that frame.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
