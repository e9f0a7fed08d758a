use crate::input::KeyEvent;
use crate::render::{TextureId, TextureImage};
use crate::window::RuntimeCtx;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the game layer.
///
/// All callbacks run on the event-loop thread, one at a time.
pub trait App {
    /// Called once after the window and GPU are ready, before the first frame.
    fn on_start(&mut self, runtime: &mut RuntimeCtx) {
        let _ = runtime;
    }

    /// Called for every key press, release and auto-repeat.
    fn on_key(&mut self, event: &KeyEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called when a texture requested through [`RuntimeCtx::load_texture`]
    /// has been decoded.
    fn on_texture_loaded(&mut self, id: TextureId, image: TextureImage) {
        let _ = (id, image);
    }

    /// Called once per redraw.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
