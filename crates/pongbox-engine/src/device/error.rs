/// What the frame loop does after failing to acquire a surface texture.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// The surface was lost or outdated and has been configured again.
    Reconfigured,
    /// Transient; drop this frame and try on the next redraw.
    SkipFrame,
    /// Unrecoverable (out of memory). The app exits.
    Fatal,
}
