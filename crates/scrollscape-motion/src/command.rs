/// Input to [`FrameState::apply`](crate::FrameState::apply).
///
/// The window layer translates its platform events into these so the state
/// update never depends on a live event loop.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MotionCommand {
    /// Absolute page offset in logical pixels.
    ScrollTo(f32),
    /// Relative page offset; positive scrolls down the page.
    ScrollBy(f32),
    /// Pointer position in logical pixels, top-left origin.
    PointerMoved { x: f32, y: f32 },
    PointerDown,
    PointerUp,
    /// New viewport size in logical pixels.
    Resized { width: f32, height: f32 },
}
