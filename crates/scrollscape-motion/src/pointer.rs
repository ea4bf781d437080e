use glam::{Vec2, Vec4};

use crate::viewport::Viewport;

/// Pointer state derived from a single raw reading.
///
/// `normalized` drives camera parallax and lies in `[-0.5, 0.5]` per axis
/// while the pointer is inside the viewport; `pixel` feeds the shader mouse
/// uniform unchanged.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PointerState {
    normalized: Vec2,
    pixel: Vec2,
    pressed: bool,
}

impl PointerState {
    /// Records a pointer position in logical pixels.
    pub fn move_to(&mut self, x: f32, y: f32, viewport: Viewport) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        let size = viewport.guarded().size();
        self.pixel = Vec2::new(x, y);
        self.normalized = self.pixel / size - Vec2::splat(0.5);
    }

    pub fn press(&mut self) {
        self.pressed = true;
    }

    pub fn release(&mut self) {
        self.pressed = false;
    }

    #[inline]
    pub fn normalized(&self) -> Vec2 {
        self.normalized
    }

    #[inline]
    pub fn pixel(&self) -> Vec2 {
        self.pixel
    }

    /// Button flag as the shader sees it: `1.0` while held, else `0.0`.
    #[inline]
    pub fn button(&self) -> f32 {
        if self.pressed { 1.0 } else { 0.0 }
    }

    /// Mouse uniform: `(x, y, button, 0)`.
    #[inline]
    pub fn uniform(&self) -> Vec4 {
        Vec4::new(self.pixel.x, self.pixel.y, self.button(), 0.0)
    }
}
