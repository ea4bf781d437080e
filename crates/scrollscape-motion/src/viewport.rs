use glam::{Vec2, Vec3};

/// Viewport size in logical pixels.
///
/// Owned by the window layer; the motion state only reads it, except when a
/// resize replaces it wholesale.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Returns a copy safe to divide by: each dimension is at least 1.
    ///
    /// Non-finite dimensions (NaN from a degenerate window) also collapse to 1.
    #[inline]
    pub fn guarded(self) -> Self {
        fn guard(v: f32) -> f32 {
            if v.is_finite() { v.max(1.0) } else { 1.0 }
        }
        Self::new(guard(self.width), guard(self.height))
    }

    #[inline]
    pub fn aspect(self) -> f32 {
        let g = self.guarded();
        g.width / g.height
    }

    #[inline]
    pub fn size(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Shader resolution uniform: `(width, height, 1)`.
    #[inline]
    pub fn resolution(self) -> Vec3 {
        Vec3::new(self.width, self.height, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guarded_lifts_zero_dimensions() {
        let v = Viewport::new(0.0, 0.0).guarded();
        assert_eq!(v, Viewport::new(1.0, 1.0));
    }

    #[test]
    fn guarded_replaces_nan() {
        let v = Viewport::new(f32::NAN, 600.0).guarded();
        assert_eq!(v, Viewport::new(1.0, 600.0));
    }

    #[test]
    fn aspect_of_zero_height_is_finite() {
        assert!(Viewport::new(800.0, 0.0).aspect().is_finite());
        assert_eq!(Viewport::new(1000.0, 800.0).aspect(), 1.25);
    }

    #[test]
    fn resolution_carries_unit_z() {
        assert_eq!(Viewport::new(1280.0, 720.0).resolution(), Vec3::new(1280.0, 720.0, 1.0));
    }
}
