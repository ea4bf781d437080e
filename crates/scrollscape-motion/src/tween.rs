use glam::Vec3;

use crate::easing::Easing;

/// Relative rotation animation.
///
/// The tween never writes an absolute rotation. Each [`advance`](Self::advance)
/// returns only the increment since the previous tick, so it composes with any
/// other writer that also adds to the same rotation (the idle spin).
#[derive(Debug, Clone, PartialEq)]
pub struct RotationTween {
    delta: Vec3,
    applied: Vec3,
    elapsed: f32,
    duration: f32,
    easing: Easing,
}

impl RotationTween {
    pub fn new(delta: Vec3, duration: f32, easing: Easing) -> Self {
        Self {
            delta,
            applied: Vec3::ZERO,
            elapsed: 0.0,
            duration: duration.max(0.0),
            easing,
        }
    }

    /// Replaces an in-flight tween, folding its unapplied remainder into `delta`.
    ///
    /// The replacement restarts timing from zero, so the sum of everything
    /// both tweens apply equals the two deltas combined.
    pub fn superseding(previous: &RotationTween, delta: Vec3, duration: f32, easing: Easing) -> Self {
        Self::new(previous.remaining() + delta, duration, easing)
    }

    /// Normalized time in `[0, 1]`.
    #[inline]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Rotation still to be applied.
    #[inline]
    pub fn remaining(&self) -> Vec3 {
        self.delta - self.applied
    }

    /// Advances by `dt` seconds and returns the rotation increment for this tick.
    pub fn advance(&mut self, dt: f32) -> Vec3 {
        self.elapsed += dt.max(0.0);

        let target = if self.is_finished() {
            self.delta
        } else {
            self.delta * self.easing.evaluate(self.progress())
        };

        let step = target - self.applied;
        self.applied = target;
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-4
    }

    #[test]
    fn increments_sum_to_delta() {
        let delta = Vec3::new(6.0, 3.0, 0.0);
        let mut tween = RotationTween::new(delta, 1.5, Easing::Power2InOut);

        let mut total = Vec3::ZERO;
        while !tween.is_finished() {
            total += tween.advance(1.0 / 60.0);
        }

        assert!(approx(total, delta), "total {total:?}");
        assert_eq!(tween.remaining(), Vec3::ZERO);
    }

    #[test]
    fn finished_tween_yields_zero_steps() {
        let mut tween = RotationTween::new(Vec3::X, 0.5, Easing::Linear);
        let _ = tween.advance(1.0);
        assert_eq!(tween.advance(1.0), Vec3::ZERO);
    }

    #[test]
    fn zero_duration_applies_everything_at_once() {
        let mut tween = RotationTween::new(Vec3::new(1.0, 2.0, 3.0), 0.0, Easing::Power2InOut);
        assert_eq!(tween.advance(0.0), Vec3::new(1.0, 2.0, 3.0));
        assert!(tween.is_finished());
    }

    #[test]
    fn negative_dt_does_not_rewind() {
        let mut tween = RotationTween::new(Vec3::X, 1.0, Easing::Linear);
        let _ = tween.advance(0.5);
        let step = tween.advance(-0.25);
        assert_eq!(step, Vec3::ZERO);
        assert!((tween.progress() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn superseding_conserves_total_rotation() {
        let delta = Vec3::new(6.0, 3.0, 0.0);
        let mut first = RotationTween::new(delta, 1.5, Easing::Power2InOut);

        let mut total = Vec3::ZERO;
        for _ in 0..30 {
            total += first.advance(1.0 / 60.0);
        }
        assert!(!first.is_finished());

        let mut second = RotationTween::superseding(&first, delta, 1.5, Easing::Power2InOut);
        while !second.is_finished() {
            total += second.advance(1.0 / 60.0);
        }

        assert!(approx(total, delta * 2.0), "total {total:?}");
    }
}
