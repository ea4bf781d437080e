//! Easing curves for the section rotation animation.
//!
//! Names follow the familiar `powerN.in/out/inOut` vocabulary so config files
//! read the same way animation timelines usually do. `power1` is quadratic,
//! `power2` cubic.

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum Easing {
    #[serde(rename = "linear")]
    Linear,
    #[serde(rename = "power1.inOut")]
    Power1InOut,
    #[serde(rename = "power2.in")]
    Power2In,
    #[serde(rename = "power2.out")]
    Power2Out,
    #[default]
    #[serde(rename = "power2.inOut")]
    Power2InOut,
}

impl Easing {
    /// Evaluates the curve at `t`.
    ///
    /// Input is clamped to `[0, 1]`; every curve maps 0 to 0 and 1 to 1.
    #[inline]
    pub fn evaluate(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        match self {
            Easing::Linear => t,
            Easing::Power1InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u / 2.0
                }
            }
            Easing::Power2In => t * t * t,
            Easing::Power2Out => {
                let omt = 1.0 - t;
                1.0 - omt * omt * omt
            }
            Easing::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 5] = [
        Easing::Linear,
        Easing::Power1InOut,
        Easing::Power2In,
        Easing::Power2Out,
        Easing::Power2InOut,
    ];

    #[test]
    fn endpoints_are_fixed() {
        for e in ALL {
            assert_eq!(e.evaluate(0.0), 0.0, "{e:?} at 0");
            assert!((e.evaluate(1.0) - 1.0).abs() < 1e-6, "{e:?} at 1");
        }
    }

    #[test]
    fn in_out_curves_pass_through_midpoint() {
        assert!((Easing::Power2InOut.evaluate(0.5) - 0.5).abs() < 1e-6);
        assert!((Easing::Power1InOut.evaluate(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn in_out_is_slow_at_both_ends() {
        let e = Easing::Power2InOut;
        assert!(e.evaluate(0.1) < 0.1);
        assert!(e.evaluate(0.9) > 0.9);
    }

    #[test]
    fn input_is_clamped() {
        for e in ALL {
            assert_eq!(e.evaluate(-3.0), 0.0);
            assert!((e.evaluate(7.0) - 1.0).abs() < 1e-6);
            assert_eq!(e.evaluate(f32::NAN), 0.0);
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for e in ALL {
            let mut prev = 0.0;
            for i in 1..=100 {
                let v = e.evaluate(i as f32 / 100.0);
                assert!(v >= prev, "{e:?} decreased at step {i}");
                prev = v;
            }
        }
    }
}
