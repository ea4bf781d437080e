use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::easing::Easing;

/// Tunables for the per-frame update.
///
/// All sub-structs use `#[serde(default)]`, so a partial TOML table only needs
/// the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Per-frame interpolation weight toward the raw scroll offset.
    /// Lower is smoother and slower; `1.0` snaps.
    pub smoothing: f32,

    /// World-space vertical distance between consecutive section objects.
    pub section_spacing: f32,

    /// Total page height in logical pixels.
    ///
    /// `None` derives it from the viewport: one viewport height per section.
    pub page_height: Option<f32>,

    /// Scroll distance of one wheel "line" or arrow key press, in logical pixels.
    pub line_height: f32,

    /// Idle spin rates in radians per second, per axis.
    pub idle_spin: Vec3,

    pub parallax: ParallaxConfig,
    pub section_rotation: SectionRotationConfig,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            smoothing: 0.1,
            section_spacing: 5.0,
            page_height: None,
            line_height: 40.0,
            idle_spin: Vec3::new(0.1, 0.12, 0.0),
            parallax: ParallaxConfig::default(),
            section_rotation: SectionRotationConfig::default(),
        }
    }
}

/// Pointer parallax parameters.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    /// World units of camera offset per unit of normalized pointer offset.
    pub strength: f32,

    /// Exponential approach rate of the horizontal offset (per second).
    pub ease_rate: f32,

    /// Extra scale applied to the vertical offset.
    pub vertical_damping: f32,

    /// Vertical parallax is suppressed once normalized scroll reaches this.
    pub cutoff: f32,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            strength: 0.5,
            ease_rate: 5.0,
            vertical_damping: 0.5,
            cutoff: 0.99,
        }
    }
}

/// Rotation burst fired on the newly active section.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionRotationConfig {
    /// Seconds.
    pub duration: f32,

    /// Radians added per axis, relative to the rotation at trigger time.
    pub delta: Vec3,

    pub easing: Easing,
}

impl Default for SectionRotationConfig {
    fn default() -> Self {
        Self {
            duration: 1.5,
            delta: Vec3::new(6.0, 3.0, 0.0),
            easing: Easing::Power2InOut,
        }
    }
}

/// A configuration value outside its accepted range.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidConfig {
    pub field: &'static str,
    pub message: String,
}

impl InvalidConfig {
    fn new(field: &'static str, msg: impl Into<String>) -> Self {
        Self { field, message: msg.into() }
    }
}

impl fmt::Display for InvalidConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid motion config `{}`: {}", self.field, self.message)
    }
}

impl std::error::Error for InvalidConfig {}

impl MotionConfig {
    /// Checks ranges that would otherwise produce NaN or divergent motion.
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(InvalidConfig::new(
                "smoothing",
                format!("must be in (0, 1], got {}", self.smoothing),
            ));
        }
        if !(self.section_spacing.is_finite() && self.section_spacing >= 0.0) {
            return Err(InvalidConfig::new(
                "section_spacing",
                format!("must be a non-negative number, got {}", self.section_spacing),
            ));
        }
        if let Some(h) = self.page_height {
            if !(h.is_finite() && h >= 0.0) {
                return Err(InvalidConfig::new(
                    "page_height",
                    format!("must be a non-negative number, got {h}"),
                ));
            }
        }
        if !(self.line_height.is_finite() && self.line_height > 0.0) {
            return Err(InvalidConfig::new("line_height", "must be positive"));
        }
        if !self.idle_spin.is_finite() {
            return Err(InvalidConfig::new("idle_spin", "must be finite"));
        }
        non_negative("parallax.strength", self.parallax.strength)?;
        non_negative("parallax.ease_rate", self.parallax.ease_rate)?;
        non_negative("parallax.vertical_damping", self.parallax.vertical_damping)?;
        if !self.parallax.cutoff.is_finite() {
            return Err(InvalidConfig::new("parallax.cutoff", "must be finite"));
        }
        non_negative("section_rotation.duration", self.section_rotation.duration)?;
        if !self.section_rotation.delta.is_finite() {
            return Err(InvalidConfig::new("section_rotation.delta", "must be finite"));
        }
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), InvalidConfig> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(InvalidConfig::new(field, format!("must be a non-negative number, got {value}")))
    }
}
