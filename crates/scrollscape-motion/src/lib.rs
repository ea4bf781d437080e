//! Scrollscape motion crate.
//!
//! Owns the per-frame scene update: scroll smoothing, camera travel, pointer
//! parallax, section rotation bursts and shader-uniform synchronization.
//! Nothing in here touches the GPU; the renderer consumes the resulting
//! [`Stage`] after every [`FrameState::advance`].

pub mod command;
pub mod config;
pub mod easing;
pub mod frame;
pub mod pointer;
pub mod scroll;
pub mod section;
pub mod stage;
pub mod tween;
pub mod viewport;

pub use command::MotionCommand;
pub use config::{InvalidConfig, MotionConfig, ParallaxConfig, SectionRotationConfig};
pub use easing::Easing;
pub use frame::{FrameReport, FrameState};
pub use pointer::PointerState;
pub use scroll::ScrollState;
pub use section::SectionRotator;
pub use stage::{CameraRig, SceneObject, ShaderUniforms, Stage};
pub use tween::RotationTween;
pub use viewport::Viewport;
