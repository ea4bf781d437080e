//! The once-per-frame update.
//!
//! Order inside [`FrameState::advance`]:
//! 1. timing (elapsed, delta)
//! 2. scroll smoothing
//! 3. camera Y from normalized scroll
//! 4. horizontal parallax easing
//! 5. vertical parallax, suppressed near the end of the page
//! 6. section rotation tweens, then idle spin
//! 7. shader uniforms
//!
//! Tweens always tick before the idle spin so both rotation writers add to
//! the same value in a fixed order each frame.

use crate::command::MotionCommand;
use crate::config::MotionConfig;
use crate::pointer::PointerState;
use crate::scroll::ScrollState;
use crate::section::SectionRotator;
use crate::stage::Stage;
use crate::viewport::Viewport;

/// Summary of one [`FrameState::advance`] call.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameReport {
    pub frame_index: u64,
    pub elapsed: f32,
    pub delta: f32,
    pub normalized_scroll: f32,
    pub section: usize,
}

/// All mutable motion state, constructed once at startup.
#[derive(Debug, Clone)]
pub struct FrameState {
    config: MotionConfig,
    viewport: Viewport,
    scroll: ScrollState,
    pointer: PointerState,
    rotator: SectionRotator,
    previous_time: f32,
    frame_index: u64,
}

impl FrameState {
    pub fn new(config: MotionConfig, viewport: Viewport, section_count: usize) -> Self {
        let total = scrollable_distance(&config, viewport, section_count);
        let rotator = SectionRotator::new(config.section_rotation, section_count);

        Self {
            viewport,
            scroll: ScrollState::new(total, section_count),
            pointer: PointerState::default(),
            rotator,
            previous_time: 0.0,
            frame_index: 0,
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    #[inline]
    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    #[inline]
    pub fn rotator(&self) -> &SectionRotator {
        &self.rotator
    }

    /// Applies one input command.
    ///
    /// Returns the newly active section when a scroll moved into a different
    /// one; its rotation burst has already been started.
    pub fn apply(&mut self, command: MotionCommand, stage: &mut Stage) -> Option<usize> {
        match command {
            MotionCommand::ScrollTo(offset) => self.scroll_to(offset),
            MotionCommand::ScrollBy(delta) => self.scroll_to(self.scroll.raw() + delta),
            MotionCommand::PointerMoved { x, y } => {
                self.pointer.move_to(x, y, self.viewport);
                None
            }
            MotionCommand::PointerDown => {
                self.pointer.press();
                None
            }
            MotionCommand::PointerUp => {
                self.pointer.release();
                None
            }
            MotionCommand::Resized { width, height } => {
                self.resize(Viewport::new(width, height), stage);
                None
            }
        }
    }

    /// Viewport change: camera aspect, resolution uniforms and, when the page
    /// height follows the viewport, the scrollable distance.
    ///
    /// Every value is recomputed from `viewport` alone, so repeated calls
    /// with the same size leave the state unchanged.
    pub fn resize(&mut self, viewport: Viewport, stage: &mut Stage) {
        if !viewport.is_valid() {
            log::debug!("ignoring degenerate viewport {}x{}", viewport.width, viewport.height);
            return;
        }

        self.viewport = viewport;
        self.scroll
            .set_total(scrollable_distance(&self.config, viewport, self.scroll.section_count()));

        stage.camera.set_viewport(viewport);
        let resolution = viewport.resolution();
        for object in &mut stage.objects {
            object.uniforms.resolution = resolution;
        }
    }

    /// Runs one frame of the update against `stage`.
    ///
    /// `elapsed` is seconds since startup; the first frame measures its delta
    /// from zero.
    pub fn advance(&mut self, elapsed: f32, stage: &mut Stage) -> FrameReport {
        let delta = (elapsed - self.previous_time).max(0.0);
        self.previous_time = elapsed;

        let _ = self.scroll.smooth(self.config.smoothing);
        let normalized = self.scroll.normalized();

        let sections = self.scroll.section_count().saturating_sub(1) as f32;
        let max_scroll = sections * self.config.section_spacing;

        let parallax = self.config.parallax;
        let offset = self.pointer.normalized();
        let camera = &mut stage.camera;

        camera.position.y = -(normalized * max_scroll);

        let target_x = offset.x * parallax.strength;
        let approach = (parallax.ease_rate * delta).min(1.0);
        camera.position.x += (target_x - camera.position.x) * approach;

        if normalized < parallax.cutoff {
            camera.position.y += -offset.y * parallax.strength * parallax.vertical_damping;
        }

        self.rotator.tick(delta, &mut stage.objects);
        let spin = self.config.idle_spin * delta;
        for object in &mut stage.objects {
            object.rotation += spin;
        }

        let resolution = self.viewport.resolution();
        let mouse = self.pointer.uniform();
        for object in &mut stage.objects {
            object.uniforms.time = elapsed;
            object.uniforms.resolution = resolution;
            if let Some(pointer) = object.uniforms.pointer.as_mut() {
                *pointer = mouse;
            }
        }

        let report = FrameReport {
            frame_index: self.frame_index,
            elapsed,
            delta,
            normalized_scroll: normalized,
            section: self.scroll.section(),
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        report
    }

    fn scroll_to(&mut self, offset: f32) -> Option<usize> {
        let changed = self.scroll.scroll_to(offset, self.viewport.height)?;
        let superseded = self.rotator.trigger(changed);
        log::debug!(
            "section {changed} active (offset {:.1}, superseded: {superseded})",
            self.scroll.raw()
        );
        Some(changed)
    }
}

/// Page height minus one viewport, never negative.
fn scrollable_distance(config: &MotionConfig, viewport: Viewport, section_count: usize) -> f32 {
    let page = config
        .page_height
        .unwrap_or(section_count as f32 * viewport.height);
    (page - viewport.height).max(0.0)
}
