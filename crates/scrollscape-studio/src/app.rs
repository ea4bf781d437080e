use scrollscape_engine::core::{App, AppControl, FrameCtx};
use scrollscape_engine::render::{ObjectUniform, SceneRenderer};
use scrollscape_motion::{FrameState, MotionCommand, Stage, Viewport};

use crate::config::RenderConfig;
use crate::input::{self, Action, ScrollMetrics};
use crate::scene;

/// Drives the motion update and the scene renderer once per redraw.
pub struct StudioApp {
    frame: FrameState,
    stage: Stage,
    renderer: SceneRenderer,
    render: RenderConfig,
    object_uniforms: Vec<ObjectUniform>,
}

impl StudioApp {
    /// `renderer` must already hold the scene objects, in section order.
    pub fn new(frame: FrameState, stage: Stage, renderer: SceneRenderer, render: RenderConfig) -> Self {
        let capacity = stage.objects.len();
        Self {
            frame,
            stage,
            renderer,
            render,
            object_uniforms: Vec::with_capacity(capacity),
        }
    }

    fn apply(&mut self, command: MotionCommand) {
        // Section changes are logged by the motion state itself.
        let _ = self.frame.apply(command, &mut self.stage);
    }
}

impl App for StudioApp {
    fn on_resize(&mut self, logical_width: f32, logical_height: f32) {
        self.apply(MotionCommand::Resized {
            width: logical_width,
            height: logical_height,
        });
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let metrics = ScrollMetrics {
            viewport_height: self.frame.viewport().height,
            line_height: self.frame.config().line_height,
        };

        for event in &ctx.input_frame.events {
            match input::translate(event, metrics) {
                Some(Action::Motion(command)) => self.apply(command),
                Some(Action::Exit) => {
                    log::info!("exit requested");
                    return AppControl::Exit;
                }
                None => {}
            }
        }

        let report = self.frame.advance(ctx.time.elapsed, &mut self.stage);
        log::trace!(
            "frame {} t={:.3}s dt={:.4}s scroll={:.3} section={}",
            report.frame_index,
            report.elapsed,
            report.delta,
            report.normalized_scroll,
            report.section
        );

        let camera = scene::uniforms(&self.stage, &mut self.object_uniforms);
        let renderer = &mut self.renderer;
        let objects = &self.object_uniforms;

        ctx.render(self.render.clear(), |rctx, target| {
            renderer.render(rctx, target, &camera, objects);
        })
    }
}

/// Motion state and stage for a window of `viewport` size.
pub fn initial_state(config: scrollscape_motion::MotionConfig, viewport: Viewport) -> (FrameState, Stage) {
    let stage = scene::build_stage(viewport, config.section_spacing);
    let frame = FrameState::new(config, viewport, scene::section_count());
    (frame, stage)
}
