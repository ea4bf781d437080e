mod app;
mod config;
mod input;
mod scene;

use anyhow::{Context, Result};
use winit::dpi::LogicalSize;

use scrollscape_engine::device::GpuInit;
use scrollscape_engine::logging::{init_logging, LoggingConfig};
use scrollscape_engine::render::SceneRenderer;
use scrollscape_engine::window::{Runtime, RuntimeConfig};
use scrollscape_motion::Viewport;

use crate::app::StudioApp;
use crate::config::StudioConfig;

fn main() -> Result<()> {
    let config = StudioConfig::load().context("failed to load studio configuration")?;

    init_logging(LoggingConfig {
        env_filter: config.log_filter.clone(),
        ..Default::default()
    });

    let StudioConfig {
        window,
        render,
        motion,
        ..
    } = config;

    let mut renderer = SceneRenderer::new();
    scene::register(&mut renderer)?;

    // Replaced by the real window size before the first frame.
    let viewport = Viewport::new(window.width as f32, window.height as f32);
    let (frame, stage) = app::initial_state(motion, viewport);

    log::info!(
        "{} sections, page height {}",
        scene::section_count(),
        match frame.config().page_height {
            Some(h) => format!("{h}px"),
            None => "one viewport per section".to_string(),
        }
    );

    let runtime = RuntimeConfig {
        title: window.title,
        initial_size: LogicalSize::new(window.width, window.height),
    };
    let gpu_init = GpuInit {
        present_mode: render.present_mode(),
        ..Default::default()
    };

    Runtime::run(runtime, gpu_init, StudioApp::new(frame, stage, renderer, render))
}
