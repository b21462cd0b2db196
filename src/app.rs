// app.rs - Event loop shared by every demo

use crate::config::AppConfig;
use crate::logging;
use crate::render::{GlApi, NativeGl, RenderError, RenderPipeline, SceneDescription};
use crate::window::RenderWindow;
use anyhow::{Context, Result};
use log::{error, info};
use std::rc::Rc;
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::EventLoopBuilder;
use winit::keyboard::{Key, NamedKey};

/// Builds the demo's scene and runs it with default settings, titled after the scene.
pub fn run(demo: fn() -> Result<SceneDescription, RenderError>) -> Result<()> {
    let mut config = AppConfig::default();
    logging::init(&config.logging)?;

    let scene = demo().context("Failed to describe scene")?;
    config.window.title = scene.title.clone();
    run_scene(config, scene)
}

/// Opens the window and draws `scene` until Escape is pressed or the window closes.
/// The logger must already be installed.
pub fn run_scene(config: AppConfig, scene: SceneDescription) -> Result<()> {
    info!("Starting '{}'", scene.title);

    let event_loop = EventLoopBuilder::new().build()?;
    let render_window = RenderWindow::create(&event_loop, &config.window)?;

    let api: Rc<dyn GlApi> = Rc::new(NativeGl::new());
    let pipeline = RenderPipeline::build(api, &scene, &config.rendering)
        .with_context(|| format!("Failed to build '{}'", scene.title))?;

    let size = render_window.window().inner_size();
    pipeline.resize(size.width, size.height);

    // Dropped on LoopExiting, while the context is still current.
    let mut pipeline = Some(pipeline);

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => elwt.exit(),
            WindowEvent::Resized(size) => {
                render_window.resize(size.width, size.height);
                if let Some(pipeline) = &pipeline {
                    pipeline.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(pipeline) = &pipeline {
                    pipeline.render_frame();
                    if let Err(e) = render_window.swap_buffers() {
                        error!("{:#}", e);
                        elwt.exit();
                    }
                }
            }
            _ => {}
        },
        Event::AboutToWait => render_window.window().request_redraw(),
        Event::LoopExiting => {
            if pipeline.take().is_some() {
                info!("Released GL resources");
            }
        }
        _ => {}
    })?;

    Ok(())
}
