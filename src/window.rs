// window.rs - winit window with a current OpenGL core context

use crate::config::WindowConfig;
use anyhow::{anyhow, Context, Result};
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::prelude::*;
use glutin::surface::{Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasRawWindowHandle;
use std::ffi::CString;
use std::num::NonZeroU32;
use winit::dpi::LogicalSize;
use winit::event_loop::EventLoopWindowTarget;
use winit::window::{Window, WindowBuilder};

// Fields drop in declaration order. Window must outlive the surface created
// from its handle.
pub struct RenderWindow {
    gl_surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    window: Window,
}

impl RenderWindow {
    /// Opens the window, makes its context current and loads the `gl` function
    /// pointers. Nothing in `gl` may be called before this returns.
    pub fn create(event_loop: &EventLoopWindowTarget<()>, config: &WindowConfig) -> Result<Self> {
        let window_builder = WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(config.width, config.height))
            .with_visible(config.visible);

        let template = ConfigTemplateBuilder::new();
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

        let (window, gl_config) = display_builder
            .build(event_loop, template, |configs| {
                // glutin errors out before handing over an empty config list
                configs
                    .reduce(|accum, candidate| {
                        if candidate.num_samples() > accum.num_samples() {
                            candidate
                        } else {
                            accum
                        }
                    })
                    .expect("no GL configs offered")
            })
            .map_err(|e| anyhow!("Failed to create window: {e}"))?;

        let window = window.context("Display builder returned no window")?;
        let raw_window_handle = window.raw_window_handle();
        let gl_display = gl_config.display();

        let (major, minor) = config.gl_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_window_handle));

        let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .context("Failed to create OpenGL context")?;

        let attrs = window.build_surface_attributes(<_>::default());
        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &attrs) }
            .context("Failed to create GL surface")?;

        let gl_context = gl_context
            .make_current(&gl_surface)
            .context("Failed to make context current")?;

        gl::load_with(|symbol| match CString::new(symbol) {
            Ok(symbol) => gl_display.get_proc_address(symbol.as_c_str()) as *const _,
            Err(_) => std::ptr::null(),
        });

        if config.vsync {
            if let Some(interval) = NonZeroU32::new(1) {
                if let Err(e) =
                    gl_surface.set_swap_interval(&gl_context, SwapInterval::Wait(interval))
                {
                    log::warn!("Could not enable vsync: {}", e);
                }
            }
        }

        log::info!(
            "Created {}x{} window with OpenGL {}.{} core context",
            config.width,
            config.height,
            major,
            minor
        );

        Ok(Self {
            gl_surface,
            gl_context,
            window,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Resizes the drawable surface. Zero-sized (minimised) windows are ignored.
    pub fn resize(&self, width: u32, height: u32) {
        if let (Some(width), Some(height)) = (NonZeroU32::new(width), NonZeroU32::new(height)) {
            self.gl_surface.resize(&self.gl_context, width, height);
        }
    }

    pub fn swap_buffers(&self) -> Result<()> {
        self.gl_surface
            .swap_buffers(&self.gl_context)
            .context("Failed to swap buffers")
    }
}
