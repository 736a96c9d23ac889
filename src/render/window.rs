use anyhow::Result;
use std::sync::Arc;
use winit::event::WindowEvent;
use winit::window::Window;

use super::overlay::{OverlayData, StatsOverlay};
use super::{Framebuffer, RayCaster, RenderBackend, RenderRequest};
use crate::core::SurfaceRenderer;

/// Ray casts each frame on the CPU and presents it in a window
pub struct WindowBackend {
    window: Arc<Window>,
    surface: SurfaceRenderer,
    overlay: Option<StatsOverlay>,
    caster: RayCaster,
    framebuffer: Framebuffer,
    render_scale: f32,
}

impl WindowBackend {
    /// `render_scale` shrinks the ray cast frame relative to the window;
    /// `show_ui` enables the stats overlay
    pub fn new(window: Arc<Window>, render_scale: f32, show_ui: bool) -> Result<Self> {
        let surface = pollster::block_on(SurfaceRenderer::new(window.clone()))?;
        let overlay = show_ui.then(|| StatsOverlay::new(&window, surface.gpu(), surface.format()));

        let (width, height) = surface.dimensions();
        let (frame_width, frame_height) = scaled_size(width, height, render_scale);
        log::info!(
            "Window backend ready: {}x{} window, {}x{} frame",
            width,
            height,
            frame_width,
            frame_height
        );

        Ok(Self {
            window,
            surface,
            overlay,
            caster: RayCaster::new(),
            framebuffer: Framebuffer::new(frame_width, frame_height),
            render_scale,
        })
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Let the overlay see the event first; returns true if it consumed it
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        match self.overlay.as_mut() {
            Some(overlay) => overlay.handle_event(&self.window, event),
            None => false,
        }
    }
}

impl RenderBackend for WindowBackend {
    fn render(&mut self, request: &RenderRequest<'_>) -> Result<()> {
        self.caster
            .render(request.scene, request.camera, &mut self.framebuffer);
        self.surface.upload(
            self.framebuffer.pixels(),
            self.framebuffer.width(),
            self.framebuffer.height(),
        )?;

        let Some(output) = self.surface.acquire()? else {
            return Ok(());
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .surface
            .gpu()
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        self.surface.draw(&mut encoder, &view);

        if let Some(overlay) = self.overlay.as_mut() {
            let (width, height) = self.surface.dimensions();
            overlay.draw(
                &self.window,
                self.surface.gpu(),
                &mut encoder,
                &view,
                [width, height],
                &OverlayData::from_request(request),
            );
        }

        self.surface.gpu().queue().submit(std::iter::once(encoder.finish()));
        self.window.pre_present_notify();
        output.present();
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.surface.resize(width, height);
        let (frame_width, frame_height) = scaled_size(width, height, self.render_scale);
        self.framebuffer.resize(frame_width, frame_height);
    }
}

/// Ray cast resolution for a window size, at least one pixel per axis
pub fn scaled_size(width: u32, height: u32, scale: f32) -> (u32, u32) {
    let scale_axis = |n: u32| ((n as f32 * scale).round() as u32).max(1);
    (scale_axis(width), scale_axis(height))
}
