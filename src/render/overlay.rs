use glam::Vec3;
use wgpu::{CommandEncoder, TextureView};
use winit::event::WindowEvent;
use winit::window::Window;

use super::RenderRequest;
use crate::core::GpuContext;

/// Numbers shown in the stats overlay for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayData {
    pub fps: f32,
    pub frame_ms: f32,
    pub frame_number: u64,
    pub target_position: Vec3,
    /// Degrees, 0 when facing -Z, positive turning left
    pub target_heading: f32,
    pub camera_position: Vec3,
    pub node_count: usize,
}

impl OverlayData {
    pub fn from_request(request: &RenderRequest<'_>) -> Self {
        let target = &request.scene[request.target].transform;
        Self {
            fps: request.stats.fps,
            frame_ms: request.stats.frame_ms,
            frame_number: request.frame.number,
            target_position: target.position,
            target_heading: target.heading().to_degrees(),
            camera_position: request.camera.position,
            node_count: request.scene.len(),
        }
    }

    /// Detail lines under the FPS counter
    pub fn lines(&self) -> Vec<String> {
        let v = |p: Vec3| format!("{:.1}, {:.1}, {:.1}", p.x, p.y, p.z);
        vec![
            format!("{:.2} ms  frame {}", self.frame_ms, self.frame_number),
            format!("cube {}  heading {:.0}°", v(self.target_position), self.target_heading),
            format!("camera {}", v(self.camera_position)),
            format!("{} nodes", self.node_count),
        ]
    }
}

const STATS_WINDOW: &str = "stats-overlay";

/// Stats panel pinned to the bottom-left corner
fn show_stats(ctx: &egui::Context, data: &OverlayData) {
    egui::Window::new("Stats")
        .id(egui::Id::new(STATS_WINDOW))
        .title_bar(false)
        .resizable(false)
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(10.0, -10.0))
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(format!("{:.0}", data.fps))
                    .size(48.0)
                    .color(egui::Color32::from_rgb(74, 158, 255)),
            );
            ui.label(egui::RichText::new("FPS").size(12.0).color(egui::Color32::GRAY));
            for line in data.lines() {
                ui.label(egui::RichText::new(line).size(12.0).color(egui::Color32::WHITE));
            }
        });
}

/// egui overlay drawn on top of the presented frame
pub struct StatsOverlay {
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl StatsOverlay {
    pub fn new(window: &Window, gpu: &GpuContext, format: wgpu::TextureFormat) -> Self {
        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer =
            egui_wgpu::Renderer::new(gpu.device(), format, egui_wgpu::RendererOptions::default());

        Self {
            egui_ctx,
            egui_state,
            egui_renderer,
        }
    }

    /// Returns true if egui consumed the event
    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.egui_state.on_window_event(window, event).consumed
    }

    pub fn draw(
        &mut self,
        window: &Window,
        gpu: &GpuContext,
        encoder: &mut CommandEncoder,
        view: &TextureView,
        size_in_pixels: [u32; 2],
        data: &OverlayData,
    ) {
        let raw_input = self.egui_state.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| show_stats(ctx, data));

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, self.egui_ctx.pixels_per_point());
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(gpu.device(), gpu.queue(), *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels,
            pixels_per_point: window.scale_factor() as f32,
        };
        self.egui_renderer
            .update_buffers(gpu.device(), gpu.queue(), encoder, &tris, &screen_descriptor);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            // egui-wgpu wants a 'static pass; it is finished before the encoder is used again
            let mut render_pass = render_pass.forget_lifetime();
            self.egui_renderer
                .render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}
