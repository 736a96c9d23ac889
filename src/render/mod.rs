mod overlay;
mod raycaster;
mod recorder;
mod snapshot;
mod window;

pub use overlay::{OverlayData, StatsOverlay};
pub use raycaster::{Framebuffer, Hit, RayCaster};
pub use recorder::{FrameRecorder, RecordedFrame};
pub use snapshot::save_frame;
pub use window::{scaled_size, WindowBackend};

use anyhow::Result;

use crate::camera::PerspectiveCamera;
use crate::core::FrameInfo;
use crate::scene::{NodeId, Scene};
use crate::stats::FrameStats;

/// Everything a backend needs to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub scene: &'a Scene,
    pub camera: &'a PerspectiveCamera,
    pub frame: FrameInfo,
    /// Stats as of the end of the previous frame
    pub stats: &'a FrameStats,
    /// The controlled object
    pub target: NodeId,
}

/// Draws frames submitted by the frame loop
pub trait RenderBackend {
    fn render(&mut self, request: &RenderRequest<'_>) -> Result<()>;

    /// Output size changed, in physical pixels
    fn resize(&mut self, _width: u32, _height: u32) {}
}

/// CPU ray caster that keeps the latest frame in memory
pub struct HeadlessBackend {
    caster: RayCaster,
    framebuffer: Framebuffer,
}

impl HeadlessBackend {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            caster: RayCaster::new(),
            framebuffer: Framebuffer::new(width, height),
        }
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }
}

impl RenderBackend for HeadlessBackend {
    fn render(&mut self, request: &RenderRequest<'_>) -> Result<()> {
        self.caster
            .render(request.scene, request.camera, &mut self.framebuffer);
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.framebuffer.resize(width, height);
    }
}
