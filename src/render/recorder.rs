use anyhow::{bail, Result};
use glam::Vec3;

use super::{RenderBackend, RenderRequest};
use crate::camera::PerspectiveCamera;
use crate::core::FrameInfo;

/// What a backend was asked to draw on one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedFrame {
    pub frame: FrameInfo,
    pub camera: PerspectiveCamera,
    pub target_position: Vec3,
    pub node_count: usize,
}

/// Backend that draws nothing and remembers every request
#[derive(Debug, Default)]
pub struct FrameRecorder {
    pub frames: Vec<RecordedFrame>,
    pub resizes: Vec<(u32, u32)>,
    /// Fail the render of this frame number
    pub fail_on: Option<u64>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&RecordedFrame> {
        self.frames.last()
    }
}

impl RenderBackend for FrameRecorder {
    fn render(&mut self, request: &RenderRequest<'_>) -> Result<()> {
        if self.fail_on == Some(request.frame.number) {
            bail!("Surface lost on frame {}", request.frame.number);
        }

        self.frames.push(RecordedFrame {
            frame: request.frame,
            camera: *request.camera,
            target_position: request.scene[request.target].transform.position,
            node_count: request.scene.len(),
        });
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.resizes.push((width, height));
    }
}
