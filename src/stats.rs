use crate::core::FixedHz;

const FPS_UPDATE_INTERVAL: f32 = 1.0;

/// Frame statistics shown by the overlay
#[derive(Debug, Clone, Copy)]
pub struct FrameStats {
    /// Frames recorded since creation
    pub frames: u64,
    /// Frames per second over the last sampling window
    pub fps: f32,
    /// Duration of the most recent frame in milliseconds
    pub frame_ms: f32,
    window_frames: u32,
    window_time: f32,
    sampler: FixedHz,
}

impl FrameStats {
    pub fn new() -> Self {
        Self {
            frames: 0,
            fps: 0.0,
            frame_ms: 0.0,
            window_frames: 0,
            window_time: 0.0,
            sampler: FixedHz::new(1.0 / FPS_UPDATE_INTERVAL),
        }
    }

    /// Record one finished frame; returns true when the FPS sample was refreshed
    pub fn record(&mut self, delta: f32) -> bool {
        self.frames += 1;
        self.frame_ms = delta * 1000.0;
        self.window_frames += 1;
        self.window_time += delta;

        if !self.sampler.tick(delta) {
            return false;
        }

        if self.window_time > 0.0 {
            self.fps = self.window_frames as f32 / self.window_time;
        }
        self.window_frames = 0;
        self.window_time = 0.0;
        true
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}
