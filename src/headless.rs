//! Fixed-step driver without a window
//!
//! Runs the frame loop for a set number of ticks with input taken from a
//! script, ray casting every frame in memory.

use anyhow::{bail, ensure, Context, Result};
use glam::Vec3;
use std::path::PathBuf;

use crate::config::SceneConfig;
use crate::core::{Button, FixedHz, KeySnapshot};
use crate::frame_loop::{FrameContext, FrameLoop};
use crate::loaders::{AssetLoader, ModelRequest};
use crate::render::{save_frame, HeadlessBackend};

/// Keys held for a stretch of simulated time
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptStep {
    pub keys: KeySnapshot,
    pub duration: f32,
}

/// Timeline of held keys, e.g. `"w+a:1.5,s:0.5,:1"`
///
/// Each comma separated entry is `keys:seconds` with keys joined by `+`;
/// an empty key list idles. After the last step no keys are held.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptedInput {
    steps: Vec<ScriptStep>,
    idle: KeySnapshot,
}

impl ScriptedInput {
    pub fn parse(script: &str) -> Result<Self> {
        let mut steps = Vec::new();

        for entry in script.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
            let Some((keys, seconds)) = entry.rsplit_once(':') else {
                bail!("Script entry {:?} is missing ':seconds'", entry);
            };

            let duration: f32 = seconds
                .trim()
                .parse()
                .with_context(|| format!("Invalid duration in script entry {:?}", entry))?;
            ensure!(
                duration.is_finite() && duration >= 0.0,
                "Duration in script entry {:?} must be a non-negative number",
                entry
            );

            let mut buttons = Vec::new();
            for name in keys.split('+').map(str::trim).filter(|name| !name.is_empty()) {
                match Button::from_name(name) {
                    Some(button) => buttons.push(button),
                    None => bail!("Unknown key {:?} in script entry {:?}", name, entry),
                }
            }

            steps.push(ScriptStep {
                keys: KeySnapshot::new(&buttons),
                duration,
            });
        }

        Ok(Self {
            steps,
            idle: KeySnapshot::none(),
        })
    }

    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    pub fn total_duration(&self) -> f32 {
        self.steps.iter().map(|step| step.duration).sum()
    }

    /// Keys held at `time` seconds into the script
    pub fn at(&self, time: f64) -> &KeySnapshot {
        let mut start = 0.0;
        for step in &self.steps {
            let end = start + f64::from(step.duration);
            if time >= start && time < end {
                return &step.keys;
            }
            start = end;
        }
        &self.idle
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessOptions {
    pub frames: u32,
    /// Seconds per tick
    pub dt: f32,
    pub width: u32,
    pub height: u32,
    /// Save the last frame here (`.ppm` or `.png`)
    pub output: Option<PathBuf>,
}

impl Default for HeadlessOptions {
    fn default() -> Self {
        Self {
            frames: 300,
            dt: 1.0 / 60.0,
            width: 320,
            height: 240,
            output: None,
        }
    }
}

/// State of the demo after a headless run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlessSummary {
    pub frames: u64,
    pub elapsed: f32,
    pub cube_position: Vec3,
    /// Radians, 0 when facing -Z
    pub cube_heading: f32,
    pub camera_position: Vec3,
}

pub fn run(config: &SceneConfig, options: &HeadlessOptions, script: &ScriptedInput) -> Result<HeadlessSummary> {
    ensure!(
        options.width > 0 && options.height > 0,
        "Headless frame size must be non-zero, got {}x{}",
        options.width,
        options.height
    );
    ensure!(
        options.dt.is_finite() && options.dt >= 0.0,
        "Headless dt must be a non-negative number, got {}",
        options.dt
    );

    let aspect = options.width as f32 / options.height as f32;
    let context = FrameContext::from_config(config, aspect);
    let backend = HeadlessBackend::new(options.width, options.height);
    let mut frame_loop = FrameLoop::new(context, backend);

    // Blocks so the model is in every frame
    if let Some(model) = &config.model {
        let mut loader = AssetLoader::new();
        loader.load_model(ModelRequest::from_config(model))?;
        loader.wait_all(&mut frame_loop.context_mut().scene);
    }

    log::info!(
        "Headless run: {} frames at {:.4}s, {}x{}",
        options.frames,
        options.dt,
        options.width,
        options.height
    );

    let mut report = FixedHz::new(1.0);
    let dt = f64::from(options.dt);
    for index in 0..options.frames {
        // Sample mid-frame so a step lasts round(duration / dt) frames
        let keys = script.at((f64::from(index) + 0.5) * dt);
        let frame = frame_loop.tick(options.dt, keys)?;

        if report.tick(frame.delta) {
            let target = frame_loop.context().target_transform();
            log::info!(
                "t={:.2}s frame {} cube ({:.1}, {:.1}, {:.1}) heading {:.0}°",
                frame.time,
                frame.number,
                target.position.x,
                target.position.y,
                target.position.z,
                target.heading().to_degrees()
            );
        }
    }

    if let Some(path) = &options.output {
        save_frame(frame_loop.backend().framebuffer(), path)?;
    }

    let context = frame_loop.context();
    let target = context.target_transform();
    Ok(HeadlessSummary {
        frames: frame_loop.frame_number(),
        elapsed: frame_loop.elapsed(),
        cube_position: target.position,
        cube_heading: target.heading(),
        camera_position: context.camera.position,
    })
}
