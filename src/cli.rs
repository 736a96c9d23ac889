// cli.rs - Command-line interface configuration
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::config::{ModelConfig, SceneConfig};
use crate::headless::HeadlessOptions;

#[derive(Parser, Debug, Clone)]
#[command(name = "chase-camera")]
#[command(about = "Drive a cube around with a chase camera in tow", long_about = None)]
pub struct Cli {
    /// Disable the stats overlay
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Run without a window for a fixed number of frames
    #[arg(long)]
    pub headless: bool,

    /// Frames to simulate in headless mode
    #[arg(long, default_value_t = 300)]
    pub frames: u32,

    /// Seconds per frame in headless mode
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub dt: f32,

    /// Held keys over time in headless mode, e.g. "w+a:1.5,s:0.5,:1"
    #[arg(long, default_value = "")]
    pub script: String,

    /// Headless frame width
    #[arg(long, default_value_t = 320)]
    pub width: u32,

    /// Headless frame height
    #[arg(long, default_value_t = 240)]
    pub height: u32,

    /// Scene configuration file (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// glTF model to load into the scene
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Save the last headless frame as an image (.ppm or .png)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Ray cast resolution relative to the window, in (0, 1]
    #[arg(long)]
    pub render_scale: Option<f32>,
}

impl Cli {
    /// Scene config from `--config` (or defaults) with command-line overrides applied
    pub fn scene_config(&self) -> Result<SceneConfig> {
        let mut config = match &self.config {
            Some(path) => SceneConfig::load(path)?,
            None => SceneConfig::default(),
        };

        if let Some(path) = &self.model {
            config.model = Some(ModelConfig::new(path));
        }
        if let Some(scale) = self.render_scale {
            config.render_scale = scale;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn headless_options(&self) -> HeadlessOptions {
        HeadlessOptions {
            frames: self.frames,
            dt: self.dt,
            width: self.width,
            height: self.height,
            output: self.output.clone(),
        }
    }
}
