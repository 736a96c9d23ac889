//! Scene configuration loaded from JSON
//!
//! Every field is optional; the defaults reproduce the classic chase-camera
//! demo (a 50 unit cube driven at 200 units/s with the camera trailing
//! 200 units behind and 50 above).

use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::f32::consts::FRAC_PI_2;
use std::path::{Path, PathBuf};

use crate::core::Button;
use crate::math::Color;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    pub chase: ChaseConfig,
    pub camera: CameraConfig,
    pub cube: CubeConfig,
    pub floor: FloorConfig,
    pub sky: SkyConfig,
    pub light: LightConfig,
    pub ambient: Color,
    /// Fraction of the window resolution the ray caster renders at
    pub render_scale: f32,
    pub model: Option<ModelConfig>,
    pub bindings: KeyBindings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChaseConfig {
    /// Units per second
    pub move_speed: f32,
    /// Radians per second
    pub turn_speed: f32,
    /// Camera position in the controlled object's local frame
    pub camera_offset: [f32; 3],
    pub spawn: [f32; 3],
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CubeConfig {
    pub size: f32,
    /// +X, -X, +Y, -Y, +Z, -Z
    pub face_colors: [Color; 6],
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FloorConfig {
    pub size: f32,
    pub height: f32,
    pub color: Color,
    pub checker_color: Color,
    pub checker_cell: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SkyConfig {
    pub size: f32,
    pub color: Color,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightConfig {
    pub color: Color,
    pub intensity: f32,
    /// Falloff distance; 0 disables falloff
    pub distance: f32,
    pub position: [f32; 3],
    pub marker_radius: f32,
    pub orbit: Option<OrbitConfig>,
}

/// Lissajous wobble of the light around its configured position
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrbitConfig {
    pub amplitude: [f32; 3],
    pub rates: [f32; 3],
    pub time_scale: f32,
    /// Orbit the world origin instead, ignoring `light.position` once moving
    pub around_origin: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default = "ModelConfig::default_scale")]
    pub scale: f32,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeyBindings {
    pub forward: Button,
    pub backward: Button,
    pub strafe_left: Button,
    pub strafe_right: Button,
    pub turn_left: Button,
    pub turn_right: Button,
    pub reset: Button,
    pub fullscreen: Button,
}

impl SceneConfig {
    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        log::info!("Loaded scene config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: SceneConfig = serde_json::from_str(text).context("Failed to parse scene config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let chase = &self.chase;
        ensure!(chase.move_speed.is_finite(), "chase.move_speed must be finite");
        ensure!(chase.turn_speed.is_finite(), "chase.turn_speed must be finite");
        ensure!(
            chase.camera_offset.iter().chain(&chase.spawn).all(|v| v.is_finite()),
            "chase vectors must be finite"
        );

        let camera = &self.camera;
        ensure!(
            camera.fov > 0.0 && camera.fov < 180.0,
            "camera.fov must be between 0 and 180 degrees, got {}",
            camera.fov
        );
        ensure!(camera.near > 0.0, "camera.near must be positive");
        ensure!(camera.far > camera.near, "camera.far must exceed camera.near");

        ensure!(self.cube.size > 0.0, "cube.size must be positive");
        ensure!(self.floor.size > 0.0, "floor.size must be positive");
        ensure!(self.floor.checker_cell > 0.0, "floor.checker_cell must be positive");
        ensure!(self.sky.size > 0.0, "sky.size must be positive");
        ensure!(self.light.intensity >= 0.0, "light.intensity must not be negative");
        ensure!(self.light.distance >= 0.0, "light.distance must not be negative");
        ensure!(self.light.marker_radius >= 0.0, "light.marker_radius must not be negative");
        ensure!(
            self.render_scale > 0.0 && self.render_scale <= 1.0,
            "render_scale must be in (0, 1], got {}",
            self.render_scale
        );
        if let Some(model) = &self.model {
            ensure!(model.scale > 0.0, "model.scale must be positive");
        }
        Ok(())
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            chase: ChaseConfig::default(),
            camera: CameraConfig::default(),
            cube: CubeConfig::default(),
            floor: FloorConfig::default(),
            sky: SkyConfig::default(),
            light: LightConfig::default(),
            ambient: Color::from_hex(0x444444),
            render_scale: 0.5,
            model: None,
            bindings: KeyBindings::default(),
        }
    }
}

impl Default for ChaseConfig {
    fn default() -> Self {
        Self {
            move_speed: 200.0,
            turn_speed: FRAC_PI_2,
            camera_offset: [0.0, 50.0, 200.0],
            spawn: [0.0, 25.1, 0.0],
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 45.0,
            near: 0.1,
            far: 20000.0,
        }
    }
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            size: 50.0,
            face_colors: [
                Color::from_hex(0xff3333),
                Color::from_hex(0xff8800),
                Color::from_hex(0xffff33),
                Color::from_hex(0x33ff33),
                Color::from_hex(0x3333ff),
                Color::from_hex(0x8833ff),
            ],
        }
    }
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            size: 1000.0,
            height: -0.5,
            color: Color::from_hex(0xdddddd),
            checker_color: Color::from_hex(0x555555),
            checker_cell: 100.0,
        }
    }
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            size: 10000.0,
            color: Color::from_hex(0x9999ff),
        }
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            intensity: 1.0,
            distance: 0.0,
            position: [0.0, 250.0, 0.0],
            marker_radius: 5.0,
            orbit: Some(OrbitConfig::default()),
        }
    }
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            amplitude: [30.0, 40.0, 30.0],
            rates: [0.7, 0.5, 0.3],
            time_scale: 0.5,
            around_origin: false,
        }
    }
}

impl ModelConfig {
    /// Model at the origin, unscaled, with its own colors
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            position: [0.0; 3],
            scale: Self::default_scale(),
            color: None,
        }
    }

    fn default_scale() -> f32 {
        1.0
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: Button::KeyW,
            backward: Button::KeyS,
            strafe_left: Button::KeyQ,
            strafe_right: Button::KeyE,
            turn_left: Button::KeyA,
            turn_right: Button::KeyD,
            reset: Button::KeyZ,
            fullscreen: Button::KeyM,
        }
    }
}
