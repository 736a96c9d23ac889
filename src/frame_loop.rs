//! Per-frame update of the chase demo
//!
//! Every tick: move and turn the controlled object from the held keys,
//! place the camera at a fixed offset in the object's frame, aim it at the
//! object, then hand the scene to the render backend.

use anyhow::{Context, Result};
use glam::Vec3;

use crate::camera::PerspectiveCamera;
use crate::config::{ChaseConfig, KeyBindings, OrbitConfig, SceneConfig};
use crate::core::{Clock, Controller, FrameInfo};
use crate::loaders::AssetLoader;
use crate::render::{RenderBackend, RenderRequest};
use crate::scene::{NodeId, Scene};
use crate::scenes::create_chase_scene;
use crate::stats::FrameStats;
use crate::transform::Transform;

/// Speeds and camera placement for the controlled object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChaseSettings {
    /// Units per second
    pub move_speed: f32,
    /// Radians per second
    pub turn_speed: f32,
    /// Camera position in the controlled object's local frame
    pub camera_offset: Vec3,
}

impl Default for ChaseSettings {
    fn default() -> Self {
        Self::from(&ChaseConfig::default())
    }
}

impl From<&ChaseConfig> for ChaseSettings {
    fn from(config: &ChaseConfig) -> Self {
        Self {
            move_speed: config.move_speed,
            turn_speed: config.turn_speed,
            camera_offset: Vec3::from_array(config.camera_offset),
        }
    }
}

/// Moves a light around a fixed center over time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightOrbit {
    pub light: usize,
    pub center: Vec3,
    pub amplitude: Vec3,
    pub rates: Vec3,
    pub time_scale: f32,
}

impl LightOrbit {
    /// `center` is the light's resting position; `around_origin` replaces it with the origin
    pub fn new(light: usize, center: Vec3, config: &OrbitConfig) -> Self {
        Self {
            light,
            center: if config.around_origin { Vec3::ZERO } else { center },
            amplitude: Vec3::from_array(config.amplitude),
            rates: Vec3::from_array(config.rates),
            time_scale: config.time_scale,
        }
    }

    pub fn position_at(&self, elapsed: f32) -> Vec3 {
        let t = elapsed * self.time_scale;
        self.center
            + Vec3::new(
                (t * self.rates.x).sin() * self.amplitude.x,
                (t * self.rates.y).cos() * self.amplitude.y,
                (t * self.rates.z).cos() * self.amplitude.z,
            )
    }
}

/// Scene, camera and the handle of the object the keys drive
#[derive(Debug, Clone)]
pub struct FrameContext {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    /// The controlled object
    pub target: NodeId,
    pub settings: ChaseSettings,
    pub bindings: KeyBindings,
    pub orbit: Option<LightOrbit>,
    spawn: Transform,
}

impl FrameContext {
    /// Wrap a scene; the target's current transform becomes its reset point
    pub fn new(scene: Scene, camera: PerspectiveCamera, target: NodeId) -> Self {
        let spawn = scene[target].transform;
        let mut context = Self {
            scene,
            camera,
            target,
            settings: ChaseSettings::default(),
            bindings: KeyBindings::default(),
            orbit: None,
            spawn,
        };
        context.follow();
        context
    }

    /// Chase scene and camera built from configuration
    pub fn from_config(config: &SceneConfig, aspect: f32) -> Self {
        let chase = create_chase_scene(config);
        let camera = PerspectiveCamera::new(config.camera.fov, aspect, config.camera.near, config.camera.far);

        let mut context = Self::new(chase.scene, camera, chase.cube);
        context.settings = ChaseSettings::from(&config.chase);
        context.bindings = config.bindings;
        context.orbit = config
            .light
            .orbit
            .as_ref()
            .map(|orbit| LightOrbit::new(chase.light, Vec3::from_array(config.light.position), orbit));
        context.follow();
        context
    }

    pub fn target_transform(&self) -> &Transform {
        &self.scene[self.target].transform
    }

    pub fn spawn(&self) -> &Transform {
        &self.spawn
    }

    /// Apply one frame of input, then re-aim the camera
    pub fn update(&mut self, dt: f32, elapsed: f32, keys: &dyn Controller) {
        let move_distance = self.settings.move_speed * dt;
        let rotate_angle = self.settings.turn_speed * dt;
        let bindings = self.bindings;
        let transform = &mut self.scene[self.target].transform;

        if keys.is_down(bindings.forward) {
            transform.translate_z(-move_distance);
        }
        if keys.is_down(bindings.backward) {
            transform.translate_z(move_distance);
        }
        if keys.is_down(bindings.strafe_left) {
            transform.translate_x(-move_distance);
        }
        if keys.is_down(bindings.strafe_right) {
            transform.translate_x(move_distance);
        }

        if keys.is_down(bindings.turn_left) {
            transform.rotate_on_axis(Vec3::Y, rotate_angle);
        }
        if keys.is_down(bindings.turn_right) {
            transform.rotate_on_axis(Vec3::Y, -rotate_angle);
        }

        if keys.is_down(bindings.reset) {
            *transform = self.spawn;
        }

        self.follow();

        if let Some(orbit) = self.orbit {
            self.scene.move_light(orbit.light, orbit.position_at(elapsed));
        }
    }

    /// Put the camera at its offset in the target's frame, looking at the target
    pub fn follow(&mut self) {
        let transform = self.scene[self.target].transform;
        self.camera.position = transform.local_to_world(self.settings.camera_offset);
        self.camera.look_at(transform.position);
    }
}

/// Drives a `FrameContext` and a render backend one tick at a time
pub struct FrameLoop<B: RenderBackend> {
    context: FrameContext,
    backend: B,
    assets: Option<AssetLoader>,
    stats: FrameStats,
    frame_number: u64,
    elapsed: f32,
}

impl<B: RenderBackend> FrameLoop<B> {
    pub fn new(context: FrameContext, backend: B) -> Self {
        Self {
            context,
            backend,
            assets: None,
            stats: FrameStats::new(),
            frame_number: 0,
            elapsed: 0.0,
        }
    }

    /// Attach models from this loader as they finish
    pub fn with_assets(mut self, assets: AssetLoader) -> Self {
        self.assets = Some(assets);
        self
    }

    /// Run one frame with `dt` seconds of simulated time
    ///
    /// A render failure is returned after the frame's state update and
    /// stats are committed, so the caller can log it and keep ticking.
    pub fn tick(&mut self, dt: f32, keys: &dyn Controller) -> Result<FrameInfo> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        if let Some(assets) = self.assets.as_mut() {
            assets.attach_ready(&mut self.context.scene);
        }

        self.elapsed += dt;
        self.context.update(dt, self.elapsed, keys);

        let frame = FrameInfo::new(self.frame_number, self.elapsed, dt);
        self.frame_number += 1;

        let rendered = self
            .backend
            .render(&RenderRequest {
                scene: &self.context.scene,
                camera: &self.context.camera,
                frame,
                stats: &self.stats,
                target: self.context.target,
            })
            .with_context(|| format!("Failed to render frame {}", frame.number));

        if self.stats.record(dt) {
            log::debug!("FPS: {:.1}", self.stats.fps);
        }

        rendered.map(|_| frame)
    }

    /// Tick with the time measured by `clock` since its previous tick
    pub fn advance(&mut self, clock: &mut Clock, keys: &dyn Controller) -> Result<FrameInfo> {
        let dt = clock.tick();
        self.tick(dt, keys)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.camera.resize(width, height);
        self.backend.resize(width, height);
    }

    pub fn context(&self) -> &FrameContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut FrameContext {
        &mut self.context
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn assets_mut(&mut self) -> Option<&mut AssetLoader> {
        self.assets.as_mut()
    }

    /// Simulated seconds since the first tick
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Number of ticks run so far
    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }
}
