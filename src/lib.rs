pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod frame_loop;
pub mod headless;
pub mod loaders;
pub mod math;
pub mod render;
pub mod scene;
pub mod scenes;
pub mod stats;
pub mod transform;

pub use frame_loop::{ChaseSettings, FrameContext, FrameLoop, LightOrbit};
pub use scenes::create_chase_scene;
