pub mod clock;
pub mod controller;
pub mod frame;
pub mod gpu_context;
pub mod input_adapter;
pub mod surface_renderer;
pub mod timer;
pub mod window;

pub use clock::Clock;
pub use controller::{Button, Controller, KeySnapshot};
pub use frame::FrameInfo;
pub use gpu_context::GpuContext;
pub use input_adapter::WinitController;
pub use surface_renderer::SurfaceRenderer;
pub use timer::FixedHz;
pub use window::{toggle_fullscreen, WindowContext, WindowDimensions};
