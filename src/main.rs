use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use chase_camera::cli::Cli;
use chase_camera::config::SceneConfig;
use chase_camera::core::{toggle_fullscreen, Clock, WindowContext, WinitController};
use chase_camera::headless::{self, ScriptedInput};
use chase_camera::loaders::{AssetLoader, ModelRequest};
use chase_camera::render::WindowBackend;
use chase_camera::{FrameContext, FrameLoop};

const INITIAL_WINDOW_WIDTH: u32 = 800;
const INITIAL_WINDOW_HEIGHT: u32 = 600;

struct App {
    config: SceneConfig,
    show_ui: bool,
    window: Option<Arc<Window>>,
    frame_loop: Option<FrameLoop<WindowBackend>>,
    input: WinitController,
    clock: Clock,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: SceneConfig, show_ui: bool) -> Self {
        Self {
            config,
            show_ui,
            window: None,
            frame_loop: None,
            input: WinitController::new(),
            clock: Clock::new(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = Arc::new(
            event_loop.create_window(
                Window::default_attributes()
                    .with_title("Chase Camera")
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        INITIAL_WINDOW_WIDTH,
                        INITIAL_WINDOW_HEIGHT,
                    )),
            )?,
        );

        let backend = WindowBackend::new(window.clone(), self.config.render_scale, self.show_ui)?;
        let context = FrameContext::from_config(&self.config, window.dimensions().aspect());

        let mut assets = AssetLoader::new();
        if let Some(model) = &self.config.model {
            assets.load_model(ModelRequest::from_config(model))?;
        }

        self.frame_loop = Some(FrameLoop::new(context, backend).with_assets(assets));
        self.window = Some(window);
        self.clock.reset();
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            log::error!("Failed to initialize: {:#}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let (Some(frame_loop), Some(window)) = (self.frame_loop.as_mut(), self.window.as_ref()) else {
            return;
        };

        // Let egui handle the event first
        if frame_loop.backend_mut().handle_event(&event) {
            return;
        }
        self.input.process_event(&event);

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => frame_loop.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                if self.input.was_pressed(self.config.bindings.fullscreen) {
                    let fullscreen = toggle_fullscreen(&**window);
                    log::info!("Fullscreen {}", if fullscreen { "on" } else { "off" });
                }

                if let Err(e) = frame_loop.advance(&mut self.clock, &self.input) {
                    log::error!("{:#}", e);
                }
                self.input.end_frame();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.scene_config()?;

    if cli.headless {
        let script = ScriptedInput::parse(&cli.script)?;
        let summary = headless::run(&config, &cli.headless_options(), &script)?;
        log::info!(
            "Finished {} frames ({:.2}s): cube at ({:.1}, {:.1}, {:.1}), heading {:.0}°",
            summary.frames,
            summary.elapsed,
            summary.cube_position.x,
            summary.cube_position.y,
            summary.cube_position.z,
            summary.cube_heading.to_degrees()
        );
        return Ok(());
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, !cli.no_ui);

    log::info!("Chase Camera - Controls: W/S move, Q/E strafe, A/D turn, Z reset, M fullscreen, Escape to quit");
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
