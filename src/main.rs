//! Meadow - procedural terrain with an instanced grass field

use std::path::PathBuf;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowId},
};

use meadow::core::{
    Error,
    camera::Camera,
    camera_controller::FpsCameraController,
    input::InputState,
    logging,
    time::FrameTimer,
};
use meadow::generation::{GeneratedWorld, GenerationPipeline};
use meadow::render::{GpuContext, SceneRenderer};
use meadow::scene::{SceneConfig, flag_str, parse_flag};

struct App {
    config: SceneConfig,
    world: GeneratedWorld,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    renderer: Option<SceneRenderer>,
    camera: Camera,
    controller: FpsCameraController,
    input: InputState,
    timer: FrameTimer,
    cursor_grabbed: bool,
    /// Set when window or GPU setup fails; the process exits non-zero
    fatal: Option<Error>,
}

impl App {
    fn new(config: SceneConfig, world: GeneratedWorld) -> Self {
        let cam = &config.camera;
        let mut camera = Camera::look_at(config.camera_position(), config.camera_target(), glam::Vec3::Y);
        camera.fov_y_degrees = cam.fov_degrees;
        camera.near = cam.near;
        camera.far = cam.far;
        camera.set_aspect(config.window.width as f32, config.window.height as f32);

        let mut controller = FpsCameraController::new(cam.speed, cam.sensitivity);
        controller.sync_with(&camera);

        Self {
            config,
            world,
            window: None,
            gpu: None,
            renderer: None,
            camera,
            controller,
            input: InputState::new(),
            timer: FrameTimer::new(),
            cursor_grabbed: false,
            fatal: None,
        }
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<(), Error> {
        let window_config = &self.config.window;
        let window_attrs = Window::default_attributes()
            .with_title(window_config.title.clone())
            .with_inner_size(PhysicalSize::new(window_config.width, window_config.height));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .map_err(|e| Error::Window(format!("Failed to create window: {}", e)))?,
        );

        let gpu = pollster::block_on(GpuContext::new(window.clone()))?;

        let size = window.inner_size();
        self.camera.set_aspect(size.width as f32, size.height as f32);

        log::info!("Window created: {}x{}", size.width, size.height);

        let renderer = SceneRenderer::new(&gpu, &self.world, &self.config)?;

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.gpu = Some(gpu);
        Ok(())
    }

    fn toggle_cursor_grab(&mut self) {
        if let Some(window) = &self.window {
            self.cursor_grabbed = !self.cursor_grabbed;

            if self.cursor_grabbed {
                window.set_cursor_grab(CursorGrabMode::Confined)
                    .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked))
                    .ok();
                window.set_cursor_visible(false);
            } else {
                window.set_cursor_grab(CursorGrabMode::None).ok();
                window.set_cursor_visible(true);
            }

            self.input.set_mouse_captured(self.cursor_grabbed);
        }
    }

    fn frame(&mut self) {
        self.timer.tick();
        let dt = self.timer.delta_secs();

        self.input.begin_frame();
        self.controller.update(&mut self.camera, &self.input, dt);

        if let (Some(gpu), Some(renderer)) = (&mut self.gpu, &self.renderer) {
            renderer.render(gpu, &self.camera);
        }

        if let Some(window) = &self.window {
            window.set_title(&format!(
                "{} - {:.1} FPS | {} blades | Tab=mouse, WASD=move, scroll=zoom",
                self.config.window.title,
                self.timer.fps(),
                self.world.grass.len(),
            ));
        }

        self.input.end_frame();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init_graphics(event_loop) {
            log::error!("{}", e);
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.process_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    if let Some(gpu) = &mut self.gpu {
                        gpu.resize(size.width, size.height);
                        self.camera.set_aspect(size.width as f32, size.height as f32);

                        if let Some(renderer) = &mut self.renderer {
                            renderer.resize(&gpu.device, size.width, size.height);
                        }
                    }
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() && !event.repeat {
                    match event.physical_key {
                        PhysicalKey::Code(KeyCode::Escape) => {
                            if self.cursor_grabbed {
                                self.toggle_cursor_grab();
                            } else {
                                event_loop.exit();
                            }
                        }
                        PhysicalKey::Code(KeyCode::Tab) => self.toggle_cursor_grab(),
                        _ => {}
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if state.is_pressed() && button == winit::event::MouseButton::Left && !self.cursor_grabbed {
                    self.toggle_cursor_grab();
                }
            }
            WindowEvent::RedrawRequested => {
                self.frame();

                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.input.process_mouse_motion(delta);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() {
    logging::init();
    log::info!("Meadow starting...");

    let args: Vec<String> = std::env::args().collect();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    // Generation finishes before any window or GPU resource exists
    let world = match GenerationPipeline::new(&config.generation()) {
        Ok(pipeline) => pipeline.generate(),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            std::process::exit(1);
        }
    };

    let mut app = App::new(config, world);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
        std::process::exit(1);
    }

    if app.fatal.is_some() {
        std::process::exit(1);
    }
}

/// Build the scene configuration from `--config`, then apply `--seed` and `--grass`
fn load_config(args: &[String]) -> Result<SceneConfig, Error> {
    let mut config = match parse_config_arg(args) {
        Some(path) => {
            log::info!("Loading scene config from: {}", path.display());
            SceneConfig::load(&path)?
        }
        None => SceneConfig::default(),
    };

    if let Some(seed) = parse_flag(args, "--seed")? {
        config.grass.seed = Some(seed);
    }
    if let Some(count) = parse_flag(args, "--grass")? {
        config.grass.count = count;
    }

    config.validate()?;
    Ok(config)
}

/// Parse --config argument from command line
fn parse_config_arg(args: &[String]) -> Option<PathBuf> {
    flag_str(args, "--config").or_else(|| flag_str(args, "-c")).map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults_without_flags() {
        let config = load_config(&args(&["meadow"])).unwrap();
        assert_eq!(config, SceneConfig::default());
    }

    #[test]
    fn test_seed_and_grass_overrides() {
        let config = load_config(&args(&["meadow", "--seed", "42", "--grass", "10"])).unwrap();
        assert_eq!(config.grass.seed, Some(42));
        assert_eq!(config.grass.count, 10);
    }

    #[test]
    fn test_invalid_flag_values() {
        assert!(load_config(&args(&["meadow", "--seed", "abc"])).is_err());
        assert!(load_config(&args(&["meadow", "--grass", "-5"])).is_err());
    }

    #[test]
    fn test_flag_without_value_is_ignored() {
        assert_eq!(parse_config_arg(&args(&["meadow", "--config"])), None);
        assert_eq!(load_config(&args(&["meadow", "--seed"])).unwrap().grass.seed, None);
    }
}
