//! Window lifecycle and the frame loop.
//!
//! [`StageLight`] is the user-facing builder; internally it drives a winit
//! `ApplicationHandler` that owns the window, GPU state, simulation and input
//! tracker, and runs one simulation step plus one render per redraw.

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::config::EXPORT_BASENAME;
use crate::error::AppError;
use crate::gpu::{export, scene, GpuState};
use crate::input::{Input, KeyCode};
use crate::sim::Stage;
use crate::time::Time;

const DEFAULT_TITLE: &str = "Stage Light Particles";
const DEFAULT_SIZE: (u32, u32) = (1280, 720);

/// Builder for the stage light scene.
///
/// ```no_run
/// use stagelight::StageLight;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     StageLight::new().with_seed(7).run()?;
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct StageLight {
    title: String,
    size: (u32, u32),
    seed: u64,
}

impl StageLight {
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            size: DEFAULT_SIZE,
            seed: 0,
        }
    }

    /// Window title prefix; the mode label and FPS are appended at runtime.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Initial window size in logical pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Seed for particle spawning, the flow field and ripple speeds. The
    /// same seed and input trace replay the same scene.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Open the window and run until closed. Blocks the calling thread.
    pub fn run(self) -> Result<(), AppError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for StageLight {
    fn default() -> Self {
        Self::new()
    }
}

/// The running application. Window and GPU state only exist between
/// `resumed` and exit.
struct App {
    settings: StageLight,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    stage: Option<Stage>,
    input: Input,
    time: Time,
    /// Fatal startup error carried out of the event loop.
    error: Option<AppError>,
}

impl App {
    fn new(settings: StageLight) -> Self {
        Self {
            settings,
            window: None,
            gpu: None,
            stage: None,
            input: Input::new(),
            time: Time::new(),
            error: None,
        }
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(gpu), Some(stage)) =
            (self.window.as_ref(), self.gpu.as_mut(), self.stage.as_mut())
        else {
            return;
        };

        self.time.update();

        if self.input.key_pressed(KeyCode::Escape) {
            event_loop.exit();
            return;
        }

        let frame_input = self.input.snapshot();
        self.input.begin_frame();

        stage.step(&frame_input);

        if frame_input.clear {
            gpu.request_clear();
        }

        if frame_input.save {
            let path = export::numbered_path(EXPORT_BASENAME);
            match gpu.export_png(&path) {
                Ok(()) => println!("Saved {}", path.display()),
                Err(e) => eprintln!("Export failed: {e}"),
            }
        }

        let discs = scene::build_discs(stage, frame_input.pointer);
        let rings = scene::build_rings(stage);

        match gpu.render(&discs, &rings) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                let (w, h) = gpu.size();
                gpu.resize(w, h);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                eprintln!("GPU out of memory, exiting");
                event_loop.exit();
                return;
            }
            Err(e) => eprintln!("Render error: {e}"),
        }

        // refresh the title at the FPS-estimate cadence, not every frame
        if self.time.frame() % 30 == 0 {
            window.set_title(&format!(
                "{} | {} | {:.0} FPS",
                self.settings.title,
                stage.mode.label(),
                self.time.fps()
            ));
        }

        window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(&self.settings.title)
            .with_inner_size(LogicalSize::new(self.settings.size.0, self.settings.size.1));

        let window = match event_loop.create_window(attributes) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.error = Some(e.into());
                event_loop.exit();
                return;
            }
        };

        let gpu = match pollster::block_on(GpuState::new(window.clone())) {
            Ok(gpu) => gpu,
            Err(e) => {
                self.error = Some(e.into());
                event_loop.exit();
                return;
            }
        };

        let (width, height) = gpu.size();
        self.stage = Some(Stage::new(width as f32, height as f32, self.settings.seed));
        self.gpu = Some(gpu);

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        if window.id() != window_id {
            return;
        }

        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(size.width, size.height);
                }
                if let Some(stage) = self.stage.as_mut() {
                    stage.resize(size.width.max(1) as f32, size.height.max(1) as f32);
                }
            }
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => {}
        }
    }
}
