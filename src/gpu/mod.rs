//! GPU state and per-frame render orchestration.
//!
//! One frame is three passes: the canvas pass (fade quad, then additive disc
//! and ring batches into the persistent canvas texture), and a blit pass that
//! presents the canvas on the surface.

pub mod canvas;
pub mod export;
pub mod scene;
pub mod sprites;

use std::path::Path;
use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::error::{ExportError, GpuError};
use canvas::{CanvasState, CANVAS_FORMAT};
use sprites::{DiscInstance, RingInstance, SpriteState, DISC_CAPACITY, RING_CAPACITY};

/// Per-frame shader uniforms. Padded to 16 bytes for WGSL struct layout.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    resolution: [f32; 2],
    _pad: [f32; 2],
}

/// Everything needed to render frames to a window.
pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    uniform_buffer: wgpu::Buffer,
    canvas: CanvasState,
    sprites: SpriteState,
}

impl GpuState {
    /// Initialize the GPU for the given window.
    pub async fn new(window: Arc<Window>) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Stage Light Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let surface_format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Uniform Buffer"),
            contents: bytemuck::bytes_of(&Uniforms {
                resolution: [config.width as f32, config.height as f32],
                _pad: [0.0; 2],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let canvas = CanvasState::new(&device, config.width, config.height, surface_format);
        let sprites = SpriteState::new(&device, &uniform_buffer, CANVAS_FORMAT);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            uniform_buffer,
            canvas,
            sprites,
        })
    }

    /// Current surface size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Reconfigure for a resized window. The canvas restarts from black.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.canvas
            .resize(&self.device, self.config.width, self.config.height);
        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                resolution: [self.config.width as f32, self.config.height as f32],
                _pad: [0.0; 2],
            }),
        );
    }

    /// Clear the canvas to black at the start of the next frame.
    pub fn request_clear(&mut self) {
        self.canvas.request_clear();
    }

    /// Render one frame: fade, sprite batches into the canvas, blit, present.
    pub fn render(
        &mut self,
        discs: &[DiscInstance],
        rings: &[RingInstance],
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let surface_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let discs = &discs[..discs.len().min(DISC_CAPACITY)];
        let rings = &rings[..rings.len().min(RING_CAPACITY)];
        self.queue
            .write_buffer(&self.sprites.disc_buffer, 0, bytemuck::cast_slice(discs));
        self.queue
            .write_buffer(&self.sprites.ring_buffer, 0, bytemuck::cast_slice(rings));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut pass = self.canvas.begin_frame(&mut encoder);

            pass.set_bind_group(0, &self.sprites.bind_group, &[]);

            pass.set_pipeline(&self.sprites.disc_pipeline);
            pass.set_vertex_buffer(0, self.sprites.disc_buffer.slice(..));
            pass.draw(0..6, 0..discs.len() as u32);

            pass.set_pipeline(&self.sprites.ring_pipeline);
            pass.set_vertex_buffer(0, self.sprites.ring_buffer.slice(..));
            pass.draw(0..6, 0..rings.len() as u32);
        }

        self.canvas.blit(&mut encoder, &surface_view);

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        Ok(())
    }

    /// Save the accumulated canvas as a PNG.
    pub fn export_png(&self, path: &Path) -> Result<(), ExportError> {
        export::save_png(&self.device, &self.queue, &self.canvas.texture, path)
    }
}
