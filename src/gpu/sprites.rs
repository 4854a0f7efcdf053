//! Instanced sprite pipelines: additive soft discs and stroked rings.
//!
//! Everything visible in the scene is one of two sprites. Discs render the
//! spotlight halo and particle glows; rings render ripples. Both pipelines
//! pull a unit quad from the vertex shader and expand it per instance, the
//! fragment shader shaping the sprite from the quad's local UV.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::config::{MAX_RIPPLES, PARTICLE_COUNT, SPOT_RINGS};

/// One filled soft-edged disc.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct DiscInstance {
    /// Center in canvas pixels.
    pub center: [f32; 2],
    /// Disc radius in pixels.
    pub radius: f32,
    /// Edge softness in pixels (0 = hard edge).
    pub feather: f32,
    /// RGBA, 0..1, alpha premultiplied by the blend state at draw time.
    pub color: [f32; 4],
}

impl DiscInstance {
    pub fn new(center: Vec2, radius: f32, feather: f32, color: [f32; 4]) -> Self {
        Self {
            center: center.to_array(),
            radius,
            feather,
            color,
        }
    }
}

/// One stroked circle outline.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct RingInstance {
    /// Center in canvas pixels.
    pub center: [f32; 2],
    /// Ring radius in pixels.
    pub radius: f32,
    /// Stroke width in pixels.
    pub width: f32,
    /// RGBA, 0..1.
    pub color: [f32; 4],
}

impl RingInstance {
    pub fn new(center: Vec2, radius: f32, width: f32, color: [f32; 4]) -> Self {
        Self {
            center: center.to_array(),
            radius,
            width,
            color,
        }
    }
}

/// Largest disc batch a frame can produce: spotlight halo + core, then two
/// glow discs per particle.
pub const DISC_CAPACITY: usize = SPOT_RINGS as usize + 1 + PARTICLE_COUNT * 2;

/// Largest ring batch: two rings per renderable ripple.
pub const RING_CAPACITY: usize = MAX_RIPPLES * 2;

const DISC_SHADER: &str = r#"
struct Uniforms {
    resolution: vec2<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) color: vec4<f32>,
    @location(2) radius: f32,
    @location(3) feather: f32,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) center: vec2<f32>,
    @location(1) radius: f32,
    @location(2) feather: f32,
    @location(3) color: vec4<f32>,
) -> VertexOutput {
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );

    let quad_pos = quad_vertices[vertex_index];
    let pixel = center + quad_pos * radius;

    // pixel space (origin top-left, y down) to NDC
    let ndc = vec2<f32>(
        pixel.x / uniforms.resolution.x * 2.0 - 1.0,
        1.0 - pixel.y / uniforms.resolution.y * 2.0,
    );

    var out: VertexOutput;
    out.clip_position = vec4<f32>(ndc, 0.0, 1.0);
    out.uv = quad_pos;
    out.color = color;
    out.radius = radius;
    out.feather = feather;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let d = length(in.uv) * in.radius;
    if d > in.radius {
        discard;
    }
    let edge0 = max(in.radius - max(in.feather, 1.0), 0.0);
    let alpha = in.color.a * (1.0 - smoothstep(edge0, in.radius, d));
    return vec4<f32>(in.color.rgb, alpha);
}
"#;

const RING_SHADER: &str = r#"
struct Uniforms {
    resolution: vec2<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) color: vec4<f32>,
    @location(2) radius: f32,
    @location(3) width: f32,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) center: vec2<f32>,
    @location(1) radius: f32,
    @location(2) width: f32,
    @location(3) color: vec4<f32>,
) -> VertexOutput {
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );

    let quad_pos = quad_vertices[vertex_index];
    let extent = radius + width;
    let pixel = center + quad_pos * extent;

    let ndc = vec2<f32>(
        pixel.x / uniforms.resolution.x * 2.0 - 1.0,
        1.0 - pixel.y / uniforms.resolution.y * 2.0,
    );

    var out: VertexOutput;
    out.clip_position = vec4<f32>(ndc, 0.0, 1.0);
    out.uv = quad_pos * extent;
    out.color = color;
    out.radius = radius;
    out.width = width;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let band = abs(length(in.uv) - in.radius);
    let half_width = in.width * 0.5;
    if band > half_width + 1.0 {
        discard;
    }
    // 1px antialiased stroke edge
    let alpha = in.color.a * (1.0 - smoothstep(half_width - 1.0, half_width + 1.0, band));
    return vec4<f32>(in.color.rgb, alpha);
}
"#;

/// Additive blending: dst + src * alpha (the p5 `ADD` blend mode).
fn additive_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::Zero,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

/// GPU resources for the disc and ring passes.
pub struct SpriteState {
    pub disc_pipeline: wgpu::RenderPipeline,
    pub ring_pipeline: wgpu::RenderPipeline,
    pub disc_buffer: wgpu::Buffer,
    pub ring_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl SpriteState {
    pub fn new(
        device: &wgpu::Device,
        uniform_buffer: &wgpu::Buffer,
        canvas_format: wgpu::TextureFormat,
    ) -> Self {
        let disc_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Disc Instance Buffer"),
            size: (DISC_CAPACITY * std::mem::size_of::<DiscInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let ring_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Ring Instance Buffer"),
            size: (RING_CAPACITY * std::mem::size_of::<RingInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Sprite Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Sprite Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sprite Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let disc_pipeline = create_sprite_pipeline(
            device,
            &pipeline_layout,
            DISC_SHADER,
            "Disc",
            canvas_format,
        );
        let ring_pipeline = create_sprite_pipeline(
            device,
            &pipeline_layout,
            RING_SHADER,
            "Ring",
            canvas_format,
        );

        Self {
            disc_pipeline,
            ring_pipeline,
            disc_buffer,
            ring_buffer,
            bind_group,
        }
    }
}

/// Both instance structs share the same layout: vec2 center, two f32 shape
/// params, vec4 color.
fn instance_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32,
        2 => Float32,
        3 => Float32x4,
    ];
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<DiscInstance>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &ATTRIBUTES,
    }
}

fn create_sprite_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader_src: &str,
    label: &str,
    canvas_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("{label} Shader")),
        source: wgpu::ShaderSource::Wgsl(shader_src.into()),
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{label} Pipeline")),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[instance_layout()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: canvas_format,
                blend: Some(additive_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_structs_share_stride() {
        assert_eq!(
            std::mem::size_of::<DiscInstance>(),
            std::mem::size_of::<RingInstance>()
        );
        assert_eq!(std::mem::size_of::<DiscInstance>(), 32);
    }

    #[test]
    fn test_disc_capacity_covers_spotlight_and_particles() {
        assert!(DISC_CAPACITY >= SPOT_RINGS as usize + 1 + PARTICLE_COUNT * 2);
    }
}
