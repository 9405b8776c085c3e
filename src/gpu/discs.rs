//! Instanced gradient-disc rendering.
//!
//! Each disc instance becomes a screen-space quad; the fragment shader
//! evaluates a three-stop radial gradient (stops at 0, 0.3 and 1.0 of
//! the radius) with a smoothed edge.

use bytemuck::{Pod, Zeroable};

use super::InstanceBuffer;
use crate::draw::Disc;

/// One disc instance as uploaded to the GPU.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub(super) struct DiscInstance {
    center: [f32; 2],
    radius: f32,
    _pad: f32,
    color_center: [f32; 4],
    color_mid: [f32; 4],
    color_edge: [f32; 4],
}

impl DiscInstance {
    pub(super) fn from_disc(disc: &Disc) -> Self {
        Self {
            center: disc.center.to_array(),
            radius: disc.radius,
            _pad: 0.0,
            color_center: disc.stops[0].to_array(),
            color_mid: disc.stops[1].to_array(),
            color_edge: disc.stops[2].to_array(),
        }
    }
}

pub(super) struct DiscPipeline {
    pipeline: wgpu::RenderPipeline,
    instances: InstanceBuffer,
}

impl DiscPipeline {
    pub(super) fn new(
        device: &wgpu::Device,
        uniform_layout: &wgpu::BindGroupLayout,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Disc Shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Disc Pipeline Layout"),
            bind_group_layouts: &[uniform_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Disc Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<DiscInstance>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &[
                        wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 0,
                            format: wgpu::VertexFormat::Float32x2, // center
                        },
                        wgpu::VertexAttribute {
                            offset: 8,
                            shader_location: 1,
                            format: wgpu::VertexFormat::Float32, // radius
                        },
                        wgpu::VertexAttribute {
                            offset: 16,
                            shader_location: 2,
                            format: wgpu::VertexFormat::Float32x4, // center color
                        },
                        wgpu::VertexAttribute {
                            offset: 32,
                            shader_location: 3,
                            format: wgpu::VertexFormat::Float32x4, // mid color
                        },
                        wgpu::VertexAttribute {
                            offset: 48,
                            shader_location: 4,
                            format: wgpu::VertexFormat::Float32x4, // edge color
                        },
                    ],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
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
        });

        Self {
            pipeline,
            instances: InstanceBuffer::new(device, "Disc Instance Buffer"),
        }
    }

    pub(super) fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        instances: &[DiscInstance],
    ) {
        self.instances.upload(device, queue, instances);
    }

    pub(super) fn draw<'pass>(&'pass self, render_pass: &mut wgpu::RenderPass<'pass>) {
        if self.instances.count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_vertex_buffer(0, self.instances.buffer.slice(..));
        render_pass.draw(0..6, 0..self.instances.count);
    }
}

const SHADER: &str = r#"
struct Uniforms {
    resolution: vec2<f32>,
    time: f32,
};

@group(0) @binding(0) var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) center: vec2<f32>,
    @location(1) radius: f32,
    @location(2) color_center: vec4<f32>,
    @location(3) color_mid: vec4<f32>,
    @location(4) color_edge: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) color_center: vec4<f32>,
    @location(2) color_mid: vec4<f32>,
    @location(3) color_edge: vec4<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32, in: VertexInput) -> VertexOutput {
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );

    let quad_pos = quad_vertices[vertex_index];
    let pos = in.center + quad_pos * in.radius;
    let ndc = pos / uniforms.resolution * 2.0 - vec2<f32>(1.0, 1.0);

    var out: VertexOutput;
    out.clip_position = vec4<f32>(ndc.x, -ndc.y, 0.0, 1.0);
    out.uv = quad_pos;
    out.color_center = in.color_center;
    out.color_mid = in.color_mid;
    out.color_edge = in.color_edge;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let dist = length(in.uv);
    if dist > 1.0 {
        discard;
    }

    // Three-stop radial gradient with stops at 0, 0.3 and 1.0.
    var color: vec4<f32>;
    if dist < 0.3 {
        color = mix(in.color_center, in.color_mid, dist / 0.3);
    } else {
        color = mix(in.color_mid, in.color_edge, (dist - 0.3) / 0.7);
    }

    // Soften the rim so solid discs don't alias.
    color.a *= 1.0 - smoothstep(0.85, 1.0, dist);
    return color;
}
"#;
