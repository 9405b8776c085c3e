//! Instanced line-segment rendering.
//!
//! Each segment instance is expanded to a quad along its perpendicular
//! in the vertex shader; endpoint colors are interpolated along the
//! length so trails fade to transparent.

use bytemuck::{Pod, Zeroable};

use super::InstanceBuffer;
use crate::draw::Segment;

/// One segment instance as uploaded to the GPU.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub(super) struct LineInstance {
    start: [f32; 2],
    end: [f32; 2],
    width: f32,
    _pad: [f32; 3],
    start_color: [f32; 4],
    end_color: [f32; 4],
}

impl LineInstance {
    pub(super) fn from_segment(segment: &Segment) -> Self {
        Self {
            start: segment.start.to_array(),
            end: segment.end.to_array(),
            width: segment.width,
            _pad: [0.0; 3],
            start_color: segment.start_color.to_array(),
            end_color: segment.end_color.to_array(),
        }
    }
}

pub(super) struct LinePipeline {
    pipeline: wgpu::RenderPipeline,
    instances: InstanceBuffer,
}

impl LinePipeline {
    pub(super) fn new(
        device: &wgpu::Device,
        uniform_layout: &wgpu::BindGroupLayout,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Line Shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Line Pipeline Layout"),
            bind_group_layouts: &[uniform_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Line Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<LineInstance>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &[
                        wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 0,
                            format: wgpu::VertexFormat::Float32x2, // start
                        },
                        wgpu::VertexAttribute {
                            offset: 8,
                            shader_location: 1,
                            format: wgpu::VertexFormat::Float32x2, // end
                        },
                        wgpu::VertexAttribute {
                            offset: 16,
                            shader_location: 2,
                            format: wgpu::VertexFormat::Float32, // width
                        },
                        wgpu::VertexAttribute {
                            offset: 32,
                            shader_location: 3,
                            format: wgpu::VertexFormat::Float32x4, // start color
                        },
                        wgpu::VertexAttribute {
                            offset: 48,
                            shader_location: 4,
                            format: wgpu::VertexFormat::Float32x4, // end color
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
            instances: InstanceBuffer::new(device, "Line Instance Buffer"),
        }
    }

    pub(super) fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        instances: &[LineInstance],
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
    @location(0) start: vec2<f32>,
    @location(1) end: vec2<f32>,
    @location(2) width: f32,
    @location(3) start_color: vec4<f32>,
    @location(4) end_color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

fn to_clip(pos: vec2<f32>) -> vec4<f32> {
    let ndc = pos / uniforms.resolution * 2.0 - vec2<f32>(1.0, 1.0);
    return vec4<f32>(ndc.x, -ndc.y, 0.0, 1.0);
}

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32, in: VertexInput) -> VertexOutput {
    let dir = in.end - in.start;
    let len = max(length(dir), 1e-4);
    let perp = vec2<f32>(-dir.y, dir.x) / len * (in.width * 0.5);

    var pos: vec2<f32>;
    var t: f32;
    switch vertex_index {
        case 0u: { pos = in.start - perp; t = 0.0; }
        case 1u: { pos = in.start + perp; t = 0.0; }
        case 2u: { pos = in.end - perp; t = 1.0; }
        case 3u: { pos = in.start + perp; t = 0.0; }
        case 4u: { pos = in.end - perp; t = 1.0; }
        default: { pos = in.end + perp; t = 1.0; }
    }

    var out: VertexOutput;
    out.clip_position = to_clip(pos);
    out.color = mix(in.start_color, in.end_color, t);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;
