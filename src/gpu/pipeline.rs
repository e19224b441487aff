//! Graphics Pipeline Assembly
//!
//! Combines one vertex and one fragment shader object, a vertex-input
//! layout and the surface's native color format into a render pipeline
//! with source-over alpha blending. Shader objects are consumed by value:
//! they are not needed after pipeline construction and drop on every exit
//! path, success or failure.
//!
//! Bind groups follow a fixed convention: group 0 holds the vertex stage's
//! resources, group 1 the fragment stage's, with uniform buffers at
//! bindings `0..n`. Per-frame uniform data is delivered through
//! [`GraphicsPipeline::push_fragment_uniform`].

use log::{error, warn};

use crate::errors::{GlintError, Result};
use crate::gpu::context::GpuContext;
use crate::gpu::shader::{Shader, ShaderStage};

/// Size of one uniform slot's backing buffer. Large enough for the demo's
/// per-frame payloads; pushes are range-checked against it.
const UNIFORM_SLOT_SIZE: u64 = 64;

/// Source-over compositing: srcAlpha / 1-srcAlpha, additive, both channels.
const ALPHA_BLEND: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    },
};

/// A ready-to-bind render pipeline plus the uniform buffers backing its
/// per-frame pushes.
///
/// Owned by the application for its entire run and dropped exactly once at
/// shutdown, before the [`GpuContext`].
pub struct GraphicsPipeline {
    pipeline: wgpu::RenderPipeline,
    vertex_bind_group: wgpu::BindGroup,
    fragment_bind_group: wgpu::BindGroup,
    vertex_uniforms: Vec<wgpu::Buffer>,
    fragment_uniforms: Vec<wgpu::Buffer>,
}

impl GraphicsPipeline {
    /// Binds the pipeline and both stage bind groups on a render pass.
    pub fn bind(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.vertex_bind_group, &[]);
        pass.set_bind_group(1, &self.fragment_bind_group, &[]);
    }

    /// Delivers per-frame uniform data to the vertex stage's `slot`.
    pub fn push_vertex_uniform(&self, queue: &wgpu::Queue, slot: usize, bytes: &[u8]) {
        Self::push(&self.vertex_uniforms, queue, slot, bytes);
    }

    /// Delivers per-frame uniform data to the fragment stage's `slot`.
    pub fn push_fragment_uniform(&self, queue: &wgpu::Queue, slot: usize, bytes: &[u8]) {
        Self::push(&self.fragment_uniforms, queue, slot, bytes);
    }

    fn push(slots: &[wgpu::Buffer], queue: &wgpu::Queue, slot: usize, bytes: &[u8]) {
        let Some(buffer) = slots.get(slot) else {
            warn!("Uniform push to undeclared slot {slot}");
            return;
        };
        debug_assert!(bytes.len() as u64 <= UNIFORM_SLOT_SIZE);
        queue.write_buffer(buffer, 0, bytes);
    }
}

/// Creates one backing buffer per declared uniform slot.
fn uniform_slots(device: &wgpu::Device, count: u32, label: &str) -> Vec<wgpu::Buffer> {
    (0..count)
        .map(|i| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&format!("{label} Uniform {i}")),
                size: UNIFORM_SLOT_SIZE,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        })
        .collect()
}

fn uniform_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    slots: &[wgpu::Buffer],
    label: &str,
) -> wgpu::BindGroup {
    let entries: Vec<wgpu::BindGroupEntry> = slots
        .iter()
        .enumerate()
        .map(|(i, buffer)| wgpu::BindGroupEntry {
            binding: i as u32,
            resource: buffer.as_entire_binding(),
        })
        .collect();
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &entries,
    })
}

/// Assembles a render pipeline from one vertex and one fragment shader.
///
/// The color target uses the surface's native pixel format with alpha
/// blending enabled; the vertex input is a single buffer slot described by
/// `vertex_layout`. Both shader objects are consumed and released here
/// regardless of outcome.
///
/// Only uniform-buffer bindings get backing resources; shaders declaring
/// sampler or storage bindings belong to pipelines that bind their own
/// groups.
pub fn build_graphics_pipeline(
    ctx: &GpuContext,
    vertex: Shader,
    fragment: Shader,
    vertex_layout: wgpu::VertexBufferLayout<'_>,
) -> Result<GraphicsPipeline> {
    if vertex.stage != ShaderStage::Vertex {
        return Err(GlintError::InvalidStage(
            "vertex slot given a non-vertex shader".to_string(),
        ));
    }
    if fragment.stage != ShaderStage::Fragment {
        return Err(GlintError::InvalidStage(
            "fragment slot given a non-fragment shader".to_string(),
        ));
    }

    let device = &ctx.device;
    let vertex_bgl =
        vertex
            .bindings
            .bind_group_layout(device, wgpu::ShaderStages::VERTEX, "Vertex Stage");
    let fragment_bgl =
        fragment
            .bindings
            .bind_group_layout(device, wgpu::ShaderStages::FRAGMENT, "Fragment Stage");

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Graphics Pipeline Layout"),
        bind_group_layouts: &[Some(&vertex_bgl), Some(&fragment_bgl)],
        immediate_size: 0,
    });

    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Graphics Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &vertex.module,
            entry_point: Some("main"),
            buffers: &[vertex_layout],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &fragment.module,
            entry_point: Some("main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format(),
                blend: Some(ALPHA_BLEND),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    });
    if let Some(err) = pollster::block_on(scope.pop()) {
        error!("Failed creating graphics pipeline error: {err}");
        return Err(GlintError::PipelineCreationFailed(err.to_string()));
    }

    let vertex_uniforms = uniform_slots(device, vertex.bindings.uniform_buffers, "Vertex");
    let fragment_uniforms = uniform_slots(device, fragment.bindings.uniform_buffers, "Fragment");
    let vertex_bind_group =
        uniform_bind_group(device, &vertex_bgl, &vertex_uniforms, "Vertex Stage");
    let fragment_bind_group =
        uniform_bind_group(device, &fragment_bgl, &fragment_uniforms, "Fragment Stage");

    Ok(GraphicsPipeline {
        pipeline,
        vertex_bind_group,
        fragment_bind_group,
        vertex_uniforms,
        fragment_uniforms,
    })
}
