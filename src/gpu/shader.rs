//! Shader Objects and Compute Pipelines
//!
//! Shader construction follows a fixed convention: the pipeline stage is
//! inferred from a `.vert`/`.frag` tag in the file name, the on-disk format
//! is negotiated against the device's accepted set, and the source is read
//! from `shaders/compiled/<file>.<ext>` via the [`AssetLoader`].
//!
//! Resource-binding counts are declared by the caller, not reflected from
//! the source; they must match what the shader expects, and a mismatch is
//! not caught at this layer.

use std::borrow::Cow;

use bitflags::bitflags;
use log::{error, warn};

use crate::assets::AssetLoader;
use crate::errors::{GlintError, Result};
use crate::gpu::context::GpuContext;

bitflags! {
    /// Set of binary shader formats a device accepts.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ShaderFormats: u32 {
        const WGSL  = 1;
        const SPIRV = 1 << 1;
    }
}

/// A concrete shader format chosen from a device's accepted set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderFormat {
    Wgsl,
    SpirV,
}

impl ShaderFormat {
    /// File extension used under `shaders/compiled/`.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Wgsl => "wgsl",
            Self::SpirV => "spv",
        }
    }

    #[must_use]
    pub const fn flag(self) -> ShaderFormats {
        match self {
            Self::Wgsl => ShaderFormats::WGSL,
            Self::SpirV => ShaderFormats::SPIRV,
        }
    }
}

/// Formats in negotiation order; wgpu's native format first.
const FORMAT_PREFERENCE: [ShaderFormat; 2] = [ShaderFormat::Wgsl, ShaderFormat::SpirV];

/// Picks the first preferred format the device accepts.
pub fn negotiate_format(accepted: ShaderFormats) -> Result<ShaderFormat> {
    for format in FORMAT_PREFERENCE {
        if accepted.contains(format.flag()) {
            return Ok(format);
        }
    }
    error!("Unrecognized backend shader format!");
    Err(GlintError::UnsupportedBackend)
}

/// Pipeline stage a shader object is built for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

/// Infers the pipeline stage from a `.vert`/`.frag` tag in the file name.
pub fn infer_stage(file_name: &str) -> Result<ShaderStage> {
    if file_name.contains(".vert") {
        Ok(ShaderStage::Vertex)
    } else if file_name.contains(".frag") {
        Ok(ShaderStage::Fragment)
    } else {
        warn!("Invalid shader stage: {file_name}");
        Err(GlintError::InvalidStage(file_name.to_string()))
    }
}

/// On-disk location of a shader for a negotiated format.
#[must_use]
pub fn shader_path(file_name: &str, format: ShaderFormat) -> String {
    format!("shaders/compiled/{file_name}.{}", format.extension())
}

/// Resource-binding counts a shader declares, supplied by the caller.
///
/// Materialized as bind group layout entries in a fixed order: uniform
/// buffers first, then texture/sampler pairs, then storage buffers, then
/// storage textures. The counts are baked into the shader object and must
/// exactly match what the source expects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShaderBindings {
    pub samplers: u32,
    pub uniform_buffers: u32,
    pub storage_buffers: u32,
    pub storage_textures: u32,
}

impl ShaderBindings {
    /// Declares uniform buffers only, the common case in this demo.
    #[must_use]
    pub const fn uniform_buffers(count: u32) -> Self {
        Self {
            samplers: 0,
            uniform_buffers: count,
            storage_buffers: 0,
            storage_textures: 0,
        }
    }

    /// Builds the bind group layout these counts describe, visible to the
    /// given stage.
    ///
    /// Storage textures are laid out as rgba8 write-only, the one layout
    /// the demo's compute path uses.
    pub(crate) fn bind_group_layout(
        &self,
        device: &wgpu::Device,
        visibility: wgpu::ShaderStages,
        label: &str,
    ) -> wgpu::BindGroupLayout {
        let mut entries = Vec::new();
        let mut binding = 0;

        for _ in 0..self.uniform_buffers {
            entries.push(wgpu::BindGroupLayoutEntry {
                binding,
                visibility,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            });
            binding += 1;
        }
        for _ in 0..self.samplers {
            entries.push(wgpu::BindGroupLayoutEntry {
                binding,
                visibility,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            });
            entries.push(wgpu::BindGroupLayoutEntry {
                binding: binding + 1,
                visibility,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            });
            binding += 2;
        }
        for _ in 0..self.storage_buffers {
            entries.push(wgpu::BindGroupLayoutEntry {
                binding,
                visibility,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Storage { read_only: true },
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            });
            binding += 1;
        }
        for _ in 0..self.storage_textures {
            entries.push(wgpu::BindGroupLayoutEntry {
                binding,
                visibility,
                ty: wgpu::BindingType::StorageTexture {
                    access: wgpu::StorageTextureAccess::WriteOnly,
                    format: wgpu::TextureFormat::Rgba8Unorm,
                    view_dimension: wgpu::TextureViewDimension::D2,
                },
                count: None,
            });
            binding += 1;
        }

        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &entries,
        })
    }
}

/// A shader object: compiled module, inferred stage, declared bindings.
///
/// Consumed by value at pipeline assembly; the module is not needed after
/// the pipeline is built.
pub struct Shader {
    pub module: wgpu::ShaderModule,
    pub stage: ShaderStage,
    pub bindings: ShaderBindings,
}

/// Turns loaded shader bytes into a wgpu source for the negotiated format.
fn shader_source(file_name: &str, format: ShaderFormat, code: Vec<u8>) -> Result<wgpu::ShaderSource<'static>> {
    match format {
        ShaderFormat::Wgsl => {
            let text = String::from_utf8(code).map_err(|e| {
                error!("Shader {file_name} is not valid UTF-8: {e}");
                GlintError::DeviceRejected(format!("shader {file_name} is not valid UTF-8: {e}"))
            })?;
            Ok(wgpu::ShaderSource::Wgsl(Cow::Owned(text)))
        }
        // SPIR-V passthrough needs the wgpu `spirv` feature; the accepted
        // format set never offers it on this build.
        ShaderFormat::SpirV => Err(GlintError::UnsupportedBackend),
    }
}

/// Creates a shader module under a validation error scope so device
/// refusals surface as errors instead of uncaptured panics.
fn create_module(
    device: &wgpu::Device,
    label: &str,
    source: wgpu::ShaderSource<'static>,
) -> Result<wgpu::ShaderModule> {
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source,
    });
    if let Some(err) = pollster::block_on(scope.pop()) {
        error!("Failed to create shader! error: {err}");
        return Err(GlintError::DeviceRejected(err.to_string()));
    }
    Ok(module)
}

/// Loads a shader binary from disk and builds a shader object.
///
/// The stage comes from the file name (`.vert`/`.frag`), the on-disk format
/// from the device's accepted set, and the binding counts from the caller.
/// The loaded source buffer is dropped on every path, success or failure.
pub fn load_shader(
    ctx: &GpuContext,
    assets: &AssetLoader,
    file_name: &str,
    bindings: ShaderBindings,
) -> Result<Shader> {
    let stage = infer_stage(file_name)?;
    let format = negotiate_format(ctx.shader_formats())?;
    let code = assets.load_binary(shader_path(file_name, format))?;
    let source = shader_source(file_name, format, code)?;
    let module = create_module(&ctx.device, file_name, source)?;

    Ok(Shader {
        module,
        stage,
        bindings,
    })
}

/// Base descriptor for compute pipeline creation.
///
/// Immutable from the builder's point of view: `create_compute_pipeline`
/// overlays the loaded shader onto a copy and never mutates the caller's
/// value. The `with_*` methods return a new descriptor with one field
/// replaced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComputePipelineDesc {
    pub label: Option<String>,
    pub entry_point: String,
    pub bindings: ShaderBindings,
}

impl Default for ComputePipelineDesc {
    fn default() -> Self {
        Self {
            label: None,
            entry_point: "main".to_string(),
            bindings: ShaderBindings::default(),
        }
    }
}

impl ComputePipelineDesc {
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_entry_point(mut self, entry_point: impl Into<String>) -> Self {
        self.entry_point = entry_point.into();
        self
    }

    #[must_use]
    pub fn with_bindings(mut self, bindings: ShaderBindings) -> Self {
        self.bindings = bindings;
        self
    }
}

/// Builds a compute pipeline from a shader binary on disk.
///
/// Shares the binary-loading and format-negotiation path with
/// [`load_shader`], then overlays the loaded module onto a copy of `base`.
pub fn create_compute_pipeline(
    ctx: &GpuContext,
    assets: &AssetLoader,
    file_name: &str,
    base: &ComputePipelineDesc,
) -> Result<wgpu::ComputePipeline> {
    let format = negotiate_format(ctx.shader_formats())?;
    let code = assets.load_binary(shader_path(file_name, format))?;
    let source = shader_source(file_name, format, code)?;
    let module = create_module(&ctx.device, file_name, source)?;

    // Copy of the caller's descriptor; the original is never touched.
    let desc = base.clone();
    let bind_group_layout =
        desc.bindings
            .bind_group_layout(&ctx.device, wgpu::ShaderStages::COMPUTE, file_name);
    let pipeline_layout = ctx
        .device
        .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: desc.label.as_deref(),
            bind_group_layouts: &[Some(&bind_group_layout)],
            immediate_size: 0,
        });

    let scope = ctx.device.push_error_scope(wgpu::ErrorFilter::Validation);
    let pipeline = ctx
        .device
        .create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: desc.label.as_deref(),
            layout: Some(&pipeline_layout),
            module: &module,
            entry_point: Some(&desc.entry_point),
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            cache: None,
        });
    if let Some(err) = pollster::block_on(scope.pop()) {
        error!("Failed to create compute pipeline! error: {err}");
        return Err(GlintError::PipelineCreationFailed(err.to_string()));
    }

    Ok(pipeline)
}
