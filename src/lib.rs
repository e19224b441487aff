#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod app;
pub mod assets;
pub mod errors;
pub mod gpu;
pub mod math;

pub use app::App;
pub use assets::AssetLoader;
pub use errors::{GlintError, Result};
pub use gpu::context::GpuContext;
pub use gpu::pipeline::{GraphicsPipeline, build_graphics_pipeline};
pub use gpu::shader::{
    ComputePipelineDesc, Shader, ShaderBindings, ShaderFormat, ShaderFormats, ShaderStage,
    create_compute_pipeline, load_shader,
};
pub use gpu::upload::{MeshBuffers, TransferBuffer, upload_mesh};
pub use gpu::vertex::{PositionColorVertex, PositionTextureVertex, PositionVertex};
pub use math::{Matrix4x4, Vector2, Vector3};
