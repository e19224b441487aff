//! Error Types
//!
//! This module defines the error types used throughout the demo.
//!
//! All public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, GlintError>`. Startup errors are never retried:
//! a failure at any initialization step aborts the remaining startup
//! sequence and the process exits uninitialized.

use thiserror::Error;

/// The main error type for the demo.
#[derive(Error, Debug)]
pub enum GlintError {
    // ========================================================================
    // GPU & Window Errors
    // ========================================================================
    /// Failed to request a compatible GPU adapter.
    #[error("Failed to request WGPU adapter: {0}")]
    AdapterRequestFailed(String),

    /// Failed to create the GPU device.
    #[error("Failed to create WGPU device: {0}")]
    DeviceCreateFailed(#[from] wgpu::RequestDeviceError),

    /// Failed to create the presentation surface.
    #[error("Failed to create surface: {0}")]
    SurfaceCreateFailed(#[from] wgpu::CreateSurfaceError),

    /// Window system error.
    #[error("Window system error: {0}")]
    WindowError(#[from] raw_window_handle::HandleError),

    /// Window creation error (winit).
    #[error("Window creation error: {0}")]
    WindowCreateFailed(#[from] winit::error::OsError),

    /// Event loop error (winit).
    #[error("Event loop error: {0}")]
    EventLoopError(#[from] winit::error::EventLoopError),

    // ========================================================================
    // Shader & Pipeline Errors
    // ========================================================================
    /// The shader file name carries neither a `.vert` nor a `.frag` tag.
    #[error("Invalid shader stage: {0}")]
    InvalidStage(String),

    /// None of the device's accepted shader formats is available.
    #[error("Unrecognized backend shader format")]
    UnsupportedBackend,

    /// The device refused a shader-object creation request.
    #[error("Failed to create shader: {0}")]
    DeviceRejected(String),

    /// The device refused a pipeline creation request.
    #[error("Failed to create pipeline: {0}")]
    PipelineCreationFailed(String),

    // ========================================================================
    // Asset Loading Errors
    // ========================================================================
    /// The requested asset was not found.
    #[error("Asset not found: {0}")]
    AssetMissing(String),

    /// The requested pixel layout is not supported.
    #[error("Unsupported channel count: {requested} (only 4-channel output is supported)")]
    UnsupportedFormat {
        /// The channel count the caller asked for
        requested: u32,
    },

    /// Image decoding error.
    #[error("Image decode error: {0}")]
    ImageDecodeError(String),

    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<image::ImageError> for GlintError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => GlintError::IoError(e),
            other => GlintError::ImageDecodeError(other.to_string()),
        }
    }
}

/// Alias for `Result<T, GlintError>`.
pub type Result<T> = std::result::Result<T, GlintError>;
