//! GPU Context
//!
//! The [`GpuContext`] owns the core GPU handles: device, queue, surface,
//! and surface configuration. It is created once at startup, lives for the
//! whole process, and is dropped after every pipeline and buffer that was
//! created against it.

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use crate::errors::{GlintError, Result};
use crate::gpu::shader::ShaderFormats;

/// Core GPU context holding device, queue, surface and config.
///
/// All resource creation in the demo goes through this struct's `device`,
/// and all submission through its `queue`. Capability queries
/// ([`shader_formats`](Self::shader_formats),
/// [`surface_format`](Self::surface_format)) feed the shader and pipeline
/// builders.
pub struct GpuContext {
    /// The wgpu device for GPU operations
    pub device: wgpu::Device,
    /// The command queue for submitting work
    pub queue: wgpu::Queue,
    /// The window surface for presentation
    pub surface: wgpu::Surface<'static>,
    /// Surface configuration
    pub config: wgpu::SurfaceConfiguration,
}

impl GpuContext {
    /// Creates the device, claims the window surface and configures it.
    ///
    /// Blocking from the caller's perspective; drive it with
    /// `pollster::block_on` at startup.
    pub async fn new<W>(window: W, width: u32, height: u32) -> Result<Self>
    where
        W: HasWindowHandle + HasDisplayHandle + Send + Sync + 'static,
    {
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| GlintError::AdapterRequestFailed(e.to_string()))?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::Performance,
                ..Default::default()
            })
            .await?;

        let config = surface
            .get_default_config(&adapter, width, height)
            .ok_or_else(|| {
                GlintError::AdapterRequestFailed("Surface not supported by adapter".to_string())
            })?;
        surface.configure(&device, &config);

        Ok(Self {
            device,
            queue,
            surface,
            config,
        })
    }

    /// Returns the set of binary shader formats this device accepts.
    ///
    /// wgpu consumes WGSL on every backend; SPIR-V passthrough would extend
    /// this set when compiled in.
    #[must_use]
    pub fn shader_formats(&self) -> ShaderFormats {
        ShaderFormats::WGSL
    }

    /// Returns the surface's native pixel format.
    #[inline]
    #[must_use]
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the current surface dimensions.
    #[inline]
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }
}
