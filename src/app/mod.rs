//! Frame Driver
//!
//! Thin glue around the core: a winit-based application shell that creates
//! the window and [`GpuContext`], builds the demo's pipeline and quad
//! buffers at startup, and issues one indexed draw per frame with a
//! per-frame "time" uniform. Everything interesting happens in
//! [`crate::gpu`]; this module only sequences it.
//!
//! Startup is strictly ordered and blocking: device, shaders, pipeline,
//! buffer upload — each step completes (or fails, aborting startup) before
//! the next begins, and the transfer buffer is released before the render
//! loop first consumes the vertex/index buffers.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use log::{error, info};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::assets::AssetLoader;
use crate::errors::Result;
use crate::gpu::context::GpuContext;
use crate::gpu::pipeline::{GraphicsPipeline, build_graphics_pipeline};
use crate::gpu::shader::{ShaderBindings, load_shader};
use crate::gpu::upload::{MeshBuffers, upload_mesh};
use crate::gpu::vertex::PositionVertex;
use crate::math::Vector2;

/// Quad corners in clip space.
const QUAD_VERTICES: [PositionVertex; 4] = [
    PositionVertex::new(-0.5, -0.5, 0.0),
    PositionVertex::new(0.5, -0.5, 0.0),
    PositionVertex::new(0.5, 0.5, 0.0),
    PositionVertex::new(-0.5, 0.5, 0.0),
];

/// Two triangles forming the quad.
const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Per-frame payload pushed to the fragment stage's slot 0.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
struct GradientUniforms {
    time: f32,
}

/// Application builder for configuring and launching the demo.
pub struct App {
    title: String,
    width: u32,
    height: u32,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: "glint".into(),
            width: 800,
            height: 800,
        }
    }

    /// Sets the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the initial window size in logical pixels.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Runs the demo. Blocks until the window closes.
    pub fn run(self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut runner = AppRunner::new(self);
        event_loop.run_app(&mut runner)?;
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// GPU state built once at startup and owned for the run.
struct DemoScene {
    pipeline: GraphicsPipeline,
    mesh: MeshBuffers,
    uniforms: GradientUniforms,
}

/// Internal event loop handler.
struct AppRunner {
    config: App,
    window: Option<Arc<Window>>,
    ctx: Option<GpuContext>,
    scene: Option<DemoScene>,
    cursor: Vector2,
}

impl AppRunner {
    fn new(config: App) -> Self {
        Self {
            config,
            window: None,
            ctx: None,
            scene: None,
            cursor: Vector2::ZERO,
        }
    }

    /// One-time startup: window, device, shaders, pipeline, quad upload.
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                f64::from(self.config.width),
                f64::from(self.config.height),
            ));
        let window = Arc::new(event_loop.create_window(attributes)?);

        let size = window.inner_size();
        let ctx = pollster::block_on(GpuContext::new(
            window.clone(),
            size.width.max(1),
            size.height.max(1),
        ))?;

        // Shaders ship next to the crate; an installed build overrides the
        // location with GLINT_ASSET_DIR.
        let base_dir = std::env::var("GLINT_ASSET_DIR")
            .unwrap_or_else(|_| env!("CARGO_MANIFEST_DIR").to_string());
        let assets = AssetLoader::new(base_dir);

        let vertex_shader = load_shader(&ctx, &assets, "position.vert", ShaderBindings::default())?;
        let fragment_shader = load_shader(
            &ctx,
            &assets,
            "solid_color.frag",
            ShaderBindings::uniform_buffers(1),
        )?;
        let pipeline =
            build_graphics_pipeline(&ctx, vertex_shader, fragment_shader, PositionVertex::LAYOUT)?;

        let mesh = upload_mesh(&ctx, &QUAD_VERTICES, &QUAD_INDICES);
        info!("Startup complete, entering render loop");

        self.window = Some(window);
        self.ctx = Some(ctx);
        self.scene = Some(DemoScene {
            pipeline,
            mesh,
            uniforms: GradientUniforms::default(),
        });
        Ok(())
    }

    fn render(&mut self) {
        let (Some(window), Some(ctx), Some(scene)) =
            (&self.window, &mut self.ctx, &mut self.scene)
        else {
            return;
        };

        scene.uniforms.time += 0.1;

        let output = match ctx.surface.get_current_texture() {
            wgpu::CurrentSurfaceTexture::Success(output)
            | wgpu::CurrentSurfaceTexture::Suboptimal(output) => output,
            wgpu::CurrentSurfaceTexture::Lost | wgpu::CurrentSurfaceTexture::Outdated => {
                let (width, height) = ctx.size();
                ctx.resize(width, height);
                return;
            }
            e => {
                error!("Failed to acquire swapchain texture: {e:?}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Quad Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            scene.pipeline.bind(&mut pass);
            pass.set_vertex_buffer(0, scene.mesh.vertex.slice(..));
            pass.set_index_buffer(scene.mesh.index.slice(..), scene.mesh.index_format);
            scene
                .pipeline
                .push_fragment_uniform(&ctx.queue, 0, bytemuck::bytes_of(&scene.uniforms));
            pass.draw_indexed(0..scene.mesh.index_count, 0, 0..1);
        }

        ctx.queue.submit(Some(encoder.finish()));
        output.present();
        window.request_redraw();
    }
}

impl ApplicationHandler for AppRunner {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            error!("Startup failed: {e}");
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(ctx) = &mut self.ctx {
                    ctx.resize(size.width, size.height);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vector2::new(position.x as f32, position.y as f32);
            }
            WindowEvent::RedrawRequested => self.render(),
            _ => {}
        }
    }
}
