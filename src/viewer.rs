//! Windowed viewer: winit event loop driving the sphere.
//!
//! Owns the window, the render context, and the sphere's GPU pipeline.
//! Every frame the clock delta (milliseconds) feeds the animation driver,
//! the material's uniform table is pushed to the GPU in full, and the
//! sphere is drawn into a depth-tested pass.

use std::sync::Arc;

use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::error::OrbError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::sphere_pipeline::{self, SpherePipeline};
use crate::options::Options;
use crate::scene::Scene;
use crate::sphere::Sphere;

/// GPU state that only exists once a window is available.
struct ViewerState {
    context: RenderContext,
    pipeline: SpherePipeline,
    depth_view: wgpu::TextureView,
    sphere: Sphere,
    scene: Scene,
}

impl ViewerState {
    fn new(
        window: Arc<Window>,
        options: &Options,
    ) -> Result<Self, OrbError> {
        let size = window.inner_size();
        let context = pollster::block_on(RenderContext::new(
            window,
            (size.width.max(1), size.height.max(1)),
        ))
        .map_err(OrbError::Gpu)?;

        let mut sphere = Sphere::new(options)?;
        let mut scene = Scene::new();
        let _ = sphere.attach(&mut scene)?;

        let pipeline = SpherePipeline::new(
            &context,
            sphere.geometry(),
            sphere.material(),
        )
        .map_err(OrbError::Gpu)?;
        let depth_view = sphere_pipeline::create_depth_view(
            &context.device,
            context.config.width,
            context.config.height,
        );

        Ok(Self {
            context,
            pipeline,
            depth_view,
            sphere,
            scene,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
        self.depth_view = sphere_pipeline::create_depth_view(
            &self.context.device,
            self.context.config.width,
            self.context.config.height,
        );
        self.pipeline
            .update_camera(&self.context.queue, self.context.aspect());
    }

    fn render(&mut self, delta_ms: f32) -> Result<(), wgpu::SurfaceError> {
        if let Err(e) = self.sphere.update(delta_ms) {
            log::warn!("animation tick rejected: {e}");
        }
        self.pipeline
            .sync_material(&self.context.queue, self.sphere.material());

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.context.create_encoder();
        {
            let mut rpass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Sphere Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color {
                                    r: 0.01,
                                    g: 0.01,
                                    b: 0.02,
                                    a: 1.0,
                                }),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth_view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });
            self.pipeline.draw(&mut rpass);
        }
        self.context.submit(encoder);
        frame.present();

        log::trace!("frame rendered, {} scene meshes", self.scene.len());
        Ok(())
    }
}

/// The winit application: window lifecycle plus per-frame redraw.
pub struct ViewerApp {
    window: Option<Arc<Window>>,
    state: Option<ViewerState>,
    last_frame_time: Instant,
    options: Options,
}

impl ViewerApp {
    /// Create the application shell with the resolved options.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            window: None,
            state: None,
            last_frame_time: Instant::now(),
            options,
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = Window::default_attributes()
            .with_title("Orb")
            .with_inner_size(winit::dpi::LogicalSize::new(1024, 768));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("window creation failed: {e}");
                event_loop.exit();
                return;
            }
        };

        match ViewerState::new(window.clone(), &self.options) {
            Ok(state) => {
                self.last_frame_time = Instant::now();
                window.request_redraw();
                self.window = Some(window);
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("viewer initialization failed: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(state) = &mut self.state {
                    state.resize(size.width, size.height);
                }
            }

            WindowEvent::RedrawRequested => {
                if let (Some(window), Some(state)) =
                    (&self.window, &mut self.state)
                {
                    let now = Instant::now();
                    let delta_ms = now
                        .duration_since(self.last_frame_time)
                        .as_secs_f32()
                        * 1000.0;
                    self.last_frame_time = now;

                    match state.render(delta_ms) {
                        Ok(()) => {}
                        Err(
                            wgpu::SurfaceError::Outdated
                            | wgpu::SurfaceError::Lost,
                        ) => {
                            let inner = window.inner_size();
                            state.resize(inner.width, inner.height);
                        }
                        Err(e) => {
                            log::error!("render error: {e:?}");
                        }
                    }
                    window.request_redraw();
                }
            }

            _ => (),
        }
    }
}

/// Run the viewer until the window closes.
///
/// # Errors
///
/// Returns [`OrbError::Io`] if the event loop cannot be created or exits
/// with an error.
pub fn run(options: Options) -> Result<(), OrbError> {
    let event_loop = EventLoop::new()
        .map_err(|e| OrbError::Io(std::io::Error::other(e.to_string())))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ViewerApp::new(options);
    event_loop
        .run_app(&mut app)
        .map_err(|e| OrbError::Io(std::io::Error::other(e.to_string())))
}
