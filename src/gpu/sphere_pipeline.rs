//! The sphere's render pipeline and GPU resources.
//!
//! All buffers are allocated once at construction. Per-frame and
//! edit-driven updates go through `queue.write_buffer` only, honoring the
//! no-reallocation contract of the uniform model.

use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use crate::geometry::{SphereGeometry, Vertex};
use crate::gpu::render_context::{RenderContext, RenderContextError};
use crate::gpu::shader;
use crate::material::{SphereUniform, SurfaceMaterial};

/// Camera matrices for the vertex stage.
/// NOTE: Must match the WGSL struct layout exactly (64 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct CameraUniform {
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    fn from_aspect(aspect: f32) -> Self {
        let proj = Mat4::perspective_rh(
            45_f32.to_radians(),
            aspect.max(0.01),
            0.1,
            100.0,
        );
        let view =
            Mat4::look_at_rh(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, Vec3::Y);
        Self {
            view_proj: (proj * view).to_cols_array_2d(),
        }
    }
}

/// GPU-side sphere: pipeline, mesh buffers, and the two uniform buffers.
pub struct SpherePipeline {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uniform_buffer: wgpu::Buffer,
    camera_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl SpherePipeline {
    /// Upload the geometry, seed both uniform buffers, and build the
    /// pipeline. Tangent data is always supplied, so the shader composes
    /// with `USE_TANGENT` enabled.
    ///
    /// # Errors
    ///
    /// Returns [`RenderContextError::ShaderCompose`] when the WGSL fails
    /// to compose.
    pub fn new(
        context: &RenderContext,
        geometry: &SphereGeometry,
        material: &SurfaceMaterial,
    ) -> Result<Self, RenderContextError> {
        let device = &context.device;
        let module = shader::create_sphere_shader(device, true)?;

        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Sphere Vertex Buffer"),
                contents: bytemuck::cast_slice(geometry.vertices()),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Sphere Index Buffer"),
                contents: bytemuck::cast_slice(geometry.indices()),
                usage: wgpu::BufferUsages::INDEX,
            });

        let uniform_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Sphere Uniform Buffer"),
                contents: bytemuck::cast_slice(&[material.to_raw()]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let camera_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform Buffer"),
                contents: bytemuck::cast_slice(&[CameraUniform::from_aspect(
                    context.aspect(),
                )]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let layout = device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Sphere Bind Group Layout"),
                entries: &[
                    uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT),
                    uniform_entry(1, wgpu::ShaderStages::VERTEX),
                ],
            },
        );
        let bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Sphere Bind Group"),
                layout: &layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: uniform_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: camera_buffer.as_entire_binding(),
                    },
                ],
            });

        let pipeline_layout = device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Sphere Pipeline Layout"),
                bind_group_layouts: &[&layout],
                push_constant_ranges: &[],
            },
        );

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: size_of::<Vertex>()
                as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0, // position
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1, // normal
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 24,
                    shader_location: 2, // tangent
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 40,
                    shader_location: 3, // uv
                },
            ],
        };

        let pipeline = device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Sphere Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &module,
                    entry_point: Some("vs_main"),
                    buffers: &[vertex_layout],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &module,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.format(),
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    // The displaced surface can fold past the silhouette;
                    // culling is disabled rather than guessing winding.
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: Some(depth_stencil_state()),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            },
        );

        Ok(Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            index_count: geometry.indices().len() as u32,
            uniform_buffer,
            camera_buffer,
            bind_group,
        })
    }

    /// Push the material's current uniform state to the GPU.
    pub fn sync_material(
        &self,
        queue: &wgpu::Queue,
        material: &SurfaceMaterial,
    ) {
        let raw: SphereUniform = material.to_raw();
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[raw]));
    }

    /// Refresh the camera matrices for a new aspect ratio.
    pub fn update_camera(&self, queue: &wgpu::Queue, aspect: f32) {
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[CameraUniform::from_aspect(aspect)]),
        );
    }

    /// Record the sphere draw into an open render pass.
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(
            self.index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

fn uniform_entry(
    binding: u32,
    visibility: wgpu::ShaderStages,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

/// Standard depth-stencil state for the sphere pass.
pub fn depth_stencil_state() -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: wgpu::TextureFormat::Depth32Float,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

/// Create a depth target matching the surface size.
#[must_use]
pub fn create_depth_view(
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Depth32Float,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
