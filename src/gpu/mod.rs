//! GPU resource management.
//!
//! wgpu device/surface initialization, WGSL composition with the
//! `USE_TANGENT` shader def, and the sphere's render pipeline. The uniform
//! buffer is allocated exactly once; every edit reaches the GPU through
//! `queue.write_buffer`, never through reallocation.

/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition via naga-oil.
pub mod shader;
/// The sphere's render pipeline and GPU buffers.
pub mod sphere_pipeline;
