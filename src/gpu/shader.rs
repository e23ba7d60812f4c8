//! WGSL composition for the sphere shader.
//!
//! The shader program is an opaque consumer of the uniform contract: it is
//! keyed by the names in [`crate::material::uniform`] and by the
//! `USE_TANGENT` shader def, which must be enabled whenever the geometry
//! supplies tangent data (always, for the lat/long sphere). Composition
//! goes through naga-oil so the def is resolved before validation.

use std::borrow::Cow;
use std::collections::HashMap;

use naga_oil::compose::{
    Composer, NagaModuleDescriptor, ShaderDefValue, ShaderType,
};

use crate::gpu::render_context::RenderContextError;

/// The sphere's vertex + fragment program.
pub const SPHERE_SHADER: &str =
    include_str!("../../assets/shaders/sphere.wgsl");

/// Shader def enabling the tangent-basis normal recomputation path.
pub const USE_TANGENT: &str = "USE_TANGENT";

/// Compose the sphere shader into naga IR.
///
/// # Errors
///
/// Returns [`RenderContextError::ShaderCompose`] when preprocessing or
/// validation fails.
pub fn compose_sphere_module(
    use_tangent: bool,
) -> Result<naga::Module, RenderContextError> {
    let mut composer = Composer::default();
    let mut shader_defs = HashMap::new();
    if use_tangent {
        let _ = shader_defs
            .insert(USE_TANGENT.to_owned(), ShaderDefValue::Bool(true));
    }
    composer
        .make_naga_module(NagaModuleDescriptor {
            source: SPHERE_SHADER,
            file_path: "sphere.wgsl",
            shader_type: ShaderType::Wgsl,
            shader_defs,
            ..Default::default()
        })
        .map_err(|e| RenderContextError::ShaderCompose(e.to_string()))
}

/// Compose the sphere shader and hand the IR to the device.
///
/// # Errors
///
/// Returns [`RenderContextError::ShaderCompose`] when composition fails.
pub fn create_sphere_shader(
    device: &wgpu::Device,
    use_tangent: bool,
) -> Result<wgpu::ShaderModule, RenderContextError> {
    let module = compose_sphere_module(use_tangent)?;
    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Sphere Shader"),
        source: wgpu::ShaderSource::Naga(Cow::Owned(module)),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_shader_composes_with_tangents() {
        compose_sphere_module(true)
            .unwrap_or_else(|e| panic!("tangent path failed: {e}"));
    }

    #[test]
    fn sphere_shader_composes_without_tangents() {
        compose_sphere_module(false)
            .unwrap_or_else(|e| panic!("fallback path failed: {e}"));
    }
}
