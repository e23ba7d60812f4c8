//! The sphere's shader material: a table of named, typed uniform cells and
//! the change notifications that keep it synchronized with the lights.
//!
//! Two kinds of derived uniform state coexist on purpose and must never be
//! confused:
//!
//! - **shared cells** — the color uniforms alias the lights' own
//!   [`ColorCell`]s. An edit mutates the one shared value; the uniform needs
//!   no copy step at all.
//! - **copy-on-change cells** — position uniforms require a
//!   spherical-to-Cartesian transform and intensity has no shared-reference
//!   form, so both are explicitly recomputed/reassigned when notified.
//!
//! The table itself lives on the CPU; [`SurfaceMaterial::to_raw`] packs it
//! into one fixed-layout struct that is written into a GPU buffer allocated
//! once, so edits never reallocate GPU resources.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use glam::Vec3;

use crate::error::OrbError;
use crate::lighting::{ColorCell, LightRole, LightSet, SphericalLight};
use crate::options::ShapeOptions;

// ---------------------------------------------------------------------------
// Uniform names
// ---------------------------------------------------------------------------

/// Stable shader-facing uniform names. External editors bind to cells by
/// these names; they are the wire contract with the WGSL program.
pub mod uniform {
    /// Accumulated shader time.
    pub const TIME: &str = "uTime";
    /// Noise scale of the surface distortion term.
    pub const DISTORTION_FREQUENCY: &str = "uDistortionFrequency";
    /// Magnitude of the surface distortion term.
    pub const DISTORTION_STRENGTH: &str = "uDistortionStrength";
    /// Noise scale of the radial displacement term.
    pub const DISPLACEMENT_FREQUENCY: &str = "uDisplacementFrequency";
    /// Magnitude of the radial displacement term.
    pub const DISPLACEMENT_STRENGTH: &str = "uDisplacementStrength";
    /// Key light color (shared cell).
    pub const LIGHT_A_COLOR: &str = "uLightAColor";
    /// Key light position (copy-on-change cell).
    pub const LIGHT_A_POSITION: &str = "uLightAPosition";
    /// Key light intensity (copied scalar).
    pub const LIGHT_A_INTENSITY: &str = "uLightAIntensity";
    /// Fill light color (shared cell).
    pub const LIGHT_B_COLOR: &str = "uLightBColor";
    /// Fill light position (copy-on-change cell).
    pub const LIGHT_B_POSITION: &str = "uLightBPosition";
    /// Fill light intensity (copied scalar).
    pub const LIGHT_B_INTENSITY: &str = "uLightBIntensity";
    /// Unlit surface base color.
    pub const BASE_COLOR: &str = "uBaseColor";
}

/// The color uniform name for a role.
#[must_use]
pub fn light_color_name(role: LightRole) -> &'static str {
    match role {
        LightRole::A => uniform::LIGHT_A_COLOR,
        LightRole::B => uniform::LIGHT_B_COLOR,
    }
}

/// The position uniform name for a role.
#[must_use]
pub fn light_position_name(role: LightRole) -> &'static str {
    match role {
        LightRole::A => uniform::LIGHT_A_POSITION,
        LightRole::B => uniform::LIGHT_B_POSITION,
    }
}

/// The intensity uniform name for a role.
#[must_use]
pub fn light_intensity_name(role: LightRole) -> &'static str {
    match role {
        LightRole::A => uniform::LIGHT_A_INTENSITY,
        LightRole::B => uniform::LIGHT_B_INTENSITY,
    }
}

// ---------------------------------------------------------------------------
// Cells
// ---------------------------------------------------------------------------

/// Shared 3D-vector storage for position uniforms. The cell's identity is
/// stable for the material's lifetime; notifications rewrite its contents
/// so axis-level observers (the debug panel) stay live.
pub type VectorCell = Rc<RefCell<Vec3>>;

/// A component of a vector uniform, for axis-level debug edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// X component.
    X,
    /// Y component.
    Y,
    /// Z component.
    Z,
}

/// One typed uniform cell.
#[derive(Clone, Debug)]
pub enum UniformValue {
    /// A plain scalar, reassigned on change.
    Scalar(f32),
    /// A linear-RGB color aliasing the owning light's cell.
    Color(ColorCell),
    /// A 3D vector recomputed in place on change.
    Vector(VectorCell),
}

// ---------------------------------------------------------------------------
// GPU packing
// ---------------------------------------------------------------------------

/// Packed uniform state for upload.
/// NOTE: Must match the WGSL struct layout exactly (112 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SphereUniform {
    /// Accumulated shader time.
    pub time: f32,
    /// Distortion noise scale.
    pub distortion_frequency: f32,
    /// Distortion magnitude.
    pub distortion_strength: f32,
    /// Displacement noise scale.
    pub displacement_frequency: f32,
    /// Displacement magnitude.
    pub displacement_strength: f32,
    /// Key light intensity.
    pub light_a_intensity: f32,
    /// Fill light intensity.
    pub light_b_intensity: f32,
    #[doc(hidden)]
    pub _pad0: f32,
    /// Key light linear-RGB color.
    pub light_a_color: [f32; 3],
    #[doc(hidden)]
    pub _pad1: f32,
    /// Key light Cartesian position.
    pub light_a_position: [f32; 3],
    #[doc(hidden)]
    pub _pad2: f32,
    /// Fill light linear-RGB color.
    pub light_b_color: [f32; 3],
    #[doc(hidden)]
    pub _pad3: f32,
    /// Fill light Cartesian position.
    pub light_b_position: [f32; 3],
    #[doc(hidden)]
    pub _pad4: f32,
    /// Unlit base color.
    pub base_color: [f32; 3],
    #[doc(hidden)]
    pub _pad5: f32,
}

// ---------------------------------------------------------------------------
// SurfaceMaterial
// ---------------------------------------------------------------------------

/// The uniform mapping bridging the [`LightSet`] and scalar tunables to the
/// shader program. Constructed with its table fully populated before the
/// sphere body is built; cells keep their identity for the material's
/// lifetime.
#[derive(Debug)]
pub struct SurfaceMaterial {
    uniforms: BTreeMap<&'static str, UniformValue>,
}

impl SurfaceMaterial {
    /// Build the table from the lights' initial values and the shape
    /// tunables.
    ///
    /// # Errors
    ///
    /// Returns [`OrbError::MissingLightRole`] when `lights` lacks a
    /// required role — a fatal configuration error, since no safe default
    /// exists for a missing light.
    pub fn new(
        lights: &LightSet,
        shape: &ShapeOptions,
    ) -> Result<Self, OrbError> {
        let mut uniforms: BTreeMap<&'static str, UniformValue> =
            BTreeMap::new();

        let _ = uniforms.insert(uniform::TIME, UniformValue::Scalar(0.0));
        let _ = uniforms.insert(
            uniform::DISTORTION_FREQUENCY,
            UniformValue::Scalar(shape.distortion_frequency),
        );
        let _ = uniforms.insert(
            uniform::DISTORTION_STRENGTH,
            UniformValue::Scalar(shape.distortion_strength),
        );
        let _ = uniforms.insert(
            uniform::DISPLACEMENT_FREQUENCY,
            UniformValue::Scalar(shape.displacement_frequency),
        );
        let _ = uniforms.insert(
            uniform::DISPLACEMENT_STRENGTH,
            UniformValue::Scalar(shape.displacement_strength),
        );

        for role in LightRole::ALL {
            let light = lights.require(role)?;
            // Color: alias the light's own cell. Position: a fresh cell
            // seeded from the current spherical position. Intensity: copy.
            let _ = uniforms.insert(
                light_color_name(role),
                UniformValue::Color(light.color_cell()),
            );
            let _ = uniforms.insert(
                light_position_name(role),
                UniformValue::Vector(Rc::new(RefCell::new(light.cartesian()))),
            );
            let _ = uniforms.insert(
                light_intensity_name(role),
                UniformValue::Scalar(light.intensity()),
            );
        }

        let _ = uniforms.insert(
            uniform::BASE_COLOR,
            UniformValue::Color(Rc::new(RefCell::new(Vec3::ZERO))),
        );

        Ok(Self { uniforms })
    }

    // -- Cell access --------------------------------------------------------

    /// The cell registered under `name`, if any.
    #[must_use]
    pub fn cell(&self, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(name)
    }

    /// Read a scalar uniform.
    #[must_use]
    pub fn scalar(&self, name: &str) -> Option<f32> {
        match self.uniforms.get(name) {
            Some(UniformValue::Scalar(v)) => Some(*v),
            _ => None,
        }
    }

    /// Reassign a scalar uniform. Returns `false` when `name` is not a
    /// registered scalar cell, leaving the table untouched.
    pub fn set_scalar(&mut self, name: &str, value: f32) -> bool {
        match self.uniforms.get_mut(name) {
            Some(UniformValue::Scalar(v)) => {
                *v = value;
                true
            }
            _ => false,
        }
    }

    /// Handle to a color cell. Cloning the `Rc` aliases the same storage.
    #[must_use]
    pub fn color_cell(&self, name: &str) -> Option<ColorCell> {
        match self.uniforms.get(name) {
            Some(UniformValue::Color(cell)) => Some(Rc::clone(cell)),
            _ => None,
        }
    }

    /// Handle to a vector cell. Cloning the `Rc` aliases the same storage.
    #[must_use]
    pub fn vector_cell(&self, name: &str) -> Option<VectorCell> {
        match self.uniforms.get(name) {
            Some(UniformValue::Vector(cell)) => Some(Rc::clone(cell)),
            _ => None,
        }
    }

    // -- Change notifications -----------------------------------------------

    /// Notification that `role`'s color was edited.
    ///
    /// Deliberately a no-op: the color uniform aliases the light's own
    /// cell, so the edit is already visible. Copying here would detach the
    /// shared cell and break the synchronization invariant — do not "fix"
    /// this into an assignment.
    pub fn light_color_changed(&self, role: LightRole) {
        let _ = role;
    }

    /// Notification that `role`'s intensity was edited: copy the current
    /// value into the intensity uniform. Idempotent between edits.
    pub fn light_intensity_changed(
        &mut self,
        role: LightRole,
        light: &SphericalLight,
    ) {
        let _ = self.set_scalar(light_intensity_name(role), light.intensity());
    }

    /// Notification that `role`'s angular position was edited: recompute
    /// the Cartesian form and write it into the existing vector cell.
    /// The cell's identity is preserved so axis-level bindings held by the
    /// debug panel keep observing the live value.
    pub fn light_position_changed(
        &mut self,
        role: LightRole,
        light: &SphericalLight,
    ) {
        if let Some(UniformValue::Vector(cell)) =
            self.uniforms.get(light_position_name(role))
        {
            *cell.borrow_mut() = light.cartesian();
        }
    }

    /// Axis-level edit of a position uniform (debug panel rows). Mutates
    /// the one component in place; the other two are untouched.
    pub fn set_light_position_axis(
        &mut self,
        role: LightRole,
        axis: Axis,
        value: f32,
    ) {
        if let Some(UniformValue::Vector(cell)) =
            self.uniforms.get(light_position_name(role))
        {
            let mut v = cell.borrow_mut();
            match axis {
                Axis::X => v.x = value,
                Axis::Y => v.y = value,
                Axis::Z => v.z = value,
            }
        }
    }

    // -- GPU packing --------------------------------------------------------

    fn color(&self, name: &str) -> [f32; 3] {
        match self.uniforms.get(name) {
            Some(UniformValue::Color(cell)) => cell.borrow().to_array(),
            _ => [0.0; 3],
        }
    }

    fn vector(&self, name: &str) -> [f32; 3] {
        match self.uniforms.get(name) {
            Some(UniformValue::Vector(cell)) => cell.borrow().to_array(),
            _ => [0.0; 3],
        }
    }

    /// Pack the table into the fixed GPU layout. Pure read; upload is the
    /// renderer's job (`queue.write_buffer` into a buffer allocated once).
    #[must_use]
    pub fn to_raw(&self) -> SphereUniform {
        SphereUniform {
            time: self.scalar(uniform::TIME).unwrap_or(0.0),
            distortion_frequency: self
                .scalar(uniform::DISTORTION_FREQUENCY)
                .unwrap_or(0.0),
            distortion_strength: self
                .scalar(uniform::DISTORTION_STRENGTH)
                .unwrap_or(0.0),
            displacement_frequency: self
                .scalar(uniform::DISPLACEMENT_FREQUENCY)
                .unwrap_or(0.0),
            displacement_strength: self
                .scalar(uniform::DISPLACEMENT_STRENGTH)
                .unwrap_or(0.0),
            light_a_intensity: self
                .scalar(uniform::LIGHT_A_INTENSITY)
                .unwrap_or(0.0),
            light_b_intensity: self
                .scalar(uniform::LIGHT_B_INTENSITY)
                .unwrap_or(0.0),
            _pad0: 0.0,
            light_a_color: self.color(uniform::LIGHT_A_COLOR),
            _pad1: 0.0,
            light_a_position: self.vector(uniform::LIGHT_A_POSITION),
            _pad2: 0.0,
            light_b_color: self.color(uniform::LIGHT_B_COLOR),
            _pad3: 0.0,
            light_b_position: self.vector(uniform::LIGHT_B_POSITION),
            _pad4: 0.0,
            base_color: self.color(uniform::BASE_COLOR),
            _pad5: 0.0,
        }
    }
}
