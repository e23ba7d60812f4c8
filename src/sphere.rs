//! The sphere body: construction flow, per-frame animation, and the edit
//! dispatcher the debug layer routes through.
//!
//! Construction order is load-bearing: lights first, then the material
//! (which consumes their initial values), then geometry, then the scene
//! attach. Debug bindings, when present, come last — their rows reference
//! material uniforms that must already exist.

use crate::error::OrbError;
use crate::geometry::SphereGeometry;
use crate::lighting::{LightRole, LightSet};
use crate::material::{uniform, SurfaceMaterial};
use crate::options::Options;
use crate::scene::{MeshId, Scene};
use crate::tuning::{ControlValue, EditAction};

// ---------------------------------------------------------------------------
// AnimationDriver
// ---------------------------------------------------------------------------

/// Advances the shader-time uniform from the host's frame delta.
///
/// `uTime` grows without bound; any periodic shader function consuming it
/// must be well-behaved for large inputs. That is an accepted
/// characteristic of the design, not a defect to paper over here.
#[derive(Debug)]
pub struct AnimationDriver {
    time_frequency: f32,
}

impl AnimationDriver {
    /// Create a driver with the given time scale (applied to millisecond
    /// deltas).
    #[must_use]
    pub fn new(time_frequency: f32) -> Self {
        Self { time_frequency }
    }

    /// Current time scale.
    #[must_use]
    pub fn time_frequency(&self) -> f32 {
        self.time_frequency
    }

    /// Replace the time scale. Affects subsequent ticks only.
    pub fn set_time_frequency(&mut self, time_frequency: f32) {
        self.time_frequency = time_frequency;
    }

    /// Advance `uTime` by `delta * time_frequency`.
    ///
    /// # Errors
    ///
    /// Returns [`OrbError::InvalidDelta`] for a negative delta; the tick
    /// is ignored and no state changes.
    pub fn tick(
        &self,
        material: &mut SurfaceMaterial,
        delta: f32,
    ) -> Result<(), OrbError> {
        if delta < 0.0 {
            return Err(OrbError::InvalidDelta(delta));
        }
        let time = material.scalar(uniform::TIME).unwrap_or(0.0);
        let _ = material
            .set_scalar(uniform::TIME, time + delta * self.time_frequency);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sphere
// ---------------------------------------------------------------------------

/// The procedurally displaced sphere: lights, material, geometry, and the
/// per-frame animation driver, attached once to a host scene.
#[derive(Debug)]
pub struct Sphere {
    lights: LightSet,
    material: SurfaceMaterial,
    geometry: SphereGeometry,
    driver: AnimationDriver,
    mesh_id: Option<MeshId>,
}

impl Sphere {
    /// Build the sphere at the default tessellation.
    ///
    /// # Errors
    ///
    /// Returns [`OrbError::InvalidColorFormat`] if an authored light color
    /// does not decode, or [`OrbError::MissingLightRole`] if the light set
    /// ends up incomplete (not reachable from options construction).
    pub fn new(options: &Options) -> Result<Self, OrbError> {
        Self::with_segments(options, crate::geometry::DEFAULT_SEGMENTS)
    }

    /// Build the sphere at an explicit tessellation.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::new`].
    pub fn with_segments(
        options: &Options,
        segments: u32,
    ) -> Result<Self, OrbError> {
        let lights = LightSet::from_options(&options.lighting)?;
        let material = SurfaceMaterial::new(&lights, &options.shape)?;
        let geometry = SphereGeometry::build(1.0, segments);
        log::debug!(
            "sphere: built {} vertices, {} indices",
            geometry.vertices().len(),
            geometry.indices().len()
        );
        Ok(Self {
            lights,
            material,
            geometry,
            driver: AnimationDriver::new(options.shape.time_frequency),
            mesh_id: None,
        })
    }

    /// Insert the mesh into the host scene. Strict single-attach policy.
    ///
    /// # Errors
    ///
    /// Returns [`OrbError::AlreadyAttached`] on every call after the
    /// first; scene membership is left unchanged.
    pub fn attach(&mut self, scene: &mut Scene) -> Result<MeshId, OrbError> {
        if self.mesh_id.is_some() {
            return Err(OrbError::AlreadyAttached);
        }
        let id = scene.add("sphere");
        self.mesh_id = Some(id);
        Ok(id)
    }

    /// The scene id, once attached.
    #[must_use]
    pub fn mesh_id(&self) -> Option<MeshId> {
        self.mesh_id
    }

    /// Per-frame update: the host's clock delta (milliseconds) advances
    /// the shader time. The only mutation path outside edit
    /// notifications.
    ///
    /// # Errors
    ///
    /// Returns [`OrbError::InvalidDelta`] for a negative delta (no state
    /// change).
    pub fn update(&mut self, delta: f32) -> Result<(), OrbError> {
        self.driver.tick(&mut self.material, delta)
    }

    // -- Accessors ----------------------------------------------------------

    /// The light pair.
    #[must_use]
    pub fn lights(&self) -> &LightSet {
        &self.lights
    }

    /// The material and its uniform table.
    #[must_use]
    pub fn material(&self) -> &SurfaceMaterial {
        &self.material
    }

    /// The immutable geometry.
    #[must_use]
    pub fn geometry(&self) -> &SphereGeometry {
        &self.geometry
    }

    /// The animation driver.
    #[must_use]
    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }

    /// Mutable driver access (time-frequency edits).
    pub fn driver_mut(&mut self) -> &mut AnimationDriver {
        &mut self.driver
    }

    // -- Edit dispatch ------------------------------------------------------

    /// Apply one edit from the binding layer. All derived-state
    /// recomputation happens here, through the lights' and material's own
    /// methods, so scripted and interactive edits exercise identical
    /// logic. A rejected edit leaves every cell consistent.
    ///
    /// # Errors
    ///
    /// Returns [`OrbError::InvalidColorFormat`] for an undecodable color
    /// edit (prior color retained) and [`OrbError::MissingLightRole`] if
    /// an action names a vacant role.
    pub fn apply_edit(
        &mut self,
        action: EditAction,
        value: &ControlValue,
    ) -> Result<(), OrbError> {
        match (action, value) {
            (EditAction::LightColor(role), ControlValue::Color(hex)) => {
                self.light_mut(role)?.set_color(hex)?;
                // Shared cell: the material's no-op notification is still
                // part of the contract.
                self.material.light_color_changed(role);
            }
            (EditAction::LightIntensity(role), ControlValue::Scalar(v)) => {
                self.light_mut(role)?.set_intensity(*v);
                let light = self.lights.require(role)?;
                self.material.light_intensity_changed(role, light);
            }
            (EditAction::LightPhi(role), ControlValue::Scalar(v)) => {
                self.light_mut(role)?.set_phi(*v);
                let light = self.lights.require(role)?;
                self.material.light_position_changed(role, light);
            }
            (EditAction::LightTheta(role), ControlValue::Scalar(v)) => {
                // Each role's angular edits drive only that role's own
                // position uniform.
                self.light_mut(role)?.set_theta(*v);
                let light = self.lights.require(role)?;
                self.material.light_position_changed(role, light);
            }
            (EditAction::TimeFrequency, ControlValue::Scalar(v)) => {
                self.driver.set_time_frequency(*v);
            }
            (EditAction::MaterialScalar(name), ControlValue::Scalar(v)) => {
                if !self.material.set_scalar(name, *v) {
                    log::warn!("edit targeted unknown scalar uniform {name}");
                }
            }
            (
                EditAction::LightPositionAxis(role, axis),
                ControlValue::Scalar(v),
            ) => {
                self.material.set_light_position_axis(role, axis, *v);
            }
            (action, value) => {
                log::warn!(
                    "edit value kind mismatch for {action:?}: {value:?}"
                );
            }
        }
        Ok(())
    }

    fn light_mut(
        &mut self,
        role: LightRole,
    ) -> Result<&mut crate::lighting::SphericalLight, OrbError> {
        self.lights
            .get_mut(role)
            .ok_or(OrbError::MissingLightRole(role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere() -> Sphere {
        Sphere::with_segments(&Options::default(), 8).unwrap()
    }

    #[test]
    fn time_accumulates_delta_by_frequency() {
        let mut s = sphere();
        for delta in [16.0, 16.0, 33.0] {
            s.update(delta).unwrap();
        }
        let expected = (16.0 + 16.0 + 33.0) * 0.0001;
        assert!(
            (s.material().scalar(uniform::TIME).unwrap() - expected).abs()
                < 1e-7
        );
    }

    #[test]
    fn frequency_change_affects_only_subsequent_ticks() {
        let mut s = sphere();
        s.update(10.0).unwrap();
        s.driver_mut().set_time_frequency(0.001);
        s.update(10.0).unwrap();
        let expected = 10.0 * 0.0001 + 10.0 * 0.001;
        assert!(
            (s.material().scalar(uniform::TIME).unwrap() - expected).abs()
                < 1e-7
        );
    }

    #[test]
    fn zero_delta_is_valid_and_changes_nothing() {
        let mut s = sphere();
        s.update(5.0).unwrap();
        let before = s.material().scalar(uniform::TIME).unwrap();
        s.update(0.0).unwrap();
        assert_eq!(s.material().scalar(uniform::TIME).unwrap(), before);
    }

    #[test]
    fn negative_delta_is_rejected_without_state_change() {
        let mut s = sphere();
        s.update(5.0).unwrap();
        let before = s.material().scalar(uniform::TIME).unwrap();
        match s.update(-1.0) {
            Err(OrbError::InvalidDelta(d)) => assert_eq!(d, -1.0),
            other => panic!("expected InvalidDelta, got {other:?}"),
        }
        assert_eq!(s.material().scalar(uniform::TIME).unwrap(), before);
    }

    #[test]
    fn attach_is_strict_for_all_later_calls() {
        let mut s = sphere();
        let mut scene = Scene::new();
        let id = s.attach(&mut scene).unwrap();
        assert_eq!(scene.len(), 1);
        assert!(scene.contains(id));
        assert_eq!(s.mesh_id(), Some(id));

        for _ in 0..3 {
            match s.attach(&mut scene) {
                Err(OrbError::AlreadyAttached) => {}
                other => panic!("expected AlreadyAttached, got {other:?}"),
            }
            assert_eq!(scene.len(), 1);
        }
    }

    #[test]
    fn construction_populates_material_before_use() {
        let s = sphere();
        assert_eq!(s.material().scalar(uniform::TIME), Some(0.0));
        assert_eq!(s.material().scalar(uniform::LIGHT_A_INTENSITY), Some(1.85));
        assert!(!s.geometry().vertices().is_empty());
        assert_eq!(s.driver().time_frequency(), 0.0001);
    }
}
