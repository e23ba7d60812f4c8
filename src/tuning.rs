//! Declarative debug bindings: the bridge between an interactive parameter
//! panel and the sphere's edit methods.
//!
//! The panel collaborator owns widgets, layout, and styling; this module
//! owns only the wiring. Each binding is a data row pairing a panel
//! control with an [`EditAction`], interpreted by one generic dispatcher —
//! never per-field bespoke mutation, and never a direct uniform write from
//! this layer. All derived-state recomputation stays in the lights and the
//! material, so a scripted edit and an interactive one exercise identical
//! logic.

use std::f32::consts::PI;

use crate::error::OrbError;
use crate::lighting::LightRole;
use crate::material::{uniform, Axis};
use crate::sphere::Sphere;

// ---------------------------------------------------------------------------
// Panel collaborator surface
// ---------------------------------------------------------------------------

/// Identity of a folder created on the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FolderId(pub u32);

/// Identity of a control created on the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ControlId(pub u32);

/// What kind of widget a control row asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlKind {
    /// A numeric slider honoring `min`/`max`/`step`.
    Slider,
    /// A color swatch editing a hex string; the range fields are unused.
    Color,
}

/// Declarative widget request: label plus the bounds the control must
/// enforce. Range enforcement lives here, not in the light setters.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlSpec {
    /// Row label.
    pub label: String,
    /// Lower bound (sliders).
    pub min: f32,
    /// Upper bound (sliders).
    pub max: f32,
    /// Increment (sliders).
    pub step: f32,
    /// Widget kind.
    pub kind: ControlKind,
}

impl ControlSpec {
    fn slider(label: &str, min: f32, max: f32, step: f32) -> Self {
        Self {
            label: label.to_owned(),
            min,
            max,
            step,
            kind: ControlKind::Slider,
        }
    }

    fn color(label: &str) -> Self {
        Self {
            label: label.to_owned(),
            min: 0.0,
            max: 0.0,
            step: 0.0,
            kind: ControlKind::Color,
        }
    }
}

/// A control's current (or initial) value.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlValue {
    /// Numeric value (sliders).
    Scalar(f32),
    /// Hex color string (color swatches).
    Color(String),
}

/// The four operations this crate needs from a debug panel. Everything
/// else — styling, layout, persistence of panel state — is the panel's
/// concern.
pub trait ControlPanel {
    /// Create a folder.
    fn add_folder(&mut self, title: &str, expanded: bool) -> FolderId;
    /// Create a control inside a folder, seeded with `initial`.
    fn add_control(
        &mut self,
        folder: FolderId,
        spec: &ControlSpec,
        initial: ControlValue,
    ) -> ControlId;
}

// ---------------------------------------------------------------------------
// Binding actions
// ---------------------------------------------------------------------------

/// What an edited control means. Carries the role explicitly so each
/// role's angular edits drive only that role's own position uniform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditAction {
    /// Re-decode a light's authored color (shared-cell path, no copy).
    LightColor(LightRole),
    /// Copy a light's intensity into its uniform.
    LightIntensity(LightRole),
    /// Store phi, then recompute that light's position uniform in place.
    LightPhi(LightRole),
    /// Store theta, then recompute that light's position uniform in place.
    LightTheta(LightRole),
    /// Rescale the animation driver's time frequency.
    TimeFrequency,
    /// Reassign a scalar uniform by its shader name.
    MaterialScalar(&'static str),
    /// Edit one component of a position uniform directly.
    LightPositionAxis(LightRole, Axis),
}

// ---------------------------------------------------------------------------
// DebugBindings
// ---------------------------------------------------------------------------

/// The installed binding table: panel control → edit action. Purely
/// wiring; holds no sphere state. Present only when the host supplies a
/// panel.
#[derive(Debug)]
pub struct DebugBindings {
    rows: Vec<(ControlId, EditAction)>,
}

impl DebugBindings {
    /// Declare the full folder/control layout on `panel`, seeding every
    /// control from the sphere's current state, and return the binding
    /// table. Must run after construction: the rows reference material
    /// uniforms that must already exist.
    pub fn install(panel: &mut dyn ControlPanel, sphere: &Sphere) -> Self {
        let mut rows = Vec::new();
        let root = panel.add_folder("Sphere", true);

        for role in LightRole::ALL {
            Self::install_light(panel, sphere, role, &mut rows);
        }

        let material = sphere.material();
        let scalar = |name: &str| material.scalar(name).unwrap_or(0.0);

        rows.push((
            panel.add_control(
                root,
                &ControlSpec::slider("timeFrequency", 0.0, 0.001, 0.000_001),
                ControlValue::Scalar(sphere.driver().time_frequency()),
            ),
            EditAction::TimeFrequency,
        ));
        for (name, max) in [
            (uniform::DISTORTION_FREQUENCY, 10.0),
            (uniform::DISTORTION_STRENGTH, 10.0),
            (uniform::DISPLACEMENT_FREQUENCY, 5.0),
            (uniform::DISPLACEMENT_STRENGTH, 1.0),
        ] {
            rows.push((
                panel.add_control(
                    root,
                    &ControlSpec::slider(name, 0.0, max, 0.001),
                    ControlValue::Scalar(scalar(name)),
                ),
                EditAction::MaterialScalar(name),
            ));
        }

        // Key-light position by axis, observing the live vector cell.
        let position = material
            .vector_cell(uniform::LIGHT_A_POSITION)
            .map_or(glam::Vec3::ZERO, |cell| *cell.borrow());
        for (axis, label, value) in [
            (Axis::X, "uLightAPositionX", position.x),
            (Axis::Y, "uLightAPositionY", position.y),
            (Axis::Z, "uLightAPositionZ", position.z),
        ] {
            rows.push((
                panel.add_control(
                    root,
                    &ControlSpec::slider(label, -2.0, 2.0, 0.001),
                    ControlValue::Scalar(value),
                ),
                EditAction::LightPositionAxis(LightRole::A, axis),
            ));
        }

        Self { rows }
    }

    fn install_light(
        panel: &mut dyn ControlPanel,
        sphere: &Sphere,
        role: LightRole,
        rows: &mut Vec<(ControlId, EditAction)>,
    ) {
        let Some(light) = sphere.lights().get(role) else {
            return;
        };
        let folder = panel.add_folder(&format!("Light {role}"), true);

        rows.push((
            panel.add_control(
                folder,
                &ControlSpec::color("color"),
                ControlValue::Color(light.color_value().to_owned()),
            ),
            EditAction::LightColor(role),
        ));
        rows.push((
            panel.add_control(
                folder,
                &ControlSpec::slider("intensity", 0.0, 10.0, 0.01),
                ControlValue::Scalar(light.intensity()),
            ),
            EditAction::LightIntensity(role),
        ));
        rows.push((
            panel.add_control(
                folder,
                &ControlSpec::slider("phi", 0.0, PI, 0.001),
                ControlValue::Scalar(light.position().phi),
            ),
            EditAction::LightPhi(role),
        ));
        rows.push((
            panel.add_control(
                folder,
                &ControlSpec::slider("theta", -PI, PI, 0.001),
                ControlValue::Scalar(light.position().theta),
            ),
            EditAction::LightTheta(role),
        ));
    }

    /// Number of installed rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether any rows are installed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The action bound to a control, if any.
    #[must_use]
    pub fn action_for(&self, control: ControlId) -> Option<EditAction> {
        self.rows
            .iter()
            .find(|(id, _)| *id == control)
            .map(|(_, action)| *action)
    }

    /// Dispatch one change notification from the panel. Unknown controls
    /// are ignored (the panel may host rows this crate did not install).
    ///
    /// # Errors
    ///
    /// Propagates the edit's own failure, e.g.
    /// [`OrbError::InvalidColorFormat`]; the prior state stays in effect.
    pub fn handle_change(
        &self,
        sphere: &mut Sphere,
        control: ControlId,
        value: &ControlValue,
    ) -> Result<(), OrbError> {
        match self.action_for(control) {
            Some(action) => sphere.apply_edit(action, value),
            None => {
                log::debug!("change on unbound control {control:?}");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;

    struct RecordingPanel {
        folders: Vec<(String, bool)>,
        controls: Vec<(FolderId, ControlSpec, ControlValue)>,
    }

    impl RecordingPanel {
        fn new() -> Self {
            Self {
                folders: Vec::new(),
                controls: Vec::new(),
            }
        }

        fn control_by_label(&self, folder_title: &str, label: &str) -> ControlId {
            let folder = FolderId(
                self.folders
                    .iter()
                    .position(|(t, _)| t == folder_title)
                    .unwrap() as u32,
            );
            ControlId(
                self.controls
                    .iter()
                    .position(|(f, spec, _)| *f == folder && spec.label == label)
                    .unwrap() as u32,
            )
        }
    }

    impl ControlPanel for RecordingPanel {
        fn add_folder(&mut self, title: &str, expanded: bool) -> FolderId {
            self.folders.push((title.to_owned(), expanded));
            FolderId(self.folders.len() as u32 - 1)
        }

        fn add_control(
            &mut self,
            folder: FolderId,
            spec: &ControlSpec,
            initial: ControlValue,
        ) -> ControlId {
            self.controls.push((folder, spec.clone(), initial));
            ControlId(self.controls.len() as u32 - 1)
        }
    }

    fn setup() -> (Sphere, RecordingPanel, DebugBindings) {
        let sphere =
            Sphere::with_segments(&Options::default(), 8).unwrap();
        let mut panel = RecordingPanel::new();
        let bindings = DebugBindings::install(&mut panel, &sphere);
        (sphere, panel, bindings)
    }

    #[test]
    fn install_declares_expected_layout() {
        let (_, panel, bindings) = setup();
        let titles: Vec<&str> =
            panel.folders.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(titles, ["Sphere", "Light A", "Light B"]);
        assert!(panel.folders.iter().all(|(_, expanded)| *expanded));
        // 2 lights × 4 rows + timeFrequency + 4 scalars + 3 axes
        assert_eq!(bindings.len(), 16);
        assert_eq!(panel.controls.len(), 16);
    }

    #[test]
    fn control_specs_carry_declared_bounds() {
        let (_, panel, _) = setup();
        let (_, spec, initial) = panel
            .controls
            .iter()
            .find(|(_, spec, _)| spec.label == "timeFrequency")
            .unwrap();
        assert_eq!(spec.max, 0.001);
        assert_eq!(spec.step, 0.000_001);
        assert_eq!(spec.kind, ControlKind::Slider);
        assert_eq!(*initial, ControlValue::Scalar(0.0001));

        let (_, spec, initial) = panel
            .controls
            .iter()
            .find(|(f, spec, _)| spec.label == "color" && f.0 == 1)
            .unwrap();
        assert_eq!(spec.kind, ControlKind::Color);
        assert_eq!(*initial, ControlValue::Color("#ff0000".to_owned()));
    }

    #[test]
    fn theta_edit_drives_only_its_own_role() {
        let (mut sphere, panel, bindings) = setup();
        let a_before = *sphere
            .material()
            .vector_cell(uniform::LIGHT_A_POSITION)
            .unwrap()
            .borrow();

        let control = panel.control_by_label("Light B", "theta");
        bindings
            .handle_change(&mut sphere, control, &ControlValue::Scalar(0.5))
            .unwrap();

        let a_after = *sphere
            .material()
            .vector_cell(uniform::LIGHT_A_POSITION)
            .unwrap()
            .borrow();
        let b_after = *sphere
            .material()
            .vector_cell(uniform::LIGHT_B_POSITION)
            .unwrap()
            .borrow();

        assert_eq!(a_after, a_before, "light A position must not move");
        let expected = sphere
            .lights()
            .get(LightRole::B)
            .unwrap()
            .cartesian();
        assert!((b_after - expected).length() < 1e-6);
        assert_eq!(
            sphere.lights().get(LightRole::B).unwrap().position().theta,
            0.5
        );
    }

    #[test]
    fn color_edit_routes_through_light_and_shared_cell() {
        let (mut sphere, panel, bindings) = setup();
        let cell = sphere
            .material()
            .color_cell(uniform::LIGHT_A_COLOR)
            .unwrap();

        let control = panel.control_by_label("Light A", "color");
        bindings
            .handle_change(
                &mut sphere,
                control,
                &ControlValue::Color("#00ff00".to_owned()),
            )
            .unwrap();
        assert_eq!(*cell.borrow(), glam::Vec3::new(0.0, 1.0, 0.0));

        // A rejected edit leaves both forms untouched.
        let err = bindings.handle_change(
            &mut sphere,
            control,
            &ControlValue::Color("bogus".to_owned()),
        );
        assert!(matches!(err, Err(OrbError::InvalidColorFormat(_))));
        assert_eq!(*cell.borrow(), glam::Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(
            sphere.lights().get(LightRole::A).unwrap().color_value(),
            "#00ff00"
        );
    }

    #[test]
    fn intensity_edit_copies_into_uniform() {
        let (mut sphere, panel, bindings) = setup();
        let control = panel.control_by_label("Light B", "intensity");
        bindings
            .handle_change(&mut sphere, control, &ControlValue::Scalar(5.0))
            .unwrap();
        assert_eq!(
            sphere.material().scalar(uniform::LIGHT_B_INTENSITY),
            Some(5.0)
        );
        assert_eq!(
            sphere.lights().get(LightRole::B).unwrap().intensity(),
            5.0
        );
    }

    #[test]
    fn axis_edit_mutates_live_position_cell() {
        let (mut sphere, panel, bindings) = setup();
        let cell = sphere
            .material()
            .vector_cell(uniform::LIGHT_A_POSITION)
            .unwrap();
        let control = panel.control_by_label("Sphere", "uLightAPositionY");
        bindings
            .handle_change(&mut sphere, control, &ControlValue::Scalar(1.5))
            .unwrap();
        assert_eq!(cell.borrow().y, 1.5);
    }

    #[test]
    fn scalar_uniform_edit_and_time_frequency() {
        let (mut sphere, panel, bindings) = setup();
        let control =
            panel.control_by_label("Sphere", uniform::DISPLACEMENT_STRENGTH);
        bindings
            .handle_change(&mut sphere, control, &ControlValue::Scalar(0.9))
            .unwrap();
        assert_eq!(
            sphere.material().scalar(uniform::DISPLACEMENT_STRENGTH),
            Some(0.9)
        );

        let control = panel.control_by_label("Sphere", "timeFrequency");
        bindings
            .handle_change(&mut sphere, control, &ControlValue::Scalar(0.0005))
            .unwrap();
        assert_eq!(sphere.driver().time_frequency(), 0.0005);
    }

    #[test]
    fn unbound_control_is_ignored() {
        let (mut sphere, _, bindings) = setup();
        bindings
            .handle_change(
                &mut sphere,
                ControlId(9999),
                &ControlValue::Scalar(1.0),
            )
            .unwrap();
    }
}
