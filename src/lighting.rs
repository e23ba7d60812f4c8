//! Spherical-coordinate point lights and the key/fill light pair.
//!
//! Each light stores its color twice: an authoring string (hex, the source
//! of truth) and a decoded linear-RGB cell. The cell is reference-counted
//! so the material's color uniform can alias it directly — re-decoding in
//! place on every color edit keeps the two forms synchronized without any
//! copy step on the uniform side.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use glam::Vec3;

use crate::error::OrbError;

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// Identifies one of the two lights. Membership is fixed: `A` is the key
/// light, `B` the fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LightRole {
    /// Key light.
    A,
    /// Fill light.
    B,
}

impl LightRole {
    /// Both roles, in uniform-table order.
    pub const ALL: [Self; 2] = [Self::A, Self::B];

    pub(crate) fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
}

impl fmt::Display for LightRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

// ---------------------------------------------------------------------------
// Spherical coordinates
// ---------------------------------------------------------------------------

/// Spherical-coordinate position: radius, polar angle `phi` in `[0, π]`
/// measured from the +Y axis, azimuth `theta` in `[-π, π]` measured around
/// Y from +Z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spherical {
    /// Distance from the origin.
    pub radius: f32,
    /// Polar angle from +Y, radians.
    pub phi: f32,
    /// Azimuth around Y from +Z, radians.
    pub theta: f32,
}

impl Spherical {
    /// Create a spherical position. Angles are stored as given; range
    /// enforcement belongs to the editing control's declared bounds.
    #[must_use]
    pub fn new(radius: f32, phi: f32, theta: f32) -> Self {
        Self { radius, phi, theta }
    }

    /// Convert to Cartesian form. Y-up convention:
    /// `x = r·sinφ·sinθ`, `y = r·cosφ`, `z = r·sinφ·cosθ`, so `phi = 0`
    /// yields `(0, r, 0)` and `phi = π/2` sweeps the horizontal unit circle
    /// as `theta` varies. Pure; no side effects.
    #[must_use]
    pub fn to_cartesian(self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }
}

// ---------------------------------------------------------------------------
// Color decoding
// ---------------------------------------------------------------------------

/// Shared linear-RGB color storage. Cloning the `Rc` aliases the same cell,
/// which is exactly how the material's color uniforms stay synchronized.
pub type ColorCell = Rc<RefCell<Vec3>>;

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Decode a `#rrggbb` or `#rgb` authoring string into linear RGB.
///
/// # Errors
///
/// Returns [`OrbError::InvalidColorFormat`] when the string is not a hex
/// color of either accepted length.
pub fn decode_hex_color(value: &str) -> Result<Vec3, OrbError> {
    let invalid = || OrbError::InvalidColorFormat(value.to_owned());

    let digits = value.strip_prefix('#').ok_or_else(invalid)?;
    let channels: [u8; 3] = match digits.len() {
        6 => {
            let mut out = [0u8; 3];
            for (i, slot) in out.iter_mut().enumerate() {
                let pair = digits.get(i * 2..i * 2 + 2).ok_or_else(invalid)?;
                *slot = u8::from_str_radix(pair, 16).map_err(|_| invalid())?;
            }
            out
        }
        3 => {
            let mut out = [0u8; 3];
            for (i, slot) in out.iter_mut().enumerate() {
                let digit = digits.get(i..=i).ok_or_else(invalid)?;
                let nibble =
                    u8::from_str_radix(digit, 16).map_err(|_| invalid())?;
                *slot = nibble * 17; // 0xf -> 0xff
            }
            out
        }
        _ => return Err(invalid()),
    };

    Ok(Vec3::new(
        srgb_to_linear(f32::from(channels[0]) / 255.0),
        srgb_to_linear(f32::from(channels[1]) / 255.0),
        srgb_to_linear(f32::from(channels[2]) / 255.0),
    ))
}

// ---------------------------------------------------------------------------
// SphericalLight
// ---------------------------------------------------------------------------

/// One point light: intensity, authored color, and a spherical-coordinate
/// angular position. Created once at construction, mutated only through
/// edit notifications, owned by the [`LightSet`] for the scene's lifetime.
#[derive(Debug)]
pub struct SphericalLight {
    intensity: f32,
    color_value: String,
    color: ColorCell,
    position: Spherical,
}

impl SphericalLight {
    /// Create a light from an authoring hex color, intensity, and position.
    ///
    /// # Errors
    ///
    /// Returns [`OrbError::InvalidColorFormat`] if the color string does
    /// not decode.
    pub fn new(
        color_value: &str,
        intensity: f32,
        position: Spherical,
    ) -> Result<Self, OrbError> {
        let decoded = decode_hex_color(color_value)?;
        Ok(Self {
            intensity,
            color_value: color_value.to_owned(),
            color: Rc::new(RefCell::new(decoded)),
            position,
        })
    }

    /// Current intensity.
    #[must_use]
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Store a new intensity unconditionally. No clamping at this layer;
    /// range enforcement belongs to the editing control's declared bounds.
    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity;
    }

    /// The authoring color string currently in effect.
    #[must_use]
    pub fn color_value(&self) -> &str {
        &self.color_value
    }

    /// Handle to the shared linear-RGB cell. The material's color uniform
    /// clones this handle; both always observe the same value.
    #[must_use]
    pub fn color_cell(&self) -> ColorCell {
        Rc::clone(&self.color)
    }

    /// Decode `value` into the shared cell **in place**, preserving cell
    /// identity so aliased uniform references stay valid.
    ///
    /// # Errors
    ///
    /// Returns [`OrbError::InvalidColorFormat`] on an undecodable string;
    /// both the authoring string and the cell keep their prior values.
    pub fn set_color(&mut self, value: &str) -> Result<(), OrbError> {
        let decoded = decode_hex_color(value)?;
        value.clone_into(&mut self.color_value);
        *self.color.borrow_mut() = decoded;
        Ok(())
    }

    /// Current spherical position.
    #[must_use]
    pub fn position(&self) -> Spherical {
        self.position
    }

    /// Store a new polar angle. Does not touch any uniform; position
    /// uniforms are recomputed by the material's change notification.
    pub fn set_phi(&mut self, phi: f32) {
        self.position.phi = phi;
    }

    /// Store a new azimuth. Same uniform contract as [`Self::set_phi`].
    pub fn set_theta(&mut self, theta: f32) {
        self.position.theta = theta;
    }

    /// Store a new radius. Same uniform contract as [`Self::set_phi`].
    pub fn set_radius(&mut self, radius: f32) {
        self.position.radius = radius;
    }

    /// Cartesian form of the current position. See
    /// [`Spherical::to_cartesian`] for the convention.
    #[must_use]
    pub fn cartesian(&self) -> Vec3 {
        self.position.to_cartesian()
    }
}

// ---------------------------------------------------------------------------
// LightSet
// ---------------------------------------------------------------------------

/// The two lights, keyed by role. Membership is fixed after construction;
/// only the lights' own fields mutate.
#[derive(Debug, Default)]
pub struct LightSet {
    lights: [Option<SphericalLight>; 2],
}

impl LightSet {
    /// An empty set. Use [`Self::insert`] to populate, or
    /// [`Self::with_defaults`] for the standard key/fill pair.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard pair: a red key light and a blue fill light at the
    /// reference angular positions (see
    /// [`LightingOptions::default`](crate::options::LightingOptions)).
    ///
    /// # Errors
    ///
    /// Never fails in practice; the default color literals decode. The
    /// `Result` keeps the constructor honest about the decode step.
    pub fn with_defaults() -> Result<Self, OrbError> {
        Self::from_options(&crate::options::LightingOptions::default())
    }

    /// Build the pair from authored options.
    ///
    /// # Errors
    ///
    /// Returns [`OrbError::InvalidColorFormat`] if either authored color
    /// string does not decode.
    pub fn from_options(
        opts: &crate::options::LightingOptions,
    ) -> Result<Self, OrbError> {
        let mut set = Self::new();
        for (role, light) in
            [(LightRole::A, &opts.light_a), (LightRole::B, &opts.light_b)]
        {
            set.insert(
                role,
                SphericalLight::new(
                    &light.color,
                    light.intensity,
                    Spherical::new(light.radius, light.phi, light.theta),
                )?,
            );
        }
        Ok(set)
    }

    /// Assign a light to a role, replacing any previous occupant.
    pub fn insert(&mut self, role: LightRole, light: SphericalLight) {
        self.lights[role.index()] = Some(light);
    }

    /// The light for `role`, if present.
    #[must_use]
    pub fn get(&self, role: LightRole) -> Option<&SphericalLight> {
        self.lights[role.index()].as_ref()
    }

    /// Mutable access to the light for `role`, if present.
    pub fn get_mut(&mut self, role: LightRole) -> Option<&mut SphericalLight> {
        self.lights[role.index()].as_mut()
    }

    /// The light for `role`, or the construction-time configuration error.
    ///
    /// # Errors
    ///
    /// Returns [`OrbError::MissingLightRole`] when the role is vacant.
    pub fn require(&self, role: LightRole) -> Result<&SphericalLight, OrbError> {
        self.get(role).ok_or(OrbError::MissingLightRole(role))
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, PI};

    use super::*;

    fn assert_vec3_close(a: Vec3, b: Vec3) {
        assert!(
            (a - b).length() < 1e-5,
            "expected {b:?}, got {a:?} (distance {})",
            (a - b).length()
        );
    }

    #[test]
    fn polar_axis_points_up() {
        let p = Spherical::new(1.0, 0.0, 0.0).to_cartesian();
        assert_vec3_close(p, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn equator_traces_horizontal_unit_circle() {
        for i in 0..8 {
            let theta = -PI + (i as f32) * PI / 4.0;
            let p = Spherical::new(1.0, FRAC_PI_2, theta).to_cartesian();
            assert!(p.y.abs() < 1e-6, "equator point left the plane: {p:?}");
            assert!((p.length() - 1.0).abs() < 1e-5);
            assert_vec3_close(p, Vec3::new(theta.sin(), 0.0, theta.cos()));
        }
    }

    #[test]
    fn radius_scales_cartesian_form() {
        let unit = Spherical::new(1.0, 0.8, -1.2).to_cartesian();
        let scaled = Spherical::new(2.5, 0.8, -1.2).to_cartesian();
        assert_vec3_close(scaled, unit * 2.5);
    }

    #[test]
    fn hex_decode_primaries() {
        assert_vec3_close(
            decode_hex_color("#ff0000").unwrap(),
            Vec3::new(1.0, 0.0, 0.0),
        );
        assert_vec3_close(
            decode_hex_color("#00ff00").unwrap(),
            Vec3::new(0.0, 1.0, 0.0),
        );
    }

    #[test]
    fn hex_decode_short_form_expands_digits() {
        // #f00 == #ff0000
        let short = decode_hex_color("#f00").unwrap();
        let long = decode_hex_color("#ff0000").unwrap();
        assert_vec3_close(short, long);
    }

    #[test]
    fn hex_decode_applies_srgb_transfer() {
        // 0x80 / 255 ≈ 0.502 sRGB ≈ 0.2158 linear
        let gray = decode_hex_color("#808080").unwrap();
        assert!((gray.x - 0.215_86).abs() < 1e-3, "got {}", gray.x);
        assert_eq!(gray.x, gray.y);
        assert_eq!(gray.y, gray.z);
    }

    #[test]
    fn hex_decode_rejects_garbage() {
        for bad in ["", "#", "ff0000", "#ff00", "#ggg", "#zzzzzz", "#ff00001"] {
            assert!(
                decode_hex_color(bad).is_err(),
                "{bad:?} should not decode"
            );
        }
    }

    #[test]
    fn set_color_preserves_cell_identity() {
        let mut light = SphericalLight::new(
            "#ff0000",
            1.0,
            Spherical::new(1.0, 0.0, 0.0),
        )
        .unwrap();
        let cell = light.color_cell();
        light.set_color("#00ff00").unwrap();
        assert!(Rc::ptr_eq(&cell, &light.color_cell()));
        assert_vec3_close(*cell.borrow(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(light.color_value(), "#00ff00");
    }

    #[test]
    fn rejected_color_edit_leaves_prior_value() {
        let mut light = SphericalLight::new(
            "#ff0000",
            1.0,
            Spherical::new(1.0, 0.0, 0.0),
        )
        .unwrap();
        let before = *light.color_cell().borrow();
        assert!(light.set_color("not-a-color").is_err());
        assert_eq!(light.color_value(), "#ff0000");
        assert_eq!(*light.color_cell().borrow(), before);
    }

    #[test]
    fn angular_setters_store_components() {
        let mut light = SphericalLight::new(
            "#ffffff",
            1.0,
            Spherical::new(1.0, 0.1, 0.2),
        )
        .unwrap();
        light.set_phi(1.5);
        light.set_theta(-0.5);
        light.set_radius(2.0);
        assert_eq!(light.position(), Spherical::new(2.0, 1.5, -0.5));
    }

    #[test]
    fn default_set_has_both_roles() {
        let set = LightSet::with_defaults().unwrap();
        let a = set.require(LightRole::A).unwrap();
        let b = set.require(LightRole::B).unwrap();
        assert_eq!(a.intensity(), 1.85);
        assert_eq!(a.color_value(), "#ff0000");
        assert_eq!(b.intensity(), 1.4);
        assert_eq!(b.color_value(), "#3158ff");
    }

    #[test]
    fn missing_role_is_reported() {
        let mut set = LightSet::new();
        set.insert(
            LightRole::A,
            SphericalLight::new("#ffffff", 1.0, Spherical::new(1.0, 0.0, 0.0))
                .unwrap(),
        );
        match set.require(LightRole::B) {
            Err(OrbError::MissingLightRole(LightRole::B)) => {}
            other => panic!("expected MissingLightRole(B), got {other:?}"),
        }
    }
}
