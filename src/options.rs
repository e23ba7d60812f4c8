//! Centralized tunables with TOML preset support.
//!
//! Every designer-facing value (light colors, intensities, angular
//! positions; distortion/displacement parameters; time frequency) lives
//! here. Options serialize to/from TOML for presets, and expose a JSON
//! Schema carrying the same min/max/step metadata the debug panel declares
//! on its controls.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::OrbError;

/// One light's authored parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(inline)]
pub struct LightOptions {
    /// Authoring color, hex (`#rrggbb` or `#rgb`).
    #[schemars(title = "Color")]
    pub color: String,
    /// Light intensity.
    #[schemars(title = "Intensity", range(min = 0.0, max = 10.0))]
    pub intensity: f32,
    /// Polar angle from +Y, radians.
    #[schemars(title = "Phi", range(min = 0.0, max = 3.14159), extend("step" = 0.001))]
    pub phi: f32,
    /// Azimuth around Y from +Z, radians.
    #[schemars(title = "Theta", range(min = -3.14159, max = 3.14159), extend("step" = 0.001))]
    pub theta: f32,
    /// Distance from the origin.
    #[schemars(skip)]
    pub radius: f32,
}

/// The key/fill light pair's authored parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
pub struct LightingOptions {
    /// Key light (role A).
    pub light_a: LightOptions,
    /// Fill light (role B).
    pub light_b: LightOptions,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            light_a: LightOptions {
                color: "#ff0000".to_owned(),
                intensity: 1.85,
                phi: 0.615,
                theta: 2.049,
                radius: 1.0,
            },
            light_b: LightOptions {
                color: "#3158ff".to_owned(),
                intensity: 1.4,
                phi: 2.561,
                theta: -1.844,
                radius: 1.0,
            },
        }
    }
}

/// Procedural surface parameters and the animation time scale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Shape", inline)]
#[serde(default)]
pub struct ShapeOptions {
    /// Noise scale of the surface distortion term.
    #[schemars(title = "Distortion Frequency", range(min = 0.0, max = 10.0), extend("step" = 0.001))]
    pub distortion_frequency: f32,
    /// Magnitude of the surface distortion term.
    #[schemars(title = "Distortion Strength", range(min = 0.0, max = 10.0), extend("step" = 0.001))]
    pub distortion_strength: f32,
    /// Noise scale of the radial displacement term.
    #[schemars(title = "Displacement Frequency", range(min = 0.0, max = 5.0), extend("step" = 0.001))]
    pub displacement_frequency: f32,
    /// Magnitude of the radial displacement term.
    #[schemars(title = "Displacement Strength", range(min = 0.0, max = 1.0), extend("step" = 0.001))]
    pub displacement_strength: f32,
    /// Scale applied to the host's frame delta (milliseconds) when
    /// accumulating shader time.
    #[schemars(title = "Time Frequency", range(min = 0.0, max = 0.001), extend("step" = 0.000001))]
    pub time_frequency: f32,
}

impl Default for ShapeOptions {
    fn default() -> Self {
        Self {
            distortion_frequency: 2.0,
            distortion_strength: 1.5,
            displacement_frequency: 2.0,
            displacement_strength: 0.2,
            time_frequency: 0.0001,
        }
    }
}

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[shape]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Light parameters.
    pub lighting: LightingOptions,
    /// Surface shape and animation parameters.
    pub shape: ShapeOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`OrbError::Io`] on read failure or
    /// [`OrbError::OptionsParse`] on malformed TOML.
    pub fn load(path: &Path) -> Result<Self, OrbError> {
        let content = std::fs::read_to_string(path).map_err(OrbError::Io)?;
        toml::from_str(&content)
            .map_err(|e| OrbError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`OrbError::OptionsParse`] on serialization failure or
    /// [`OrbError::Io`] on write failure.
    pub fn save(&self, path: &Path) -> Result<(), OrbError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| OrbError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(OrbError::Io)?;
        }
        std::fs::write(path, content).map_err(OrbError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[shape]
distortion_strength = 3.0
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.shape.distortion_strength, 3.0);
        // Everything else should be default
        assert_eq!(opts.shape.displacement_strength, 0.2);
        assert_eq!(opts.lighting.light_a.color, "#ff0000");
        assert_eq!(opts.lighting.light_b.intensity, 1.4);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("lighting"));
        assert!(props.contains_key("shape"));

        let shape = &props["shape"]["properties"];
        assert!(shape.get("time_frequency").is_some());
        assert!(shape.get("distortion_frequency").is_some());

        // Radius is fixed in the UI; only the angles are exposed.
        let light_a =
            &props["lighting"]["properties"]["light_a"]["properties"];
        assert!(light_a.get("phi").is_some());
        assert!(light_a.get("radius").is_none());
    }
}
