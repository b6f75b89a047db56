//! Configuration options for calibscope.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CalibscopeError, Result};

/// Options controlling how a calibration file is parsed, remapped and drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Distance from the camera origin to the far frustum corners (meters).
    pub frustum_length: f32,

    /// Frustum length reached when the normalized slider is at 1.0.
    pub max_frustum_length: f32,

    /// Edge length of the marker cube drawn at every camera (meters).
    pub marker_size: f32,

    /// How calibration orientations are converted into scene rotations.
    pub orientation_remap: OrientationRemap,

    /// Units of the calibration positions.
    pub position_units: PositionUnits,

    /// Component order of the ORIENTATION attribute.
    pub quaternion_layout: QuaternionLayout,

    /// What happens when a numeric token cannot be parsed.
    pub numeric_parse_policy: NumericParsePolicy,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            frustum_length: 1.0,
            max_frustum_length: 4.0,
            marker_size: 0.1,
            orientation_remap: OrientationRemap::EulerRoundTrip,
            position_units: PositionUnits::MillimetersToMeters,
            quaternion_layout: QuaternionLayout::Xyzw,
            numeric_parse_policy: NumericParsePolicy::Abort,
        }
    }
}

impl Options {
    /// Loads options from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let options: Self = serde_json::from_str(&text)?;
        options.validate()?;
        log::debug!("loaded options from {}", path.as_ref().display());
        Ok(options)
    }

    /// Serializes the options as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that lengths are finite and in range.
    pub fn validate(&self) -> Result<()> {
        if !self.frustum_length.is_finite() || self.frustum_length < 0.0 {
            return Err(CalibscopeError::InvalidOption(format!(
                "frustum_length must be a non-negative number, got {}",
                self.frustum_length
            )));
        }
        if !self.max_frustum_length.is_finite() || self.max_frustum_length < 0.0 {
            return Err(CalibscopeError::InvalidOption(format!(
                "max_frustum_length must be a non-negative number, got {}",
                self.max_frustum_length
            )));
        }
        if !self.marker_size.is_finite() || self.marker_size <= 0.0 {
            return Err(CalibscopeError::InvalidOption(format!(
                "marker_size must be positive, got {}",
                self.marker_size
            )));
        }
        Ok(())
    }

    /// Divisor applied to remapped positions, implied by [`Options::position_units`].
    pub fn position_divisor(&self) -> f32 {
        self.position_units.divisor()
    }
}

/// Strategy for converting a calibration quaternion into a scene rotation.
///
/// The two strategies are not numerically equivalent for camera roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrientationRemap {
    /// Build the rotation directly from the source components with the
    /// second and third swapped, mirroring the position swap.
    ComponentSwap,
    /// Go through Euler angles: swap the Y/Z angles and tilt X by +90 degrees
    /// so a forward-looking camera matches the downward-looking rig convention.
    #[default]
    EulerRoundTrip,
}

/// Units of the POSITION attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PositionUnits {
    /// Keep the raw values.
    Raw,
    /// Source is in millimeters; the scene is in meters.
    #[default]
    MillimetersToMeters,
}

impl PositionUnits {
    /// Remapped positions are divided by this value.
    pub fn divisor(self) -> f32 {
        match self {
            PositionUnits::Raw => 1.0,
            PositionUnits::MillimetersToMeters => 1000.0,
        }
    }
}

/// Component order of the ORIENTATION attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuaternionLayout {
    /// `x y z w`
    #[default]
    Xyzw,
    /// `w x y z`
    Wxyz,
}

/// Handling of numeric tokens that fail to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NumericParsePolicy {
    /// Abort the whole load with an error.
    #[default]
    Abort,
    /// Report a warning for the camera and continue with the next one.
    SkipCamera,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_room_scale_variant() {
        let options = Options::default();
        assert_eq!(options.frustum_length, 1.0);
        assert_eq!(options.max_frustum_length, 4.0);
        assert_eq!(options.orientation_remap, OrientationRemap::EulerRoundTrip);
        assert_eq!(options.position_units, PositionUnits::MillimetersToMeters);
        assert_eq!(options.numeric_parse_policy, NumericParsePolicy::Abort);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options: Options =
            serde_json::from_str(r#"{ "orientation_remap": "component_swap", "position_units": "raw" }"#)
                .unwrap();
        assert_eq!(options.orientation_remap, OrientationRemap::ComponentSwap);
        assert_eq!(options.position_units, PositionUnits::Raw);
        assert_eq!(options.marker_size, 0.1);
        assert_eq!(options.position_divisor(), 1.0);
    }

    #[test]
    fn test_json_file_roundtrip() {
        let options = Options {
            numeric_parse_policy: NumericParsePolicy::SkipCamera,
            quaternion_layout: QuaternionLayout::Wxyz,
            ..Options::default()
        };
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, options.to_json().unwrap().as_bytes()).unwrap();

        let loaded = Options::from_json_file(file.path()).unwrap();
        assert_eq!(loaded, options);
    }

    #[test]
    fn test_validate_rejects_bad_lengths() {
        let negative = Options {
            frustum_length: -1.0,
            ..Options::default()
        };
        assert!(matches!(
            negative.validate(),
            Err(CalibscopeError::InvalidOption(_))
        ));

        let no_marker = Options {
            marker_size: 0.0,
            ..Options::default()
        };
        assert!(no_marker.validate().is_err());

        let nan = Options {
            max_frustum_length: f32::NAN,
            ..Options::default()
        };
        assert!(nan.validate().is_err());
    }
}
