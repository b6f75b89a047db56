//! Calibration file parser.
//!
//! Reads the XML camera calibration dialect:
//!
//! ```xml
//! <Cameras>
//!   <Camera NAME="..." DEVICEID="..." SENSOR_SIZE="W H">
//!     <KeyFrames>
//!       <KeyFrame POSITION="X Y Z" ORIENTATION="q0 q1 q2 q3" FOCAL_LENGTH="F"/>
//!     </KeyFrames>
//!   </Camera>
//! </Cameras>
//! ```
//!
//! Only the first keyframe of each camera is read. Problems with a single
//! camera are reported as [`ParseWarning`]s and never stop the remaining
//! cameras from being read, except for malformed numbers under
//! [`NumericParsePolicy::Abort`].

use std::fmt;

use calibscope_core::{CalibscopeError, NumericParsePolicy, Result};
use glam::{Vec2, Vec3};
use roxmltree::{Document, Node, ParsingOptions};
use thiserror::Error;

/// A required numeric attribute of a camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationField {
    /// `POSITION` on the keyframe.
    Position,
    /// `ORIENTATION` on the keyframe.
    Orientation,
    /// `SENSOR_SIZE` on the camera.
    SensorSize,
    /// `FOCAL_LENGTH` on the keyframe.
    FocalLength,
}

impl CalibrationField {
    /// XML attribute name.
    pub fn attribute(self) -> &'static str {
        match self {
            CalibrationField::Position => "POSITION",
            CalibrationField::Orientation => "ORIENTATION",
            CalibrationField::SensorSize => "SENSOR_SIZE",
            CalibrationField::FocalLength => "FOCAL_LENGTH",
        }
    }

    /// Number of whitespace-separated tokens the attribute must hold.
    pub fn component_count(self) -> usize {
        match self {
            CalibrationField::Position => 3,
            CalibrationField::Orientation => 4,
            CalibrationField::SensorSize => 2,
            CalibrationField::FocalLength => 1,
        }
    }
}

impl fmt::Display for CalibrationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute())
    }
}

/// One camera record as read from the file, in source axis order and units.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationEntry {
    pub name: String,
    pub device_id: String,
    pub position_raw: Vec3,
    /// The four ORIENTATION components in file order.
    pub orientation_raw: [f32; 4],
    pub sensor_size_mm: Vec2,
    pub focal_length_mm: f32,
}

impl CalibrationEntry {
    /// `"NAME (DEVICEID)"`.
    pub fn display_name(&self) -> String {
        display_name(&self.name, &self.device_id)
    }
}

fn display_name(name: &str, device_id: &str) -> String {
    format!("{name} ({device_id})")
}

/// Why a camera was skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalibrationIssue {
    #[error("missing KeyFrames/KeyFrame element")]
    MissingKeyFrame,

    #[error("missing {0} attribute")]
    MissingAttribute(CalibrationField),

    #[error("expected {expected} components for {field}, got {actual}")]
    WrongComponentCount {
        field: CalibrationField,
        expected: usize,
        actual: usize,
    },

    #[error("invalid number '{token}' in {field}")]
    NumericParseFailure {
        field: CalibrationField,
        token: String,
    },

    #[error("{field} must be positive and finite, got {value}")]
    NonPositiveValue { field: CalibrationField, value: String },
}

/// A camera that was dropped, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// Position of the camera among the `Camera` elements.
    pub camera_index: usize,
    /// Display name of the camera.
    pub camera_name: String,
    pub issue: CalibrationIssue,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "camera #{} '{}': {}",
            self.camera_index, self.camera_name, self.issue
        )
    }
}

/// Result of parsing a calibration document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    /// Valid cameras in document order.
    pub entries: Vec<CalibrationEntry>,
    /// One warning per dropped camera.
    pub warnings: Vec<ParseWarning>,
}

/// Parses a calibration document.
///
/// Returns an error if the document is not well-formed, or if a numeric
/// token is malformed and `policy` is [`NumericParsePolicy::Abort`].
pub fn parse(xml: &[u8], policy: NumericParsePolicy) -> Result<ParseReport> {
    let text = std::str::from_utf8(xml)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(text, options)
        .map_err(|e| CalibscopeError::Xml(e.to_string()))?;

    let root = doc.root_element();
    if !root.has_tag_name("Cameras") {
        log::warn!(
            "calibration root element is <{}>, expected <Cameras>",
            root.tag_name().name()
        );
        return Ok(ParseReport::default());
    }

    let mut report = ParseReport::default();

    for (camera_index, camera) in root
        .children()
        .filter(|n| n.has_tag_name("Camera"))
        .enumerate()
    {
        let name = camera.attribute("NAME").unwrap_or_default();
        let device_id = camera.attribute("DEVICEID").unwrap_or_default();

        match read_camera(camera, name, device_id) {
            Ok(entry) => report.entries.push(entry),
            Err(CalibrationIssue::NumericParseFailure { field, token })
                if policy == NumericParsePolicy::Abort =>
            {
                let camera = display_name(name, device_id);
                log::error!("camera #{camera_index} '{camera}': invalid number '{token}' in {field}");
                return Err(CalibscopeError::NumericParse {
                    camera,
                    field: field.to_string(),
                    token,
                });
            }
            Err(issue) => {
                let warning = ParseWarning {
                    camera_index,
                    camera_name: display_name(name, device_id),
                    issue,
                };
                log::warn!("skipping {warning}");
                report.warnings.push(warning);
            }
        }
    }

    log::info!(
        "parsed {} cameras ({} skipped)",
        report.entries.len(),
        report.warnings.len()
    );
    Ok(report)
}

fn read_camera(
    camera: Node<'_, '_>,
    name: &str,
    device_id: &str,
) -> std::result::Result<CalibrationEntry, CalibrationIssue> {
    // The format allows several keyframes for moving cameras; only the first is used.
    let keyframe = camera
        .children()
        .filter(|n| n.has_tag_name("KeyFrames"))
        .find_map(|frames| frames.children().find(|n| n.has_tag_name("KeyFrame")))
        .ok_or(CalibrationIssue::MissingKeyFrame)?;

    let [px, py, pz] = read_components::<3>(keyframe, CalibrationField::Position)?;
    let orientation = read_components::<4>(keyframe, CalibrationField::Orientation)?;
    let sensor_size = read_components::<2>(camera, CalibrationField::SensorSize)?;
    require_positive(CalibrationField::SensorSize, &sensor_size)?;
    let [sw, sh] = sensor_size;
    let focal = read_components::<1>(keyframe, CalibrationField::FocalLength)?;
    require_positive(CalibrationField::FocalLength, &focal)?;
    let [focal_length] = focal;

    Ok(CalibrationEntry {
        name: name.to_string(),
        device_id: device_id.to_string(),
        position_raw: Vec3::new(px, py, pz),
        orientation_raw: orientation,
        sensor_size_mm: Vec2::new(sw, sh),
        focal_length_mm: focal_length,
    })
}

/// Optics must be strictly positive for the frustum to face forward.
fn require_positive(
    field: CalibrationField,
    values: &[f32],
) -> std::result::Result<(), CalibrationIssue> {
    match values.iter().find(|v| !(v.is_finite() && **v > 0.0)) {
        Some(bad) => Err(CalibrationIssue::NonPositiveValue {
            field,
            value: bad.to_string(),
        }),
        None => Ok(()),
    }
}

/// Reads `N` whitespace-separated floats from `field` on `node`.
fn read_components<const N: usize>(
    node: Node<'_, '_>,
    field: CalibrationField,
) -> std::result::Result<[f32; N], CalibrationIssue> {
    let value = node
        .attribute(field.attribute())
        .filter(|v| !v.is_empty())
        .ok_or(CalibrationIssue::MissingAttribute(field))?;

    let tokens: Vec<&str> = value.split_whitespace().collect();
    if tokens.len() != N {
        return Err(CalibrationIssue::WrongComponentCount {
            field,
            expected: N,
            actual: tokens.len(),
        });
    }

    let mut out = [0.0; N];
    for (slot, token) in out.iter_mut().zip(tokens) {
        *slot = token
            .parse::<f32>()
            .map_err(|_| CalibrationIssue::NumericParseFailure {
                field,
                token: token.to_string(),
            })?;
    }
    Ok(out)
}
