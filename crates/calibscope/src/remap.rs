//! Conversion from the calibration file's axis convention to the scene's.
//!
//! The calibration rig is Z-up; the scene is Y-up. Positions swap their
//! second and third components and are optionally scaled from millimeters
//! to meters. Orientations use one of the [`OrientationRemap`] strategies.
//! Sensor size and focal length are physical quantities and are not remapped.

use calibscope_core::{Options, OrientationRemap, PositionUnits, QuaternionLayout, Transform};
use glam::{Quat, Vec3};

use crate::calibration::CalibrationEntry;

/// Swaps the second and third components. Applying it twice is the identity.
#[must_use]
pub fn swap_yz(v: Vec3) -> Vec3 {
    Vec3::new(v.x, v.z, v.y)
}

/// Converts calibration poses into scene poses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoordinateRemapper {
    pub orientation: OrientationRemap,
    pub units: PositionUnits,
    pub layout: QuaternionLayout,
}

impl CoordinateRemapper {
    /// Creates a remapper with explicit policies.
    pub fn new(orientation: OrientationRemap, units: PositionUnits, layout: QuaternionLayout) -> Self {
        Self {
            orientation,
            units,
            layout,
        }
    }

    /// Takes the policies from `options`.
    pub fn from_options(options: &Options) -> Self {
        Self::new(
            options.orientation_remap,
            options.position_units,
            options.quaternion_layout,
        )
    }

    /// Scene position of a raw calibration position.
    pub fn remap_position(&self, raw: Vec3) -> Vec3 {
        swap_yz(raw) / self.units.divisor()
    }

    /// Reorders raw ORIENTATION components to `[x, y, z, w]`.
    pub fn source_components(&self, raw: [f32; 4]) -> [f32; 4] {
        match self.layout {
            QuaternionLayout::Xyzw => raw,
            QuaternionLayout::Wxyz => [raw[1], raw[2], raw[3], raw[0]],
        }
    }

    /// Scene rotation of a raw calibration orientation.
    pub fn remap_orientation(&self, raw: [f32; 4]) -> Quat {
        let [x, y, z, w] = self.source_components(raw);
        match self.orientation {
            OrientationRemap::ComponentSwap => normalize_or_identity(Quat::from_xyzw(x, z, y, w)),
            OrientationRemap::EulerRoundTrip => {
                let source = normalize_or_identity(Quat::from_xyzw(x, y, z, w));
                let euler = Transform::euler_degrees_of(source);
                // Scene cameras look along +Z at rest, the rig's cameras look down
                let remapped = Vec3::new(euler.x + 90.0, euler.z, euler.y);
                Transform::rotation_from_euler_degrees(remapped)
            }
        }
    }

    /// Scene pose of a calibration entry.
    pub fn remap(&self, entry: &CalibrationEntry) -> Transform {
        Transform::from_translation_rotation(
            self.remap_position(entry.position_raw),
            self.remap_orientation(entry.orientation_raw),
        )
    }
}

fn normalize_or_identity(q: Quat) -> Quat {
    if q.length_squared() > f32::EPSILON {
        q.normalize()
    } else {
        Quat::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn remapper(orientation: OrientationRemap, units: PositionUnits) -> CoordinateRemapper {
        CoordinateRemapper::new(orientation, units, QuaternionLayout::Xyzw)
    }

    #[test]
    fn test_position_swap() {
        let r = remapper(OrientationRemap::ComponentSwap, PositionUnits::Raw);
        assert_eq!(r.remap_position(Vec3::new(1.0, 2.0, 3.0)), Vec3::new(1.0, 3.0, 2.0));
    }

    #[test]
    fn test_millimeters_to_meters() {
        let r = remapper(OrientationRemap::EulerRoundTrip, PositionUnits::MillimetersToMeters);
        assert_eq!(r.remap_position(Vec3::new(1000.0, 0.0, 0.0)), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(
            r.remap_position(Vec3::new(500.0, 2000.0, -3000.0)),
            Vec3::new(0.5, -3.0, 2.0)
        );
    }

    #[test]
    fn test_component_swap() {
        let r = remapper(OrientationRemap::ComponentSwap, PositionUnits::Raw);
        assert_eq!(r.remap_orientation([0.0, 0.0, 0.0, 1.0]), Quat::IDENTITY);

        // A rotation about the source Y axis becomes one about the scene Z axis
        let angle = 0.4f32;
        let source = Quat::from_rotation_y(angle);
        let scene = r.remap_orientation(source.to_array());
        assert!(scene.abs_diff_eq(Quat::from_rotation_z(angle), 1e-6));
    }

    #[test]
    fn test_component_swap_normalizes() {
        let r = remapper(OrientationRemap::ComponentSwap, PositionUnits::Raw);
        let q = r.remap_orientation([0.0, 0.0, 0.0, 2.0]);
        assert!(q.abs_diff_eq(Quat::IDENTITY, 1e-6));
        assert_eq!(r.remap_orientation([0.0; 4]), Quat::IDENTITY);
    }

    #[test]
    fn test_euler_round_trip_tilts_rest_pose_down() {
        let r = remapper(OrientationRemap::EulerRoundTrip, PositionUnits::Raw);
        let q = r.remap_orientation([0.0, 0.0, 0.0, 1.0]);
        assert!(q.abs_diff_eq(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2), 1e-6));

        let forward = q * Vec3::Z;
        assert!((forward - Vec3::NEG_Y).length() < 1e-5);
    }

    #[test]
    fn test_euler_round_trip_moves_source_roll_to_yaw() {
        let r = remapper(OrientationRemap::EulerRoundTrip, PositionUnits::Raw);
        let source = Quat::from_rotation_z(30f32.to_radians());
        let q = r.remap_orientation(source.to_array());

        let expected = Quat::from_rotation_y(30f32.to_radians())
            * Quat::from_rotation_x(90f32.to_radians());
        assert!(q.abs_diff_eq(expected, 1e-5) || q.abs_diff_eq(-expected, 1e-5));
    }

    #[test]
    fn test_strategies_differ() {
        let raw = Quat::from_rotation_z(0.3).to_array();
        let swap = remapper(OrientationRemap::ComponentSwap, PositionUnits::Raw).remap_orientation(raw);
        let euler = remapper(OrientationRemap::EulerRoundTrip, PositionUnits::Raw).remap_orientation(raw);
        assert!(swap.angle_between(euler) > 0.1);
    }

    #[test]
    fn test_wxyz_layout() {
        let r = CoordinateRemapper::new(
            OrientationRemap::ComponentSwap,
            PositionUnits::Raw,
            QuaternionLayout::Wxyz,
        );
        assert_eq!(r.source_components([1.0, 2.0, 3.0, 4.0]), [2.0, 3.0, 4.0, 1.0]);
        assert_eq!(r.remap_orientation([1.0, 0.0, 0.0, 0.0]), Quat::IDENTITY);
    }

    #[test]
    fn test_remap_entry() {
        let entry = CalibrationEntry {
            name: "a".to_string(),
            device_id: "1".to_string(),
            position_raw: Vec3::new(2000.0, 1000.0, 3000.0),
            orientation_raw: [0.0, 0.0, 0.0, 1.0],
            sensor_size_mm: Vec2::new(36.0, 24.0),
            focal_length_mm: 50.0,
        };
        let r = CoordinateRemapper::from_options(&Options::default());
        let pose = r.remap(&entry);
        assert_eq!(pose.translation, Vec3::new(2.0, 3.0, 1.0));
        assert_eq!(pose.scale, Vec3::ONE);
    }

    proptest! {
        #[test]
        fn prop_swap_is_an_involution(x in -1.0e6f32..1.0e6, y in -1.0e6f32..1.0e6, z in -1.0e6f32..1.0e6) {
            let v = Vec3::new(x, y, z);
            prop_assert_eq!(swap_yz(swap_yz(v)), v);
            prop_assert_eq!(swap_yz(v), Vec3::new(x, z, y));
        }
    }
}
