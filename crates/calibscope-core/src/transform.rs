//! Poses in the scene hierarchy.
//!
//! Euler angles follow the yaw-pitch-roll convention of head-mounted
//! viewers: a rotation built from `(x, y, z)` degrees is `Ry * Rx * Rz`.

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A transformation represented as separate components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Translation component.
    pub translation: Vec3,
    /// Rotation component as a quaternion.
    pub rotation: Quat,
    /// Scale component.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Creates a new identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    /// Creates a transform from a translation.
    #[must_use]
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Creates a transform from a rotation.
    #[must_use]
    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            rotation,
            ..Default::default()
        }
    }

    /// Creates a rigid transform from a translation and a rotation.
    #[must_use]
    pub fn from_translation_rotation(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
            scale: Vec3::ONE,
        }
    }

    /// Creates a transform from a Mat4.
    ///
    /// This decomposition may not be exact for matrices with shear.
    #[must_use]
    pub fn from_matrix(matrix: Mat4) -> Self {
        let (scale, rotation, translation) = matrix.to_scale_rotation_translation();
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Converts this transform to a Mat4.
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Builds a rotation from `(x, y, z)` Euler angles in degrees.
    #[must_use]
    pub fn rotation_from_euler_degrees(degrees: Vec3) -> Quat {
        let radians = degrees * (std::f32::consts::PI / 180.0);
        Quat::from_euler(EulerRot::YXZ, radians.y, radians.x, radians.z)
    }

    /// Decomposes a rotation into `(x, y, z)` Euler angles in degrees.
    #[must_use]
    pub fn euler_degrees_of(rotation: Quat) -> Vec3 {
        let (y, x, z) = rotation.to_euler(EulerRot::YXZ);
        Vec3::new(x, y, z) * (180.0 / std::f32::consts::PI)
    }

    /// Returns the rotation as Euler angles (in degrees).
    #[must_use]
    pub fn euler_angles_degrees(&self) -> Vec3 {
        Self::euler_degrees_of(self.rotation)
    }

    /// Sets the rotation from Euler angles (in degrees).
    pub fn set_euler_angles_degrees(&mut self, degrees: Vec3) {
        self.rotation = Self::rotation_from_euler_degrees(degrees);
    }

    /// Rotation around the world up axis, in degrees.
    #[must_use]
    pub fn yaw_degrees(&self) -> f32 {
        self.euler_angles_degrees().y
    }

    /// Rotates the transform around a world-space pivot.
    ///
    /// Both the position and the orientation are affected.
    pub fn rotate_around(&mut self, pivot: Vec3, axis: Vec3, angle_degrees: f32) {
        let Some(axis) = axis.try_normalize() else {
            return;
        };
        let delta = Quat::from_axis_angle(axis, angle_degrees.to_radians());
        self.translation = pivot + delta * (self.translation - pivot);
        self.rotation = (delta * self.rotation).normalize();
    }

    /// Maps a point from this transform's local space to its parent space.
    #[must_use]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.translation + self.rotation * (self.scale * point)
    }

    /// Composes `self` (parent) with `child`, giving the child's parent-space transform.
    #[must_use]
    pub fn compose(&self, child: &Transform) -> Transform {
        Transform {
            translation: self.transform_point(child.translation),
            rotation: self.rotation * child.rotation,
            scale: self.scale * child.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_transform_matrix_roundtrip() {
        let t = Transform {
            translation: Vec3::new(1.0, 2.0, 3.0),
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        };
        let matrix = t.to_matrix();
        let back = Transform::from_matrix(matrix);
        assert!((back.translation - t.translation).length() < 1e-6);
    }

    #[test]
    fn test_transform_euler_angles() {
        let mut t = Transform::identity();
        t.set_euler_angles_degrees(Vec3::new(20.0, 35.0, 50.0));
        let angles = t.euler_angles_degrees();
        assert!((angles - Vec3::new(20.0, 35.0, 50.0)).length() < 1e-3);
        assert!((t.yaw_degrees() - 35.0).abs() < 1e-3);
    }

    #[test]
    fn test_euler_order_is_yaw_pitch_roll() {
        let q = Transform::rotation_from_euler_degrees(Vec3::new(10.0, 20.0, 30.0));
        let expected = Quat::from_rotation_y(20f32.to_radians())
            * Quat::from_rotation_x(10f32.to_radians())
            * Quat::from_rotation_z(30f32.to_radians());
        assert!(q.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn test_rotate_around_pivot() {
        let mut t = Transform::from_translation(Vec3::new(2.0, 0.0, 0.0));
        t.rotate_around(Vec3::new(1.0, 0.0, 0.0), Vec3::Y, 90.0);
        // +90 degrees about +Y maps +X onto -Z
        assert!((t.translation - Vec3::new(1.0, 0.0, -1.0)).length() < 1e-5);
        assert!((t.yaw_degrees() - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_rotate_around_zero_axis_is_noop() {
        let mut t = Transform::from_translation(Vec3::ONE);
        t.rotate_around(Vec3::ZERO, Vec3::ZERO, 45.0);
        assert_eq!(t, Transform::from_translation(Vec3::ONE));
    }

    #[test]
    fn test_compose_parent_child() {
        let parent = Transform::from_translation_rotation(
            Vec3::new(0.0, 1.0, 0.0),
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        );
        let child = Transform::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let world = parent.compose(&child);
        assert!((world.translation - Vec3::new(0.0, 1.0, -1.0)).length() < 1e-5);
        assert!(world.rotation.abs_diff_eq(parent.rotation, 1e-6));
    }

    fn rigid(translation: [f32; 3], degrees: [f32; 3]) -> Transform {
        Transform::from_translation_rotation(
            Vec3::from(translation),
            Transform::rotation_from_euler_degrees(Vec3::from(degrees)),
        )
    }

    proptest! {
        #[test]
        fn prop_euler_degrees_round_trip(
            pitch in -80.0f32..80.0,
            yaw in -179.0f32..179.0,
            roll in -179.0f32..179.0,
        ) {
            let degrees = Vec3::new(pitch, yaw, roll);
            let q = Transform::rotation_from_euler_degrees(degrees);
            let back = Transform::euler_degrees_of(q);
            prop_assert!((back - degrees).abs().max_element() < 0.05, "{back} != {degrees}");
        }

        #[test]
        fn prop_compose_matches_nested_points(
            a_t in prop::array::uniform3(-10.0f32..10.0),
            a_r in prop::array::uniform3(-180.0f32..180.0),
            b_t in prop::array::uniform3(-10.0f32..10.0),
            b_r in prop::array::uniform3(-180.0f32..180.0),
            point in prop::array::uniform3(-10.0f32..10.0),
        ) {
            let (a, b) = (rigid(a_t, a_r), rigid(b_t, b_r));
            let p = Vec3::from(point);
            let composed = a.compose(&b).transform_point(p);
            let nested = a.transform_point(b.transform_point(p));
            prop_assert!((composed - nested).length() < 1e-3);
        }

        #[test]
        fn prop_compose_is_associative(
            a_t in prop::array::uniform3(-10.0f32..10.0),
            a_r in prop::array::uniform3(-180.0f32..180.0),
            b_t in prop::array::uniform3(-10.0f32..10.0),
            b_r in prop::array::uniform3(-180.0f32..180.0),
            c_t in prop::array::uniform3(-10.0f32..10.0),
            c_r in prop::array::uniform3(-180.0f32..180.0),
        ) {
            let (a, b, c) = (rigid(a_t, a_r), rigid(b_t, b_r), rigid(c_t, c_r));
            let left = a.compose(&b).compose(&c);
            let right = a.compose(&b.compose(&c));
            prop_assert!((left.translation - right.translation).length() < 1e-3);
            prop_assert!(left.rotation.dot(right.rotation).abs() > 1.0 - 1e-5);
        }
    }
}
