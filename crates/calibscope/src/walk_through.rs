//! Room-scale walk-through: locks the scene origin to the viewer's head.

use calibscope_core::Transform;
use glam::Vec3;

/// Keeps the scene origin at a fixed offset from the head while locked.
///
/// Only the head's yaw is followed; pitch and roll are ignored so the
/// floor stays level.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WalkThrough {
    locked: bool,
    position_offset: Vec3,
    y_rotation_offset: f32,
}

impl WalkThrough {
    /// Creates an unlocked walk-through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the origin currently follows the head.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Origin position relative to the head, captured by the last toggle.
    pub fn position_offset(&self) -> Vec3 {
        self.position_offset
    }

    /// Flips the lock and captures the current head-to-origin relation.
    ///
    /// Returns the new lock state.
    pub fn toggle(&mut self, head: &Transform, origin: &Transform) -> bool {
        self.locked = !self.locked;
        self.position_offset = origin.translation - head.translation;
        self.y_rotation_offset = head.yaw_degrees();
        log::info!(
            "walk-through {}",
            if self.locked { "locked" } else { "unlocked" }
        );
        self.locked
    }

    /// Moves `origin` along with `head`. Does nothing while unlocked.
    pub fn apply(&mut self, head: &Transform, origin: &mut Transform) {
        if !self.locked {
            return;
        }

        let yaw = head.yaw_degrees();
        origin.rotate_around(head.translation, Vec3::Y, yaw - self.y_rotation_offset);
        self.y_rotation_offset = yaw;

        origin.translation = head.translation + self.position_offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    fn head(position: Vec3, yaw_degrees: f32) -> Transform {
        Transform::from_translation_rotation(position, Quat::from_rotation_y(yaw_degrees.to_radians()))
    }

    #[test]
    fn test_unlocked_does_nothing() {
        let mut walk = WalkThrough::new();
        let mut origin = Transform::identity();
        walk.apply(&head(Vec3::new(3.0, 1.7, 0.0), 45.0), &mut origin);
        assert_eq!(origin, Transform::identity());
    }

    #[test]
    fn test_origin_follows_head_translation() {
        let mut walk = WalkThrough::new();
        let mut origin = Transform::from_translation(Vec3::new(0.0, 0.0, 2.0));
        assert!(walk.toggle(&head(Vec3::new(1.0, 1.7, 0.0), 0.0), &origin));
        assert_eq!(walk.position_offset(), Vec3::new(-1.0, -1.7, 2.0));

        walk.apply(&head(Vec3::new(2.0, 1.7, 1.0), 0.0), &mut origin);
        assert!((origin.translation - Vec3::new(1.0, 0.0, 3.0)).length() < 1e-5);
        assert!(origin.rotation.abs_diff_eq(Quat::IDENTITY, 1e-6));
    }

    #[test]
    fn test_origin_follows_head_yaw_only() {
        let mut walk = WalkThrough::new();
        let mut origin = Transform::identity();
        walk.toggle(&head(Vec3::ZERO, 10.0), &origin);

        // Pitching the head must not tilt the scene
        let mut pitched = head(Vec3::ZERO, 40.0);
        pitched.rotation *= Quat::from_rotation_x(0.5);
        walk.apply(&pitched, &mut origin);

        assert!((origin.yaw_degrees() - 30.0).abs() < 1e-3);
        let up = origin.rotation * Vec3::Y;
        assert!((up - Vec3::Y).length() < 1e-5);

        // Holding still adds no further rotation
        walk.apply(&pitched, &mut origin);
        assert!((origin.yaw_degrees() - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_unlock_freezes_origin() {
        let mut walk = WalkThrough::new();
        let mut origin = Transform::identity();
        walk.toggle(&head(Vec3::ZERO, 0.0), &origin);
        walk.apply(&head(Vec3::X, 0.0), &mut origin);
        assert!(!walk.toggle(&head(Vec3::X, 0.0), &origin));

        let frozen = origin;
        walk.apply(&head(Vec3::new(5.0, 0.0, 5.0), 90.0), &mut origin);
        assert_eq!(origin, frozen);
    }
}
