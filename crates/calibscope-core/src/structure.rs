//! Structure trait.
//!
//! A [`Structure`] is an object placed in the scene, such as a calibrated
//! camera rig. Structures live in the [`Registry`](crate::Registry) owned by a
//! [`Scene`](crate::Scene).

use std::any::Any;

use glam::Vec3;

use crate::transform::Transform;

/// An object that can be placed in a calibscope scene.
///
/// Each structure has:
/// - A display name (not required to be unique)
/// - A transform relative to the scene origin
/// - Visibility state
pub trait Structure: Any + Send + Sync {
    /// Returns a reference to self as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns a mutable reference to self as `Any` for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Returns the display name of this structure.
    fn name(&self) -> &str;

    /// Returns the type name of this structure (e.g., "`CameraRig`").
    fn type_name(&self) -> &'static str;

    /// Returns the axis-aligned bounding box in origin-local coordinates.
    ///
    /// Returns `None` if the structure has no spatial extent.
    fn bounding_box(&self) -> Option<(Vec3, Vec3)>;

    /// Returns the transform relative to the scene origin.
    fn transform(&self) -> Transform;

    /// Sets the transform relative to the scene origin.
    fn set_transform(&mut self, transform: Transform);

    /// Returns whether this structure is currently visible.
    ///
    /// Hidden structures stay registered but do not contribute to the
    /// scene extents or to snapshots.
    fn is_enabled(&self) -> bool;

    /// Sets the visibility of this structure.
    fn set_enabled(&mut self, enabled: bool);
}
