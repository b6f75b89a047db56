//! The owned scene: an origin transform and the structures parented to it.

use glam::Vec3;

use crate::registry::Registry;
use crate::transform::Transform;

/// A scene containing all structures built from one calibration file.
///
/// Every structure is a child of the scene origin, so moving the origin
/// moves the whole calibrated volume.
pub struct Scene {
    /// The structure registry.
    pub registry: Registry,

    /// Transform of the scene origin in world space.
    pub origin: Transform,

    /// Representative length scale for all registered structures.
    pub length_scale: f32,

    /// Axis-aligned bounding box for all registered structures (origin-local).
    pub bounding_box: (Vec3, Vec3),

    /// Incremented every time the structures are replaced wholesale.
    generation: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            registry: Registry::new(),
            origin: Transform::identity(),
            length_scale: 1.0,
            bounding_box: (Vec3::ZERO, Vec3::ONE),
            generation: 0,
        }
    }
}

impl Scene {
    /// Creates an empty scene with the origin at identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the center of the bounding box.
    pub fn center(&self) -> Vec3 {
        (self.bounding_box.0 + self.bounding_box.1) * 0.5
    }

    /// Number of times the structure set has been replaced.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drops every structure and starts a new generation.
    pub fn begin_generation(&mut self) {
        let dropped = self.registry.len();
        self.registry.clear();
        self.generation += 1;
        log::debug!(
            "scene generation {} started, dropped {dropped} structures",
            self.generation
        );
    }

    /// Updates the bounding box and length scale from all enabled structures.
    pub fn update_extents(&mut self) {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        let mut has_extent = false;

        for structure in self.registry.iter().filter(|s| s.is_enabled()) {
            if let Some((bb_min, bb_max)) = structure.bounding_box() {
                if !(bb_min.is_finite() && bb_max.is_finite()) {
                    continue;
                }
                min = min.min(bb_min);
                max = max.max(bb_max);
                has_extent = true;
            }
        }

        if has_extent {
            self.bounding_box = (min, max);
            self.length_scale = (max - min).length();
        } else {
            self.bounding_box = (Vec3::ZERO, Vec3::ONE);
            self.length_scale = 1.0;
        }
    }

    /// World-space transform of a structure transform parented to the origin.
    pub fn world_transform(&self, local: &Transform) -> Transform {
        self.origin.compose(local)
    }
}
