//! Marker cube drawn at every camera position.

use glam::Vec3;

/// Triangles of a unit cube, two per face, wound counter-clockwise seen from outside.
const CUBE_TRIANGLES: [[u32; 3]; 12] = [
    [0, 2, 1], [0, 3, 2], // -Z
    [4, 5, 6], [4, 6, 7], // +Z
    [0, 1, 5], [0, 5, 4], // -Y
    [3, 7, 6], [3, 6, 2], // +Y
    [0, 4, 7], [0, 7, 3], // -X
    [1, 2, 6], [1, 6, 5], // +X
];

/// An axis-aligned cube centered on its owner's origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerCube {
    size: f32,
}

impl MarkerCube {
    /// Creates a cube with the given edge length.
    #[must_use]
    pub fn new(size: f32) -> Self {
        Self { size }
    }

    /// Edge length.
    #[must_use]
    pub fn size(&self) -> f32 {
        self.size
    }

    /// The eight corners, scaled to the edge length.
    #[must_use]
    pub fn vertices(&self) -> [Vec3; 8] {
        let h = self.size * 0.5;
        [
            Vec3::new(-h, -h, -h),
            Vec3::new(h, -h, -h),
            Vec3::new(h, h, -h),
            Vec3::new(-h, h, -h),
            Vec3::new(-h, -h, h),
            Vec3::new(h, -h, h),
            Vec3::new(h, h, h),
            Vec3::new(-h, h, h),
        ]
    }

    /// Triangle list of the cube surface.
    #[must_use]
    pub fn triangles(&self) -> &'static [[u32; 3]; 12] {
        &CUBE_TRIANGLES
    }

    /// Local bounding box.
    #[must_use]
    pub fn bounding_box(&self) -> (Vec3, Vec3) {
        let h = Vec3::splat(self.size * 0.5);
        (-h, h)
    }
}
