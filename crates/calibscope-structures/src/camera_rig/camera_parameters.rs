//! Physical camera model (focal length and sensor size).

use glam::{Vec2, Vec3};
use serde::Serialize;

/// A normalized rectangle on the image sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Left edge, 0 at the left of the sensor.
    pub x: f32,
    /// Bottom edge, 0 at the bottom of the sensor.
    pub y: f32,
    /// Width as a fraction of the sensor width.
    pub width: f32,
    /// Height as a fraction of the sensor height.
    pub height: f32,
}

impl Viewport {
    /// Creates a viewport rectangle.
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole sensor.
    #[must_use]
    pub fn full() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::full()
    }
}

/// Camera intrinsics expressed as physical optics.
///
/// The sensor is used as-is: the image gate is not fitted to any render
/// aspect ratio, so the frustum matches the sensor rectangle exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhysicalCameraParameters {
    /// Focal length in millimeters.
    pub focal_length: f32,
    /// Sensor width and height in millimeters.
    pub sensor_size: Vec2,
}

impl PhysicalCameraParameters {
    /// Creates new physical camera parameters.
    #[must_use]
    pub fn new(focal_length: f32, sensor_size: Vec2) -> Self {
        Self {
            focal_length,
            sensor_size,
        }
    }

    /// Horizontal and vertical half field-of-view angles in radians.
    #[must_use]
    pub fn half_angles(&self) -> Vec2 {
        let slope = self.half_slope();
        Vec2::new(slope.x.atan(), slope.y.atan())
    }

    /// Half sensor size over focal length: the half extent of the image at unit distance.
    #[must_use]
    pub fn half_slope(&self) -> Vec2 {
        self.sensor_size / (2.0 * self.focal_length)
    }

    /// Vertical field of view in degrees.
    #[must_use]
    pub fn fov_vertical_degrees(&self) -> f32 {
        (2.0 * self.half_angles().y).to_degrees()
    }

    /// Horizontal field of view in degrees.
    #[must_use]
    pub fn fov_horizontal_degrees(&self) -> f32 {
        (2.0 * self.half_angles().x).to_degrees()
    }

    /// Aspect ratio (width / height) of the sensor.
    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        self.sensor_size.x / self.sensor_size.y
    }

    /// Computes the frustum corners at `distance` along +Z in camera space.
    ///
    /// Corners are returned bottom-left, top-left, top-right, bottom-right.
    /// The focal length and sensor size are expected to be positive.
    #[must_use]
    pub fn frustum_corners(&self, viewport: Viewport, distance: f32) -> [Vec3; 4] {
        let half_extent = self.half_slope() * distance;

        let corner = |u: f32, v: f32| {
            Vec3::new(
                (2.0 * u - 1.0) * half_extent.x,
                (2.0 * v - 1.0) * half_extent.y,
                distance,
            )
        };

        let (left, right) = (viewport.x, viewport.x + viewport.width);
        let (bottom, top) = (viewport.y, viewport.y + viewport.height);

        [
            corner(left, bottom),
            corner(left, top),
            corner(right, top),
            corner(right, bottom),
        ]
    }
}
