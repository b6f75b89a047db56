//! Camera rig structure: a marker cube with a frustum pyramid attached.

mod camera_parameters;

pub use camera_parameters::*;

use calibscope_core::structure::Structure;
use calibscope_core::transform::Transform;
use glam::Vec3;

use crate::frustum_mesh::{build_frustum, FrustumMesh};
use crate::marker::MarkerCube;

/// One calibrated camera placed in the scene.
///
/// The rig transform positions both the marker cube and the frustum. The
/// marker is scaled to its edge length; the frustum is not.
pub struct CameraRig {
    name: String,
    frustum_name: String,

    // Camera data
    params: PhysicalCameraParameters,

    // Common structure fields
    enabled: bool,
    transform: Transform,

    // Geometry
    marker: MarkerCube,
    frustum_length: f32,
    frustum: FrustumMesh,
}

impl CameraRig {
    /// Creates a rig and builds its frustum mesh at `frustum_length`.
    pub fn new(
        name: impl Into<String>,
        transform: Transform,
        params: PhysicalCameraParameters,
        marker_size: f32,
        frustum_length: f32,
    ) -> Self {
        let name = name.into();
        let frustum_name = format!("Camera frustum {name}");
        let frustum = build_frustum(
            params.frustum_corners(Viewport::full(), frustum_length),
            frustum_length,
        );
        Self {
            name,
            frustum_name,
            params,
            enabled: true,
            transform,
            marker: MarkerCube::new(marker_size),
            frustum_length,
            frustum,
        }
    }

    /// Name of the frustum child object.
    #[must_use]
    pub fn frustum_name(&self) -> &str {
        &self.frustum_name
    }

    /// Gets the camera parameters.
    #[must_use]
    pub fn params(&self) -> &PhysicalCameraParameters {
        &self.params
    }

    /// Updates the camera parameters and rebuilds the frustum.
    pub fn set_params(&mut self, params: PhysicalCameraParameters) -> &mut Self {
        self.params = params;
        self.generate_frustum_mesh(self.frustum_length);
        self
    }

    /// Current frustum draw length.
    #[must_use]
    pub fn frustum_length(&self) -> f32 {
        self.frustum_length
    }

    /// The frustum mesh in rig-local space.
    #[must_use]
    pub fn frustum(&self) -> &FrustumMesh {
        &self.frustum
    }

    /// Replaces the frustum mesh with one built for `length`.
    pub fn generate_frustum_mesh(&mut self, length: f32) {
        let corners = self.params.frustum_corners(Viewport::full(), length);
        self.frustum = build_frustum(corners, length);
        self.frustum_length = length;
    }

    /// Frustum vertices mapped through `parent * rig`.
    #[must_use]
    pub fn frustum_vertices_in(&self, parent: &Transform) -> [Vec3; 6] {
        let to_parent = parent.compose(&self.transform);
        self.frustum.vertices.map(|v| to_parent.transform_point(v))
    }
}

impl Structure for CameraRig {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "CameraRig"
    }

    fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        let marker = self.marker.vertices();
        let points = marker
            .iter()
            .chain(self.frustum.vertices.iter())
            .map(|v| self.transform.transform_point(*v));

        let (min, max) = points.fold(
            (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
            |(min, max), p| (min.min(p), max.max(p)),
        );
        Some((min, max))
    }

    fn transform(&self) -> Transform {
        self.transform
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
