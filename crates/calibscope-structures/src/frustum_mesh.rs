//! Pyramid mesh approximating a camera's field of view.

use glam::Vec3;
use serde::Serialize;

/// Triangle indices shared by every frustum mesh.
///
/// Each side face fans from the apex (vertex 0) to a pair of consecutive
/// corners. With corners ordered bottom-left, top-left, top-right,
/// bottom-right this winding gives outward-facing normals.
pub const FRUSTUM_TRIANGLE_INDICES: [u32; 12] = [
    0, 1, 2, // Left
    0, 2, 3, // Top
    0, 3, 4, // Right
    0, 4, 1, // Bottom
];

/// A frustum pyramid in camera-local space.
///
/// Vertex 0 is the apex at the camera origin, vertices 1-4 are the far
/// corners and vertex 5 sits behind the apex at `(0, 0, -length)`. Vertex 5
/// is not referenced by any triangle; it only extends the bounding box so
/// the camera origin stays inside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrustumMesh {
    /// The six mesh vertices.
    pub vertices: [Vec3; 6],
    /// Triangle list, three indices per face.
    pub indices: [u32; 12],
}

/// Builds the frustum mesh from four far corners and the draw length.
///
/// The result always has 6 vertices and 4 triangles, including for
/// degenerate (zero-length) frustums.
#[must_use]
pub fn build_frustum(corners: [Vec3; 4], length: f32) -> FrustumMesh {
    FrustumMesh {
        vertices: [
            Vec3::ZERO,
            corners[0],
            corners[1],
            corners[2],
            corners[3],
            Vec3::new(0.0, 0.0, -length),
        ],
        indices: FRUSTUM_TRIANGLE_INDICES,
    }
}

impl FrustumMesh {
    /// Number of triangles in the mesh.
    #[must_use]
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates over the triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// The four far corners.
    #[must_use]
    pub fn corners(&self) -> [Vec3; 4] {
        [
            self.vertices[1],
            self.vertices[2],
            self.vertices[3],
            self.vertices[4],
        ]
    }

    /// Unnormalized face normals, one per triangle.
    #[must_use]
    pub fn face_normals(&self) -> Vec<Vec3> {
        self.triangles()
            .map(|[a, b, c]| {
                let (a, b, c) = (
                    self.vertices[a as usize],
                    self.vertices[b as usize],
                    self.vertices[c as usize],
                );
                (b - a).cross(c - a)
            })
            .collect()
    }

    /// Axis-aligned bounding box of all six vertices.
    #[must_use]
    pub fn bounding_box(&self) -> (Vec3, Vec3) {
        self.vertices.iter().fold(
            (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
            |(min, max), v| (min.min(*v), max.max(*v)),
        )
    }
}
