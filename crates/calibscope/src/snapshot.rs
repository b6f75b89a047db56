//! Serializable dump of a scene.

use calibscope_core::{Result, Scene, Structure, Transform};
use calibscope_structures::CameraRig;
use glam::{Quat, Vec2, Vec3};
use serde::Serialize;

/// World-space state of one camera rig.
#[derive(Debug, Clone, Serialize)]
pub struct CameraSnapshot {
    pub name: String,
    pub frustum_name: String,
    pub position: Vec3,
    pub rotation: Quat,
    pub focal_length_mm: f32,
    pub sensor_size_mm: Vec2,
    pub fov_vertical_degrees: f32,
    pub frustum_length: f32,
    pub frustum_vertices: [Vec3; 6],
    pub triangle_indices: [u32; 12],
}

/// World-space state of a whole scene.
#[derive(Debug, Clone, Serialize)]
pub struct SceneSnapshot {
    pub generation: u64,
    pub origin: Transform,
    pub bounding_box: (Vec3, Vec3),
    pub cameras: Vec<CameraSnapshot>,
}

impl SceneSnapshot {
    /// Captures every enabled camera rig in `scene`, in registration order.
    pub fn capture(scene: &Scene) -> Self {
        let cameras = scene
            .registry
            .iter_as::<CameraRig>()
            .filter(|rig| rig.is_enabled())
            .map(|rig| {
                let world = scene.world_transform(&rig.transform());
                CameraSnapshot {
                    name: rig.name().to_string(),
                    frustum_name: rig.frustum_name().to_string(),
                    position: world.translation,
                    rotation: world.rotation,
                    focal_length_mm: rig.params().focal_length,
                    sensor_size_mm: rig.params().sensor_size,
                    fov_vertical_degrees: rig.params().fov_vertical_degrees(),
                    frustum_length: rig.frustum_length(),
                    frustum_vertices: rig.frustum_vertices_in(&scene.origin),
                    triangle_indices: rig.frustum().indices,
                }
            })
            .collect();

        Self {
            generation: scene.generation(),
            origin: scene.origin,
            bounding_box: scene.bounding_box,
            cameras,
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
