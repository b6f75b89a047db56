//! Structure implementations for calibscope.
//!
//! This crate provides the concrete objects placed in a calibration scene:
//! - Camera rigs (marker cube plus frustum, one per calibrated camera)
//! - The physical (focal length and sensor size) camera model
//! - Frustum pyramid meshes and marker cubes

// Geometry code intentionally uses casts for indices and coordinates
#![allow(clippy::cast_precision_loss)]
// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]

pub mod camera_rig;
pub mod frustum_mesh;
pub mod marker;

pub use camera_rig::{CameraRig, PhysicalCameraParameters, Viewport};
pub use frustum_mesh::{build_frustum, FrustumMesh, FRUSTUM_TRIANGLE_INDICES};
pub use marker::MarkerCube;
