//! calibscope: motion-capture camera calibration import and frustum geometry.
//!
//! Reads an XML camera calibration file, converts every camera into the
//! scene's Y-up metric convention and builds, per camera, a marker cube
//! and a pyramid mesh approximating its field of view from the physical
//! focal length and sensor size. The scene is rebuilt whenever the file
//! changes on disk.
//!
//! # Pipeline
//!
//! - [`calibration::parse`] turns the document into [`CalibrationEntry`] records
//!   plus per-camera [`ParseWarning`]s
//! - [`CoordinateRemapper`] converts positions and orientations
//! - [`CameraRig`] builds the frustum mesh with [`build_frustum`]
//! - [`SceneLoader`] polls the source and replaces the whole scene on change

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod calibration;
mod init;
pub mod reload;
pub mod remap;
pub mod scene_loader;
pub mod snapshot;
pub mod walk_through;

pub use init::{init_logging, load_file};

// Re-export core types
pub use calibscope_core::{
    error::{CalibscopeError, Result},
    options::{NumericParsePolicy, Options, OrientationRemap, PositionUnits, QuaternionLayout},
    registry::Registry,
    scene::Scene,
    structure::Structure,
    transform::Transform,
    Quat, Vec2, Vec3,
};

// Re-export structures
pub use calibscope_structures::{
    build_frustum, CameraRig, FrustumMesh, MarkerCube, PhysicalCameraParameters, Viewport,
    FRUSTUM_TRIANGLE_INDICES,
};

pub use calibration::{CalibrationEntry, CalibrationField, CalibrationIssue, ParseReport, ParseWarning};
pub use reload::{has_source_changed, CalibrationSource, FileSource, MemorySource};
pub use remap::{swap_yz, CoordinateRemapper};
pub use scene_loader::{LoadSummary, SceneLoader, TickReport};
pub use snapshot::{CameraSnapshot, SceneSnapshot};
pub use walk_through::WalkThrough;
