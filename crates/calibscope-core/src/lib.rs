//! Core abstractions for calibscope.
//!
//! This crate provides the fundamental types shared by the other calibscope crates:
//! - [`CalibscopeError`] and the crate-wide [`Result`] alias
//! - [`Options`] with the remap and validation policies
//! - [`Transform`] for poses in the scene hierarchy
//! - the [`Structure`] trait, the ordered [`Registry`] and the owned [`Scene`]

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod options;
pub mod registry;
pub mod scene;
pub mod structure;
pub mod transform;

pub use error::{CalibscopeError, Result};
pub use options::{
    NumericParsePolicy, Options, OrientationRemap, PositionUnits, QuaternionLayout,
};
pub use registry::Registry;
pub use scene::Scene;
pub use structure::Structure;
pub use transform::Transform;

// Re-export glam types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3};
