//! Logging and entry-point helpers.

use std::path::Path;

use calibscope_core::{Options, Result};

use crate::reload::FileSource;
use crate::scene_loader::SceneLoader;

/// Installs the `env_logger` backend. Safe to call more than once.
///
/// Verbosity follows `RUST_LOG`, e.g. `RUST_LOG=calibscope=debug`.
pub fn init_logging() {
    let _ = env_logger::try_init();
}

/// Creates a loader for a calibration file and performs the initial load.
///
/// # Example
///
/// ```no_run
/// use calibscope::*;
///
/// fn main() -> Result<()> {
///     init_logging();
///     let loader = load_file("cameras.xcp", Options::default())?;
///     for rig in loader.camera_rigs() {
///         println!("{}", rig.frustum_name());
///     }
///     Ok(())
/// }
/// ```
pub fn load_file(path: impl AsRef<Path>, options: Options) -> Result<SceneLoader<FileSource>> {
    let mut loader = SceneLoader::new(FileSource::new(path.as_ref()), options)?;
    loader.start()?;
    Ok(loader)
}
