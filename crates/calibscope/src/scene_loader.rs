//! Live-reload controller.
//!
//! [`SceneLoader`] owns the scene built from a calibration source and is
//! driven by its host once per frame:
//!
//! 1. [`SceneLoader::start`] performs the initial load.
//! 2. [`SceneLoader::tick`] reloads everything when the source's
//!    modification time changes, then applies a pending frustum-length change.
//! 3. [`SceneLoader::late_update`] moves the scene origin while the
//!    walk-through lock is engaged.
//!
//! A reload always drops every previous camera rig before building new ones.

use std::time::SystemTime;

use calibscope_core::{Options, Result, Scene, Transform};
use calibscope_structures::{CameraRig, PhysicalCameraParameters};

use crate::calibration::{self, ParseWarning};
use crate::reload::{has_source_changed, CalibrationSource};
use crate::remap::CoordinateRemapper;
use crate::snapshot::SceneSnapshot;
use crate::walk_through::WalkThrough;

/// Outcome of one full load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    /// Scene generation created by this load.
    pub generation: u64,
    /// Number of camera rigs in the scene.
    pub cameras: usize,
    /// Cameras that were skipped.
    pub warnings: Vec<ParseWarning>,
}

/// What a [`SceneLoader::tick`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Set when the source changed and the scene was rebuilt.
    pub reloaded: Option<LoadSummary>,
    /// Set when frustum meshes were regenerated for a new length.
    pub frustums_regenerated: bool,
}

/// Builds and maintains the camera scene for one calibration source.
pub struct SceneLoader<S: CalibrationSource> {
    source: S,
    options: Options,
    remapper: CoordinateRemapper,
    scene: Scene,
    last_modified: Option<SystemTime>,
    frustum_length: f32,
    update_frustums: bool,
    walk_through: WalkThrough,
}

impl<S: CalibrationSource> SceneLoader<S> {
    /// Creates a loader. Nothing is read until [`SceneLoader::start`] or [`SceneLoader::tick`].
    pub fn new(source: S, options: Options) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            source,
            remapper: CoordinateRemapper::from_options(&options),
            frustum_length: options.frustum_length,
            options,
            scene: Scene::new(),
            last_modified: None,
            update_frustums: false,
            walk_through: WalkThrough::new(),
        })
    }

    /// Initial load.
    pub fn start(&mut self) -> Result<LoadSummary> {
        self.last_modified = self.source.modified()?;
        self.load_camera_data()
    }

    /// Per-frame update: reload on source change, then regenerate frustums if needed.
    ///
    /// A fatal parse error is returned after the previous rigs have been
    /// dropped; the scene stays empty until the source changes again.
    pub fn tick(&mut self) -> Result<TickReport> {
        let mut report = TickReport::default();

        let current = self.source.modified()?;
        if has_source_changed(self.last_modified, current) {
            log::info!("{} changed, reloading", self.source.describe());
            self.last_modified = current;
            report.reloaded = Some(self.load_camera_data()?);
        }

        if self.update_frustums {
            let length = self.frustum_length;
            for rig in self.scene.registry.iter_as_mut::<CameraRig>() {
                rig.generate_frustum_mesh(length);
            }
            self.update_frustums = false;
            self.scene.update_extents();
            report.frustums_regenerated = true;
            log::debug!("regenerated frustums at length {length}");
        }

        Ok(report)
    }

    /// Applies the walk-through lock for this frame.
    pub fn late_update(&mut self, head: &Transform) {
        self.walk_through.apply(head, &mut self.scene.origin);
    }

    /// Replaces the scene with the cameras currently in the source.
    pub fn load_camera_data(&mut self) -> Result<LoadSummary> {
        // Previous rigs go first, whether or not the new document parses
        self.scene.begin_generation();
        self.scene.update_extents();

        let bytes = self.source.read()?;
        let report = calibration::parse(&bytes, self.options.numeric_parse_policy)?;

        for entry in &report.entries {
            let pose = self.remapper.remap(entry);
            let params =
                PhysicalCameraParameters::new(entry.focal_length_mm, entry.sensor_size_mm);
            let rig = CameraRig::new(
                entry.display_name(),
                pose,
                params,
                self.options.marker_size,
                self.frustum_length,
            );
            self.scene.registry.register(Box::new(rig));
        }
        self.scene.update_extents();
        // New rigs were built at the current length
        self.update_frustums = false;

        let summary = LoadSummary {
            generation: self.scene.generation(),
            cameras: self.scene.registry.len(),
            warnings: report.warnings,
        };
        log::info!(
            "loaded {} cameras from {} (generation {}, {} skipped)",
            summary.cameras,
            self.source.describe(),
            summary.generation,
            summary.warnings.len()
        );
        Ok(summary)
    }

    /// Current frustum draw length.
    pub fn frustum_length(&self) -> f32 {
        self.frustum_length
    }

    /// Sets the frustum draw length; meshes are rebuilt on the next tick.
    pub fn set_frustum_length(&mut self, length: f32) {
        self.frustum_length = length.max(0.0);
        self.update_frustums = true;
    }

    /// Whether a frustum rebuild is pending.
    pub fn frustums_pending(&self) -> bool {
        self.update_frustums
    }

    /// Maps a normalized slider value onto `[0, max_frustum_length]`.
    pub fn on_slider_update(&mut self, normalized: f32) {
        let normalized = normalized.clamp(0.0, 1.0);
        self.set_frustum_length(normalized * self.options.max_frustum_length);
    }

    /// Toggles the walk-through lock. Returns the new lock state.
    pub fn on_walk_through_toggled(&mut self, head: &Transform) -> bool {
        self.walk_through.toggle(head, &self.scene.origin)
    }

    /// The walk-through lock state.
    pub fn walk_through(&self) -> &WalkThrough {
        &self.walk_through
    }

    /// The scene built from the last load.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable scene access, e.g. to hide individual rigs.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Camera rigs in document order.
    pub fn camera_rigs(&self) -> impl Iterator<Item = &CameraRig> {
        self.scene.registry.iter_as::<CameraRig>()
    }

    /// Number of camera rigs, including hidden ones.
    pub fn camera_count(&self) -> usize {
        self.camera_rigs().count()
    }

    /// Options the loader was created with.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The calibration source being watched.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable source access.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// World-space dump of the current scene.
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot::capture(&self.scene)
    }
}
