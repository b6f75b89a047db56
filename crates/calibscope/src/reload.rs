//! Change detection for calibration sources.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use calibscope_core::Result;

/// Returns true when the source should be reloaded.
///
/// A source that is currently unavailable (`current == None`) never
/// triggers a reload; the previous scene is kept until it reappears.
#[must_use]
pub fn has_source_changed(last_known: Option<SystemTime>, current: Option<SystemTime>) -> bool {
    match (last_known, current) {
        (_, None) => false,
        (None, Some(_)) => true,
        (Some(last), Some(current)) => last != current,
    }
}

/// Where calibration bytes come from.
pub trait CalibrationSource {
    /// Human-readable description for log messages.
    fn describe(&self) -> String;

    /// Last modification time, or `None` if the source is currently unavailable.
    fn modified(&self) -> Result<Option<SystemTime>>;

    /// Reads the whole document.
    fn read(&self) -> Result<Vec<u8>>;
}

/// A calibration file on disk, polled by modification time.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Watches the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the watched file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CalibrationSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn modified(&self) -> Result<Option<SystemTime>> {
        match std::fs::metadata(&self.path) {
            Ok(metadata) => Ok(Some(metadata.modified()?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("{} is not available", self.path.display());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn read(&self) -> Result<Vec<u8>> {
        Ok(std::fs::read(&self.path)?)
    }
}

/// An in-memory document, e.g. one bundled with the application.
///
/// Every [`MemorySource::replace`] advances the reported modification time.
#[derive(Debug, Clone)]
pub struct MemorySource {
    bytes: Vec<u8>,
    revision: u64,
}

impl MemorySource {
    /// Wraps a document at revision 1.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            revision: 1,
        }
    }

    /// Swaps in a new document.
    pub fn replace(&mut self, bytes: impl Into<Vec<u8>>) {
        self.bytes = bytes.into();
        self.revision += 1;
    }

    /// Marks the document as modified without changing it.
    pub fn touch(&mut self) {
        self.revision += 1;
    }
}

impl CalibrationSource for MemorySource {
    fn describe(&self) -> String {
        format!("in-memory document (revision {})", self.revision)
    }

    fn modified(&self) -> Result<Option<SystemTime>> {
        Ok(Some(SystemTime::UNIX_EPOCH + Duration::from_secs(self.revision)))
    }

    fn read(&self) -> Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: u64) -> Option<SystemTime> {
        Some(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
    }

    #[test]
    fn test_first_observation_is_a_change() {
        assert!(has_source_changed(None, at(5)));
    }

    #[test]
    fn test_same_timestamp_is_not_a_change() {
        assert!(!has_source_changed(at(5), at(5)));
    }

    #[test]
    fn test_any_different_timestamp_is_a_change() {
        assert!(has_source_changed(at(5), at(6)));
        // Restoring an older file still counts
        assert!(has_source_changed(at(6), at(5)));
    }

    #[test]
    fn test_unavailable_source_is_not_a_change() {
        assert!(!has_source_changed(at(5), None));
        assert!(!has_source_changed(None, None));
    }

    #[test]
    fn test_memory_source_revisions() {
        let mut source = MemorySource::new("<Cameras/>");
        let first = source.modified().unwrap();
        assert!(!has_source_changed(first, source.modified().unwrap()));

        source.replace("<Cameras></Cameras>");
        assert!(has_source_changed(first, source.modified().unwrap()));
        assert_eq!(source.read().unwrap(), b"<Cameras></Cameras>");
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("missing.xcp"));
        assert_eq!(source.modified().unwrap(), None);
        assert!(source.read().is_err());
    }
}
