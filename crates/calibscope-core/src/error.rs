//! Error types for calibscope.

use thiserror::Error;

/// The main error type for calibscope operations.
#[derive(Error, Debug)]
pub enum CalibscopeError {
    /// The calibration document is not well-formed XML.
    #[error("malformed calibration document: {0}")]
    Xml(String),

    /// The calibration document is not valid UTF-8.
    #[error("calibration document is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),

    /// A numeric token could not be parsed and the active policy aborts the load.
    #[error("camera {camera}: invalid number '{token}' in {field}")]
    NumericParse {
        camera: String,
        field: String,
        token: String,
    },

    /// A structure with the given name was not found.
    #[error("structure '{0}' not found")]
    StructureNotFound(String),

    /// An option value is out of range.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for calibscope operations.
pub type Result<T> = std::result::Result<T, CalibscopeError>;
