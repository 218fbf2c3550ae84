//! Error handling for AnnoKit
//!
//! Provides error types for all layers of the annotation engine:
//! - Calibration errors (ratio/factor validation, capture failures)
//! - Image errors (decoding, missing micrograph)
//! - Store errors (shape lookups)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Calibration error type
///
/// Represents errors raised while capturing or applying a pixel-to-unit
/// calibration.
#[derive(Error, Debug, Clone)]
pub enum CalibrationError {
    /// Ratio or factor is not a finite positive number
    #[error("Invalid calibration ratio: {value}")]
    InvalidRatio {
        /// The rejected ratio value.
        value: f64,
    },

    /// The two capture points are horizontally coincident
    #[error("Calibration points have zero pixel distance")]
    ZeroPixelDistance,

    /// The entered physical length is not usable
    #[error("Invalid physical length: {value}")]
    InvalidLength {
        /// The rejected length value.
        value: f64,
    },

    /// Capture has not collected both points yet
    #[error("Calibration capture incomplete: {collected} of 2 points")]
    CaptureIncomplete {
        /// Number of points collected so far.
        collected: usize,
    },

    /// Generic calibration error
    #[error("Calibration error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

/// Image error type
///
/// Represents errors related to loading and handling the micrograph the
/// annotation layer is drawn over.
#[derive(Error, Debug, Clone)]
pub enum ImageError {
    /// Image bytes could not be decoded
    #[error("Failed to decode image: {reason}")]
    DecodeFailed {
        /// Decoder failure description.
        reason: String,
    },

    /// An operation required an image but none is loaded
    #[error("No image loaded")]
    NotLoaded,

    /// Image dimensions are unusable
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },
}

/// Shape store error type
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    /// Referenced shape id does not exist in the collection
    #[error("Shape {id} not found")]
    ShapeNotFound {
        /// The missing shape id.
        id: u64,
    },
}

/// Main error type for AnnoKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Calibration error
    #[error(transparent)]
    Calibration(#[from] CalibrationError),

    /// Image error
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Shape store error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a calibration error
    pub fn is_calibration_error(&self) -> bool {
        matches!(self, Error::Calibration(_))
    }

    /// Check if this is an image error
    pub fn is_image_error(&self) -> bool {
        matches!(self, Error::Image(_))
    }

    /// Check if this is a store error
    pub fn is_store_error(&self) -> bool {
        matches!(self, Error::Store(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
