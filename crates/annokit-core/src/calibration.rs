//! Shared calibration context
//!
//! A calibration maps image pixels to physical units for one microscope
//! magnification. The context is held centrally and handed to whoever
//! measures; nothing reads calibration state out of ambient storage.

use crate::units::Unit;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pixel-to-physical-unit mapping for the loaded image
///
/// Newer calibrations store `ratio` (units per pixel) directly. Older
/// saved calibrations store `factor` (pixels per unit) instead; both
/// forms resolve through [`effective_ratio`](Self::effective_ratio).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CalibrationContext {
    /// Physical units per pixel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,
    /// Pixels per physical unit (legacy form, inverse of `ratio`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factor: Option<f64>,
    /// Unit the calibration was captured in
    #[serde(default)]
    pub unit: Unit,
    /// Objective magnification this calibration belongs to ("10x", "40x", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnification: Option<String>,
    /// When the calibration was captured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,
}

impl CalibrationContext {
    /// Create a context from a direct units-per-pixel ratio
    pub fn from_ratio(ratio: f64, unit: Unit) -> Self {
        Self {
            ratio: Some(ratio),
            factor: None,
            unit,
            magnification: None,
            captured_at: Some(Utc::now()),
        }
    }

    /// Units-per-pixel ratio to measure with, if the context holds a usable one
    ///
    /// Prefers the direct ratio. Falls back to inverting a legacy factor.
    /// Non-finite or non-positive values are ignored.
    pub fn effective_ratio(&self) -> Option<f64> {
        match self.ratio {
            Some(r) if r.is_finite() && r > 0.0 => Some(r),
            _ => match self.factor {
                Some(f) if f.is_finite() && f > 0.0 => Some(1.0 / f),
                _ => None,
            },
        }
    }

    /// Whether the context can produce measurements
    pub fn is_calibrated(&self) -> bool {
        self.effective_ratio().is_some()
    }
}
