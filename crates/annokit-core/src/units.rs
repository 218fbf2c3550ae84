//! Measurement units for calibrated values
//!
//! Micrography calibrations express a physical length per pixel. The unit
//! is whatever the operator read off the stage micrometer; micrometers are
//! the default throughout.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Physical unit of a calibrated measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    /// Micrometers (µm)
    #[serde(rename = "microns")]
    Micrometer,
    /// Millimeters
    #[serde(rename = "mm")]
    Millimeter,
    /// Centimeters
    #[serde(rename = "cm")]
    Centimeter,
    /// Inches
    #[serde(rename = "inch")]
    Inch,
}

impl Default for Unit {
    fn default() -> Self {
        Self::Micrometer
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Micrometer => write!(f, "µm"),
            Self::Millimeter => write!(f, "mm"),
            Self::Centimeter => write!(f, "cm"),
            Self::Inch => write!(f, "inch"),
        }
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "µm" | "um" | "micron" | "microns" | "micrometer" => Ok(Self::Micrometer),
            "mm" | "millimeter" => Ok(Self::Millimeter),
            "cm" | "centimeter" => Ok(Self::Centimeter),
            "in" | "inch" => Ok(Self::Inch),
            _ => Err(format!("Unknown unit: {}", s)),
        }
    }
}

impl Unit {
    /// Label for an area in this unit ("µm²", "mm²", ...)
    pub fn area_label(&self) -> String {
        format!("{}²", self)
    }
}

/// Format a length value for an on-canvas label
///
/// * `value` - Calibrated length (or raw pixels when uncalibrated)
/// * `unit` - Unit the value is expressed in
pub fn format_length(value: f64, unit: Unit) -> String {
    format!("{} {}", value.round(), unit)
}

/// Format an area value for an on-canvas label
pub fn format_area(value: f64, unit: Unit) -> String {
    format!("{} {}", value.round(), unit.area_label())
}
