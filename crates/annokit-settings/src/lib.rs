//! AnnoKit Settings Crate
//!
//! Handles canvas configuration and the saved calibration library.

pub mod calibrations;
pub mod config;
pub mod error;

pub use calibrations::CalibrationLibrary;
pub use config::{default_config_dir, CanvasConfig};
pub use error::{SettingsError, SettingsResult};
