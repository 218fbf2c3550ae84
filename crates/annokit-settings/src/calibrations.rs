//! Saved calibration library
//!
//! Calibrations are captured per objective magnification and reused across
//! sessions. The library stores one context per magnification label plus
//! the currently selected one.

use crate::error::{SettingsError, SettingsResult};
use annokit_core::CalibrationContext;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Named calibrations keyed by magnification label ("100X", "400X", ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibrationLibrary {
    /// Stored calibrations by magnification
    entries: HashMap<String, CalibrationContext>,
    /// Magnification of the currently selected calibration
    current: Option<String>,
}

impl CalibrationLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the calibration for a magnification
    ///
    /// The magnification label is stamped into the stored context so a
    /// context pulled out of the library knows where it came from.
    pub fn upsert(&mut self, magnification: impl Into<String>, mut context: CalibrationContext) {
        let magnification = magnification.into();
        context.magnification = Some(magnification.clone());
        self.entries.insert(magnification, context);
    }

    /// Select the calibration to use for new measurements
    pub fn set_current(&mut self, magnification: &str) -> SettingsResult<()> {
        if !self.entries.contains_key(magnification) {
            return Err(SettingsError::UnknownMagnification(
                magnification.to_string(),
            ));
        }
        self.current = Some(magnification.to_string());
        Ok(())
    }

    /// The currently selected calibration, if any
    pub fn current(&self) -> Option<&CalibrationContext> {
        self.current.as_deref().and_then(|m| self.entries.get(m))
    }

    /// Magnification label of the current selection
    pub fn current_magnification(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Look up a stored calibration by magnification
    pub fn get(&self, magnification: &str) -> Option<&CalibrationContext> {
        self.entries.get(magnification)
    }

    /// Remove a stored calibration; clears the selection if it pointed here
    pub fn remove(&mut self, magnification: &str) -> Option<CalibrationContext> {
        let removed = self.entries.remove(magnification);
        if removed.is_some() && self.current.as_deref() == Some(magnification) {
            self.current = None;
        }
        removed
    }

    /// All stored magnification labels, sorted
    pub fn magnifications(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        labels.sort_unstable();
        labels
    }

    /// Number of stored calibrations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the library holds no calibrations
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load the library from a JSON file
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;
        let library = serde_json::from_str(&content)
            .map_err(|e| SettingsError::LoadError(format!("Invalid calibration file: {}", e)))?;
        Ok(library)
    }

    /// Save the library to a JSON file
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            SettingsError::SaveError(format!("Failed to serialize calibrations: {}", e))
        })?;
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }
}
