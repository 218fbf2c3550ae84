//! Configuration for the annotation canvas
//!
//! Provides canvas defaults (resolution, colors, tool sizes) with file
//! handling and validation. Supports JSON and TOML files stored in
//! platform-specific directories.

use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Canvas defaults applied to new sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Default shape stroke color (hex, e.g. "#00ff00")
    pub default_color: String,
    /// Default text annotation color (hex)
    pub text_color: String,
    /// Default stroke thickness in pixels
    pub default_thickness: f32,
    /// Eraser brush radius in pixels
    pub eraser_radius: f64,
    /// Hit-test distance threshold in pixels
    pub hit_threshold: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            default_color: "#00ff00".to_string(),
            text_color: "#ffffff".to_string(),
            default_thickness: 2.0,
            eraser_radius: 15.0,
            hit_threshold: 10.0,
        }
    }
}

impl CanvasConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .map_err(|e| SettingsError::LoadError(format!("Invalid JSON config: {}", e)))?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)
                .map_err(|e| SettingsError::LoadError(format!("Invalid TOML config: {}", e)))?
        } else {
            return Err(SettingsError::LoadError(
                "Config file must be .json or .toml".to_string(),
            ));
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON, pretty-printed)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| SettingsError::SaveError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SettingsError::InvalidSetting {
                key: "width/height".to_string(),
                reason: "canvas dimensions must be > 0".to_string(),
            });
        }

        if self.default_thickness <= 0.0 {
            return Err(SettingsError::InvalidSetting {
                key: "default_thickness".to_string(),
                reason: "must be positive".to_string(),
            });
        }

        if self.eraser_radius <= 0.0 {
            return Err(SettingsError::InvalidSetting {
                key: "eraser_radius".to_string(),
                reason: "must be positive".to_string(),
            });
        }

        if self.hit_threshold <= 0.0 {
            return Err(SettingsError::InvalidSetting {
                key: "hit_threshold".to_string(),
                reason: "must be positive".to_string(),
            });
        }

        for (key, color) in [
            ("default_color", &self.default_color),
            ("text_color", &self.text_color),
        ] {
            if !color.starts_with('#') || !(color.len() == 7 || color.len() == 4) {
                return Err(SettingsError::InvalidSetting {
                    key: key.to_string(),
                    reason: format!("'{}' is not a hex color", color),
                });
            }
        }

        Ok(())
    }
}

/// Platform directory where AnnoKit settings live
pub fn default_config_dir() -> SettingsResult<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| {
        SettingsError::ConfigDirectory("no platform config directory".to_string())
    })?;
    Ok(base.join("annokit"))
}
