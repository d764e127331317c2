//! Engine settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::units::UnitConverter;

/// Tunables shared by the plan and perspective sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Editor units per foot in the 2D view
    pub editor_scale: f64,
    /// On-screen pixels per foot of the 2D canvas (display only)
    pub room_scale: f64,
    /// Fixed wall height in feet; caps auto-fit scaling
    pub wall_height: f64,
    /// Height of the box substituted for assets that fail to load
    pub proxy_height: f64,
    /// Smallest footprint side a plan resize may produce, in editor units
    pub min_resize_editor_units: f64,
    /// Lower bound of the perspective scale slider
    pub min_scale_factor: f64,
    /// Upper bound of the perspective scale slider
    pub max_scale_factor: f64,
    /// Snapshots retained by the history, including the entry state
    pub history_limit: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            editor_scale: 10.0,
            room_scale: 25.0,
            wall_height: 5.0,
            proxy_height: 2.0,
            min_resize_editor_units: 2.0,
            min_scale_factor: 0.5,
            max_scale_factor: 2.0,
            history_limit: 100,
        }
    }
}

impl EngineSettings {
    fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "furnish", "furnish")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from the user config dir, or return defaults
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring settings file: {e}");
                Self::default()
            }
        }
    }

    /// Load settings from an explicit JSON file. Out-of-range values are an
    /// error rather than being clamped.
    pub fn load_from(path: &Path) -> std::result::Result<Self, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        let settings: Self =
            serde_json::from_str(&json).map_err(|e| format!("Failed to parse {}: {e}", path.display()))?;
        settings
            .validate()
            .map_err(|e| format!("Invalid settings in {}: {e}", path.display()))?;
        Ok(settings)
    }

    /// Check that every tunable is usable by the session
    pub fn validate(&self) -> std::result::Result<(), String> {
        let positive = [
            ("editor_scale", self.editor_scale),
            ("room_scale", self.room_scale),
            ("wall_height", self.wall_height),
            ("proxy_height", self.proxy_height),
            ("min_scale_factor", self.min_scale_factor),
            ("max_scale_factor", self.max_scale_factor),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{name} must be positive, got {value}"));
            }
        }
        if !(self.min_resize_editor_units.is_finite() && self.min_resize_editor_units >= 0.0) {
            return Err(format!(
                "min_resize_editor_units must not be negative, got {}",
                self.min_resize_editor_units
            ));
        }
        if self.min_scale_factor > self.max_scale_factor {
            return Err(format!(
                "min_scale_factor {} exceeds max_scale_factor {}",
                self.min_scale_factor, self.max_scale_factor
            ));
        }
        Ok(())
    }

    /// Save settings to the user config dir
    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Some(dir) = path.parent() {
                if std::fs::create_dir_all(dir).is_err() {
                    return;
                }
            }
            if let Ok(json) = serde_json::to_string_pretty(self) {
                let _ = std::fs::write(path, json);
            }
        }
    }

    /// Unit converter for the configured editor scale
    pub fn units(&self) -> Result<UnitConverter> {
        UnitConverter::new(self.editor_scale)
    }

    /// Smallest footprint side in feet
    pub fn min_footprint_side(&self) -> f64 {
        self.min_resize_editor_units / self.editor_scale
    }

    /// Clamp a user scale factor into the slider range
    pub fn clamp_scale_factor(&self, factor: f64) -> f64 {
        factor.max(self.min_scale_factor).min(self.max_scale_factor)
    }
}
