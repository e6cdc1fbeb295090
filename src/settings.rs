//! Chart and sensor settings persistence.
//!
//! The decoding core only reads these values; ownership of the file lives
//! with the shell application, which shares the same format.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::parsers::types::TEMP_CHANNELS;

/// Default line colors for the 12 sensor channels.
const SENSOR_COLORS: [&str; TEMP_CHANNELS] = [
    "#e6194b", "#3cb44b", "#4363d8", "#f58231", "#911eb4", "#46f0f0", //
    "#f032e6", "#bcf60c", "#008080", "#9a6324", "#800000", "#000075",
];

/// Per-channel sensor configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SensorConfig {
    /// 1-based channel id, matching `Temp1`..`Temp12`.
    pub id: u8,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Display label; empty means "use the name from the file header".
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub color: String,
    /// Minimum setpoint drawn as a dashed guide, if set.
    #[serde(default)]
    pub min: Option<f64>,
    /// Maximum setpoint drawn as a dashed guide, if set.
    #[serde(default)]
    pub max: Option<f64>,
}

fn default_enabled() -> bool {
    true
}

/// Chart display settings consumed by pagination and the series builders.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChartSettings {
    /// Settings file version for migration support
    #[serde(default = "default_version")]
    pub version: u32,
    /// Points per rendered page before step scaling.
    #[serde(default = "default_points_per_page")]
    pub points_per_page: usize,
    /// Display step in minutes between charted points.
    #[serde(default = "default_display_step")]
    pub display_step: u32,
    /// Temperature axis minimum, °C.
    #[serde(default = "default_temp_min")]
    pub temp_min: f64,
    /// Temperature axis maximum, °C.
    #[serde(default = "default_temp_max")]
    pub temp_max: f64,
    #[serde(default = "default_sensors")]
    pub sensors: Vec<SensorConfig>,
}

fn default_version() -> u32 {
    1
}

fn default_points_per_page() -> usize {
    1440
}

fn default_display_step() -> u32 {
    1
}

fn default_temp_min() -> f64 {
    -30.0
}

fn default_temp_max() -> f64 {
    50.0
}

fn default_sensors() -> Vec<SensorConfig> {
    (1..=TEMP_CHANNELS as u8)
        .map(|id| SensorConfig {
            id,
            enabled: true,
            label: String::new(),
            color: SENSOR_COLORS[id as usize - 1].to_string(),
            min: None,
            max: None,
        })
        .collect()
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            version: 1,
            points_per_page: default_points_per_page(),
            display_step: default_display_step(),
            temp_min: default_temp_min(),
            temp_max: default_temp_max(),
            sensors: default_sensors(),
        }
    }
}

impl ChartSettings {
    /// Effective pagination chunk size: a one-hour display step makes each
    /// page cover sixty times more samples so the charted point count per
    /// page stays roughly constant.
    pub fn effective_points_per_page(&self) -> usize {
        self.points_per_page * self.display_step as usize
    }

    /// Get the config directory path for MareeLog
    pub fn get_config_dir() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::data_dir().map(|p| p.join("MareeLog"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|p| p.join("MareeLog"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            dirs::config_dir().map(|p| p.join("mareelog"))
        }
    }

    /// Get the path to the settings JSON file
    pub fn get_settings_path() -> Option<PathBuf> {
        Self::get_config_dir().map(|p| p.join("chart_settings.json"))
    }

    /// Load settings from disk, falling back to defaults on any problem.
    pub fn load() -> Self {
        let path = match Self::get_settings_path() {
            Some(p) => p,
            None => return Self::default(),
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), String> {
        let path = Self::get_settings_path()
            .ok_or_else(|| "Could not determine config directory".to_string())?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        std::fs::write(&path, content).map_err(|e| format!("Failed to write settings file: {}", e))?;

        Ok(())
    }
}
