//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Visualizer tuning knobs.
///
/// The label-placement values drive a best-effort greedy heuristic (see the
/// plot module); they are configuration rather than hard-coded constants so
/// dense tournaments can be re-rendered with wider spacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Baseline vertical offset between a point and its label, in rate units
    #[serde(default = "default_label_offset")]
    pub label_offset: f64,

    /// Two consecutive points at most this far apart (rate-space Euclidean
    /// distance) are considered stacked
    #[serde(default = "default_proximity_threshold")]
    pub proximity_threshold: f64,

    /// How much extra offset each stacked point adds
    #[serde(default = "default_padding_increment")]
    pub padding_increment: f64,

    /// Minimum full-field usage rate for an entity to be plotted at all
    #[serde(default = "default_usage_floor")]
    pub usage_floor: f64,

    /// Upper axis bound of the zoomed-in image
    #[serde(default = "default_zoom_bound")]
    pub zoom_bound: f64,

    /// Margin added above the maximum observed rate in the zoomed-out image
    #[serde(default = "default_axis_margin")]
    pub axis_margin: f64,

    /// Output image width in pixels
    #[serde(default = "default_image_width")]
    pub image_width: u32,

    /// Output image height in pixels
    #[serde(default = "default_image_height")]
    pub image_height: u32,
}

fn default_label_offset() -> f64 {
    0.005
}

fn default_proximity_threshold() -> f64 {
    0.01
}

fn default_padding_increment() -> f64 {
    0.008
}

fn default_usage_floor() -> f64 {
    0.03
}

fn default_zoom_bound() -> f64 {
    0.2
}

fn default_axis_margin() -> f64 {
    0.05
}

fn default_image_width() -> u32 {
    1200
}

fn default_image_height() -> u32 {
    800
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            label_offset: default_label_offset(),
            proximity_threshold: default_proximity_threshold(),
            padding_increment: default_padding_increment(),
            usage_floor: default_usage_floor(),
            zoom_bound: default_zoom_bound(),
            axis_margin: default_axis_margin(),
            image_width: default_image_width(),
            image_height: default_image_height(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory that receives the report, snapshot, and plot artifacts
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub plot: PlotConfig,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./output")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            log_level: default_log_level(),
            plot: PlotConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file, falling back to defaults when
    /// the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate field ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.plot.proximity_threshold <= 0.0 {
            return Err(ConfigError::ValidationError(
                "plot.proximity_threshold must be positive".to_string(),
            ));
        }
        if self.plot.padding_increment <= 0.0 {
            return Err(ConfigError::ValidationError(
                "plot.padding_increment must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.plot.usage_floor) {
            return Err(ConfigError::ValidationError(
                "plot.usage_floor must be within [0, 1]".to_string(),
            ));
        }
        if self.plot.zoom_bound <= 0.0 {
            return Err(ConfigError::ValidationError(
                "plot.zoom_bound must be positive".to_string(),
            ));
        }
        if self.plot.image_width == 0 || self.plot.image_height == 0 {
            return Err(ConfigError::ValidationError(
                "plot image dimensions must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
