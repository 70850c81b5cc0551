//! Panel Layout
//!
//! Fixed geometry and presets for one panel, persisted as JSON.
//! Every field has a default matching the stock airflow panel, so a layout
//! file only needs to list what it changes.

use crate::gauge::{GaugeConfig, PressureStrokeBands};
use crate::interaction::InteractionPresets;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors loading or saving a layout
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading or writing the file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File is not a valid layout document
    #[error("Invalid layout JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Layout parsed but cannot be drawn
    #[error("Invalid layout: {0}")]
    Invalid(String),
}

/// Complete panel layout configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelLayout {
    /// Display name
    pub name: String,
    /// Fan speed dial
    pub speed_gauge: GaugeConfig,
    /// Pressure dial
    pub pressure_gauge: GaugeConfig,
    /// Radius of the coloured threshold bands on the pressure dial
    pub band_radius: f64,
    /// Colour limits for the pressure value arc
    pub stroke_bands: PressureStrokeBands,
    /// Click handler steps
    pub presets: InteractionPresets,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self {
            name: "Airflow M1".to_string(),
            speed_gauge: GaugeConfig::speed(),
            pressure_gauge: GaugeConfig::pressure(),
            band_radius: 30.0,
            stroke_bands: PressureStrokeBands::default(),
            presets: InteractionPresets::default(),
        }
    }
}

impl PanelLayout {
    /// Parse a layout from JSON and validate it
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let layout: PanelLayout = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Load and validate a layout file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading panel layout");
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Write the layout as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Reject layouts whose dials cannot map any value.
    ///
    /// Rendering still copes with such layouts (cleared arcs); loading
    /// refuses them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (label, gauge) in [
            ("speed_gauge", &self.speed_gauge),
            ("pressure_gauge", &self.pressure_gauge),
        ] {
            if !(gauge.max_value.is_finite() && gauge.max_value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{label}.max_value must be positive, got {}",
                    gauge.max_value
                )));
            }
            if !(gauge.radius.is_finite() && gauge.radius > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{label}.radius must be positive, got {}",
                    gauge.radius
                )));
            }
        }
        if !(self.band_radius.is_finite() && self.band_radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "band_radius must be positive, got {}",
                self.band_radius
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_layout_keeps_defaults() {
        let layout = PanelLayout::from_json_str(r#"{ "band_radius": 28.5 }"#).unwrap();
        assert_eq!(layout.band_radius, 28.5);
        assert_eq!(layout.speed_gauge, GaugeConfig::speed());
        assert_eq!(layout.presets, InteractionPresets::default());
    }

    #[test]
    fn test_zero_domain_is_rejected() {
        let mut layout = PanelLayout::default();
        layout.pressure_gauge.max_value = 0.0;
        let err = layout.validate().unwrap_err();
        assert!(err.to_string().contains("pressure_gauge.max_value"));
    }
}
