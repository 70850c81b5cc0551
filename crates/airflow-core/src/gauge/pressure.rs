//! Pressure dial specifics: threshold bands, stroke colouring, the
//! low-pressure alarm and the rim labels.

use super::geometry::{arc_between, ARC_ROTATION};
use super::types::{format_number, round_reading, ArcPath, GaugeConfig};
use crate::surface::Paint;
use crate::telemetry::{TelemetryField, TelemetrySnapshot};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Width of the rising (yellow) band above the low threshold.
pub const RISING_BAND_WIDTH: f64 = 50.0;

/// The four coloured segments around the pressure dial rim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PressureBand {
    /// Below the low threshold (red)
    Low,
    /// Low threshold to low + 50 (yellow)
    Rising,
    /// Up to the high threshold (green)
    Normal,
    /// Above the high threshold (yellow)
    Falling,
}

impl PressureBand {
    /// Bands in rim order
    pub const ALL: [PressureBand; 4] = [
        PressureBand::Low,
        PressureBand::Rising,
        PressureBand::Normal,
        PressureBand::Falling,
    ];
}

/// One band as a ratio interval of the dial
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandInterval {
    /// Which band
    pub band: PressureBand,
    /// Start as a fraction of the dial
    pub start_ratio: f64,
    /// End as a fraction of the dial
    pub end_ratio: f64,
}

impl BandInterval {
    /// Span of the band; negative when the thresholds are out of order
    pub fn width(&self) -> f64 {
        self.end_ratio - self.start_ratio
    }
}

/// One band as a drawable arc
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandArc {
    /// Which band
    pub band: PressureBand,
    /// Arc on the band radius
    pub path: ArcPath,
}

/// Ratio intervals of the four bands.
///
/// Not clamped or sorted: thresholds out of order yield zero or negative
/// width intervals rather than an error.
pub fn band_ratios(low: f64, high: f64, max_value: f64) -> [BandInterval; 4] {
    let low_ratio = low / max_value;
    let rising_end = (low + RISING_BAND_WIDTH) / max_value;
    let high_ratio = high / max_value;

    let interval = |band, start_ratio, end_ratio| BandInterval {
        band,
        start_ratio,
        end_ratio,
    };

    [
        interval(PressureBand::Low, 0.0, low_ratio),
        interval(PressureBand::Rising, low_ratio, rising_end),
        interval(PressureBand::Normal, rising_end, high_ratio),
        interval(PressureBand::Falling, high_ratio, 1.0),
    ]
}

/// Arcs for the four threshold bands at `band_radius`.
pub fn compute_band_arcs(
    low: f64,
    high: f64,
    config: &GaugeConfig,
    band_radius: f64,
) -> [BandArc; 4] {
    band_ratios(low, high, config.max_value).map(|interval| {
        let start_angle = config.angle_at(interval.start_ratio) + ARC_ROTATION;
        let end_angle = config.angle_at(interval.end_ratio) + ARC_ROTATION;
        let path = arc_between(config.center, band_radius, start_angle, end_angle);
        debug!(band = ?interval.band, path = %path, "band arc");
        BandArc {
            band: interval.band,
            path,
        }
    })
}

/// Fixed stroke colouring of the pressure value arc.
///
/// These limits are independent of the configurable band thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressureStrokeBands {
    /// Red below this
    pub alarm_below: f64,
    /// Yellow below this
    pub warning_below: f64,
    /// Green up to and including this, yellow above
    pub normal_up_to: f64,
}

impl Default for PressureStrokeBands {
    fn default() -> Self {
        Self {
            alarm_below: 100.0,
            warning_below: 150.0,
            normal_up_to: 350.0,
        }
    }
}

impl PressureStrokeBands {
    /// Stroke colour for a pressure reading
    pub fn color(&self, pressure: f64) -> Paint {
        if pressure < self.alarm_below {
            Paint::Red
        } else if pressure < self.warning_below {
            Paint::Yellow
        } else if pressure <= self.normal_up_to {
            Paint::Green
        } else {
            Paint::Yellow
        }
    }
}

/// Stroke colour of the pressure value arc with the stock limits
pub fn pressure_stroke_color(pressure: f64) -> Paint {
    PressureStrokeBands::default().color(pressure)
}

/// Low-pressure alarm, raised at or below the low threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowPressureAlarm {
    /// Pressure is at or below the low threshold
    pub active: bool,
}

impl LowPressureAlarm {
    /// Fill of the dial face
    pub fn disk_fill(&self) -> Paint {
        if self.active {
            Paint::RedGradient
        } else {
            Paint::DiskGradient
        }
    }

    /// Whether the dial pulses
    pub fn pulsating(&self) -> bool {
        self.active
    }

    /// Opacity of the low-pressure warning icon
    pub fn indicator_opacity(&self) -> f64 {
        if self.active {
            1.0
        } else {
            0.0
        }
    }
}

/// Evaluate the alarm for a reading against the low threshold
pub fn low_pressure_alarm(pressure: f64, low_threshold: f64) -> LowPressureAlarm {
    LowPressureAlarm {
        active: pressure <= low_threshold,
    }
}

/// Text of the four rim labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PressureLabels {
    /// `LOW <n>`
    pub low: String,
    /// `NORMAL <n>`
    pub normal: String,
    /// `HIGH <n>`
    pub high: String,
    /// `SET <n>`
    pub set: String,
}

impl PressureLabels {
    /// Labels for the current setpoints
    pub fn from_snapshot(snapshot: &TelemetrySnapshot) -> Self {
        let label = |prefix: &str, field: TelemetryField| {
            format!("{} {}", prefix, format_number(snapshot.get(field)))
        };
        Self {
            low: label("LOW", TelemetryField::SetPressureLow),
            normal: label("NORMAL", TelemetryField::SetPressureNormal),
            high: label("HIGH", TelemetryField::SetPressureHigh),
            set: label("SET", TelemetryField::SetPressure),
        }
    }
}

/// Readout text for the pressure dial: rounded, clamped to the domain.
///
/// A NaN reading prints as `NaN` rather than a clamped bound.
pub fn pressure_readout(pressure: f64, config: &GaugeConfig) -> String {
    let rounded = round_reading(pressure);
    if rounded.is_nan() {
        return format_number(rounded);
    }
    format_number(rounded.min(config.max_value).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_color_bands() {
        assert_eq!(pressure_stroke_color(0.0), Paint::Red);
        assert_eq!(pressure_stroke_color(99.9), Paint::Red);
        assert_eq!(pressure_stroke_color(100.0), Paint::Yellow);
        assert_eq!(pressure_stroke_color(149.0), Paint::Yellow);
        assert_eq!(pressure_stroke_color(150.0), Paint::Green);
        assert_eq!(pressure_stroke_color(350.0), Paint::Green);
        assert_eq!(pressure_stroke_color(350.5), Paint::Yellow);
    }

    #[test]
    fn test_alarm_is_inclusive() {
        assert!(low_pressure_alarm(100.0, 100.0).active);
        assert!(!low_pressure_alarm(100.5, 100.0).active);
    }

    #[test]
    fn test_out_of_order_thresholds_do_not_panic() {
        let cfg = GaugeConfig::pressure();
        let arcs = compute_band_arcs(400.0, 120.0, &cfg, 30.0);

        // Green band runs backwards but is still a drawable arc
        let green = arcs[2];
        assert_eq!(green.band, PressureBand::Normal);
        assert!(!green.path.is_empty());
        assert_eq!(green.path.large_arc(), Some(false));
    }

    #[test]
    fn test_zero_domain_bands_are_empty() {
        let cfg = GaugeConfig {
            max_value: 0.0,
            ..GaugeConfig::pressure()
        };
        for arc in compute_band_arcs(100.0, 350.0, &cfg, 30.0) {
            assert!(arc.path.is_empty(), "{:?} should be cleared", arc.band);
        }
    }

    #[test]
    fn test_pressure_readout_clamps() {
        let cfg = GaugeConfig::pressure();
        assert_eq!(pressure_readout(-20.0, &cfg), "0");
        assert_eq!(pressure_readout(612.0, &cfg), "500");
        assert_eq!(pressure_readout(249.5, &cfg), "250");
    }

    #[test]
    fn test_pressure_readout_nan_is_not_clamped() {
        let cfg = GaugeConfig::pressure();
        assert_eq!(pressure_readout(f64::NAN, &cfg), "NaN");
        assert_eq!(pressure_readout(f64::INFINITY, &cfg), "500");
        assert_eq!(pressure_readout(f64::NEG_INFINITY, &cfg), "0");
    }
}
