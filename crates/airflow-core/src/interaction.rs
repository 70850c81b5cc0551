//! Click-to-simulate interactions
//!
//! Each click target rewrites a few telemetry fields in the caller's
//! snapshot and reports which parts of the panel need redrawing. These are
//! demo affordances; nothing here is sent back to the equipment.

use crate::gauge::round_reading;
use crate::telemetry::{TelemetryField, TelemetrySnapshot};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

/// Errors resolving a click
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InteractionError {
    /// No clickable element has this id
    #[error("Unknown click target: {0}")]
    UnknownTarget(String),
}

/// Clickable elements of the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClickTarget {
    /// Drops the pressure reading
    FuseDryer,
    /// Raises the fan speed
    FuseFan2,
    /// Flips the low-pressure threshold between its presets
    FuseFan1,
    /// Advances fan 1's hour counter
    FeedbackK1,
    /// Advances fan 2's hour counter
    FeedbackK2,
    /// Switches fan 1 on or off
    PowerFan1,
    /// Switches fan 2 on or off
    PowerFan2,
    /// Raises or clears the emergency
    FeedbackPipeWatchdog,
}

impl ClickTarget {
    /// Every clickable element
    pub const ALL: [ClickTarget; 8] = [
        ClickTarget::FuseDryer,
        ClickTarget::FuseFan2,
        ClickTarget::FuseFan1,
        ClickTarget::FeedbackK1,
        ClickTarget::FeedbackK2,
        ClickTarget::PowerFan1,
        ClickTarget::PowerFan2,
        ClickTarget::FeedbackPipeWatchdog,
    ];

    /// Id of the clicked element; also the parse form
    pub fn element_id(self) -> &'static str {
        match self {
            ClickTarget::FuseDryer => "status-Fuse_Dryer",
            ClickTarget::FuseFan2 => "status-Fuse_Fan2",
            ClickTarget::FuseFan1 => "status-Fuse_Fan1",
            ClickTarget::FeedbackK1 => "status-Feedback_K1",
            ClickTarget::FeedbackK2 => "status-Feedback_K2",
            ClickTarget::PowerFan1 => "power-fan1-container",
            ClickTarget::PowerFan2 => "power-fan2-container",
            ClickTarget::FeedbackPipeWatchdog => "status-FeedbackPipeWatchdog",
        }
    }
}

impl fmt::Display for ClickTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

impl FromStr for ClickTarget {
    type Err = InteractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|target| target.element_id() == s)
            .ok_or_else(|| InteractionError::UnknownTarget(s.to_string()))
    }
}

/// Which update passes a change invalidates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RedrawSet {
    /// Hour counters
    pub hours: bool,
    /// Fan speed dial
    pub speed: bool,
    /// Pressure dial
    pub pressure: bool,
    /// Threshold bands and their labels
    pub bands: bool,
    /// Lamps, power rings and the emergency disc
    pub statuses: bool,
    /// Exhaust plumes
    pub exhaust: bool,
}

impl RedrawSet {
    /// Every pass
    pub fn all() -> Self {
        Self {
            hours: true,
            speed: true,
            pressure: true,
            bands: true,
            statuses: true,
            exhaust: true,
        }
    }

    /// Nothing to redraw
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Step sizes and presets used by the click handlers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionPresets {
    /// Amount the dryer fuse click takes off the pressure
    pub pressure_drop: f64,
    /// RPM added by the fan 2 fuse click
    pub speed_step: f64,
    /// Hours added by a feedback click
    pub hours_step: f64,
    /// Low-pressure threshold the toggle falls back to
    pub low_threshold: f64,
    /// Low-pressure threshold the toggle raises to
    pub raised_low_threshold: f64,
}

impl Default for InteractionPresets {
    fn default() -> Self {
        Self {
            pressure_drop: 69.0,
            speed_step: 100.0,
            hours_step: 100.0,
            low_threshold: 100.0,
            raised_low_threshold: 150.0,
        }
    }
}

impl InteractionPresets {
    /// Apply one click to the snapshot
    pub fn apply(&self, target: ClickTarget, snapshot: &mut TelemetrySnapshot) -> RedrawSet {
        info!(%target, "panel click");

        match target {
            ClickTarget::FuseDryer => {
                let pressure = snapshot.get(TelemetryField::Pressure);
                snapshot.set(
                    TelemetryField::Pressure,
                    round_reading(pressure - self.pressure_drop),
                );
                RedrawSet {
                    pressure: true,
                    ..RedrawSet::default()
                }
            }
            ClickTarget::FuseFan2 => {
                let rpm = snapshot.get(TelemetryField::FanSpeedRpm);
                snapshot.set(
                    TelemetryField::FanSpeedRpm,
                    round_reading(rpm + self.speed_step),
                );
                RedrawSet {
                    speed: true,
                    ..RedrawSet::default()
                }
            }
            ClickTarget::FuseFan1 => {
                let low = snapshot.get(TelemetryField::SetPressureLow);
                let next = if low >= self.raised_low_threshold {
                    self.low_threshold
                } else {
                    self.raised_low_threshold
                };
                snapshot.set(TelemetryField::SetPressureLow, next);
                // The alarm on the pressure dial depends on the threshold too
                RedrawSet {
                    bands: true,
                    pressure: true,
                    ..RedrawSet::default()
                }
            }
            ClickTarget::FeedbackK1 | ClickTarget::FeedbackK2 => {
                let field = if target == ClickTarget::FeedbackK1 {
                    TelemetryField::OperationalHours1
                } else {
                    TelemetryField::OperationalHours2
                };
                snapshot.set(field, snapshot.get(field) + self.hours_step);
                RedrawSet {
                    hours: true,
                    ..RedrawSet::default()
                }
            }
            ClickTarget::PowerFan1 | ClickTarget::PowerFan2 => {
                let field = if target == ClickTarget::PowerFan1 {
                    TelemetryField::Fan1On
                } else {
                    TelemetryField::Fan2On
                };
                flip(snapshot, field);
                RedrawSet {
                    statuses: true,
                    exhaust: true,
                    ..RedrawSet::default()
                }
            }
            ClickTarget::FeedbackPipeWatchdog => {
                flip(snapshot, TelemetryField::NoEmergency);
                RedrawSet {
                    statuses: true,
                    ..RedrawSet::default()
                }
            }
        }
    }
}

fn flip(snapshot: &mut TelemetrySnapshot, field: TelemetryField) {
    snapshot.set(field, 1.0 - snapshot.get(field));
}

/// Apply one click with the stock presets
pub fn apply_click(target: ClickTarget, snapshot: &mut TelemetrySnapshot) -> RedrawSet {
    InteractionPresets::default().apply(target, snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_parse_from_element_ids() {
        for target in ClickTarget::ALL {
            assert_eq!(target.element_id().parse::<ClickTarget>(), Ok(target));
        }
        assert_eq!(
            "status-free".parse::<ClickTarget>(),
            Err(InteractionError::UnknownTarget("status-free".to_string()))
        );
    }

    #[test]
    fn test_pressure_drop_rounds() {
        let mut snapshot = TelemetrySnapshot::new();
        snapshot.set(TelemetryField::Pressure, 200.4);

        let redraw = apply_click(ClickTarget::FuseDryer, &mut snapshot);
        assert_eq!(snapshot.get(TelemetryField::Pressure), 131.0);
        assert!(redraw.pressure);
        assert!(!redraw.speed);
    }

    #[test]
    fn test_redraw_set_all() {
        assert!(RedrawSet::default().is_empty());
        assert!(!RedrawSet::all().is_empty());
    }
}
