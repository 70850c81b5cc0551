//! Status encoding
//!
//! Maps on/off telemetry to the panel's indicator lamps, fan power rings,
//! the no-emergency disc and the exhaust plumes.

use crate::surface::Paint;
use crate::telemetry::{TelemetryField, TelemetrySnapshot};
use serde::{Deserialize, Serialize};

/// Class marking a lit indicator
pub const STATUS_ACTIVE_CLASS: &str = "status-active";

/// Class marking a running fan
pub const POWER_ON_CLASS: &str = "power-on";

/// Tri-state reading of an indicator field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndicatorState {
    /// Reading is a clean 1 (true) or 0 (false)
    Active(bool),
    /// Anything else, or suppressed because a prerequisite is off
    Unknown,
}

impl IndicatorState {
    /// Decode a raw reading
    pub fn from_reading(value: f64) -> Self {
        if value == 1.0 {
            IndicatorState::Active(true)
        } else if value == 0.0 {
            IndicatorState::Active(false)
        } else {
            IndicatorState::Unknown
        }
    }

    /// Lamp colour and class for this state
    pub fn style(self) -> IndicatorStyle {
        match self {
            IndicatorState::Active(true) => IndicatorStyle {
                color: Paint::Green,
                active: true,
            },
            IndicatorState::Active(false) => IndicatorStyle {
                color: Paint::Red,
                active: true,
            },
            IndicatorState::Unknown => IndicatorStyle {
                color: Paint::Gray,
                active: false,
            },
        }
    }
}

/// How an indicator lamp is painted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndicatorStyle {
    /// Lamp fill
    pub color: Paint,
    /// Whether the lamp carries the active class
    pub active: bool,
}

/// Style for a raw reading: 1 green, 0 red, anything else gray.
pub fn classify(value: f64) -> IndicatorStyle {
    IndicatorState::from_reading(value).style()
}

/// The panel's two fans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fan {
    /// Fan 1, left exhaust
    One,
    /// Fan 2, right exhaust
    Two,
}

impl Fan {
    /// Both fans in panel order
    pub const ALL: [Fan; 2] = [Fan::One, Fan::Two];

    /// Field carrying the fan's on/off state
    pub fn on_field(self) -> TelemetryField {
        match self {
            Fan::One => TelemetryField::Fan1On,
            Fan::Two => TelemetryField::Fan2On,
        }
    }

    /// Field carrying the fan's hour counter
    pub fn hours_field(self) -> TelemetryField {
        match self {
            Fan::One => TelemetryField::OperationalHours1,
            Fan::Two => TelemetryField::OperationalHours2,
        }
    }

    /// Power ring element
    pub fn power_element_id(self) -> &'static str {
        match self {
            Fan::One => "power-fan1",
            Fan::Two => "power-fan2",
        }
    }

    /// Hour counter element
    pub fn hours_element_id(self) -> &'static str {
        match self {
            Fan::One => "fan1-hours",
            Fan::Two => "fan2-hours",
        }
    }

    /// Whether the fan is running in `snapshot`
    pub fn is_on(self, snapshot: &TelemetrySnapshot) -> bool {
        snapshot.is_on(self.on_field())
    }
}

/// Indicator lamps driven by tri-state fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Indicator {
    /// Fan 1 fuse
    FuseFan1,
    /// Contactor K1 feedback
    FeedbackK1,
    /// Fan 2 fuse
    FuseFan2,
    /// Contactor K2 feedback
    FeedbackK2,
    /// Dryer fuse
    FuseDryer,
    /// Pipe watchdog feedback
    FeedbackPipeWatchdog,
}

impl Indicator {
    /// All lamps in draw order
    pub const ALL: [Indicator; 6] = [
        Indicator::FuseFan1,
        Indicator::FuseFan2,
        Indicator::FeedbackK1,
        Indicator::FeedbackK2,
        Indicator::FuseDryer,
        Indicator::FeedbackPipeWatchdog,
    ];

    /// Telemetry field the lamp shows
    pub fn field(self) -> TelemetryField {
        match self {
            Indicator::FuseFan1 => TelemetryField::FuseFan1,
            Indicator::FeedbackK1 => TelemetryField::FeedbackK1,
            Indicator::FuseFan2 => TelemetryField::FuseFan2,
            Indicator::FeedbackK2 => TelemetryField::FeedbackK2,
            Indicator::FuseDryer => TelemetryField::FuseDryer,
            Indicator::FeedbackPipeWatchdog => TelemetryField::FeedbackPipeWatchdog,
        }
    }

    /// Fan that must be running for the reading to mean anything
    pub fn gate(self) -> Option<Fan> {
        match self {
            Indicator::FuseFan1 | Indicator::FeedbackK1 => Some(Fan::One),
            Indicator::FuseFan2 | Indicator::FeedbackK2 => Some(Fan::Two),
            Indicator::FuseDryer | Indicator::FeedbackPipeWatchdog => None,
        }
    }

    /// Lamp element
    pub fn element_id(self) -> &'static str {
        match self {
            Indicator::FuseFan1 => "status-Fuse_Fan1",
            Indicator::FeedbackK1 => "status-Feedback_K1",
            Indicator::FuseFan2 => "status-Fuse_Fan2",
            Indicator::FeedbackK2 => "status-Feedback_K2",
            Indicator::FuseDryer => "status-Fuse_Dryer",
            Indicator::FeedbackPipeWatchdog => "status-FeedbackPipeWatchdog",
        }
    }

    /// State of this lamp, with gating applied
    pub fn state(self, snapshot: &TelemetrySnapshot) -> IndicatorState {
        match self.gate() {
            Some(fan) if !fan.is_on(snapshot) => IndicatorState::Unknown,
            _ => IndicatorState::from_reading(snapshot.get(self.field())),
        }
    }
}

/// States of all six lamps
pub fn indicator_states(snapshot: &TelemetrySnapshot) -> [(Indicator, IndicatorState); 6] {
    Indicator::ALL.map(|indicator| (indicator, indicator.state(snapshot)))
}

/// The no-emergency disc: a green tick or a red cross, never unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyGlyph {
    /// `NoEmergency` reads exactly 1
    pub ok: bool,
}

impl EmergencyGlyph {
    /// Read the glyph from `snapshot`
    pub fn from_snapshot(snapshot: &TelemetrySnapshot) -> Self {
        Self {
            ok: snapshot.get(TelemetryField::NoEmergency) == 1.0,
        }
    }

    /// Disc fill
    pub fn fill(&self) -> Paint {
        if self.ok {
            Paint::NamedGreen
        } else {
            Paint::StatusRedGradient
        }
    }

    /// Tick or cross
    pub fn symbol(&self) -> &'static str {
        if self.ok {
            "✓"
        } else {
            "✗"
        }
    }
}

/// Visibility of the three exhaust plumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExhaustVisibility {
    /// Fan 1 plume
    pub left: bool,
    /// Fan 2 plume
    pub right: bool,
    /// Shared plume, shown while either fan runs
    pub center: bool,
}

impl ExhaustVisibility {
    /// Plumes for the fans running in `snapshot`
    pub fn from_snapshot(snapshot: &TelemetrySnapshot) -> Self {
        let left = Fan::One.is_on(snapshot);
        let right = Fan::Two.is_on(snapshot);
        Self {
            left,
            right,
            center: left || right,
        }
    }
}

/// Operating hours as a six digit counter
pub fn format_hours(hours: f64) -> String {
    let whole = if hours.is_finite() && hours > 0.0 {
        hours.trunc() as u64
    } else {
        0
    };
    format!("{:06}", whole)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(
            classify(1.0),
            IndicatorStyle {
                color: Paint::Green,
                active: true
            }
        );
        assert_eq!(
            classify(0.0),
            IndicatorStyle {
                color: Paint::Red,
                active: true
            }
        );
        for other in [-1.0, 2.0, 0.5, f64::NAN, f64::INFINITY] {
            assert_eq!(
                classify(other),
                IndicatorStyle {
                    color: Paint::Gray,
                    active: false
                }
            );
        }
    }

    #[test]
    fn test_ungated_indicator_ignores_fans() {
        let mut snapshot = TelemetrySnapshot::new();
        snapshot.set(TelemetryField::FuseDryer, 1.0);
        assert_eq!(
            Indicator::FuseDryer.state(&snapshot),
            IndicatorState::Active(true)
        );
    }

    #[test]
    fn test_hours_padding() {
        assert_eq!(format_hours(0.0), "000000");
        assert_eq!(format_hours(1234.0), "001234");
        assert_eq!(format_hours(1234567.0), "1234567");
        assert_eq!(format_hours(-5.0), "000000");
    }

    #[test]
    fn test_emergency_glyph() {
        let mut snapshot = TelemetrySnapshot::new();
        let glyph = EmergencyGlyph::from_snapshot(&snapshot);
        assert!(!glyph.ok);
        assert_eq!(glyph.fill(), Paint::StatusRedGradient);
        assert_eq!(glyph.symbol(), "✗");

        snapshot.set(TelemetryField::NoEmergency, 1.0);
        let glyph = EmergencyGlyph::from_snapshot(&snapshot);
        assert_eq!(glyph.fill(), Paint::NamedGreen);
        assert_eq!(glyph.symbol(), "✓");
    }
}
