//! Telemetry snapshot
//!
//! The flat set of named readings the panel is drawn from. Values are plain
//! numbers; on/off fields use 0 and 1.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use thiserror::Error;

/// Errors produced while adapting raw rows into a [`TelemetrySnapshot`]
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// A required field is absent from the row
    #[error("Missing telemetry field: {0}")]
    MissingField(TelemetryField),

    /// A field holds something other than a number or boolean
    #[error("Telemetry field {0} is not numeric")]
    NotNumeric(String),

    /// NaN or infinite reading, which JSON cannot carry
    #[error("Telemetry field {0} is not finite")]
    NotFinite(TelemetryField),

    /// Malformed JSON
    #[error("Invalid telemetry JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Every telemetry field the panel knows about, by wire name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TelemetryField {
    /// Fan 1 running
    #[serde(rename = "Fan1_On")]
    Fan1On,
    /// Fan 2 running
    #[serde(rename = "Fan2_On")]
    Fan2On,
    /// Fan speed in RPM
    #[serde(rename = "FanSpeed_RPM")]
    FanSpeedRpm,
    /// Duct pressure
    #[serde(rename = "Pressure")]
    Pressure,
    /// Active pressure setpoint
    #[serde(rename = "SetPressure")]
    SetPressure,
    /// Low-pressure threshold
    #[serde(rename = "SetPressure_Low")]
    SetPressureLow,
    /// Normal setpoint
    #[serde(rename = "SetPressure_Normal")]
    SetPressureNormal,
    /// High-pressure threshold
    #[serde(rename = "SetPressure_High")]
    SetPressureHigh,
    /// Fan 1 fuse intact
    #[serde(rename = "Fuse_Fan1")]
    FuseFan1,
    /// Fan 2 fuse intact
    #[serde(rename = "Fuse_Fan2")]
    FuseFan2,
    /// Contactor K1 closed
    #[serde(rename = "Feedback_K1")]
    FeedbackK1,
    /// Contactor K2 closed
    #[serde(rename = "Feedback_K2")]
    FeedbackK2,
    /// Dryer fuse intact
    #[serde(rename = "Fuse_Dryer")]
    FuseDryer,
    /// Inflation flag, carried but not drawn
    #[serde(rename = "Inflation")]
    Inflation,
    /// Pipe watchdog healthy
    #[serde(rename = "FeedbackPipeWatchdog")]
    FeedbackPipeWatchdog,
    /// No emergency stop active
    #[serde(rename = "NoEmergency")]
    NoEmergency,
    /// Fan 1 operating hours
    #[serde(rename = "OperationalHours1")]
    OperationalHours1,
    /// Fan 2 operating hours
    #[serde(rename = "OperationalHours2")]
    OperationalHours2,
    /// Spare channel, carried but not drawn
    #[serde(rename = "free")]
    Free,
    /// Low-pressure flag from the controller
    #[serde(rename = "LowPressure")]
    LowPressure,
}

impl TelemetryField {
    /// Number of known fields
    pub const COUNT: usize = 20;

    /// All fields, in declaration order
    pub const ALL: [TelemetryField; Self::COUNT] = [
        TelemetryField::Fan1On,
        TelemetryField::Fan2On,
        TelemetryField::FanSpeedRpm,
        TelemetryField::Pressure,
        TelemetryField::SetPressure,
        TelemetryField::SetPressureLow,
        TelemetryField::SetPressureNormal,
        TelemetryField::SetPressureHigh,
        TelemetryField::FuseFan1,
        TelemetryField::FuseFan2,
        TelemetryField::FeedbackK1,
        TelemetryField::FeedbackK2,
        TelemetryField::FuseDryer,
        TelemetryField::Inflation,
        TelemetryField::FeedbackPipeWatchdog,
        TelemetryField::NoEmergency,
        TelemetryField::OperationalHours1,
        TelemetryField::OperationalHours2,
        TelemetryField::Free,
        TelemetryField::LowPressure,
    ];

    /// Wire name as delivered by the data source
    pub fn name(self) -> &'static str {
        match self {
            TelemetryField::Fan1On => "Fan1_On",
            TelemetryField::Fan2On => "Fan2_On",
            TelemetryField::FanSpeedRpm => "FanSpeed_RPM",
            TelemetryField::Pressure => "Pressure",
            TelemetryField::SetPressure => "SetPressure",
            TelemetryField::SetPressureLow => "SetPressure_Low",
            TelemetryField::SetPressureNormal => "SetPressure_Normal",
            TelemetryField::SetPressureHigh => "SetPressure_High",
            TelemetryField::FuseFan1 => "Fuse_Fan1",
            TelemetryField::FuseFan2 => "Fuse_Fan2",
            TelemetryField::FeedbackK1 => "Feedback_K1",
            TelemetryField::FeedbackK2 => "Feedback_K2",
            TelemetryField::FuseDryer => "Fuse_Dryer",
            TelemetryField::Inflation => "Inflation",
            TelemetryField::FeedbackPipeWatchdog => "FeedbackPipeWatchdog",
            TelemetryField::NoEmergency => "NoEmergency",
            TelemetryField::OperationalHours1 => "OperationalHours1",
            TelemetryField::OperationalHours2 => "OperationalHours2",
            TelemetryField::Free => "free",
            TelemetryField::LowPressure => "LowPressure",
        }
    }

    /// Look up a field by its wire name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    /// Value the panel starts with before the first refresh.
    ///
    /// The low-pressure threshold is not part of the upstream query and
    /// always starts at the 100 preset.
    pub fn default_value(self) -> f64 {
        match self {
            TelemetryField::SetPressureLow => 100.0,
            _ => 0.0,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TelemetryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single reading as it arrives in a raw JSON row
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawReading {
    /// Plain number
    Number(f64),
    /// Boolean flag, read as 0/1
    Flag(bool),
    /// No value in this row
    Null,
}

/// The full set of telemetry readings for one render pass.
///
/// Always holds a value for every [`TelemetryField`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    into = "BTreeMap<String, f64>",
    try_from = "HashMap<String, RawReading>"
)]
pub struct TelemetrySnapshot {
    values: [f64; TelemetryField::COUNT],
}

impl Default for TelemetrySnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetrySnapshot {
    /// Create a snapshot holding the panel's initial values
    pub fn new() -> Self {
        let mut values = [0.0; TelemetryField::COUNT];
        for field in TelemetryField::ALL {
            values[field.index()] = field.default_value();
        }
        Self { values }
    }

    /// Build a snapshot from a name/value row.
    ///
    /// Unknown names are ignored. `SetPressure_Low` falls back to its preset
    /// when absent; every other field must be present.
    pub fn from_channels(channels: &HashMap<String, f64>) -> Result<Self, TelemetryError> {
        let mut snapshot = Self::new();
        for field in TelemetryField::ALL {
            match channels.get(field.name()) {
                Some(value) => snapshot.set(field, *value),
                None if field == TelemetryField::SetPressureLow => {}
                None => return Err(TelemetryError::MissingField(field)),
            }
        }
        Ok(snapshot)
    }

    /// Parse a flat JSON object of readings. Booleans are accepted as 0/1.
    pub fn from_json_str(json: &str) -> Result<Self, TelemetryError> {
        let raw: HashMap<String, RawReading> = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    /// Serialize back to a flat JSON object.
    ///
    /// Fails with [`TelemetryError::NotFinite`] on NaN or infinite readings,
    /// since those would come out as `null` and not parse back.
    pub fn to_json_string(&self) -> Result<String, TelemetryError> {
        if let Some((field, _)) = self.iter().find(|(_, value)| !value.is_finite()) {
            return Err(TelemetryError::NotFinite(field));
        }
        Ok(serde_json::to_string(&self.to_channels())?)
    }

    /// Current value of a field
    pub fn get(&self, field: TelemetryField) -> f64 {
        self.values[field.index()]
    }

    /// Overwrite a field
    pub fn set(&mut self, field: TelemetryField, value: f64) {
        self.values[field.index()] = value;
    }

    /// Truthiness of an on/off field: zero and NaN are off, anything else on
    pub fn is_on(&self, field: TelemetryField) -> bool {
        let value = self.get(field);
        value != 0.0 && !value.is_nan()
    }

    /// Iterate over every field and its value
    pub fn iter(&self) -> impl Iterator<Item = (TelemetryField, f64)> + '_ {
        TelemetryField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }

    /// Convert to a name/value row keyed by wire name
    pub fn to_channels(&self) -> BTreeMap<String, f64> {
        self.iter()
            .map(|(field, value)| (field.name().to_string(), value))
            .collect()
    }
}

impl From<TelemetrySnapshot> for BTreeMap<String, f64> {
    fn from(snapshot: TelemetrySnapshot) -> Self {
        snapshot.to_channels()
    }
}

impl TryFrom<HashMap<String, RawReading>> for TelemetrySnapshot {
    type Error = TelemetryError;

    fn try_from(raw: HashMap<String, RawReading>) -> Result<Self, Self::Error> {
        let mut channels = HashMap::with_capacity(raw.len());
        for (name, reading) in raw {
            let value = match reading {
                RawReading::Number(value) => value,
                RawReading::Flag(flag) => {
                    if flag {
                        1.0
                    } else {
                        0.0
                    }
                }
                RawReading::Null => {
                    if TelemetryField::from_name(&name).is_some() {
                        return Err(TelemetryError::NotNumeric(name));
                    }
                    continue;
                }
            };
            channels.insert(name, value);
        }
        Self::from_channels(&channels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapshot_matches_initial_panel() {
        let snapshot = TelemetrySnapshot::new();

        assert_eq!(snapshot.get(TelemetryField::SetPressureLow), 100.0);
        for field in TelemetryField::ALL {
            if field != TelemetryField::SetPressureLow {
                assert_eq!(snapshot.get(field), 0.0, "{} should start at 0", field);
            }
        }
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in TelemetryField::ALL {
            assert_eq!(TelemetryField::from_name(field.name()), Some(field));
        }
        assert_eq!(TelemetryField::from_name("Fan1_Off"), None);
    }

    #[test]
    fn test_is_on_follows_truthiness() {
        let mut snapshot = TelemetrySnapshot::new();
        assert!(!snapshot.is_on(TelemetryField::Fan1On));

        snapshot.set(TelemetryField::Fan1On, 1.0);
        assert!(snapshot.is_on(TelemetryField::Fan1On));

        snapshot.set(TelemetryField::Fan1On, f64::NAN);
        assert!(!snapshot.is_on(TelemetryField::Fan1On));
    }

    #[test]
    fn test_missing_low_threshold_uses_preset() {
        let mut channels: HashMap<String, f64> = TelemetryField::ALL
            .iter()
            .map(|f| (f.name().to_string(), 1.0))
            .collect();
        channels.remove("SetPressure_Low");

        let snapshot = TelemetrySnapshot::from_channels(&channels).unwrap();
        assert_eq!(snapshot.get(TelemetryField::SetPressureLow), 100.0);
        assert_eq!(snapshot.get(TelemetryField::Pressure), 1.0);
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let mut channels: HashMap<String, f64> = TelemetryField::ALL
            .iter()
            .map(|f| (f.name().to_string(), 0.0))
            .collect();
        channels.remove("Pressure");

        let err = TelemetrySnapshot::from_channels(&channels).unwrap_err();
        assert!(matches!(
            err,
            TelemetryError::MissingField(TelemetryField::Pressure)
        ));
    }

    #[test]
    fn test_non_finite_reading_is_not_serialized() {
        let mut snapshot = TelemetrySnapshot::new();
        snapshot.set(TelemetryField::Pressure, 212.0);
        let json = snapshot.to_json_string().unwrap();
        assert_eq!(TelemetrySnapshot::from_json_str(&json).unwrap(), snapshot);

        snapshot.set(TelemetryField::Pressure, f64::NAN);
        let err = snapshot.to_json_string().unwrap_err();
        assert!(matches!(
            err,
            TelemetryError::NotFinite(TelemetryField::Pressure)
        ));

        snapshot.set(TelemetryField::Pressure, 0.0);
        snapshot.set(TelemetryField::OperationalHours2, f64::INFINITY);
        assert!(matches!(
            snapshot.to_json_string(),
            Err(TelemetryError::NotFinite(TelemetryField::OperationalHours2))
        ));
    }
}
