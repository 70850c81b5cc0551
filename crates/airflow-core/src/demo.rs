//! Demo Mode - Simulated airflow telemetry for testing
//!
//! Generates plausible panel readings without a real data source.
//! Both fans run at nominal speed with the duct pressure tracking its
//! setpoint; every so often one fan trips, stays down for a few seconds and
//! spins back up.

use crate::telemetry::{TelemetryField, TelemetrySnapshot};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use tracing::debug;

const NOMINAL_RPM: f64 = 2800.0;
const SINGLE_FAN_RPM: f64 = 1700.0;
const SETPOINT: f64 = 250.0;
const LOW_SETPOINT: f64 = 100.0;
const HIGH_SETPOINT: f64 = 350.0;
const TRIP_HOLD_MS: u64 = 4000;
const RESTART_MS: u64 = 2500;
const MS_PER_HOUR: f64 = 3_600_000.0;

/// Demo telemetry source that produces one snapshot per update
pub struct DemoTelemetry {
    /// Time of the first update (ms)
    start_time_ms: Option<u64>,
    /// Last update time (ms)
    last_update_ms: u64,
    /// Time of the next fan trip (ms from start)
    next_trip_at_ms: u64,
    trip_state: TripState,
    /// Current RPM (smoothed)
    current_rpm: f64,
    /// Accumulated operating hours per fan
    hours: [f64; 2],
    rng: StdRng,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TripState {
    /// Both fans running
    Running,
    /// One fan is down after a fuse trip
    Tripped { fan: usize, start_ms: u64 },
    /// Tripped fan back on, speed recovering
    Restarting { start_ms: u64 },
}

impl Default for DemoTelemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoTelemetry {
    /// Create a demo source seeded from entropy
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Create a deterministic demo source
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(mut rng: StdRng) -> Self {
        let first_trip = rng.gen_range(15_000..30_000);
        let hours = [
            rng.gen_range(1000..5000) as f64,
            rng.gen_range(1000..5000) as f64,
        ];

        Self {
            start_time_ms: None,
            last_update_ms: 0,
            next_trip_at_ms: first_trip,
            trip_state: TripState::Running,
            current_rpm: 0.0,
            hours,
            rng,
        }
    }

    /// Advance the simulation and produce the current readings
    ///
    /// # Arguments
    /// * `elapsed_ms` - Milliseconds on the caller's clock
    pub fn update(&mut self, elapsed_ms: u64) -> TelemetrySnapshot {
        let start = *self.start_time_ms.get_or_insert(elapsed_ms);
        let sim_time = elapsed_ms.saturating_sub(start);
        let delta_ms = elapsed_ms.saturating_sub(self.last_update_ms.max(start));
        self.last_update_ms = elapsed_ms;

        self.update_trip_state(sim_time);

        let fans_on = self.fans_on();
        let target_rpm = self.target_rpm(fans_on);

        // Spin up faster than coast down (RPM/sec)
        let rpm_rate = if target_rpm > self.current_rpm {
            1200.0
        } else {
            600.0
        };
        let max_change = rpm_rate * (delta_ms as f64 / 1000.0);
        self.current_rpm += (target_rpm - self.current_rpm).clamp(-max_change, max_change);

        let t = sim_time as f64 / 1000.0;
        let wobble = 15.0 * (t * 1.7).sin() + 6.0 * (t * 5.3).sin();
        let rpm = (self.current_rpm + wobble).max(0.0);

        for (fan, on) in fans_on.iter().enumerate() {
            if *on {
                self.hours[fan] += delta_ms as f64 / MS_PER_HOUR;
            }
        }

        let mut snapshot = TelemetrySnapshot::new();
        let flag = |on: bool| if on { 1.0 } else { 0.0 };
        let tripped = match self.trip_state {
            TripState::Tripped { fan, .. } => Some(fan),
            _ => None,
        };

        snapshot.set(TelemetryField::Fan1On, flag(fans_on[0]));
        snapshot.set(TelemetryField::Fan2On, flag(fans_on[1]));
        snapshot.set(TelemetryField::FanSpeedRpm, rpm);

        // Duct pressure follows fan speed, with a small ripple
        let ripple = 4.0 * (t * 0.9).sin() + 2.0 * (t * 3.1).sin();
        let pressure = SETPOINT * (rpm / NOMINAL_RPM) + ripple;
        snapshot.set(TelemetryField::Pressure, pressure.max(0.0));
        snapshot.set(TelemetryField::SetPressure, SETPOINT);
        snapshot.set(TelemetryField::SetPressureLow, LOW_SETPOINT);
        snapshot.set(TelemetryField::SetPressureNormal, SETPOINT);
        snapshot.set(TelemetryField::SetPressureHigh, HIGH_SETPOINT);

        snapshot.set(TelemetryField::FuseFan1, flag(tripped != Some(0)));
        snapshot.set(TelemetryField::FuseFan2, flag(tripped != Some(1)));
        snapshot.set(TelemetryField::FeedbackK1, flag(fans_on[0]));
        snapshot.set(TelemetryField::FeedbackK2, flag(fans_on[1]));
        snapshot.set(TelemetryField::FuseDryer, 1.0);
        snapshot.set(TelemetryField::Inflation, flag(pressure > LOW_SETPOINT));
        snapshot.set(TelemetryField::FeedbackPipeWatchdog, 1.0);
        snapshot.set(TelemetryField::NoEmergency, flag(tripped.is_none()));
        snapshot.set(TelemetryField::OperationalHours1, self.hours[0]);
        snapshot.set(TelemetryField::OperationalHours2, self.hours[1]);
        snapshot.set(TelemetryField::LowPressure, flag(pressure <= LOW_SETPOINT));

        snapshot
    }

    fn fans_on(&self) -> [bool; 2] {
        match self.trip_state {
            TripState::Tripped { fan, .. } => {
                let mut on = [true; 2];
                on[fan] = false;
                on
            }
            TripState::Running | TripState::Restarting { .. } => [true; 2],
        }
    }

    fn target_rpm(&self, fans_on: [bool; 2]) -> f64 {
        match fans_on.iter().filter(|on| **on).count() {
            0 => 0.0,
            1 => SINGLE_FAN_RPM,
            _ => NOMINAL_RPM,
        }
    }

    /// Update the trip state machine
    fn update_trip_state(&mut self, sim_time: u64) {
        match self.trip_state {
            TripState::Running => {
                if sim_time >= self.next_trip_at_ms {
                    let fan = self.rng.gen_range(0..2);
                    debug!(fan = fan + 1, sim_time, "demo fan trip");
                    self.trip_state = TripState::Tripped {
                        fan,
                        start_ms: sim_time,
                    };
                }
            }
            TripState::Tripped { start_ms, .. } => {
                if sim_time >= start_ms + TRIP_HOLD_MS {
                    self.trip_state = TripState::Restarting { start_ms: sim_time };
                }
            }
            TripState::Restarting { start_ms } => {
                if sim_time >= start_ms + RESTART_MS {
                    self.trip_state = TripState::Running;
                    self.next_trip_at_ms = sim_time + self.rng.gen_range(20_000..40_000);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_until(demo: &mut DemoTelemetry, end_ms: u64) -> TelemetrySnapshot {
        let mut snapshot = demo.update(0);
        for ms in (100..=end_ms).step_by(100) {
            snapshot = demo.update(ms);
        }
        snapshot
    }

    #[test]
    fn test_fans_spin_up() {
        let mut demo = DemoTelemetry::with_seed(7);
        let first = demo.update(0);
        assert!(first.get(TelemetryField::FanSpeedRpm) < 100.0);

        let later = run_until(&mut demo, 5000);
        let rpm = later.get(TelemetryField::FanSpeedRpm);
        assert!(rpm > 2600.0 && rpm < 3000.0, "RPM {} not at nominal", rpm);
        assert!(later.is_on(TelemetryField::Fan1On));
        assert!(later.is_on(TelemetryField::Fan2On));
    }

    #[test]
    fn test_pressure_tracks_setpoint() {
        let mut demo = DemoTelemetry::with_seed(3);
        let snapshot = run_until(&mut demo, 6000);
        let pressure = snapshot.get(TelemetryField::Pressure);
        assert!((pressure - SETPOINT).abs() < 20.0, "pressure {}", pressure);
        assert_eq!(snapshot.get(TelemetryField::SetPressureLow), 100.0);
    }

    #[test]
    fn test_fan_trip_happens_and_recovers() {
        let mut demo = DemoTelemetry::with_seed(11);
        demo.update(0);

        let mut saw_trip = false;
        for ms in (100..=60_000).step_by(100) {
            let snapshot = demo.update(ms);
            let fan1 = snapshot.is_on(TelemetryField::Fan1On);
            let fan2 = snapshot.is_on(TelemetryField::Fan2On);
            if !fan1 || !fan2 {
                saw_trip = true;
                assert_eq!(snapshot.get(TelemetryField::NoEmergency), 0.0);
            }
            assert!(fan1 || fan2, "both fans down at {}ms", ms);
        }
        assert!(saw_trip);
    }

    #[test]
    fn test_same_seed_same_readings() {
        let mut a = DemoTelemetry::with_seed(42);
        let mut b = DemoTelemetry::with_seed(42);
        for ms in (0..20_000).step_by(500) {
            assert_eq!(a.update(ms), b.update(ms));
        }
    }

    #[test]
    fn test_hours_accumulate() {
        let mut demo = DemoTelemetry::with_seed(5);
        let total = |s: &TelemetrySnapshot| {
            s.get(TelemetryField::OperationalHours1) + s.get(TelemetryField::OperationalHours2)
        };
        let start = total(&demo.update(0));
        // At most one fan is down, so at least one counter advances two hours
        let later = total(&demo.update(7_200_000));
        assert!(later - start > 1.9, "hours {} -> {}", start, later);
    }
}
