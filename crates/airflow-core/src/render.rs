//! Panel renderer
//!
//! Turns a [`TelemetrySnapshot`] into surface calls. Every pass recomputes
//! from the snapshot alone, so running a pass twice issues the same calls
//! twice.

use crate::config::PanelLayout;
use crate::gauge::{
    compute_band_arcs, compute_indicator_triangle, compute_value_arc, low_pressure_alarm,
    pressure_readout, round_reading, speed_readout, PressureBand, PressureLabels,
};
use crate::interaction::{ClickTarget, RedrawSet};
use crate::status::{
    format_hours, indicator_states, EmergencyGlyph, ExhaustVisibility, Fan, POWER_ON_CLASS,
    STATUS_ACTIVE_CLASS,
};
use crate::surface::DrawingSurface;
use crate::telemetry::{TelemetryField, TelemetrySnapshot};
use tracing::debug;

/// Element ids on the panel document
pub mod ids {
    /// Fan speed readout
    pub const FANSPEED_VALUE: &str = "fanspeed-value";
    /// Fan speed value arc
    pub const FANSPEED_VALUE_ARC: &str = "fanspeed-value-arc";
    /// Fan speed needle
    pub const FANSPEED_INDICATOR: &str = "fanspeed-indicator";

    /// Pressure dial group, carries the pulsating class
    pub const PRESSURE_GAUGE: &str = "pressure";
    /// Pressure readout
    pub const PRESSURE_VALUE: &str = "pressure-value";
    /// Pressure value arc
    pub const PRESSURE_VALUE_ARC: &str = "pressure-value-arc";
    /// Pressure needle
    pub const PRESSURE_INDICATOR: &str = "pressure-indicator";
    /// Pressure dial face
    pub const PRESSURE_DISK: &str = "pressure-disk-path";
    /// Low-pressure warning icon
    pub const PRESSURE_LOW_INDICATOR: &str = "pressure-low-pressure-indicator";

    /// Red band
    pub const PRESSURE_LOW_ARC: &str = "pressure-low-arc";
    /// Lower yellow band
    pub const PRESSURE_YELLOW_LOW_ARC: &str = "pressure-yellow-low-arc";
    /// Green band
    pub const PRESSURE_GREEN_ARC: &str = "pressure-green-arc";
    /// Upper yellow band
    pub const PRESSURE_YELLOW_HIGH_ARC: &str = "pressure-yellow-high-arc";

    /// Rim label of the low setpoint
    pub const PRESSURE_LOW_LABEL: &str = "pressure-low-label";
    /// Rim label of the normal setpoint
    pub const PRESSURE_NORMAL_LABEL: &str = "pressure-normal-label";
    /// Rim label of the high setpoint
    pub const PRESSURE_HIGH_LABEL: &str = "pressure-high-label";
    /// Rim label of the active setpoint
    pub const PRESSURE_SET_LABEL: &str = "pressure-set-label";

    /// Emergency disc
    pub const NO_ERRORS_DISC: &str = "no-errors-disc";
    /// Tick or cross on the emergency disc
    pub const NO_ERRORS_SYMBOL: &str = "no-errors-symbol";

    /// Fan 1 plume
    pub const EXHAUST_LEFT: &str = "exhaust-container-1";
    /// Fan 2 plume
    pub const EXHAUST_RIGHT: &str = "exhaust-container-2";
    /// Shared plume
    pub const EXHAUST_CENTER: &str = "exhaust-container-center";
}

/// Class that makes the pressure disc pulse during a low-pressure alarm
pub const PULSATING_CLASS: &str = "pulsating-disk";

fn band_element_id(band: PressureBand) -> &'static str {
    match band {
        PressureBand::Low => ids::PRESSURE_LOW_ARC,
        PressureBand::Rising => ids::PRESSURE_YELLOW_LOW_ARC,
        PressureBand::Normal => ids::PRESSURE_GREEN_ARC,
        PressureBand::Falling => ids::PRESSURE_YELLOW_HIGH_ARC,
    }
}

/// Draws the panel for a given layout
#[derive(Debug, Clone, Default)]
pub struct PanelRenderer {
    layout: PanelLayout,
}

impl PanelRenderer {
    /// Renderer for `layout`
    pub fn new(layout: PanelLayout) -> Self {
        Self { layout }
    }

    /// Layout in use
    pub fn layout(&self) -> &PanelLayout {
        &self.layout
    }

    /// Full redraw
    pub fn render<S: DrawingSurface + ?Sized>(&self, snapshot: &TelemetrySnapshot, surface: &mut S) {
        self.redraw(RedrawSet::all(), snapshot, surface);
    }

    /// Run the passes named in `set`, in panel order
    pub fn redraw<S: DrawingSurface + ?Sized>(
        &self,
        set: RedrawSet,
        snapshot: &TelemetrySnapshot,
        surface: &mut S,
    ) {
        if set.hours {
            self.update_hours(snapshot, surface);
        }
        if set.speed {
            self.update_speed_gauge(snapshot, surface);
        }
        if set.pressure {
            self.update_pressure_gauge(snapshot, surface);
        }
        if set.bands {
            self.update_pressure_bands(snapshot, surface);
        }
        if set.statuses {
            self.update_statuses(snapshot, surface);
        }
        if set.exhaust {
            self.update_exhaust(snapshot, surface);
        }
    }

    /// Apply a click to the snapshot and redraw what it touched
    pub fn handle_click<S: DrawingSurface + ?Sized>(
        &self,
        target: ClickTarget,
        snapshot: &mut TelemetrySnapshot,
        surface: &mut S,
    ) -> RedrawSet {
        let set = self.layout.presets.apply(target, snapshot);
        self.redraw(set, snapshot, surface);
        set
    }

    /// Hour counters of both fans
    pub fn update_hours<S: DrawingSurface + ?Sized>(
        &self,
        snapshot: &TelemetrySnapshot,
        surface: &mut S,
    ) {
        for fan in Fan::ALL {
            let text = format_hours(snapshot.get(fan.hours_field()));
            surface.set_text(fan.hours_element_id(), &text);
        }
    }

    /// Fan speed arc, needle and readout
    pub fn update_speed_gauge<S: DrawingSurface + ?Sized>(
        &self,
        snapshot: &TelemetrySnapshot,
        surface: &mut S,
    ) {
        let config = &self.layout.speed_gauge;
        let raw = snapshot.get(TelemetryField::FanSpeedRpm);
        let rpm = round_reading(raw);

        surface.set_text(ids::FANSPEED_VALUE, &speed_readout(raw));

        let arc = compute_value_arc(rpm, config);
        debug!(rpm, arc = %arc, "speed gauge");
        surface.set_arc_path(ids::FANSPEED_VALUE_ARC, &arc);

        let needle = compute_indicator_triangle(rpm, config);
        surface.set_polygon(ids::FANSPEED_INDICATOR, &needle);
    }

    /// Pressure arc, needle, readout and the low-pressure alarm
    pub fn update_pressure_gauge<S: DrawingSurface + ?Sized>(
        &self,
        snapshot: &TelemetrySnapshot,
        surface: &mut S,
    ) {
        let config = &self.layout.pressure_gauge;
        let raw = snapshot.get(TelemetryField::Pressure);
        let pressure = round_reading(raw);

        surface.set_text(ids::PRESSURE_VALUE, &pressure_readout(raw, config));

        let arc = compute_value_arc(pressure, config);
        debug!(pressure, arc = %arc, "pressure gauge");
        surface.set_arc_path(ids::PRESSURE_VALUE_ARC, &arc);
        if !arc.is_empty() {
            surface.set_stroke(
                ids::PRESSURE_VALUE_ARC,
                self.layout.stroke_bands.color(pressure),
            );
        }

        let needle = compute_indicator_triangle(pressure, config);
        surface.set_polygon(ids::PRESSURE_INDICATOR, &needle);

        let alarm = low_pressure_alarm(pressure, snapshot.get(TelemetryField::SetPressureLow));
        surface.set_fill(ids::PRESSURE_DISK, alarm.disk_fill());
        surface.toggle_class(ids::PRESSURE_GAUGE, PULSATING_CLASS, alarm.pulsating());
        surface.set_opacity(ids::PRESSURE_LOW_INDICATOR, alarm.indicator_opacity());
    }

    /// Threshold bands and rim labels
    pub fn update_pressure_bands<S: DrawingSurface + ?Sized>(
        &self,
        snapshot: &TelemetrySnapshot,
        surface: &mut S,
    ) {
        let low = snapshot.get(TelemetryField::SetPressureLow);
        let high = snapshot.get(TelemetryField::SetPressureHigh);

        for arc in compute_band_arcs(low, high, &self.layout.pressure_gauge, self.layout.band_radius)
        {
            surface.set_arc_path(band_element_id(arc.band), &arc.path);
        }

        let labels = PressureLabels::from_snapshot(snapshot);
        surface.set_text(ids::PRESSURE_LOW_LABEL, &labels.low);
        surface.set_text(ids::PRESSURE_NORMAL_LABEL, &labels.normal);
        surface.set_text(ids::PRESSURE_HIGH_LABEL, &labels.high);
        surface.set_text(ids::PRESSURE_SET_LABEL, &labels.set);
    }

    /// Power rings, emergency disc and indicator lamps
    pub fn update_statuses<S: DrawingSurface + ?Sized>(
        &self,
        snapshot: &TelemetrySnapshot,
        surface: &mut S,
    ) {
        for fan in Fan::ALL {
            surface.toggle_class(fan.power_element_id(), POWER_ON_CLASS, fan.is_on(snapshot));
        }

        let glyph = EmergencyGlyph::from_snapshot(snapshot);
        surface.set_fill(ids::NO_ERRORS_DISC, glyph.fill());
        surface.toggle_class(ids::NO_ERRORS_DISC, STATUS_ACTIVE_CLASS, glyph.ok);
        surface.set_text(ids::NO_ERRORS_SYMBOL, glyph.symbol());

        for (indicator, state) in indicator_states(snapshot) {
            let style = state.style();
            debug!(?indicator, ?state, "indicator");
            surface.set_fill(indicator.element_id(), style.color);
            surface.toggle_class(indicator.element_id(), STATUS_ACTIVE_CLASS, style.active);
        }
    }

    /// Exhaust plume visibility
    pub fn update_exhaust<S: DrawingSurface + ?Sized>(
        &self,
        snapshot: &TelemetrySnapshot,
        surface: &mut S,
    ) {
        let exhaust = ExhaustVisibility::from_snapshot(snapshot);
        surface.set_visible(ids::EXHAUST_LEFT, exhaust.left);
        surface.set_visible(ids::EXHAUST_RIGHT, exhaust.right);
        surface.set_visible(ids::EXHAUST_CENTER, exhaust.center);
    }
}
