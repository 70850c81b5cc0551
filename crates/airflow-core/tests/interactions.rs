//! Tests for click interactions

#[cfg(test)]
mod tests {
    use airflow_core::interaction::InteractionPresets;
    use airflow_core::prelude::*;
    use airflow_core::render::ids;

    #[test]
    fn test_low_threshold_toggle() {
        let mut snapshot = TelemetrySnapshot::new();
        assert_eq!(snapshot.get(TelemetryField::SetPressureLow), 100.0);

        apply_click(ClickTarget::FuseFan1, &mut snapshot);
        assert_eq!(snapshot.get(TelemetryField::SetPressureLow), 150.0);

        apply_click(ClickTarget::FuseFan1, &mut snapshot);
        assert_eq!(snapshot.get(TelemetryField::SetPressureLow), 100.0);

        snapshot.set(TelemetryField::SetPressureLow, 180.0);
        apply_click(ClickTarget::FuseFan1, &mut snapshot);
        assert_eq!(snapshot.get(TelemetryField::SetPressureLow), 100.0);
    }

    #[test]
    fn test_fan_power_toggle_redraws_exhaust() {
        let renderer = PanelRenderer::default();
        let mut snapshot = TelemetrySnapshot::new();
        let mut scene = SceneSurface::new();
        renderer.render(&snapshot, &mut scene);
        assert_eq!(scene.element(ids::EXHAUST_LEFT).unwrap().visible, Some(false));

        let redraw = renderer.handle_click(ClickTarget::PowerFan1, &mut snapshot, &mut scene);
        assert!(redraw.statuses && redraw.exhaust);
        assert!(snapshot.is_on(TelemetryField::Fan1On));
        assert_eq!(scene.element(ids::EXHAUST_LEFT).unwrap().visible, Some(true));
        assert_eq!(scene.element(ids::EXHAUST_CENTER).unwrap().visible, Some(true));
        assert!(scene.element("power-fan1").unwrap().has_class("power-on"));

        renderer.handle_click(ClickTarget::PowerFan1, &mut snapshot, &mut scene);
        assert!(!snapshot.is_on(TelemetryField::Fan1On));
        assert_eq!(scene.element(ids::EXHAUST_CENTER).unwrap().visible, Some(false));
    }

    #[test]
    fn test_low_toggle_moves_alarm() {
        let renderer = PanelRenderer::default();
        let mut snapshot = TelemetrySnapshot::new();
        snapshot.set(TelemetryField::Pressure, 120.0);
        let mut scene = SceneSurface::new();
        renderer.render(&snapshot, &mut scene);
        assert_eq!(
            scene.element(ids::PRESSURE_LOW_INDICATOR).unwrap().opacity,
            Some(0.0)
        );

        let redraw = renderer.handle_click(ClickTarget::FuseFan1, &mut snapshot, &mut scene);
        assert!(redraw.bands && redraw.pressure);
        assert_eq!(
            scene.element(ids::PRESSURE_LOW_INDICATOR).unwrap().opacity,
            Some(1.0)
        );
        assert_eq!(
            scene.element(ids::PRESSURE_LOW_LABEL).unwrap().text.as_deref(),
            Some("LOW 150")
        );
    }

    #[test]
    fn test_click_only_redraws_its_pass() {
        let renderer = PanelRenderer::default();
        let mut snapshot = TelemetrySnapshot::new();
        let mut surface = RecordingSurface::new();

        renderer.handle_click(ClickTarget::FeedbackK2, &mut snapshot, &mut surface);
        assert_eq!(snapshot.get(TelemetryField::OperationalHours2), 100.0);

        let ids: Vec<_> = surface.commands().iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["fan1-hours", "fan2-hours"]);
        assert_eq!(
            surface.commands()[1],
            DrawCommand::SetText {
                id: "fan2-hours".to_string(),
                text: "000100".to_string(),
            }
        );
    }

    #[test]
    fn test_speed_and_pressure_steps() {
        let mut snapshot = TelemetrySnapshot::new();
        snapshot.set(TelemetryField::FanSpeedRpm, 1200.0);
        snapshot.set(TelemetryField::Pressure, 50.0);

        apply_click(ClickTarget::FuseFan2, &mut snapshot);
        apply_click(ClickTarget::FuseDryer, &mut snapshot);

        assert_eq!(snapshot.get(TelemetryField::FanSpeedRpm), 1300.0);
        // Pressure may go negative; the gauge then clears its arc
        assert_eq!(snapshot.get(TelemetryField::Pressure), -19.0);
    }

    #[test]
    fn test_watchdog_click_flips_emergency() {
        let mut snapshot = TelemetrySnapshot::new();
        apply_click(ClickTarget::FeedbackPipeWatchdog, &mut snapshot);
        assert_eq!(snapshot.get(TelemetryField::NoEmergency), 1.0);
        apply_click(ClickTarget::FeedbackPipeWatchdog, &mut snapshot);
        assert_eq!(snapshot.get(TelemetryField::NoEmergency), 0.0);
    }

    #[test]
    fn test_custom_presets() {
        let presets = InteractionPresets {
            speed_step: 250.0,
            ..InteractionPresets::default()
        };
        let mut snapshot = TelemetrySnapshot::new();
        presets.apply(ClickTarget::FuseFan2, &mut snapshot);
        assert_eq!(snapshot.get(TelemetryField::FanSpeedRpm), 250.0);
    }

    #[test]
    fn test_unknown_target() {
        let err = "status-Inflation".parse::<ClickTarget>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown click target: status-Inflation");
    }
}
