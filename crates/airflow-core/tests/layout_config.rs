//! Tests for panel layout persistence

#[cfg(test)]
mod tests {
    use airflow_core::config::{ConfigError, PanelLayout};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("panel.json");

        let mut layout = PanelLayout::default();
        layout.name = "Test hall".to_string();
        layout.band_radius = 27.5;
        layout.pressure_gauge.max_value = 600.0;
        layout.presets.raised_low_threshold = 175.0;
        layout.save(&path).unwrap();

        let loaded = PanelLayout::from_file(&path).unwrap();
        assert_eq!(loaded, layout);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = PanelLayout::from_file(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = PanelLayout::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_invalid_radius_rejected_on_load() {
        let err = PanelLayout::from_json_str(r#"{ "band_radius": -1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
