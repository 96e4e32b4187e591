use approx::assert_relative_eq;
use serial_test::serial;
use vr_overlay::config::CONFIG_ENV_VAR;
use vr_overlay::prelude::*;

#[test]
#[serial]
fn test_bootstrap_reads_config_from_env() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("overlay.toml");
    OverlayConfig::new()
        .with_width_in_meters(0.02)
        .with_tracking_origin(TrackingOrigin::Seated)
        .save(&path)
        .unwrap();

    std::env::set_var(CONFIG_ENV_VAR, &path);
    let result = vr_overlay::bootstrap();
    std::env::remove_var(CONFIG_ENV_VAR);

    let config = result.unwrap();
    assert_eq!(config.line.width_in_meters, 0.02);
    assert_eq!(config.runtime.tracking_origin, TrackingOrigin::Seated);
}

#[test]
#[serial]
fn test_bootstrap_reports_invalid_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("bad.toml");
    std::fs::write(&path, "[line]\nwidth_in_meters = -1.0\n").unwrap();

    std::env::set_var(CONFIG_ENV_VAR, &path);
    let result = vr_overlay::bootstrap();
    std::env::remove_var(CONFIG_ENV_VAR);

    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains("width_in_meters"));
}

#[test]
fn test_prelude_line_placement() {
    let config = OverlayConfig::default();
    let mut runtime = RecordingRuntime::new();
    let mut line = LineOverlay::from_config(
        "facade",
        Vector3::ZERO,
        Vector3::new(0.0, 0.0, -2.0),
        &config.line,
    );
    line.sync(&mut runtime, &config).unwrap();

    assert_relative_eq!(line.pose().basis.scale().y, 1000.0, max_relative = 1e-5);
    assert_eq!(runtime.overlay_count(), 1);
}
