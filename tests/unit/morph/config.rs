use super::*;

#[test]
fn defaults_match_documented_windows() {
    let cfg = MorphConfig::default();
    assert_eq!(cfg.core, Window::new(0.2, 0.8));
    assert_eq!(cfg.fade_out, Window::new(0.0, 0.35));
    assert_eq!(cfg.fade_in, Window::new(0.65, 1.0));
    assert_eq!(cfg.ease, Ease::InOutSine);
    cfg.validate().unwrap();
}

#[test]
fn window_local_progress() {
    let w = Window::new(0.2, 0.8);
    assert_eq!(w.local(0.0), 0.0);
    assert_eq!(w.local(1.0), 1.0);
    assert!((w.local(0.5) - 0.5).abs() < 1e-12);
}

#[test]
fn json_fills_missing_fields_with_defaults() {
    let cfg = MorphConfig::from_json_str(r#"{"core": {"start": 0.0, "end": 1.0}, "ease": "Linear"}"#)
        .unwrap();
    assert_eq!(cfg.core, Window::new(0.0, 1.0));
    assert_eq!(cfg.ease, Ease::Linear);
    assert_eq!(cfg.fade_in, MorphConfig::default().fade_in);
}

#[test]
fn json_rejects_bad_windows_and_fields() {
    assert!(matches!(
        MorphConfig::from_json_str(r#"{"core": {"start": 0.8, "end": 0.2}}"#),
        Err(SvgMorphError::Validation(_))
    ));
    assert!(matches!(
        MorphConfig::from_json_str(r#"{"fade_in": {"start": 0.5, "end": 1.5}}"#),
        Err(SvgMorphError::Validation(_))
    ));
    assert!(matches!(
        MorphConfig::from_json_str(r#"{"speed": 2}"#),
        Err(SvgMorphError::Serde(_))
    ));
}

#[test]
fn from_path_reports_missing_files() {
    let err = MorphConfig::from_path(Path::new("definitely/not/here.json")).unwrap_err();
    assert!(err.to_string().contains("read morph config"));
}
