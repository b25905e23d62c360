use super::*;

#[test]
fn defaults_match_the_canvas_demo() {
    let cfg = SceneConfig::default();
    assert_eq!((cfg.width, cfg.height), (1280, 720));
    assert!(cfg.debug_bounds);
    assert_eq!(cfg.timers_font.to_string(), "20px mono");
    assert_eq!(cfg.library_radius, 10.0);
    cfg.validate().unwrap();
    let period = cfg.render_period().as_secs_f64();
    assert!((period - 1.0 / 60.0).abs() < 1e-9);
}

#[test]
fn partial_json_fills_in_defaults() {
    let cfg = SceneConfig::from_json_str(
        r##"{ "width": 640, "border": null, "label_font": "16px serif", "arrow_color": "#ff0000" }"##,
    )
    .unwrap();
    assert_eq!(cfg.width, 640);
    assert_eq!(cfg.height, 720);
    assert_eq!(cfg.border, None);
    assert_eq!(cfg.label_font.family, "serif");
    assert_eq!(cfg.arrow_color, Color::RED);
}

#[test]
fn invalid_values_are_config_errors() {
    for bad in [
        r#"{ "width": 0 }"#,
        r#"{ "render_hz": -1.0 }"#,
        r#"{ "max_arrow_width": 0.5 }"#,
        r#"{ "library_radius": -3 }"#,
        r#"{ "label_font": "tiny" }"#,
        r#"{ "no_such_field": 1 }"#,
    ] {
        let err = SceneConfig::from_json_str(bad).unwrap_err();
        assert!(matches!(err, SceneError::Config(_)), "{bad}: {err}");
    }
}

#[test]
fn label_style_follows_the_scope_switch() {
    let mut cfg = SceneConfig::default();
    assert_eq!(cfg.label_style().scope, Scope::Owned);
    cfg.labels_global = true;
    assert_eq!(cfg.label_style().scope, Scope::Global);
}

#[test]
fn switches_parse_common_spellings() {
    assert_eq!(parse_switch("ON"), Some(true));
    assert_eq!(parse_switch(" 0 "), Some(false));
    assert_eq!(parse_switch("maybe"), None);
}
