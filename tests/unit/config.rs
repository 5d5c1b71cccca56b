use super::*;

#[test]
fn defaults_match_editor_constants() {
    let cfg = EditorConfig::default();
    assert_eq!(cfg.canvas, Canvas::default());
    assert_eq!(cfg.snap_threshold, 20.0);
    assert_eq!(cfg.default_section_content, "# title");
    assert_eq!(cfg.default_asset_size, 100.0);
    cfg.validate().unwrap();
}

#[test]
fn partial_json_falls_back_to_defaults() {
    let cfg: EditorConfig = serde_json::from_str(r#"{"snap_threshold": 8}"#).unwrap();
    assert_eq!(cfg.snap_threshold, 8.0);
    assert_eq!(cfg.canvas.width, 1920);
}

#[test]
fn invalid_values_are_rejected() {
    let cfg = EditorConfig {
        snap_threshold: -1.0,
        ..EditorConfig::default()
    };
    assert!(cfg.validate().is_err());
    let cfg = EditorConfig {
        canvas: Canvas {
            width: 0,
            height: 10,
        },
        ..EditorConfig::default()
    };
    assert!(cfg.validate().is_err());
}
