use serde_json::json;

use super::*;

#[test]
fn v0_assets_gain_an_empty_list() {
    let state = json!({"assets": {"1": {"content": "c", "size": 100, "x": 0, "y": 0}}});
    let out = migrate_assets(state, 0).unwrap();
    assert_eq!(out["assets"]["1"]["animation"], json!([]));
}

#[test]
fn v1_single_object_becomes_a_list() {
    let directive = json!({"type": "moveto", "ease": "circIn", "direction": "y", "duration": 2, "value": 5});
    let state = json!({"assets": {
        "1": {"content": "c", "size": 1, "x": 0, "y": 0, "animation": directive.clone()},
        "2": {"content": "c", "size": 1, "x": 0, "y": 0, "animation": null}
    }});
    let out = migrate_assets(state, 1).unwrap();
    assert_eq!(out["assets"]["1"]["animation"], json!([directive]));
    assert_eq!(out["assets"]["2"]["animation"], json!([]));
}

#[test]
fn current_version_is_untouched() {
    let state = json!({"assets": {"1": {"animation": "garbage"}}});
    assert_eq!(migrate_assets(state.clone(), ASSETS_VERSION).unwrap(), state);
}

#[test]
fn newer_versions_are_rejected() {
    let err = migrate_assets(json!({"assets": {}}), ASSETS_VERSION + 1).unwrap_err();
    assert!(matches!(err, SlidesError::Serde(_)));
    assert!(ensure_supported("sections-store", 1, SECTIONS_VERSION).is_err());
    assert!(ensure_supported("sections-store", 0, SECTIONS_VERSION).is_ok());
}

#[test]
fn malformed_animation_is_an_error() {
    let state = json!({"assets": {"1": {"animation": 3}}});
    assert!(migrate_assets(state, 1).is_err());
}
