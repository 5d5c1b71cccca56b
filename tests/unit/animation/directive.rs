use super::*;

#[test]
fn unknown_kind_round_trips_through_json() {
    let d: AnimationDirective = serde_json::from_str(
        r#"{"type":"spin","ease":"linear","direction":"y","duration":1.5,"value":3}"#,
    )
    .unwrap();
    assert_eq!(d.kind, AnimationKind::Unknown("spin".to_string()));
    assert_eq!(d.direction, Axis::Y);
    let back = serde_json::to_value(&d).unwrap();
    assert_eq!(back["type"], "spin");
}

#[test]
fn known_kinds_parse() {
    assert_eq!(AnimationKind::parse("vibrate"), AnimationKind::Vibrate);
    assert_eq!(AnimationKind::parse("moveto"), AnimationKind::MoveTo);
    assert_eq!(AnimationKind::MoveTo.as_str(), "moveto");
}

#[test]
fn missing_ease_and_direction_default() {
    let d: AnimationDirective =
        serde_json::from_str(r#"{"type":"moveto","duration":2,"value":-40}"#).unwrap();
    assert_eq!(d.ease, Ease::Linear);
    assert_eq!(d.direction, Axis::X);
}

#[test]
fn with_field_validates() {
    let d = AnimationDirective::default();
    let d2 = d.with_field(AnimationField::Value(25.0)).unwrap();
    assert_eq!(d2.value, 25.0);
    assert_eq!(d.value, 10.0);
    assert!(d.with_field(AnimationField::Duration(0.0)).is_err());
    assert!(d.with_field(AnimationField::Value(f64::NAN)).is_err());
}
