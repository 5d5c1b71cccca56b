use super::*;

fn order() -> DeckOrder {
    DeckOrder::from_parts(vec![SectionId(4), SectionId(2), SectionId(7)], SectionId(2)).unwrap()
}

#[test]
fn navigation_is_clamped() {
    let mut p = Presentation::new(&order());
    assert_eq!(p.current(), SectionId(4));
    assert!(!p.prev_slide());
    assert!(p.next_slide());
    assert!(p.next_slide());
    assert_eq!(p.current(), SectionId(7));
    assert!(!p.next_slide());
    assert_eq!(p.index(), 2);
}

#[test]
fn starts_at_active_when_asked() {
    let p = Presentation::from_active(&order());
    assert_eq!(p.current(), SectionId(2));
    assert_eq!(p.len(), 3);
}

#[test]
fn goto_checks_bounds() {
    let mut p = Presentation::new(&order());
    p.goto(1).unwrap();
    assert_eq!(p.current(), SectionId(2));
    assert!(matches!(
        p.goto(3),
        Err(SlidesError::IndexOutOfRange { index: 3, len: 3 })
    ));
}
