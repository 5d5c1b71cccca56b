use super::*;

fn ids(raw: &[u64]) -> Vec<SectionId> {
    raw.iter().copied().map(SectionId).collect()
}

#[test]
fn insert_after_places_adjacent_to_anchor() {
    let mut o = DeckOrder::new(SectionId(1));
    o.push_and_select(SectionId(2));
    assert_eq!(o.active(), SectionId(2));
    o.insert_after(SectionId(1), SectionId(3)).unwrap();
    assert_eq!(o.ids(), ids(&[1, 3, 2]).as_slice());
}

#[test]
fn remove_reselects_first_and_refuses_last() {
    let mut o = DeckOrder::from_parts(ids(&[1, 2, 3]), SectionId(3)).unwrap();
    o.remove(SectionId(1)).unwrap();
    assert_eq!(o.active(), SectionId(2));
    o.remove(SectionId(3)).unwrap();
    let err = o.remove(SectionId(2)).unwrap_err();
    assert!(matches!(err, SlidesError::InvariantViolation(_)));
    assert_eq!(o.ids(), ids(&[2]).as_slice());
}

#[test]
fn reorder_requires_permutation() {
    let mut o = DeckOrder::from_parts(ids(&[1, 2, 3]), SectionId(1)).unwrap();
    o.reorder(ids(&[3, 1, 2])).unwrap();
    assert_eq!(o.ids(), ids(&[3, 1, 2]).as_slice());
    assert!(o.reorder(ids(&[3, 1])).is_err());
    assert!(o.reorder(ids(&[3, 1, 4])).is_err());
    assert_eq!(o.active(), SectionId(1));
}

#[test]
fn move_item_matches_drag_semantics() {
    let mut v = vec!['a', 'b', 'c', 'd'];
    move_item(&mut v, 0, 2).unwrap();
    assert_eq!(v, vec!['b', 'c', 'a', 'd']);
    move_item(&mut v, 3, 0).unwrap();
    assert_eq!(v, vec!['d', 'b', 'c', 'a']);
    assert!(matches!(
        move_item(&mut v, 4, 0),
        Err(SlidesError::IndexOutOfRange { index: 4, len: 4 })
    ));
}

#[test]
fn from_parts_rejects_inconsistent_state() {
    assert!(DeckOrder::from_parts(vec![], SectionId(1)).is_err());
    assert!(DeckOrder::from_parts(ids(&[1, 2]), SectionId(5)).is_err());
    assert!(DeckOrder::from_parts(ids(&[1, 1]), SectionId(1)).is_err());
}

#[test]
fn set_active_requires_membership() {
    let mut o = DeckOrder::from_parts(ids(&[1, 2]), SectionId(1)).unwrap();
    o.set_active(SectionId(2)).unwrap();
    assert_eq!(o.active(), SectionId(2));
    assert!(o.set_active(SectionId(9)).unwrap_err().is_not_found());
}
