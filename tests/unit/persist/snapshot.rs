use serde_json::json;

use super::*;
use crate::persist::storage::MemoryStorage;

#[test]
fn empty_storage_loads_the_default_deck() {
    let snap = load_deck(&MemoryStorage::new(), EditorConfig::default()).unwrap();
    assert_eq!(snap.deck.order().ids(), &[SectionId(1)]);
    assert_eq!(snap.deck.active_id(), SectionId(1));
    assert_eq!(snap.deck.active_section().unwrap().content, "# title");
    assert!(snap.deck.assets().is_empty());
}

#[test]
fn save_writes_versioned_blobs() {
    let mut storage = MemoryStorage::new();
    let mut deck = Deck::default();
    let s = deck.active_id();
    deck.add_asset(s, "data:,x".into()).unwrap();
    save_deck(&mut storage, &deck, &Map::new()).unwrap();

    let sections: Value =
        serde_json::from_str(&storage.get_item(SECTIONS_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(sections["version"], json!(0));
    assert_eq!(sections["state"]["sections"]["1"]["assets"], json!([1]));

    let page: Value =
        serde_json::from_str(&storage.get_item(PAGE_SETTING_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(page["state"], json!({"sectionsList": [1], "activeSection": 1}));

    let assets: Value =
        serde_json::from_str(&storage.get_item(ASSETS_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(assets["version"], json!(2));
    assert_eq!(assets["state"]["assets"]["1"]["animation"], json!([]));
}

#[test]
fn save_then_load_preserves_the_deck() {
    let mut storage = MemoryStorage::new();
    let mut deck = Deck::default();
    let first = deck.active_id();
    let a = deck.add_asset(first, "data:,x".into()).unwrap();
    deck.append_animation(a).unwrap();
    let second = deck.copy_section(first).unwrap();
    deck.update_content(second, "copy").unwrap();

    let mut extra = Map::new();
    extra.insert("activeTab".into(), json!("assets"));
    save_deck(&mut storage, &deck, &extra).unwrap();

    let snap = load_deck(&storage, EditorConfig::default()).unwrap();
    assert_eq!(snap.deck.order().ids(), deck.order().ids());
    assert_eq!(snap.deck.active_id(), second);
    assert_eq!(snap.deck.sections(), deck.sections());
    assert_eq!(snap.deck.assets(), deck.assets());
    assert_eq!(snap.page_extra.get("activeTab"), Some(&json!("assets")));
}

#[test]
fn legacy_blobs_are_migrated_and_repaired() {
    let mut storage = MemoryStorage::new();
    storage
        .set_item(
            SECTIONS_KEY,
            r##"{"state":{"sections":{"1":{"content":"# a","assets":[1,9]},"2":{"content":"# b"}}},"version":0}"##,
        )
        .unwrap();
    storage
        .set_item(
            PAGE_SETTING_KEY,
            r#"{"state":{"sectionsList":[2,1],"activeSection":1,"activeTab":"markdown"},"version":0}"#,
        )
        .unwrap();
    storage
        .set_item(
            ASSETS_KEY,
            r#"{"state":{"assets":{"1":{"content":"c","size":50,"x":1,"y":2,"animation":{"type":"vibrate","ease":"linear","direction":"x","duration":1,"value":3}},"4":{"content":"orphan","size":1,"x":0,"y":0}}},"version":1}"#,
        )
        .unwrap();

    let snap = load_deck(&storage, EditorConfig::default()).unwrap();
    let deck = &snap.deck;
    assert_eq!(deck.order().ids(), &[SectionId(2), SectionId(1)]);
    assert_eq!(deck.sections().require(SectionId(1)).unwrap().assets, vec![AssetId(1)]);
    assert_eq!(deck.assets().require(AssetId(1)).unwrap().animation.len(), 1);
    assert!(!deck.assets().contains(AssetId(4)));
    deck.validate().unwrap();
}

#[test]
fn null_blob_counts_as_absent() {
    let mut storage = MemoryStorage::new();
    storage.set_item(ASSETS_KEY, "null").unwrap();
    let snap = load_deck(&storage, EditorConfig::default()).unwrap();
    assert!(snap.deck.assets().is_empty());
}

#[test]
fn newer_schema_and_bad_json_are_errors() {
    let mut storage = MemoryStorage::new();
    storage
        .set_item(SECTIONS_KEY, r#"{"state":{"sections":{}},"version":7}"#)
        .unwrap();
    assert!(matches!(
        load_deck(&storage, EditorConfig::default()).unwrap_err(),
        SlidesError::Serde(_)
    ));

    storage.set_item(SECTIONS_KEY, "{not json").unwrap();
    assert!(matches!(
        load_deck(&storage, EditorConfig::default()).unwrap_err(),
        SlidesError::Serde(_)
    ));
}

#[test]
fn order_pointing_at_missing_section_is_rejected() {
    let mut storage = MemoryStorage::new();
    storage
        .set_item(
            PAGE_SETTING_KEY,
            r#"{"state":{"sectionsList":[1,5],"activeSection":1},"version":0}"#,
        )
        .unwrap();
    let err = load_deck(&storage, EditorConfig::default()).unwrap_err();
    assert!(matches!(err, SlidesError::InvariantViolation(_)));
}
