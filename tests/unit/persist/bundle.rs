use super::*;
use crate::deck::deck::Deck;
use crate::persist::snapshot::{ASSETS_KEY, PAGE_SETTING_KEY, SECTIONS_KEY, save_deck};
use crate::persist::storage::MemoryStorage;

#[test]
fn export_holds_raw_blob_strings() {
    let mut storage = MemoryStorage::new();
    storage.set_item(SECTIONS_KEY, r#"{"state":{},"version":0}"#).unwrap();
    let bundle: Value = serde_json::from_str(&export_bundle(&storage).unwrap()).unwrap();
    assert_eq!(bundle[SECTIONS_KEY], Value::String(r#"{"state":{},"version":0}"#.into()));
    assert_eq!(bundle[PAGE_SETTING_KEY], Value::Null);
    assert_eq!(bundle[ASSETS_KEY], Value::Null);
}

#[test]
fn import_restores_exported_storage() {
    let mut deck = Deck::default();
    let s = deck.copy_section(deck.active_id()).unwrap();
    deck.add_asset(s, "data:,x".into()).unwrap();
    let mut source = MemoryStorage::new();
    save_deck(&mut source, &deck, &Map::new()).unwrap();
    let bundle = export_bundle(&source).unwrap();

    let mut target = MemoryStorage::new();
    target.set_item(PAGE_SETTING_KEY, "{}").unwrap();
    target.set_item("unrelated", "kept").unwrap();
    let snap = import_bundle(&mut target, &bundle, EditorConfig::default()).unwrap();
    assert_eq!(target.get_item("unrelated").unwrap().as_deref(), Some("kept"));
    target.remove_item("unrelated").unwrap();
    assert_eq!(target, source);
    assert_eq!(snap.deck.sections(), deck.sections());
    assert_eq!(snap.deck.assets(), deck.assets());
}

#[test]
fn bad_bundle_leaves_storage_untouched() {
    let mut storage = MemoryStorage::new();
    storage.set_item(SECTIONS_KEY, "{}").unwrap();
    let before = storage.clone();

    let bundle = format!(
        r#"{{"{SECTIONS_KEY}": "[]", "{ASSETS_KEY}": "{{broken"}}"#
    );
    let config = EditorConfig::default;
    assert!(import_bundle(&mut storage, &bundle, config()).is_err());
    assert!(import_bundle(&mut storage, "[1,2]", config()).is_err());
    assert!(import_bundle(&mut storage, &format!(r#"{{"{SECTIONS_KEY}": 5}}"#), config()).is_err());
    assert_eq!(storage, before);
}

#[test]
fn bundle_that_does_not_load_is_not_written() {
    let mut storage = MemoryStorage::new();
    save_deck(&mut storage, &Deck::default(), &Map::new()).unwrap();
    let before = storage.clone();

    // well-formed JSON blobs, but the order names a section that does not exist
    let sections = r##"{"state":{"sections":{"1":{"content":"# a","assets":[]}}},"version":0}"##;
    let page = r#"{"state":{"sectionsList":[1,9],"activeSection":9},"version":0}"#;
    let bundle = serde_json::json!({ SECTIONS_KEY: sections, PAGE_SETTING_KEY: page }).to_string();
    assert!(import_bundle(&mut storage, &bundle, EditorConfig::default()).is_err());

    // a blob from a newer schema is rejected the same way
    let future = r#"{"state":{"assets":{}},"version":99}"#;
    let bundle = serde_json::json!({ ASSETS_KEY: future }).to_string();
    assert!(import_bundle(&mut storage, &bundle, EditorConfig::default()).is_err());

    assert_eq!(storage, before);
    crate::persist::snapshot::load_deck(&storage, EditorConfig::default()).unwrap();
}
