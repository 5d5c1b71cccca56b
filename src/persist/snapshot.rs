//! Versioned snapshot blobs: a deck split across the three stored keys.
//!
//! Each key holds `{"state": ..., "version": N}`. Absent keys fall back to the state a fresh
//! editor starts with, so an empty storage loads as the default deck.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::{
    config::EditorConfig,
    deck::deck::Deck,
    foundation::core::{AssetId, SectionId},
    foundation::error::{SlidesError, SlidesResult},
    model::asset::{Asset, AssetStore},
    model::order::DeckOrder,
    model::section::{Section, SectionStore},
    persist::migrate::{
        ASSETS_VERSION, PAGE_SETTING_VERSION, SECTIONS_VERSION, ensure_supported, migrate_assets,
    },
    persist::storage::Storage,
};

/// Key of the section records blob.
pub const SECTIONS_KEY: &str = "sections-store";
/// Key of the deck order and selection blob.
pub const PAGE_SETTING_KEY: &str = "page-setting-store";
/// Key of the asset records blob.
pub const ASSETS_KEY: &str = "assets-store";
/// Every key a deck is stored under.
pub const STORE_KEYS: [&str; 3] = [SECTIONS_KEY, PAGE_SETTING_KEY, ASSETS_KEY];

#[derive(Serialize, Deserialize)]
struct Versioned<T> {
    state: T,
    #[serde(default)]
    version: u32,
}

#[derive(Serialize, Deserialize)]
struct SectionsState {
    sections: BTreeMap<SectionId, Section>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageSettingState {
    sections_list: Vec<SectionId>,
    active_section: SectionId,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize)]
struct AssetsState {
    assets: BTreeMap<AssetId, Asset>,
}

/// A loaded deck plus page-setting fields the deck does not model (UI state such as the
/// active editor tab), carried through so saving does not drop them.
#[derive(Clone, Debug)]
pub struct Snapshot {
    /// The document.
    pub deck: Deck,
    /// Unmodelled page-setting fields.
    pub page_extra: Map<String, Value>,
}

fn read_blob<S: Storage + ?Sized>(storage: &S, key: &str) -> SlidesResult<Option<(Value, u32)>> {
    let Some(raw) = storage.get_item(key)? else {
        return Ok(None);
    };
    let value: Value =
        serde_json::from_str(&raw).map_err(|e| SlidesError::serde(format!("{key}: {e}")))?;
    if value.is_null() {
        return Ok(None);
    }
    let blob: Versioned<Value> =
        serde_json::from_value(value).map_err(|e| SlidesError::serde(format!("{key}: {e}")))?;
    Ok(Some((blob.state, blob.version)))
}

fn decode<T: DeserializeOwned>(key: &str, state: Value) -> SlidesResult<T> {
    serde_json::from_value(state).map_err(|e| SlidesError::serde(format!("{key}: {e}")))
}

fn write_blob<S: Storage + ?Sized, T: Serialize>(
    storage: &mut S,
    key: &str,
    state: T,
    version: u32,
) -> SlidesResult<()> {
    let raw = serde_json::to_string(&Versioned { state, version })?;
    storage.set_item(key, &raw)
}

/// Load a deck from `storage`, migrating old schemas.
///
/// Asset references that point at records missing from the asset blob are dropped, then
/// assets no section references are pruned; both are logged.
#[tracing::instrument(skip(storage, config))]
pub fn load_deck<S: Storage + ?Sized>(storage: &S, config: EditorConfig) -> SlidesResult<Snapshot> {
    let mut sections = match read_blob(storage, SECTIONS_KEY)? {
        Some((state, version)) => {
            ensure_supported(SECTIONS_KEY, version, SECTIONS_VERSION)?;
            decode::<SectionsState>(SECTIONS_KEY, state)?.sections
        }
        None => BTreeMap::from([(
            SectionId(1),
            Section::new(config.default_section_content.clone()),
        )]),
    };

    let page = match read_blob(storage, PAGE_SETTING_KEY)? {
        Some((state, version)) => {
            ensure_supported(PAGE_SETTING_KEY, version, PAGE_SETTING_VERSION)?;
            decode::<PageSettingState>(PAGE_SETTING_KEY, state)?
        }
        None => PageSettingState {
            sections_list: vec![SectionId(1)],
            active_section: SectionId(1),
            extra: Map::new(),
        },
    };

    let assets = match read_blob(storage, ASSETS_KEY)? {
        Some((state, version)) => {
            decode::<AssetsState>(ASSETS_KEY, migrate_assets(state, version)?)?.assets
        }
        None => BTreeMap::new(),
    };

    for (id, section) in sections.iter_mut() {
        let before = section.assets.len();
        section.assets.retain(|a| assets.contains_key(a));
        if section.assets.len() != before {
            tracing::warn!(
                section = %id,
                dropped = before - section.assets.len(),
                "dropped references to missing assets"
            );
        }
    }

    let order = DeckOrder::from_parts(page.sections_list, page.active_section)?;
    let mut deck = Deck::from_parts(
        SectionStore::from_records(sections),
        AssetStore::from_records(assets),
        order,
        config,
    )?;
    deck.prune_orphans();
    tracing::debug!(
        sections = deck.order().len(),
        assets = deck.assets().len(),
        "loaded deck"
    );

    Ok(Snapshot {
        deck,
        page_extra: page.extra,
    })
}

/// Write all three blobs for `deck` at the current schema versions.
#[tracing::instrument(skip_all)]
pub fn save_deck<S: Storage + ?Sized>(
    storage: &mut S,
    deck: &Deck,
    page_extra: &Map<String, Value>,
) -> SlidesResult<()> {
    write_blob(
        storage,
        SECTIONS_KEY,
        SectionsState {
            sections: deck.sections().records().clone(),
        },
        SECTIONS_VERSION,
    )?;
    write_blob(
        storage,
        PAGE_SETTING_KEY,
        PageSettingState {
            sections_list: deck.order().ids().to_vec(),
            active_section: deck.active_id(),
            extra: page_extra.clone(),
        },
        PAGE_SETTING_VERSION,
    )?;
    write_blob(
        storage,
        ASSETS_KEY,
        AssetsState {
            assets: deck.assets().records().clone(),
        },
        ASSETS_VERSION,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/persist/snapshot.rs"]
mod tests;
