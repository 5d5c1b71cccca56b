//! Portable save files: the three raw blobs in one JSON object.

use serde_json::{Map, Value};

use crate::{
    config::EditorConfig,
    foundation::error::{SlidesError, SlidesResult},
    persist::snapshot::{STORE_KEYS, Snapshot, load_deck},
    persist::storage::{MemoryStorage, Storage},
};

/// Default file name for an exported bundle.
pub const BUNDLE_FILE_NAME: &str = "md-ppt-save.json";

/// Serialize the raw blobs under every store key; absent keys become `null`.
#[tracing::instrument(skip(storage))]
pub fn export_bundle<S: Storage + ?Sized>(storage: &S) -> SlidesResult<String> {
    let mut out = Map::new();
    for key in STORE_KEYS {
        let value = storage.get_item(key)?.map_or(Value::Null, Value::String);
        out.insert(key.to_string(), value);
    }
    Ok(serde_json::to_string(&Value::Object(out))?)
}

/// Write a bundle's blobs back into `storage` and return the deck they load to.
///
/// The blobs are staged and loaded as a deck before anything is written, so a bundle that
/// would not load leaves the storage untouched. `null` or missing entries clear their key.
#[tracing::instrument(skip_all, fields(bytes = bundle.len()))]
pub fn import_bundle<S: Storage + ?Sized>(
    storage: &mut S,
    bundle: &str,
    config: EditorConfig,
) -> SlidesResult<Snapshot> {
    let parsed: Value = serde_json::from_str(bundle)?;
    let Value::Object(entries) = parsed else {
        return Err(SlidesError::serde("bundle must be a JSON object"));
    };

    let mut staged = MemoryStorage::new();
    for key in STORE_KEYS {
        match entries.get(key) {
            None | Some(Value::Null) => {}
            Some(Value::String(raw)) => staged.set_item(key, raw)?,
            Some(other) => {
                return Err(SlidesError::serde(format!(
                    "bundle entry {key} must be a string, got {other}"
                )));
            }
        }
    }

    let snapshot = load_deck(&staged, config)?;

    for key in STORE_KEYS {
        match staged.get_item(key)? {
            Some(raw) => storage.set_item(key, &raw)?,
            None => storage.remove_item(key)?,
        }
    }
    tracing::info!(sections = snapshot.deck.order().len(), "imported bundle");
    Ok(snapshot)
}

#[cfg(test)]
#[path = "../../tests/unit/persist/bundle.rs"]
mod tests;
