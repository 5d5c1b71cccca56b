//! Schema upgrades for stored blobs, applied to the raw JSON state before decoding.
//!
//! Asset schema history:
//! - `0`: no `animation` field.
//! - `1`: `animation` is a single directive object or `null`.
//! - `2`: `animation` is a list of directives.

use serde_json::Value;

use crate::foundation::error::{SlidesError, SlidesResult};

/// Current `sections-store` schema version.
pub const SECTIONS_VERSION: u32 = 0;
/// Current `page-setting-store` schema version.
pub const PAGE_SETTING_VERSION: u32 = 0;
/// Current `assets-store` schema version.
pub const ASSETS_VERSION: u32 = 2;

/// Reject blobs written by a newer schema than this build understands.
pub fn ensure_supported(key: &str, version: u32, current: u32) -> SlidesResult<()> {
    if version > current {
        return Err(SlidesError::serde(format!(
            "{key}: unsupported schema version {version} (newest known is {current})"
        )));
    }
    Ok(())
}

/// Upgrade an `assets-store` state from `from` to [`ASSETS_VERSION`].
#[tracing::instrument(skip(state))]
pub fn migrate_assets(mut state: Value, from: u32) -> SlidesResult<Value> {
    ensure_supported("assets-store", from, ASSETS_VERSION)?;
    if from == ASSETS_VERSION {
        return Ok(state);
    }

    if state.get("assets").is_none() {
        return Ok(state);
    }
    let assets = state
        .get_mut("assets")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| SlidesError::serde("assets-store: `assets` is not an object"))?;

    for (id, asset) in assets.iter_mut() {
        let Some(record) = asset.as_object_mut() else {
            return Err(SlidesError::serde(format!(
                "assets-store: asset {id} is not an object"
            )));
        };
        let upgraded = match record.remove("animation") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(list)) => list,
            Some(single @ Value::Object(_)) => vec![single],
            Some(other) => {
                return Err(SlidesError::serde(format!(
                    "assets-store: asset {id} has malformed animation {other}"
                )));
            }
        };
        record.insert("animation".to_string(), Value::Array(upgraded));
    }

    tracing::info!(from, to = ASSETS_VERSION, count = assets.len(), "migrated assets");
    Ok(state)
}

#[cfg(test)]
#[path = "../../tests/unit/persist/migrate.rs"]
mod tests;
