use std::collections::BTreeMap;

use crate::{
    animation::directive::{AnimationDirective, AnimationField},
    foundation::core::{AssetId, next_id},
    foundation::error::{SlidesError, SlidesResult},
};

/// Side length given to freshly uploaded assets.
pub const DEFAULT_ASSET_SIZE: f64 = 100.0;

/// One positionable image placed on a section's canvas.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Asset {
    /// Opaque image payload, usually a `data:` URI.
    pub content: String,
    /// Side of the square bounding box in virtual units (`>= 0`).
    pub size: f64,
    /// Left edge in virtual units; not clamped to the canvas.
    pub x: f64,
    /// Top edge in virtual units; not clamped to the canvas.
    pub y: f64,
    /// Animation directives in composition order.
    #[serde(default)]
    pub animation: Vec<AnimationDirective>,
}

impl Asset {
    /// New asset at the origin with no animation.
    pub fn new(content: impl Into<String>, size: f64) -> Self {
        Self {
            content: content.into(),
            size,
            x: 0.0,
            y: 0.0,
            animation: Vec::new(),
        }
    }
}

/// Single placement field for [`AssetStore::update_field`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AssetField {
    /// Bounding box side; must be finite and `>= 0`.
    Size(f64),
    /// Left edge.
    X(f64),
    /// Top edge.
    Y(f64),
}

/// Owner of every asset record.
///
/// Removal does not cascade into sections; the deck controller purges references.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AssetStore {
    assets: BTreeMap<AssetId, Asset>,
}

impl AssetStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> AssetId {
        AssetId(next_id(self.assets.keys().map(|id| id.0)))
    }

    /// Insert a new asset with default placement and return its id.
    pub fn create(&mut self, content: impl Into<String>) -> AssetId {
        self.create_sized(content, DEFAULT_ASSET_SIZE)
    }

    /// Insert a new asset of side `size` at the origin.
    pub fn create_sized(&mut self, content: impl Into<String>, size: f64) -> AssetId {
        let id = self.next_id();
        self.assets.insert(id, Asset::new(content, size));
        tracing::debug!(asset = %id, "asset created");
        id
    }

    /// Deep-copy `id` under a fresh id.
    pub fn duplicate(&mut self, id: AssetId) -> SlidesResult<AssetId> {
        let copy = self.require(id)?.clone();
        let new_id = self.next_id();
        self.assets.insert(new_id, copy);
        tracing::debug!(from = %id, to = %new_id, "asset duplicated");
        Ok(new_id)
    }

    /// Delete `id`; absent ids are a no-op.
    pub fn remove(&mut self, id: AssetId) -> Option<Asset> {
        let removed = self.assets.remove(&id);
        if removed.is_some() {
            tracing::debug!(asset = %id, "asset removed");
        }
        removed
    }

    /// Replace one placement field.
    ///
    /// Snapping is the caller's job; the value is stored as given.
    pub fn update_field(&mut self, id: AssetId, field: AssetField) -> SlidesResult<()> {
        let mut next = self.require(id)?.clone();
        match field {
            AssetField::Size(size) => {
                if !size.is_finite() || size < 0.0 {
                    return Err(SlidesError::validation("asset size must be finite and >= 0"));
                }
                next.size = size;
            }
            AssetField::X(x) => next.x = finite(x, "asset x")?,
            AssetField::Y(y) => next.y = finite(y, "asset y")?,
        }
        self.assets.insert(id, next);
        Ok(())
    }

    /// Append the default directive and return its index.
    pub fn append_animation(&mut self, id: AssetId) -> SlidesResult<usize> {
        self.append_animation_with(id, AnimationDirective::default())
    }

    /// Append `directive` and return its index.
    pub fn append_animation_with(
        &mut self,
        id: AssetId,
        directive: AnimationDirective,
    ) -> SlidesResult<usize> {
        directive.validate()?;
        let mut next = self.require(id)?.clone();
        next.animation.push(directive);
        let index = next.animation.len() - 1;
        self.assets.insert(id, next);
        Ok(index)
    }

    /// Replace one field of the directive at `index`.
    pub fn update_animation(
        &mut self,
        id: AssetId,
        index: usize,
        field: AnimationField,
    ) -> SlidesResult<()> {
        let mut next = self.require(id)?.clone();
        let len = next.animation.len();
        let slot = next
            .animation
            .get_mut(index)
            .ok_or_else(|| SlidesError::index_out_of_range(index, len))?;
        *slot = slot.with_field(field)?;
        self.assets.insert(id, next);
        Ok(())
    }

    /// Remove and return the directive at `index`.
    pub fn remove_animation(
        &mut self,
        id: AssetId,
        index: usize,
    ) -> SlidesResult<AnimationDirective> {
        let mut next = self.require(id)?.clone();
        if index >= next.animation.len() {
            return Err(SlidesError::index_out_of_range(index, next.animation.len()));
        }
        let removed = next.animation.remove(index);
        self.assets.insert(id, next);
        Ok(removed)
    }

    /// Look up an asset.
    pub fn get(&self, id: AssetId) -> Option<&Asset> {
        self.assets.get(&id)
    }

    /// Look up an asset, failing with [`SlidesError::NotFound`].
    pub fn require(&self, id: AssetId) -> SlidesResult<&Asset> {
        self.assets
            .get(&id)
            .ok_or_else(|| SlidesError::asset_not_found(id))
    }

    /// `true` when `id` is live.
    pub fn contains(&self, id: AssetId) -> bool {
        self.assets.contains_key(&id)
    }

    /// Live ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = AssetId> + '_ {
        self.assets.keys().copied()
    }

    /// Records in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (AssetId, &Asset)> {
        self.assets.iter().map(|(id, a)| (*id, a))
    }

    /// Number of live assets.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// `true` when no assets are live.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub(crate) fn from_records(assets: BTreeMap<AssetId, Asset>) -> Self {
        Self { assets }
    }

    pub(crate) fn records(&self) -> &BTreeMap<AssetId, Asset> {
        &self.assets
    }
}

fn finite(v: f64, what: &str) -> SlidesResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(SlidesError::validation(format!("{what} must be finite")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/asset.rs"]
mod tests;
