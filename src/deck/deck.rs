use std::collections::BTreeMap;

use crate::{
    animation::directive::{AnimationDirective, AnimationField},
    config::EditorConfig,
    foundation::core::{AssetId, Axis, SectionId, Vec2},
    foundation::error::{SlidesError, SlidesResult},
    layout::snap::snap_axis,
    model::asset::{Asset, AssetField, AssetStore},
    model::order::{DeckOrder, ensure_permutation, move_item},
    model::section::{Section, SectionStore},
};

/// The document: asset store, section store and deck order kept mutually consistent.
///
/// Every operation that touches more than one store runs as a unit of work: either all of
/// its steps apply or none of them are visible afterwards.
#[derive(Clone, Debug)]
pub struct Deck {
    assets: AssetStore,
    sections: SectionStore,
    order: DeckOrder,
    config: EditorConfig,
    epochs: SectionEpochs,
}

/// Per-section creation stamps; a reused id never carries a previous section's stamp.
#[derive(Clone, Debug, Default)]
struct SectionEpochs {
    next: u64,
    live: BTreeMap<SectionId, u64>,
}

impl SectionEpochs {
    fn stamp(&mut self, id: SectionId) -> u64 {
        self.next += 1;
        self.live.insert(id, self.next);
        self.next
    }

    fn forget(&mut self, id: SectionId) {
        self.live.remove(&id);
    }

    fn get(&self, id: SectionId) -> Option<u64> {
        self.live.get(&id).copied()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Deck {
    /// Fresh deck holding one placeholder section.
    pub fn new(config: EditorConfig) -> Self {
        let mut sections = SectionStore::new();
        let first = sections.create_with(config.default_section_content.clone());
        let mut epochs = SectionEpochs::default();
        epochs.stamp(first);
        Self {
            assets: AssetStore::new(),
            sections,
            order: DeckOrder::new(first),
            config,
            epochs,
        }
    }

    /// Assemble a deck from loaded stores, validating every cross-store invariant.
    pub fn from_parts(
        sections: SectionStore,
        assets: AssetStore,
        order: DeckOrder,
        config: EditorConfig,
    ) -> SlidesResult<Self> {
        let mut epochs = SectionEpochs::default();
        for id in sections.ids() {
            epochs.stamp(id);
        }
        let deck = Self {
            assets,
            sections,
            order,
            config,
            epochs,
        };
        deck.validate()?;
        Ok(deck)
    }

    /// Asset records.
    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    /// Section records.
    pub fn sections(&self) -> &SectionStore {
        &self.sections
    }

    /// Presentation order and selection.
    pub fn order(&self) -> &DeckOrder {
        &self.order
    }

    /// Editor settings.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Id of the active section.
    pub fn active_id(&self) -> SectionId {
        self.order.active()
    }

    /// The active section record.
    pub fn active_section(&self) -> SlidesResult<&Section> {
        self.sections.require(self.order.active())
    }

    /// Select `id` as the active section.
    pub fn set_active(&mut self, id: SectionId) -> SlidesResult<()> {
        self.order.set_active(id)
    }

    /// Sections in presentation order.
    pub fn ordered_sections(&self) -> impl Iterator<Item = (SectionId, &Section)> + '_ {
        self.order
            .ids()
            .iter()
            .filter_map(|id| self.sections.get(*id).map(|s| (*id, s)))
    }

    /// Resolve a section's asset references in paint order.
    pub fn resolve_assets(&self, id: SectionId) -> SlidesResult<Vec<(AssetId, &Asset)>> {
        self.sections
            .require(id)?
            .assets
            .iter()
            .map(|a| self.assets.require(*a).map(|asset| (*a, asset)))
            .collect()
    }

    /// Run `f` against the deck, restoring every store if it fails.
    pub fn unit_of_work<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> SlidesResult<T>,
    ) -> SlidesResult<T> {
        let checkpoint = (
            self.assets.clone(),
            self.sections.clone(),
            self.order.clone(),
            self.epochs.live.clone(),
        );
        match f(self) {
            Ok(v) => Ok(v),
            Err(e) => {
                tracing::debug!(error = %e, "unit of work rolled back");
                (self.assets, self.sections, self.order, self.epochs.live) = checkpoint;
                Err(e)
            }
        }
    }

    /// Create a section, append it to the order and select it.
    #[tracing::instrument(skip(self))]
    pub fn add_section(&mut self) -> SectionId {
        let id = self
            .sections
            .create_with(self.config.default_section_content.clone());
        self.order.push_and_select(id);
        self.epochs.stamp(id);
        tracing::info!(section = %id, "section added");
        id
    }

    /// Duplicate `id` (with fresh copies of its assets), insert it right after the source
    /// and select it.
    #[tracing::instrument(skip(self))]
    pub fn copy_section(&mut self, id: SectionId) -> SlidesResult<SectionId> {
        self.unit_of_work(|deck| {
            if !deck.order.contains(id) {
                return Err(SlidesError::section_not_found(id));
            }
            let new_id = deck.sections.duplicate(id, &mut deck.assets)?;
            deck.order.insert_after(id, new_id)?;
            deck.order.set_active(new_id)?;
            deck.epochs.stamp(new_id);
            tracing::info!(from = %id, to = %new_id, "section copied");
            Ok(new_id)
        })
    }

    /// Remove `id` from the deck and select the first remaining section.
    ///
    /// Assets referenced only by the removed section are removed with it. Removing the
    /// last section fails with [`SlidesError::InvariantViolation`] and changes nothing.
    #[tracing::instrument(skip(self))]
    pub fn remove_section(&mut self, id: SectionId) -> SlidesResult<()> {
        if self.order.len() == 1 && self.order.contains(id) {
            return Err(SlidesError::invariant("cannot remove the last section"));
        }
        self.unit_of_work(|deck| {
            deck.order.remove(id)?;
            let removed = deck
                .sections
                .remove(id)
                .ok_or_else(|| SlidesError::section_not_found(id))?;
            deck.epochs.forget(id);
            for asset in removed.assets {
                if deck.sections.referencing(asset).is_empty() {
                    deck.assets.remove(asset);
                }
            }
            tracing::info!(section = %id, "section removed");
            Ok(())
        })
    }

    /// Remove an asset and purge it from every section that references it.
    #[tracing::instrument(skip(self))]
    pub fn remove_asset(&mut self, asset: AssetId) -> SlidesResult<()> {
        let referencing = self.sections.referencing(asset);
        if !self.assets.contains(asset) && referencing.is_empty() {
            return Err(SlidesError::asset_not_found(asset));
        }
        self.unit_of_work(|deck| {
            deck.assets.remove(asset);
            for section in referencing {
                let kept = deck
                    .sections
                    .require(section)?
                    .assets
                    .iter()
                    .copied()
                    .filter(|a| *a != asset)
                    .collect();
                deck.sections.set_asset_order(section, kept)?;
            }
            tracing::info!(asset = %asset, "asset removed");
            Ok(())
        })
    }

    /// Replace the section order with a permutation of itself.
    pub fn reorder_sections(&mut self, new_order: Vec<SectionId>) -> SlidesResult<()> {
        self.order.reorder(new_order)
    }

    /// Move a section from index `from` to index `to` in the order.
    pub fn move_section(&mut self, from: usize, to: usize) -> SlidesResult<()> {
        self.order.move_item(from, to)
    }

    /// Replace a section's asset list with a permutation of itself.
    pub fn reorder_assets(
        &mut self,
        section: SectionId,
        new_order: Vec<AssetId>,
    ) -> SlidesResult<()> {
        ensure_permutation(&self.sections.require(section)?.assets, &new_order)?;
        self.sections.set_asset_order(section, new_order)
    }

    /// Move a section's asset from index `from` to index `to`.
    pub fn move_asset(&mut self, section: SectionId, from: usize, to: usize) -> SlidesResult<()> {
        let mut list = self.sections.require(section)?.assets.clone();
        move_item(&mut list, from, to)?;
        self.sections.set_asset_order(section, list)
    }

    /// Replace a section's markdown.
    pub fn update_content(&mut self, section: SectionId, text: impl Into<String>) -> SlidesResult<()> {
        self.sections.update_content(section, text)
    }

    /// Create an asset from an already encoded payload and attach it to `section`.
    #[tracing::instrument(skip(self, content))]
    pub fn add_asset(&mut self, section: SectionId, content: String) -> SlidesResult<AssetId> {
        self.sections.require(section)?;
        let id = self
            .assets
            .create_sized(content, self.config.default_asset_size);
        self.sections.attach_asset(section, id)?;
        tracing::info!(section = %section, asset = %id, "asset attached");
        Ok(id)
    }

    /// Set an asset's coordinate along `axis` from an interactive gesture, snapping it to
    /// the canvas center. Returns the stored value.
    pub fn place_asset(&mut self, asset: AssetId, axis: Axis, candidate: f64) -> SlidesResult<f64> {
        let size = self.assets.require(asset)?.size;
        let value = snap_axis(
            candidate,
            size,
            axis,
            self.config.canvas,
            self.config.snap_threshold,
        );
        let field = match axis {
            Axis::X => AssetField::X(value),
            Axis::Y => AssetField::Y(value),
        };
        self.assets.update_field(asset, field)?;
        Ok(value)
    }

    /// Move an asset by `delta`, snapping each axis. Returns the stored position.
    pub fn drag_asset(&mut self, asset: AssetId, delta: Vec2) -> SlidesResult<Vec2> {
        let current = self.assets.require(asset)?;
        let (x0, y0) = (current.x, current.y);
        self.unit_of_work(|deck| {
            let x = deck.place_asset(asset, Axis::X, x0 + delta.x)?;
            let y = deck.place_asset(asset, Axis::Y, y0 + delta.y)?;
            Ok(Vec2::new(x, y))
        })
    }

    /// Set an asset's size (not snapped).
    pub fn resize_asset(&mut self, asset: AssetId, size: f64) -> SlidesResult<()> {
        self.assets.update_field(asset, AssetField::Size(size))
    }

    /// Append the configured default directive to an asset.
    pub fn append_animation(&mut self, asset: AssetId) -> SlidesResult<usize> {
        self.assets
            .append_animation_with(asset, self.config.default_animation.clone())
    }

    /// Append `directive` to an asset.
    pub fn push_animation(
        &mut self,
        asset: AssetId,
        directive: AnimationDirective,
    ) -> SlidesResult<usize> {
        self.assets.append_animation_with(asset, directive)
    }

    /// Replace one field of an asset's directive.
    pub fn update_animation(
        &mut self,
        asset: AssetId,
        index: usize,
        field: AnimationField,
    ) -> SlidesResult<()> {
        self.assets.update_animation(asset, index, field)
    }

    /// Remove an asset's directive.
    pub fn remove_animation(
        &mut self,
        asset: AssetId,
        index: usize,
    ) -> SlidesResult<AnimationDirective> {
        self.assets.remove_animation(asset, index)
    }

    /// Creation stamp of a live section, distinct from every earlier section that used the
    /// same id.
    pub(crate) fn section_epoch(&self, id: SectionId) -> Option<u64> {
        self.epochs.get(id)
    }

    /// Check every cross-store invariant.
    pub fn validate(&self) -> SlidesResult<()> {
        self.order.validate()?;
        for id in self.order.ids() {
            if !self.sections.contains(*id) {
                return Err(SlidesError::invariant(format!(
                    "deck order references missing section {id}"
                )));
            }
        }
        for (id, section) in self.sections.iter() {
            for asset in &section.assets {
                if !self.assets.contains(*asset) {
                    return Err(SlidesError::invariant(format!(
                        "section {id} references missing asset {asset}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Remove assets that no section references; returns the removed ids.
    pub fn prune_orphans(&mut self) -> Vec<AssetId> {
        let orphans: Vec<AssetId> = self
            .assets
            .ids()
            .filter(|a| self.sections.referencing(*a).is_empty())
            .collect();
        for id in &orphans {
            self.assets.remove(*id);
        }
        if !orphans.is_empty() {
            tracing::info!(count = orphans.len(), "pruned orphaned assets");
        }
        orphans
    }
}

#[cfg(test)]
#[path = "../../tests/unit/deck/deck.rs"]
mod tests;
