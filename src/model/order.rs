use crate::{
    foundation::core::SectionId,
    foundation::error::{SlidesError, SlidesResult},
};

/// Presentation order of sections plus the active selection.
///
/// Holds ids only; lifetimes belong to [`crate::SectionStore`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeckOrder {
    order: Vec<SectionId>,
    active: SectionId,
}

impl DeckOrder {
    /// Single-section order with `first` active.
    pub fn new(first: SectionId) -> Self {
        Self {
            order: vec![first],
            active: first,
        }
    }

    /// Rebuild from persisted parts, checking that `active` is in `order`.
    pub fn from_parts(order: Vec<SectionId>, active: SectionId) -> SlidesResult<Self> {
        let out = Self { order, active };
        out.validate()?;
        Ok(out)
    }

    /// Section ids in presentation order.
    pub fn ids(&self) -> &[SectionId] {
        &self.order
    }

    /// Currently active section.
    pub fn active(&self) -> SectionId {
        self.active
    }

    /// Number of sections in the deck.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always `false` for a valid order; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Position of `id` in the order.
    pub fn position(&self, id: SectionId) -> Option<usize> {
        self.order.iter().position(|s| *s == id)
    }

    /// `true` when `id` is part of the deck.
    pub fn contains(&self, id: SectionId) -> bool {
        self.position(id).is_some()
    }

    /// Select `id`; it must already be in the order.
    pub fn set_active(&mut self, id: SectionId) -> SlidesResult<()> {
        if !self.contains(id) {
            return Err(SlidesError::section_not_found(id));
        }
        self.active = id;
        Ok(())
    }

    /// Append `id` at the end and select it.
    pub(crate) fn push_and_select(&mut self, id: SectionId) {
        self.order.push(id);
        self.active = id;
    }

    /// Insert `id` directly after `anchor`.
    pub(crate) fn insert_after(&mut self, anchor: SectionId, id: SectionId) -> SlidesResult<()> {
        let pos = self
            .position(anchor)
            .ok_or_else(|| SlidesError::section_not_found(anchor))?;
        self.order.insert(pos + 1, id);
        Ok(())
    }

    /// Drop `id` and re-select the first remaining section.
    pub(crate) fn remove(&mut self, id: SectionId) -> SlidesResult<()> {
        let pos = self
            .position(id)
            .ok_or_else(|| SlidesError::section_not_found(id))?;
        if self.order.len() == 1 {
            return Err(SlidesError::invariant("cannot remove the last section"));
        }
        self.order.remove(pos);
        self.active = self.order[0];
        Ok(())
    }

    /// Replace the order with a permutation of itself.
    pub fn reorder(&mut self, new_order: Vec<SectionId>) -> SlidesResult<()> {
        ensure_permutation(&self.order, &new_order)?;
        self.order = new_order;
        Ok(())
    }

    /// Move the entry at `from` to index `to` (drag-and-drop result).
    pub fn move_item(&mut self, from: usize, to: usize) -> SlidesResult<()> {
        move_item(&mut self.order, from, to)
    }

    /// Check that the order is non-empty, duplicate-free and contains `active`.
    pub fn validate(&self) -> SlidesResult<()> {
        if self.order.is_empty() {
            return Err(SlidesError::invariant("deck order must not be empty"));
        }
        let mut seen = self.order.clone();
        seen.sort_unstable();
        seen.dedup();
        if seen.len() != self.order.len() {
            return Err(SlidesError::invariant("deck order contains duplicate ids"));
        }
        if !self.contains(self.active) {
            return Err(SlidesError::invariant(format!(
                "active section {} is not in the deck order",
                self.active
            )));
        }
        Ok(())
    }
}

/// Fail unless `candidate` holds exactly the elements of `current`.
pub(crate) fn ensure_permutation<T>(current: &[T], candidate: &[T]) -> SlidesResult<()>
where
    T: Ord + Clone,
{
    let mut a = current.to_vec();
    let mut b = candidate.to_vec();
    a.sort_unstable();
    b.sort_unstable();
    if a != b {
        return Err(SlidesError::invariant(
            "reorder must be a permutation of the current list",
        ));
    }
    Ok(())
}

/// Remove the element at `from` and re-insert it at `to`.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> SlidesResult<()> {
    let len = items.len();
    if from >= len {
        return Err(SlidesError::index_out_of_range(from, len));
    }
    if to >= len {
        return Err(SlidesError::index_out_of_range(to, len));
    }
    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/model/order.rs"]
mod tests;
