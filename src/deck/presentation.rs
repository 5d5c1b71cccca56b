use crate::{
    foundation::core::SectionId,
    foundation::error::{SlidesError, SlidesResult},
    model::order::DeckOrder,
};

/// Cursor over the deck while presenting; navigation is clamped at both ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Presentation {
    slides: Vec<SectionId>,
    index: usize,
}

impl Presentation {
    /// Start at the first slide of `order`.
    pub fn new(order: &DeckOrder) -> Self {
        Self {
            slides: order.ids().to_vec(),
            index: 0,
        }
    }

    /// Start at the active section of `order`.
    pub fn from_active(order: &DeckOrder) -> Self {
        Self {
            slides: order.ids().to_vec(),
            index: order.position(order.active()).unwrap_or(0),
        }
    }

    /// Section currently on screen.
    pub fn current(&self) -> SectionId {
        self.slides[self.index]
    }

    /// Zero-based slide index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always `false`; a deck has at least one slide.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Advance one slide; returns `false` at the end.
    pub fn next_slide(&mut self) -> bool {
        if self.index + 1 < self.slides.len() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Go back one slide; returns `false` at the start.
    pub fn prev_slide(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to slide `index`.
    pub fn goto(&mut self, index: usize) -> SlidesResult<()> {
        if index >= self.slides.len() {
            return Err(SlidesError::index_out_of_range(index, self.slides.len()));
        }
        self.index = index;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/deck/presentation.rs"]
mod tests;
