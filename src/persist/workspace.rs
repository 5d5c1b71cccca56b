//! A deck bound to its storage, saved after every successful edit.

use serde_json::{Map, Value};

use crate::{
    config::EditorConfig,
    deck::deck::Deck,
    foundation::error::SlidesResult,
    persist::bundle::{export_bundle, import_bundle},
    persist::snapshot::{Snapshot, load_deck, save_deck},
    persist::storage::Storage,
};

/// Deck plus the storage it persists to.
#[derive(Debug)]
pub struct Workspace<S: Storage> {
    storage: S,
    deck: Deck,
    page_extra: Map<String, Value>,
}

impl<S: Storage> Workspace<S> {
    /// Load the deck stored in `storage` (the default deck when empty).
    #[tracing::instrument(skip_all)]
    pub fn open(storage: S, config: EditorConfig) -> SlidesResult<Self> {
        let Snapshot { deck, page_extra } = load_deck(&storage, config)?;
        Ok(Self {
            storage,
            deck,
            page_extra,
        })
    }

    /// Current deck.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Apply `f` as one unit of work and persist the result.
    ///
    /// A failing `f` leaves both the deck and the storage unchanged.
    pub fn mutate<T>(&mut self, f: impl FnOnce(&mut Deck) -> SlidesResult<T>) -> SlidesResult<T> {
        let out = self.deck.unit_of_work(f)?;
        self.save()?;
        Ok(out)
    }

    /// Write the current deck to storage.
    pub fn save(&mut self) -> SlidesResult<()> {
        save_deck(&mut self.storage, &self.deck, &self.page_extra)
    }

    /// Serialize the stored blobs as a portable bundle.
    pub fn export_bundle(&self) -> SlidesResult<String> {
        export_bundle(&self.storage)
    }

    /// Replace the stored blobs with `bundle` and reload the deck from them.
    ///
    /// A bundle that does not load leaves both the deck and the storage unchanged.
    pub fn import_bundle(&mut self, bundle: &str) -> SlidesResult<()> {
        let config = self.deck.config().clone();
        let Snapshot { deck, page_extra } = import_bundle(&mut self.storage, bundle, config)?;
        self.deck = deck;
        self.page_extra = page_extra;
        Ok(())
    }

    /// Release the storage and deck.
    pub fn into_parts(self) -> (S, Deck) {
        (self.storage, self.deck)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/persist/workspace.rs"]
mod tests;
