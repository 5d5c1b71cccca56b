use std::collections::BTreeMap;

use crate::{
    foundation::core::{AssetId, SectionId, next_id},
    foundation::error::{SlidesError, SlidesResult},
    model::asset::AssetStore,
};

/// Markdown given to freshly created sections.
pub const DEFAULT_SECTION_CONTENT: &str = "# title";

/// One slide: markdown source plus ordered asset references.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Section {
    /// Markdown source text.
    pub content: String,
    /// Referenced asset ids, painted in this order.
    #[serde(default)]
    pub assets: Vec<AssetId>,
}

impl Section {
    /// Section with `content` and no assets.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            assets: Vec::new(),
        }
    }
}

/// Owner of every section record.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionStore {
    sections: BTreeMap<SectionId, Section>,
}

impl SectionStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> SectionId {
        SectionId(next_id(self.sections.keys().map(|id| id.0)))
    }

    /// Insert an empty section with the default placeholder text.
    pub fn create(&mut self) -> SectionId {
        self.create_with(DEFAULT_SECTION_CONTENT)
    }

    /// Insert a section with `content` and no assets.
    pub fn create_with(&mut self, content: impl Into<String>) -> SectionId {
        let id = self.next_id();
        self.sections.insert(id, Section::new(content));
        tracing::debug!(section = %id, "section created");
        id
    }

    /// Deep-copy section `id`: markdown verbatim, every referenced asset duplicated.
    ///
    /// All referenced assets are checked before anything is copied, so a dangling
    /// reference leaves both stores untouched.
    pub fn duplicate(&mut self, id: SectionId, assets: &mut AssetStore) -> SlidesResult<SectionId> {
        let source = self.require(id)?.clone();
        if let Some(missing) = source.assets.iter().find(|a| !assets.contains(**a)) {
            return Err(SlidesError::asset_not_found(*missing));
        }

        let new_id = self.next_id();
        let copied = source
            .assets
            .iter()
            .map(|asset| assets.duplicate(*asset))
            .collect::<SlidesResult<Vec<_>>>()?;
        self.sections.insert(
            new_id,
            Section {
                content: source.content,
                assets: copied,
            },
        );
        tracing::debug!(from = %id, to = %new_id, "section duplicated");
        Ok(new_id)
    }

    /// Delete the record only; referenced assets are left alone.
    pub fn remove(&mut self, id: SectionId) -> Option<Section> {
        let removed = self.sections.remove(&id);
        if removed.is_some() {
            tracing::debug!(section = %id, "section removed");
        }
        removed
    }

    /// Replace the markdown text.
    pub fn update_content(&mut self, id: SectionId, content: impl Into<String>) -> SlidesResult<()> {
        let mut next = self.require(id)?.clone();
        next.content = content.into();
        self.sections.insert(id, next);
        Ok(())
    }

    /// Append `asset` to the end of the reference list.
    pub fn attach_asset(&mut self, id: SectionId, asset: AssetId) -> SlidesResult<()> {
        let mut next = self.require(id)?.clone();
        next.assets.push(asset);
        self.sections.insert(id, next);
        Ok(())
    }

    /// Replace the whole reference list.
    ///
    /// Membership is not validated here; callers keep it consistent with the asset store.
    pub fn set_asset_order(&mut self, id: SectionId, assets: Vec<AssetId>) -> SlidesResult<()> {
        let mut next = self.require(id)?.clone();
        next.assets = assets;
        self.sections.insert(id, next);
        Ok(())
    }

    /// Look up a section.
    pub fn get(&self, id: SectionId) -> Option<&Section> {
        self.sections.get(&id)
    }

    /// Look up a section, failing with [`SlidesError::NotFound`].
    pub fn require(&self, id: SectionId) -> SlidesResult<&Section> {
        self.sections
            .get(&id)
            .ok_or_else(|| SlidesError::section_not_found(id))
    }

    /// `true` when `id` is live.
    pub fn contains(&self, id: SectionId) -> bool {
        self.sections.contains_key(&id)
    }

    /// Live ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = SectionId> + '_ {
        self.sections.keys().copied()
    }

    /// Records in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (SectionId, &Section)> {
        self.sections.iter().map(|(id, s)| (*id, s))
    }

    /// Sections whose reference list contains `asset`.
    pub fn referencing(&self, asset: AssetId) -> Vec<SectionId> {
        self.sections
            .iter()
            .filter(|(_, s)| s.assets.contains(&asset))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Number of live sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// `true` when no sections are live.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub(crate) fn from_records(sections: BTreeMap<SectionId, Section>) -> Self {
        Self { sections }
    }

    pub(crate) fn records(&self) -> &BTreeMap<SectionId, Section> {
        &self.sections
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/section.rs"]
mod tests;
