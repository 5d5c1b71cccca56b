//! Image ingestion: raw bytes to `data:` URI payloads, and the two-phase upload used when
//! the payload is produced asynchronously.

use base64::Engine as _;

use crate::{
    deck::deck::Deck,
    foundation::core::{AssetId, SectionId},
    foundation::error::{SlidesError, SlidesResult},
};

/// MIME type of an image byte stream, sniffed from its magic bytes.
pub fn sniff_mime(bytes: &[u8]) -> SlidesResult<&'static str> {
    if bytes.is_empty() {
        return Err(SlidesError::ingest("empty image payload"));
    }
    if looks_like_svg(bytes) {
        return Ok("image/svg+xml");
    }
    let format = image::guess_format(bytes)
        .map_err(|e| SlidesError::ingest(format!("unrecognised image data: {e}")))?;
    Ok(format.to_mime_type())
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(256)];
    let Ok(text) = std::str::from_utf8(head) else {
        return false;
    };
    let text = text.trim_start_matches('\u{feff}').trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}

/// Encode an image as a base64 `data:` URI suitable for [`crate::Asset::content`].
pub fn to_data_uri(bytes: &[u8]) -> SlidesResult<String> {
    let mime = sniff_mime(bytes)?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{mime};base64,{encoded}"))
}

/// An upload whose payload is still being produced.
///
/// Obtained from [`Deck::begin_upload`] and consumed by [`Deck::finish_upload`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use = "an upload does nothing until it is finished"]
pub struct PendingUpload {
    section: SectionId,
    epoch: u64,
}

impl PendingUpload {
    /// Section the asset will be attached to.
    pub fn section(self) -> SectionId {
        self.section
    }
}

impl Deck {
    /// Start an upload into `section`.
    pub fn begin_upload(&self, section: SectionId) -> SlidesResult<PendingUpload> {
        self.sections().require(section)?;
        let epoch = self
            .section_epoch(section)
            .ok_or_else(|| SlidesError::section_not_found(section))?;
        Ok(PendingUpload { section, epoch })
    }

    /// Complete an upload with its encoded payload.
    ///
    /// If the target section was removed in the meantime the payload is dropped and
    /// `Ok(None)` is returned; nothing is resurrected, even when a newer section has
    /// since been given the same id.
    pub fn finish_upload(
        &mut self,
        pending: PendingUpload,
        content: String,
    ) -> SlidesResult<Option<AssetId>> {
        if self.section_epoch(pending.section) != Some(pending.epoch) {
            tracing::warn!(
                section = %pending.section,
                "dropping upload for removed section"
            );
            return Ok(None);
        }
        self.add_asset(pending.section, content).map(Some)
    }

    /// Encode `bytes` and attach the resulting asset to `section` in one step.
    pub fn add_image(&mut self, section: SectionId, bytes: &[u8]) -> SlidesResult<AssetId> {
        let pending = self.begin_upload(section)?;
        let content = to_data_uri(bytes)?;
        self.finish_upload(pending, content)?
            .ok_or_else(|| SlidesError::section_not_found(section))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/deck/ingest.rs"]
mod tests;
