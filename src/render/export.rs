//! Page export: every section rendered at full resolution and handed to a sink.

use std::path::{Path, PathBuf};

use crate::{
    deck::deck::Deck,
    foundation::error::SlidesResult,
    foundation::fsio::write_atomic,
    render::pages::{RenderedPage, render_deck, render_presentation_document},
    render::viewer::{RenderOpts, Viewer},
};

/// Destination for exported pages.
pub trait PageSink {
    /// Receive one page; pages arrive in presentation order.
    fn write_page(&mut self, page: &RenderedPage) -> SlidesResult<()>;

    /// Called once after the last page.
    fn finish(&mut self) -> SlidesResult<()> {
        Ok(())
    }
}

/// File name of the exported page at zero-based `index`.
pub fn page_file_name(index: usize, extension: &str) -> String {
    format!("slide-{}.{extension}", index + 1)
}

/// Writes each page as a standalone `slide-<n>.html` document in a directory.
#[derive(Debug)]
pub struct HtmlDirSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl HtmlDirSink {
    /// Sink writing into `dir` (created on first write).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far, in page order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl PageSink for HtmlDirSink {
    fn write_page(&mut self, page: &RenderedPage) -> SlidesResult<()> {
        let path = self.dir.join(page_file_name(page.index, "html"));
        let title = format!("slide {}", page.index + 1);
        let doc = render_presentation_document(&title, std::slice::from_ref(page));
        write_atomic(&path, doc.as_bytes())?;
        self.written.push(path);
        Ok(())
    }

    fn finish(&mut self) -> SlidesResult<()> {
        tracing::info!(
            dir = %self.dir.display(),
            pages = self.written.len(),
            "exported pages"
        );
        Ok(())
    }
}

/// Collects page markup in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Page markup in presentation order.
    pub pages: Vec<String>,
}

impl PageSink for MemorySink {
    fn write_page(&mut self, page: &RenderedPage) -> SlidesResult<()> {
        self.pages.push(page.html.clone());
        Ok(())
    }
}

/// Render every section statically at export width and feed the pages to `sink`.
///
/// Sections that fail to render are exported as their fallback markup. Returns the number
/// of pages written.
#[tracing::instrument(skip(deck, viewer, sink))]
pub fn export_pages(deck: &Deck, viewer: &Viewer, sink: &mut dyn PageSink) -> SlidesResult<usize> {
    let pages = render_deck(deck, viewer, &RenderOpts::export());
    for page in &pages {
        if let Some(err) = &page.error {
            tracing::warn!(section = %page.section, error = %err, "exporting fallback page");
        }
        sink.write_page(page)?;
    }
    sink.finish()?;
    Ok(pages.len())
}

#[cfg(test)]
#[path = "../../tests/unit/render/export.rs"]
mod tests;
