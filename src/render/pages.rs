//! Whole-deck rendering with per-section failure isolation.

use rayon::prelude::*;

use crate::{
    deck::deck::Deck,
    foundation::core::SectionId,
    foundation::error::{SlidesError, SlidesResult},
    render::html::{escape, num},
    render::viewer::{RenderOpts, RenderedSection, Viewer},
};

/// One page of a rendered deck.
#[derive(Debug)]
pub struct RenderedPage {
    /// Position in the presentation order.
    pub index: usize,
    /// Section rendered.
    pub section: SectionId,
    /// Markup to display; fallback markup when [`Self::error`] is set.
    pub html: String,
    /// Why the section fell back, if it did.
    pub error: Option<SlidesError>,
}

impl RenderedPage {
    /// `true` when the section rendered normally.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Render one section of `deck`.
pub fn render_section(
    deck: &Deck,
    viewer: &Viewer,
    section: SectionId,
    opts: &RenderOpts,
) -> SlidesResult<RenderedSection> {
    let record = deck.sections().require(section)?;
    let assets = deck.resolve_assets(section)?;
    viewer.render_section(section, &record.content, &assets, opts)
}

/// Render every section in presentation order.
///
/// A section that fails is replaced by fallback markup of the same size; other sections
/// are unaffected.
#[tracing::instrument(skip(deck, viewer), fields(sections = deck.order().len()))]
pub fn render_deck(deck: &Deck, viewer: &Viewer, opts: &RenderOpts) -> Vec<RenderedPage> {
    deck.order()
        .ids()
        .par_iter()
        .enumerate()
        .map(|(index, &section)| match render_section(deck, viewer, section, opts) {
            Ok(rendered) => RenderedPage {
                index,
                section,
                html: rendered.html,
                error: None,
            },
            Err(err) => {
                tracing::warn!(section = %section, error = %err, "section render failed");
                RenderedPage {
                    index,
                    section,
                    html: fallback_html(viewer, section, opts, &err),
                    error: Some(err),
                }
            }
        })
        .collect()
}

fn fallback_html(viewer: &Viewer, section: SectionId, opts: &RenderOpts, err: &SlidesError) -> String {
    let width = if opts.output_width.is_finite() && opts.output_width > 0.0 {
        opts.output_width
    } else {
        RenderOpts::THUMBNAIL_WIDTH
    };
    format!(
        "<div class=\"mds-viewer mds-fallback\" data-section=\"{section}\" \
         style=\"position:relative;width:{}px;height:{}px;overflow:hidden;\
         box-sizing:border-box;border:1px solid #c33;color:#c33;font:12px sans-serif\">\
         section {section} could not be rendered: {}</div>",
        num(width),
        num(viewer.canvas().height_for_width(width)),
        escape(&err.to_string())
    )
}

/// Stack rendered pages into one standalone HTML document, one page per print sheet.
pub fn render_presentation_document(title: &str, pages: &[RenderedPage]) -> String {
    let mut doc = String::from("<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">");
    doc.push_str("<title>");
    doc.push_str(&escape(title));
    doc.push_str(
        "</title><style>body{margin:0;background:#222}\
         .pdf-section{break-after:page;margin:0 auto}</style></head><body>\n",
    );
    for page in pages {
        doc.push_str("<section class=\"pdf-section\" data-index=\"");
        doc.push_str(&page.index.to_string());
        doc.push_str("\">");
        doc.push_str(&page.html);
        doc.push_str("</section>\n");
    }
    doc.push_str("</body></html>\n");
    doc
}

#[cfg(test)]
#[path = "../../tests/unit/render/pages.rs"]
mod tests;
