use pulldown_cmark::{Event, Options, Parser};

/// Markdown-to-HTML collaborator used by the viewer.
pub trait MarkdownRenderer: Send + Sync {
    /// Render `markdown` to an HTML fragment.
    fn to_html(&self, markdown: &str) -> String;
}

/// CommonMark renderer (tables, strikethrough, task lists).
///
/// Raw HTML in the source is emitted as escaped text, never as markup.
#[derive(Clone, Copy, Debug)]
pub struct CommonMark {
    options: Options,
}

impl Default for CommonMark {
    fn default() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS,
        }
    }
}

impl MarkdownRenderer for CommonMark {
    fn to_html(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options).map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            other => other,
        });
        let mut out = String::with_capacity(markdown.len() + markdown.len() / 2);
        pulldown_cmark::html::push_html(&mut out, parser);
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/markdown.rs"]
mod tests;
