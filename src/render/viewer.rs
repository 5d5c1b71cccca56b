//! Scaled, style-isolated HTML view of one section.
//!
//! A section is laid out on the fixed virtual canvas and scaled uniformly to the output
//! width. The markup is wrapped in a declarative shadow root so the section's styles and
//! the author's markdown cannot reach the host page.

use std::fmt::Write as _;

use crate::{
    animation::compose::{AnimationChain, TransformLayer, compose},
    foundation::core::{Affine, AssetId, Canvas, SectionId},
    foundation::error::{SlidesError, SlidesResult},
    model::asset::Asset,
    render::html::{escape, num},
    render::markdown::{CommonMark, MarkdownRenderer},
};

const BASE_CSS: &str = ":host{all:initial;display:block;position:relative;overflow:hidden}\
.canvas{position:absolute;top:0;left:0;overflow:hidden;background:#fff;color:#111;\
font-family:system-ui,sans-serif;font-size:32px;line-height:1.4}\
.markdown{position:relative;padding:48px 64px}\
.asset{position:absolute}\
.layer{width:100%;height:100%}\
.asset img{display:block;width:100%;height:100%;object-fit:contain}\
.asset-error{box-sizing:border-box;border:2px dashed #c33;color:#c33;font-size:14px;\
display:flex;align-items:center;justify-content:center;text-align:center}";

/// Output size and motion settings for one render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOpts {
    /// Width of the rendered view in pixels; height follows the canvas aspect ratio.
    pub output_width: f64,
    /// Emit animation layers; static renders place assets at their rest position.
    pub animate: bool,
}

impl RenderOpts {
    /// Width of the section strip thumbnails.
    pub const THUMBNAIL_WIDTH: f64 = 100.0;
    /// Width used for page export.
    pub const EXPORT_WIDTH: f64 = 1920.0;

    /// Static thumbnail.
    pub fn thumbnail() -> Self {
        Self {
            output_width: Self::THUMBNAIL_WIDTH,
            animate: false,
        }
    }

    /// Static full-resolution page.
    pub fn export() -> Self {
        Self {
            output_width: Self::EXPORT_WIDTH,
            animate: false,
        }
    }

    /// Animated view at `output_width`.
    pub fn presentation(output_width: f64) -> Self {
        Self {
            output_width,
            animate: true,
        }
    }
}

/// Markup for one section plus per-asset diagnostics.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedSection {
    /// Section rendered.
    pub section: SectionId,
    /// Self-contained HTML fragment.
    pub html: String,
    /// Output width in pixels.
    pub width: f64,
    /// Output height in pixels.
    pub height: f64,
    /// Factor mapping virtual units to output pixels.
    pub scale: f64,
    /// Assets drawn as a placeholder box, with the reason.
    pub asset_failures: Vec<(AssetId, String)>,
}

/// Section renderer: virtual canvas plus markdown collaborator.
pub struct Viewer {
    canvas: Canvas,
    markdown: Box<dyn MarkdownRenderer>,
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(Canvas::default(), Box::new(CommonMark::default()))
    }
}

impl std::fmt::Debug for Viewer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Viewer")
            .field("canvas", &self.canvas)
            .finish_non_exhaustive()
    }
}

impl Viewer {
    /// Viewer with an explicit canvas and markdown renderer.
    pub fn new(canvas: Canvas, markdown: Box<dyn MarkdownRenderer>) -> Self {
        Self { canvas, markdown }
    }

    /// Viewer over `canvas` with the default markdown renderer.
    pub fn with_canvas(canvas: Canvas) -> Self {
        Self::new(canvas, Box::new(CommonMark::default()))
    }

    /// Virtual canvas.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Transform from virtual units to output pixels.
    pub fn output_transform(&self, output_width: f64) -> Affine {
        Affine::scale(self.canvas.scale_for_width(output_width))
    }

    /// Render a section's markdown and assets (paint order) into an isolated fragment.
    ///
    /// An asset whose animation cannot be composed is drawn as a placeholder box and
    /// reported in [`RenderedSection::asset_failures`]; the rest of the section renders.
    pub fn render_section(
        &self,
        section: SectionId,
        markdown: &str,
        assets: &[(AssetId, &Asset)],
        opts: &RenderOpts,
    ) -> SlidesResult<RenderedSection> {
        if !opts.output_width.is_finite() || opts.output_width <= 0.0 {
            return Err(SlidesError::validation(format!(
                "output width must be finite and > 0, got {}",
                opts.output_width
            )));
        }

        let scale = self.canvas.scale_for_width(opts.output_width);
        let height = self.canvas.height_for_width(opts.output_width);
        let [a, b, c, d, e, f] = self.output_transform(opts.output_width).as_coeffs();

        let mut style = String::from(BASE_CSS);
        let mut body = String::new();
        let mut asset_failures = Vec::new();

        for (id, asset) in assets {
            let chain = if opts.animate {
                match compose(&asset.animation) {
                    Ok(chain) => chain,
                    Err(err) => {
                        tracing::warn!(asset = %id, error = %err, "asset animation failed");
                        write_asset_fallback(&mut body, *id, asset, &err);
                        asset_failures.push((*id, err.to_string()));
                        continue;
                    }
                }
            } else {
                AnimationChain::default()
            };
            write_asset(&mut body, &mut style, *id, asset, &chain);
        }

        let mut html = String::with_capacity(style.len() + body.len() + markdown.len() * 2 + 512);
        let _ = write!(
            html,
            "<div class=\"mds-viewer\" data-section=\"{section}\" \
             style=\"position:relative;width:{w}px;height:{h}px;overflow:hidden\">\
             <template shadowrootmode=\"open\"><style>{style}</style>\
             <div class=\"canvas\" style=\"width:{cw}px;height:{ch}px;transform-origin:0 0;\
             transform:matrix({a},{b},{c},{d},{e},{f})\">\
             <div class=\"markdown\">",
            w = num(opts.output_width),
            h = num(height),
            cw = self.canvas.width,
            ch = self.canvas.height,
            a = num(a),
            b = num(b),
            c = num(c),
            d = num(d),
            e = num(e),
            f = num(f),
        );
        html.push_str(&self.markdown.to_html(markdown));
        html.push_str("</div>");
        html.push_str(&body);
        html.push_str("</div></template></div>");

        Ok(RenderedSection {
            section,
            html,
            width: opts.output_width,
            height,
            scale,
            asset_failures,
        })
    }
}

fn keyframes_name(asset: AssetId, layer: usize) -> String {
    format!("mds-a{asset}-l{layer}")
}

/// `@keyframes` rule for one layer.
pub(crate) fn keyframes_css(name: &str, layer: &TransformLayer) -> String {
    let translate = layer.axis.css_translate();
    let mut css = format!("@keyframes {name}{{");
    for (offset, value) in layer.keyframe_offsets().iter().zip(&layer.keyframes) {
        let _ = write!(
            css,
            "{}%{{transform:{translate}({}px)}}",
            num(offset * 100.0),
            num(*value)
        );
    }
    css.push('}');
    css
}

/// `animation` shorthand running `name` as a forever-looping layer.
pub(crate) fn animation_css(name: &str, layer: &TransformLayer) -> String {
    format!(
        "animation:{name} {}s {} infinite",
        num(layer.period_s),
        layer.ease.to_css()
    )
}

fn write_box_open(out: &mut String, class: &str, id: AssetId, asset: &Asset) {
    let _ = write!(
        out,
        "<div class=\"{class}\" data-asset=\"{id}\" \
         style=\"left:{}px;top:{}px;width:{}px;height:{}px\">",
        num(asset.x),
        num(asset.y),
        num(asset.size),
        num(asset.size)
    );
}

fn write_asset(
    out: &mut String,
    style: &mut String,
    id: AssetId,
    asset: &Asset,
    chain: &AnimationChain,
) {
    write_box_open(out, "asset", id, asset);
    for (i, layer) in chain.layers.iter().enumerate() {
        let name = keyframes_name(id, i);
        style.push_str(&keyframes_css(&name, layer));
        let _ = write!(
            out,
            "<div class=\"layer\" style=\"{}\">",
            animation_css(&name, layer)
        );
    }
    let _ = write!(out, "<img src=\"{}\" alt=\"\">", escape(&asset.content));
    for _ in &chain.layers {
        out.push_str("</div>");
    }
    out.push_str("</div>");
}

fn write_asset_fallback(out: &mut String, id: AssetId, asset: &Asset, err: &SlidesError) {
    write_box_open(out, "asset asset-error", id, asset);
    let _ = write!(out, "{}</div>", escape(&err.to_string()));
}

#[cfg(test)]
#[path = "../../tests/unit/render/viewer.rs"]
mod tests;
