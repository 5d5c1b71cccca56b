use std::borrow::Cow;

/// Escape text for use in HTML element content or double-quoted attributes.
pub(crate) fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 16);
    let _ = pulldown_cmark_escape::escape_html(&mut out, s);
    Cow::Owned(out)
}

/// Compact decimal for CSS values: at most four fractional digits, no trailing zeros.
pub(crate) fn num(v: f64) -> String {
    let rounded = (v * 10_000.0).round() / 10_000.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let s = format!("{rounded:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}

#[cfg(test)]
#[path = "../../tests/unit/render/html.rs"]
mod tests;
