use std::path::Path;

use anyhow::Context as _;

use crate::{
    animation::directive::AnimationDirective,
    foundation::core::Canvas,
    foundation::error::{SlidesError, SlidesResult},
    layout::snap::SNAP_THRESHOLD,
    model::asset::DEFAULT_ASSET_SIZE,
    model::section::DEFAULT_SECTION_CONTENT,
};

/// Editor-wide settings consulted by deck operations.
///
/// Every field has a default, so a partial JSON file is a valid configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Virtual canvas sections are laid out in.
    pub canvas: Canvas,
    /// Center-snap distance for interactive placement.
    pub snap_threshold: f64,
    /// Markdown placed in new sections.
    pub default_section_content: String,
    /// Side of freshly uploaded assets.
    pub default_asset_size: f64,
    /// Directive appended by "add animation".
    pub default_animation: AnimationDirective,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            snap_threshold: SNAP_THRESHOLD,
            default_section_content: DEFAULT_SECTION_CONTENT.to_string(),
            default_asset_size: DEFAULT_ASSET_SIZE,
            default_animation: AnimationDirective::default(),
        }
    }
}

impl EditorConfig {
    /// Check numeric settings.
    pub fn validate(&self) -> SlidesResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(SlidesError::validation("canvas width/height must be > 0"));
        }
        if !self.snap_threshold.is_finite() || self.snap_threshold < 0.0 {
            return Err(SlidesError::validation(
                "snap_threshold must be finite and >= 0",
            ));
        }
        if !self.default_asset_size.is_finite() || self.default_asset_size < 0.0 {
            return Err(SlidesError::validation(
                "default_asset_size must be finite and >= 0",
            ));
        }
        self.default_animation.validate()
    }

    /// Load a JSON config file and validate it.
    pub fn from_json_file(path: &Path) -> SlidesResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&text)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
