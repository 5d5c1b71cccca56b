use std::fmt;

pub use kurbo::{Affine, Vec2};

/// Width of the virtual canvas every section is laid out in.
pub const VIRTUAL_WIDTH: u32 = 1920;
/// Height of the virtual canvas (16:9 against [`VIRTUAL_WIDTH`]).
pub const VIRTUAL_HEIGHT: u32 = 1080;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            Debug,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl From<$name> for u64 {
            fn from(id: $name) -> u64 {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of an asset record in [`crate::AssetStore`].
    AssetId
);
entity_id!(
    /// Identifier of a section record in [`crate::SectionStore`].
    SectionId
);

/// Next free identifier given the ids currently live in a store.
///
/// Returns `max + 1`, or `1` for an empty set. Callers pass the *current* keys at every
/// allocation so ids stay dense after interleaved removals. When `u64::MAX` is already
/// live the lowest unused positive id is returned instead.
pub fn next_id<I>(existing: I) -> u64
where
    I: IntoIterator<Item = u64>,
{
    let mut ids: Vec<u64> = existing.into_iter().collect();
    let Some(max) = ids.iter().copied().max() else {
        return 1;
    };
    if let Some(next) = max.checked_add(1) {
        return next;
    }
    ids.sort_unstable();
    ids.dedup();
    let mut candidate = 1u64;
    for id in ids {
        if id > candidate {
            break;
        }
        if id == candidate {
            candidate += 1;
        }
    }
    candidate
}

/// Fixed-size coordinate space sections are laid out in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in virtual units.
    pub width: u32,
    /// Height in virtual units.
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: VIRTUAL_WIDTH,
            height: VIRTUAL_HEIGHT,
        }
    }
}

impl Canvas {
    /// Extent of the canvas along `axis`.
    pub fn extent(self, axis: Axis) -> f64 {
        match axis {
            Axis::X => f64::from(self.width),
            Axis::Y => f64::from(self.height),
        }
    }

    /// Uniform factor mapping this canvas onto `output_width` pixels.
    pub fn scale_for_width(self, output_width: f64) -> f64 {
        output_width / f64::from(self.width)
    }

    /// Output height for `output_width`, preserving the aspect ratio.
    pub fn height_for_width(self, output_width: f64) -> f64 {
        output_width * f64::from(self.height) / f64::from(self.width)
    }
}

/// Canvas axis an asset moves along.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Horizontal.
    #[default]
    X,
    /// Vertical.
    Y,
}

impl Axis {
    /// Unit-length offset of `amount` along this axis.
    pub fn offset(self, amount: f64) -> Vec2 {
        match self {
            Self::X => Vec2::new(amount, 0.0),
            Self::Y => Vec2::new(0.0, amount),
        }
    }

    /// Component of `v` along this axis.
    pub fn component(self, v: Vec2) -> f64 {
        match self {
            Self::X => v.x,
            Self::Y => v.y,
        }
    }

    /// CSS transform function translating along this axis.
    pub(crate) fn css_translate(self) -> &'static str {
        match self {
            Self::X => "translateX",
            Self::Y => "translateY",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
