use serde::{Deserialize, Serialize};

use crate::{
    animation::ease::Ease,
    foundation::core::Axis,
    foundation::error::{SlidesError, SlidesResult},
};

/// Kind of timed transform a directive describes.
///
/// Unrecognised kinds survive deserialization as [`AnimationKind::Unknown`] so a single bad
/// directive does not make a whole snapshot unreadable; the compositor rejects them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnimationKind {
    /// Periodic sine oscillation around the rest position.
    Vibrate,
    /// Travel to a target offset, looping back each period.
    MoveTo,
    /// Kind name this build does not know.
    Unknown(String),
}

impl AnimationKind {
    /// Wire name of the kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Vibrate => "vibrate",
            Self::MoveTo => "moveto",
            Self::Unknown(s) => s,
        }
    }

    /// Parse a wire name; never fails.
    pub fn parse(s: &str) -> Self {
        match s {
            "vibrate" => Self::Vibrate,
            "moveto" => Self::MoveTo,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl Serialize for AnimationKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.as_str().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AnimationKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

/// One timed transform rule attached to an asset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationDirective {
    /// Directive kind.
    #[serde(rename = "type")]
    pub kind: AnimationKind,
    /// Timing curve.
    #[serde(default)]
    pub ease: Ease,
    /// Axis the motion runs along.
    #[serde(default)]
    pub direction: Axis,
    /// Period in seconds; must be `> 0`.
    pub duration: f64,
    /// Amplitude (`vibrate`) or destination offset (`moveto`) in virtual units.
    pub value: f64,
}

impl Default for AnimationDirective {
    fn default() -> Self {
        Self {
            kind: AnimationKind::Vibrate,
            ease: Ease::Linear,
            direction: Axis::X,
            duration: 1.0,
            value: 10.0,
        }
    }
}

impl AnimationDirective {
    /// Check numeric invariants (`duration > 0`, finite `value`).
    pub fn validate(&self) -> SlidesResult<()> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(SlidesError::validation(
                "animation duration must be finite and > 0",
            ));
        }
        if !self.value.is_finite() {
            return Err(SlidesError::validation("animation value must be finite"));
        }
        Ok(())
    }

    /// Return a copy with one field replaced; the result is validated.
    pub fn with_field(&self, field: AnimationField) -> SlidesResult<Self> {
        let mut next = self.clone();
        match field {
            AnimationField::Kind(kind) => next.kind = kind,
            AnimationField::Ease(ease) => next.ease = ease,
            AnimationField::Direction(axis) => next.direction = axis,
            AnimationField::Duration(d) => next.duration = d,
            AnimationField::Value(v) => next.value = v,
        }
        next.validate()?;
        Ok(next)
    }
}

/// Single-field update for [`crate::AssetStore::update_animation`].
#[derive(Clone, Debug, PartialEq)]
pub enum AnimationField {
    /// Replace the directive kind.
    Kind(AnimationKind),
    /// Replace the timing curve.
    Ease(Ease),
    /// Replace the axis.
    Direction(Axis),
    /// Replace the period in seconds.
    Duration(f64),
    /// Replace the amplitude / destination.
    Value(f64),
}

#[cfg(test)]
#[path = "../../tests/unit/animation/directive.rs"]
mod tests;
