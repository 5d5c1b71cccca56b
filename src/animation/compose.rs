//! Animation compositor: turns an asset's directive list into transform layers.
//!
//! Layer `i` wraps layer `i + 1`, so the list order is the nesting order (outermost first).
//! Every layer loops forever with its own period; because every layer is a pure
//! translation the composed offset at any instant is the sum of the layer offsets.

use std::f64::consts::TAU;

use crate::{
    animation::directive::{AnimationDirective, AnimationKind},
    animation::ease::Ease,
    foundation::core::{Affine, Axis, Vec2},
    foundation::error::{SlidesError, SlidesResult},
};

/// Number of samples in one `vibrate` period.
pub const VIBRATE_SAMPLES: usize = 60;

/// One period of the `vibrate` waveform: `sin(θ) * amplitude` for `θ` in `[0, 2π)`.
pub fn vibrate_waveform(amplitude: f64) -> Vec<f64> {
    (0..VIBRATE_SAMPLES)
        .map(|i| (TAU * i as f64 / VIBRATE_SAMPLES as f64).sin() * amplitude)
        .collect()
}

/// A single looping, time-based translation along one axis.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TransformLayer {
    /// Axis the offsets apply to.
    pub axis: Axis,
    /// Offsets evenly spaced across one period; at least one entry.
    pub keyframes: Vec<f64>,
    /// Period in seconds.
    pub period_s: f64,
    /// Curve applied between consecutive keyframes.
    pub ease: Ease,
}

impl TransformLayer {
    /// Build the layer for one directive.
    pub fn from_directive(directive: &AnimationDirective) -> SlidesResult<Self> {
        let keyframes = match &directive.kind {
            AnimationKind::Vibrate => vibrate_waveform(directive.value),
            AnimationKind::MoveTo => vec![0.0, directive.value],
            AnimationKind::Unknown(name) => {
                return Err(SlidesError::UnknownAnimationType(name.clone()));
            }
        };
        directive.validate()?;
        Ok(Self {
            axis: directive.direction,
            keyframes,
            period_s: directive.duration,
            ease: directive.ease,
        })
    }

    /// Keyframe positions as fractions of the period, matching [`Self::keyframes`].
    pub fn keyframe_offsets(&self) -> Vec<f64> {
        let n = self.keyframes.len();
        if n <= 1 {
            return vec![0.0; n];
        }
        let last = (n - 1) as f64;
        (0..n).map(|i| i as f64 / last).collect()
    }

    /// Offset along [`Self::axis`] at `t_s` seconds.
    pub fn sample(&self, t_s: f64) -> f64 {
        let n = self.keyframes.len();
        match n {
            0 => return 0.0,
            1 => return self.keyframes[0],
            _ => {}
        }

        let phase = (t_s / self.period_s).rem_euclid(1.0);
        let pos = phase * (n - 1) as f64;
        let idx = (pos.floor() as usize).min(n - 2);
        let local = pos - idx as f64;
        let a = self.keyframes[idx];
        let b = self.keyframes[idx + 1];
        a + (b - a) * self.ease.apply(local)
    }

    /// Offset vector at `t_s` seconds.
    pub fn offset_at(&self, t_s: f64) -> Vec2 {
        self.axis.offset(self.sample(t_s))
    }

    /// Largest absolute offset this layer reaches.
    pub fn peak(&self) -> f64 {
        self.keyframes.iter().fold(0.0_f64, |m, v| m.max(v.abs()))
    }
}

/// Ordered transform layers for one asset, outermost first.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct AnimationChain {
    /// Layers in nesting order.
    pub layers: Vec<TransformLayer>,
}

impl AnimationChain {
    /// `true` when the asset does not move.
    pub fn is_static(&self) -> bool {
        self.layers.is_empty()
    }

    /// Composed offset at `t_s` seconds.
    pub fn offset_at(&self, t_s: f64) -> Vec2 {
        self.layers
            .iter()
            .fold(Vec2::ZERO, |acc, layer| acc + layer.offset_at(t_s))
    }

    /// Composed transform at `t_s` seconds, outer layer applied last.
    pub fn transform_at(&self, t_s: f64) -> Affine {
        self.layers.iter().fold(Affine::IDENTITY, |outer, layer| {
            outer * Affine::translate(layer.offset_at(t_s))
        })
    }
}

/// Compose an asset's directive list into an [`AnimationChain`].
///
/// Fails with [`SlidesError::UnknownAnimationType`] on the first unknown directive kind.
pub fn compose(directives: &[AnimationDirective]) -> SlidesResult<AnimationChain> {
    let layers = directives
        .iter()
        .map(TransformLayer::from_directive)
        .collect::<SlidesResult<Vec<_>>>()?;
    Ok(AnimationChain { layers })
}

#[cfg(test)]
#[path = "../../tests/unit/animation/compose.rs"]
mod tests;
