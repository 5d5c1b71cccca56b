use serde::{Deserialize, Serialize};

/// Timing curve applied to each keyframe segment of an animation layer.
///
/// JSON form is either a named curve (`"linear"`, `"circIn"`, ...) or an explicit
/// `[x1, y1, x2, y2]` cubic-bezier tuple.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Ease {
    /// Identity curve.
    #[default]
    Linear,
    /// Accelerating from zero velocity.
    EaseIn,
    /// Decelerating to zero velocity.
    EaseOut,
    /// Accelerating then decelerating.
    EaseInOut,
    /// Circular ease-in.
    CircIn,
    /// Circular ease-out.
    CircOut,
    /// Circular ease-in-out.
    CircInOut,
    /// Explicit CSS-style cubic-bezier control points.
    CubicBezier {
        /// First control point x (clamped to `[0, 1]` when applied).
        x1: f64,
        /// First control point y.
        y1: f64,
        /// Second control point x (clamped to `[0, 1]` when applied).
        x2: f64,
        /// Second control point y.
        y2: f64,
    },
}

impl Ease {
    /// Every named curve, in declaration order.
    pub const NAMED: [Ease; 7] = [
        Ease::Linear,
        Ease::EaseIn,
        Ease::EaseOut,
        Ease::EaseInOut,
        Ease::CircIn,
        Ease::CircOut,
        Ease::CircInOut,
    ];

    /// Map progress `t` in `[0, 1]` through the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => cubic_bezier_ease(t, 0.42, 0.0, 1.0, 1.0),
            Self::EaseOut => cubic_bezier_ease(t, 0.0, 0.0, 0.58, 1.0),
            Self::EaseInOut => cubic_bezier_ease(t, 0.42, 0.0, 0.58, 1.0),
            Self::CircIn => 1.0 - (1.0 - t * t).sqrt(),
            Self::CircOut => (1.0 - (t - 1.0) * (t - 1.0)).sqrt(),
            Self::CircInOut => {
                if t < 0.5 {
                    0.5 * (1.0 - (1.0 - 4.0 * t * t).sqrt())
                } else {
                    let u = 2.0 * t - 2.0;
                    0.5 * ((1.0 - u * u).sqrt() + 1.0)
                }
            }
            Self::CubicBezier { x1, y1, x2, y2 } => {
                cubic_bezier_ease(t, x1.clamp(0.0, 1.0), y1, x2.clamp(0.0, 1.0), y2)
            }
        }
    }

    /// Named id used in JSON, or `None` for an explicit bezier.
    pub fn name(self) -> Option<&'static str> {
        match self {
            Self::Linear => Some("linear"),
            Self::EaseIn => Some("easeIn"),
            Self::EaseOut => Some("easeOut"),
            Self::EaseInOut => Some("easeInOut"),
            Self::CircIn => Some("circIn"),
            Self::CircOut => Some("circOut"),
            Self::CircInOut => Some("circInOut"),
            Self::CubicBezier { .. } => None,
        }
    }

    /// Parse a named curve id.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMED.into_iter().find(|e| e.name() == Some(name))
    }

    /// Equivalent CSS `animation-timing-function` value.
    ///
    /// Circular curves have no exact CSS form and use their usual bezier approximations.
    pub fn to_css(self) -> String {
        match self {
            Self::Linear => "linear".to_string(),
            Self::EaseIn => "ease-in".to_string(),
            Self::EaseOut => "ease-out".to_string(),
            Self::EaseInOut => "ease-in-out".to_string(),
            Self::CircIn => "cubic-bezier(0.55, 0, 1, 0.45)".to_string(),
            Self::CircOut => "cubic-bezier(0, 0.55, 0.45, 1)".to_string(),
            Self::CircInOut => "cubic-bezier(0.85, 0, 0.15, 1)".to_string(),
            Self::CubicBezier { x1, y1, x2, y2 } => format!(
                "cubic-bezier({}, {}, {}, {})",
                x1.clamp(0.0, 1.0),
                y1,
                x2.clamp(0.0, 1.0),
                y2
            ),
        }
    }
}

impl Serialize for Ease {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match *self {
            Self::CubicBezier { x1, y1, x2, y2 } => [x1, y1, x2, y2].serialize(serializer),
            named => named.name().unwrap_or("linear").serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Ease {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Name(String),
            Bezier([f64; 4]),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Name(s) => Self::from_name(&s)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown ease \"{s}\""))),
            Repr::Bezier([x1, y1, x2, y2]) => {
                if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
                    return Err(serde::de::Error::custom(
                        "cubic-bezier control points must be finite",
                    ));
                }
                Ok(Self::CubicBezier { x1, y1, x2, y2 })
            }
        }
    }
}

fn cubic_bezier_ease(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    // Given x, solve u with bx(u) = x, then return by(u).
    fn sample_curve(a1: f64, a2: f64, t: f64) -> f64 {
        let omt = 1.0 - t;
        3.0 * omt * omt * t * a1 + 3.0 * omt * t * t * a2 + t * t * t
    }
    fn sample_curve_derivative(a1: f64, a2: f64, t: f64) -> f64 {
        let omt = 1.0 - t;
        3.0 * omt * omt * a1 + 6.0 * omt * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
    }

    let mut t = x;
    for _ in 0..8 {
        let x_t = sample_curve(x1, x2, t) - x;
        if x_t.abs() < 1e-9 {
            return sample_curve(y1, y2, t);
        }
        let d = sample_curve_derivative(x1, x2, t);
        if d.abs() < 1e-7 {
            break;
        }
        t = (t - x_t / d).clamp(0.0, 1.0);
    }

    // Bisection fallback for flat derivatives.
    let mut lo = 0.0;
    let mut hi = 1.0;
    t = x;
    for _ in 0..40 {
        let x_t = sample_curve(x1, x2, t);
        if (x_t - x).abs() < 1e-9 {
            break;
        }
        if x_t < x {
            lo = t;
        } else {
            hi = t;
        }
        t = 0.5 * (lo + hi);
    }

    sample_curve(y1, y2, t)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
