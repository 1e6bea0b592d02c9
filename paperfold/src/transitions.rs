use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use keyframe::EasingFunction;
use keyframe::functions::BezierCurve;
use serde::{Deserialize, Serialize};

use crate::error::FoldError;

/// Configuration for a single property transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionConfig {
    pub duration: Duration,
    pub easing: Easing,
}

impl TransitionConfig {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }
}

/// Easing function for transitions.
///
/// Serialized in CSS notation: `linear`, `ease-in`, `ease-out`,
/// `ease-in-out` or `cubic-bezier(x1, y1, x2, y2)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl Easing {
    pub const fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Easing::CubicBezier { x1, y1, x2, y2 }
    }

    /// Apply easing to progress (0.0 to 1.0).
    pub fn apply(self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::CubicBezier { x1, y1, x2, y2 } => {
                BezierCurve::from([x1, y1].into(), [x2, y2].into()).y(f64::from(t)) as f32
            }
        }
    }

    /// Control points must keep x inside [0, 1] for the curve to be a function of time.
    pub fn validate(self) -> Result<(), FoldError> {
        if let Easing::CubicBezier { x1, x2, .. } = self {
            if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
                return Err(FoldError::InvalidConfiguration(format!(
                    "{self}: x control points must lie in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => write!(f, "linear"),
            Easing::EaseIn => write!(f, "ease-in"),
            Easing::EaseOut => write!(f, "ease-out"),
            Easing::EaseInOut => write!(f, "ease-in-out"),
            Easing::CubicBezier { x1, y1, x2, y2 } => {
                write!(f, "cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
        }
    }
}

impl FromStr for Easing {
    type Err = FoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "linear" => return Ok(Easing::Linear),
            "ease-in" => return Ok(Easing::EaseIn),
            "ease-out" => return Ok(Easing::EaseOut),
            "ease-in-out" => return Ok(Easing::EaseInOut),
            _ => {}
        }

        let invalid = || FoldError::InvalidConfiguration(format!("unrecognized easing '{s}'"));
        let args = s
            .strip_prefix("cubic-bezier(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;
        let points = args
            .split(',')
            .map(|p| p.trim().parse::<f32>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;
        let [x1, y1, x2, y2] = points[..] else {
            return Err(invalid());
        };

        let easing = Easing::cubic_bezier(x1, y1, x2, y2);
        easing.validate()?;
        Ok(easing)
    }
}

impl TryFrom<String> for Easing {
    type Error = FoldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Easing> for String {
    fn from(easing: Easing) -> Self {
        easing.to_string()
    }
}

/// Transitions configured on an element.
///
/// Height is interpolated by [`crate::animation::AnimationState`]; transform and
/// opacity are carried for the host stylesheet, which owns the actual values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transitions {
    pub height: Option<TransitionConfig>,
    pub transform: Option<TransitionConfig>,
    pub opacity: Option<TransitionConfig>,
}

impl Transitions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn height(mut self, duration: Duration, easing: Easing) -> Self {
        self.height = Some(TransitionConfig::new(duration, easing));
        self
    }

    pub fn transform(mut self, duration: Duration, easing: Easing) -> Self {
        self.transform = Some(TransitionConfig::new(duration, easing));
        self
    }

    pub fn opacity(mut self, duration: Duration, easing: Easing) -> Self {
        self.opacity = Some(TransitionConfig::new(duration, easing));
        self
    }

    /// Returns true if any transition is configured.
    pub fn has_any(&self) -> bool {
        self.height.is_some() || self.transform.is_some() || self.opacity.is_some()
    }

    /// CSS `transition` shorthand, e.g. `height 600ms ease-in`.
    /// Returns None when nothing is configured.
    pub fn to_css(&self) -> Option<String> {
        if !self.has_any() {
            return None;
        }
        let parts: Vec<String> = [
            ("height", self.height),
            ("transform", self.transform),
            ("opacity", self.opacity),
        ]
        .into_iter()
        .filter_map(|(property, config)| {
            config.map(|c| format!("{property} {}ms {}", c.duration.as_millis(), c.easing))
        })
        .collect();
        Some(parts.join(", "))
    }
}
